use crate::{Resource, Result, TestkitError};

/// Extracts the numeric ID of a resource from `/{root}/ID`.
///
/// ```
/// use one_testkit::{resource_id, XmlDocument};
///
/// let doc = XmlDocument::parse("<IMAGE><ID>7</ID></IMAGE>").unwrap();
/// assert_eq!(resource_id(&doc, "IMAGE").unwrap(), 7);
/// ```
pub fn resource_id<R: Resource + ?Sized>(resource: &R, root: &str) -> Result<u64> {
    numeric_at(resource, &format!("/{root}/ID"))
}

/// Reads an unsigned integer at `path`.
///
/// An absent path is [`TestkitError::NotFound`]; a value that does not parse
/// is [`TestkitError::Parse`].
pub fn numeric_at<R: Resource + ?Sized>(resource: &R, path: &str) -> Result<u64> {
    let value = resource.xpath(path).ok_or_else(|| TestkitError::NotFound {
        path: path.to_owned(),
    })?;

    value.parse::<u64>().map_err(|source| TestkitError::Parse {
        path: path.to_owned(),
        value,
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{numeric_at, resource_id, Resource, TestkitError, XmlDocument};

    struct MapResource(HashMap<&'static str, &'static str>);

    impl Resource for MapResource {
        fn xpath(&self, path: &str) -> Option<String> {
            self.0.get(path).map(|value| (*value).to_owned())
        }
    }

    #[test]
    fn reads_id_under_root() {
        let doc = XmlDocument::parse("<HOST><ID>12</ID><NAME>h1</NAME></HOST>")
            .expect("must parse");
        assert_eq!(resource_id(&doc, "HOST").expect("must extract"), 12);
    }

    #[test]
    fn missing_id_is_not_found() {
        let doc = XmlDocument::parse("<HOST><NAME>h1</NAME></HOST>").expect("must parse");
        let err = resource_id(&doc, "HOST").expect_err("must fail");
        match err {
            TestkitError::NotFound { path } => assert_eq!(path, "/HOST/ID"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn padded_id_is_trimmed() {
        let doc = XmlDocument::parse("<VM><ID> 7 </ID></VM>").expect("must parse");
        assert_eq!(resource_id(&doc, "VM").expect("must extract"), 7);
    }

    #[test]
    fn wrong_root_is_not_found() {
        let doc = XmlDocument::parse("<HOST><ID>1</ID></HOST>").expect("must parse");
        let err = resource_id(&doc, "VM").expect_err("must fail");
        assert!(matches!(err, TestkitError::NotFound { .. }));
    }

    #[test]
    fn non_numeric_id_is_parse_error() {
        let doc = XmlDocument::parse("<VNET><ID>abc</ID></VNET>").expect("must parse");
        let err = resource_id(&doc, "VNET").expect_err("must fail");
        match err {
            TestkitError::Parse { path, value, .. } => {
                assert_eq!(path, "/VNET/ID");
                assert_eq!(value, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn negative_and_empty_values_are_parse_errors() {
        let resource = MapResource(HashMap::from([("/A/ID", "-1"), ("/B/ID", "")]));
        assert!(matches!(
            resource_id(&resource, "A"),
            Err(TestkitError::Parse { .. })
        ));
        assert!(matches!(
            resource_id(&resource, "B"),
            Err(TestkitError::Parse { .. })
        ));
    }

    #[test]
    fn numeric_at_works_on_trait_objects() {
        let resource = MapResource(HashMap::from([("/VM/STATE", "3")]));
        let dyn_resource: &dyn Resource = &resource;
        assert_eq!(numeric_at(dyn_resource, "/VM/STATE").expect("must read"), 3);
    }
}
