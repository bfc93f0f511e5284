//! Structured resource documents and path lookup.

use roxmltree::{Document, Node};

use crate::{Result, TestkitError};

/// A resource whose state can be queried by path.
///
/// SDK resource types implement this over their cached info document.
pub trait Resource {
    /// Returns the text at an absolute element path such as `/VM/ID`,
    /// or `None` when the path is absent.
    ///
    /// [`XmlDocument`] trims surrounding whitespace, so `<ID> 7 </ID>` yields
    /// `"7"` and never a parse error.
    fn xpath(&self, path: &str) -> Option<String>;
}

/// Validated XML text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlDocument {
    text: String,
}

impl XmlDocument {
    /// Parses and validates an XML document.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        Document::parse(&text).map_err(|err| TestkitError::Document(err.to_string()))?;
        Ok(Self { text })
    }

    /// Name of the root element.
    pub fn root_name(&self) -> Option<String> {
        let doc = Document::parse(&self.text).ok()?;
        Some(doc.root_element().tag_name().name().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Resource for XmlDocument {
    fn xpath(&self, path: &str) -> Option<String> {
        let doc = Document::parse(&self.text).ok()?;
        let node = select(doc.root_element(), path)?;
        Some(element_text(node))
    }
}

/// Resolves `/ROOT/CHILD/...` starting at `root`; each step takes the first
/// child element with the matching name.
pub(crate) fn select<'a, 'input>(
    root: Node<'a, 'input>,
    path: &str,
) -> Option<Node<'a, 'input>> {
    let mut segments = path
        .trim()
        .strip_prefix('/')?
        .split('/')
        .filter(|segment| !segment.is_empty());

    let first = segments.next()?;
    if root.tag_name().name() != first {
        return None;
    }

    segments.try_fold(root, |node, segment| {
        node.children()
            .find(|child| child.is_element() && child.tag_name().name() == segment)
    })
}

/// Concatenated, trimmed text of an element (CDATA included).
pub(crate) fn element_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use crate::{Resource, TestkitError, XmlDocument};

    const VM: &str = r#"<VM>
  <ID>42</ID>
  <NAME><![CDATA[web-01]]></NAME>
  <TEMPLATE><CPU>1</CPU><MEMORY>512</MEMORY></TEMPLATE>
  <USER_TEMPLATE/>
</VM>"#;

    #[test]
    fn reads_nested_values() {
        let doc = XmlDocument::parse(VM).expect("must parse");
        assert_eq!(doc.xpath("/VM/ID").as_deref(), Some("42"));
        assert_eq!(doc.xpath("/VM/TEMPLATE/MEMORY").as_deref(), Some("512"));
        assert_eq!(doc.xpath("/VM/NAME").as_deref(), Some("web-01"));
    }

    #[test]
    fn empty_element_is_present() {
        let doc = XmlDocument::parse(VM).expect("must parse");
        assert_eq!(doc.xpath("/VM/USER_TEMPLATE").as_deref(), Some(""));
    }

    #[test]
    fn root_mismatch_and_missing_child_are_absent() {
        let doc = XmlDocument::parse(VM).expect("must parse");
        assert_eq!(doc.xpath("/IMAGE/ID"), None);
        assert_eq!(doc.xpath("/VM/STATE"), None);
        assert_eq!(doc.xpath("VM/ID"), None);
        assert_eq!(doc.xpath("/"), None);
    }

    #[test]
    fn root_name() {
        let doc = XmlDocument::parse(VM).expect("must parse");
        assert_eq!(doc.root_name().as_deref(), Some("VM"));
    }

    #[test]
    fn rejects_malformed_xml() {
        let err = XmlDocument::parse("<VM><ID>1</VM>").expect_err("must fail");
        assert!(matches!(err, TestkitError::Document(_)));
    }
}
