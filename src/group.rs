//! Caller group resolution through an identity lookup.

use std::future::Future;

use roxmltree::Document;

use crate::{
    document::{element_text, select},
    Resource, Result, TestkitError, XmlDocument,
};

/// Path of the primary group name in a user info document.
pub const USER_GROUP_PATH: &str = "/USER/GNAME";

/// Identity subsystem used to resolve users.
///
/// Resolution happens in two steps: a user name is mapped to its numeric ID,
/// then the user's info document is fetched by ID.
pub trait UserDirectory {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps a user name to its numeric ID.
    fn lookup_id(
        &self,
        name: &str,
    ) -> impl Future<Output = std::result::Result<u64, Self::Error>> + Send;

    /// Fetches the info document (rooted at `USER`) for a user ID.
    fn info(
        &self,
        id: u64,
    ) -> impl Future<Output = std::result::Result<XmlDocument, Self::Error>> + Send;
}

/// Returns the primary group name of `user`.
///
/// Directory failures surface as [`TestkitError::Resolution`]; a resolved
/// user without a `GNAME` field is [`TestkitError::NotFound`].
pub async fn user_group<D>(directory: &D, user: &str) -> Result<String>
where
    D: UserDirectory + ?Sized,
{
    let id = directory
        .lookup_id(user)
        .await
        .map_err(|err| resolution_error(user, err))?;
    let info = directory
        .info(id)
        .await
        .map_err(|err| resolution_error(user, err))?;

    let group = info
        .xpath(USER_GROUP_PATH)
        .ok_or_else(|| TestkitError::NotFound {
            path: USER_GROUP_PATH.to_owned(),
        })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(user, id, group = %group, "resolved user group");

    Ok(group)
}

fn resolution_error<E>(user: &str, err: E) -> TestkitError
where
    E: std::error::Error + Send + Sync + 'static,
{
    TestkitError::Resolution {
        user: user.to_owned(),
        source: Box::new(err),
    }
}

/// Lookup failures of [`UserPoolDirectory`].
#[derive(Debug, thiserror::Error)]
pub enum UserPoolError {
    #[error("no user named '{0}'")]
    UnknownUser(String),
    #[error("no user with id {0}")]
    UnknownId(u64),
}

#[derive(Clone, Debug)]
struct PoolUser {
    id: u64,
    name: String,
    info: XmlDocument,
}

/// In-memory directory built from a `USER_POOL` document.
#[derive(Clone, Debug, Default)]
pub struct UserPoolDirectory {
    users: Vec<PoolUser>,
}

impl UserPoolDirectory {
    /// Builds a directory from `<USER_POOL><USER>...</USER>...</USER_POOL>`.
    ///
    /// Every `USER` entry must carry a numeric `ID` and a `NAME`.
    ///
    /// Each `USER` subtree is re-parsed on its own, so namespace prefixes or
    /// entities declared on `USER_POOL` are not visible to it.
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc = Document::parse(text).map_err(|err| TestkitError::Document(err.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != "USER_POOL" {
            return Err(TestkitError::Document(format!(
                "expected USER_POOL root, got '{}'",
                root.tag_name().name()
            )));
        }

        let users = root
            .children()
            .filter(|node| node.is_element() && node.tag_name().name() == "USER")
            .enumerate()
            .map(|(index, node)| -> Result<PoolUser> {
                let field = |name: &str| {
                    select(node, &format!("/USER/{name}"))
                        .map(element_text)
                        .ok_or_else(|| {
                            TestkitError::Document(format!("USER entry {index} has no {name}"))
                        })
                };
                let raw_id = field("ID")?;
                let id = raw_id.parse::<u64>().map_err(|err| {
                    TestkitError::Document(format!(
                        "USER entry {index} has invalid ID '{raw_id}': {err}"
                    ))
                })?;
                let name = field("NAME")?;
                let info = XmlDocument::parse(&text[node.range()])?;
                Ok(PoolUser { id, name, info })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for UserPoolDirectory {
    type Error = UserPoolError;

    async fn lookup_id(&self, name: &str) -> std::result::Result<u64, UserPoolError> {
        self.users
            .iter()
            .find(|user| user.name == name)
            .map(|user| user.id)
            .ok_or_else(|| UserPoolError::UnknownUser(name.to_owned()))
    }

    async fn info(&self, id: u64) -> std::result::Result<XmlDocument, UserPoolError> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .map(|user| user.info.clone())
            .ok_or(UserPoolError::UnknownId(id))
    }
}
