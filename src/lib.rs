//! `one-testkit` provides test helpers for OpenNebula client SDKs.
//!
//! - [`wait_until`] and friends poll a predicate under a fixed attempt budget
//! - [`resource_id`] extracts a resource ID from its XML document
//! - [`unique_name`] generates collision-resistant resource names
//! - [`user_group`] resolves a user's primary group through a [`UserDirectory`]

mod document;
mod error;
mod group;
mod id;
mod naming;
mod options;
mod poll;

pub use document::{Resource, XmlDocument};
pub use error::{BoxError, TestkitError};
pub use group::{user_group, UserDirectory, UserPoolDirectory, UserPoolError, USER_GROUP_PATH};
pub use id::{numeric_at, resource_id};
pub use naming::unique_name;
pub use options::PollOptions;
pub use poll::{
    try_wait_until_async, try_wait_until_with, wait_until, wait_until_async, wait_until_with,
};

pub type Result<T> = std::result::Result<T, TestkitError>;
