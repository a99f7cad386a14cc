//! Data models for the question bank frontend.
//!
//! Wire types mirror the backend's snake_case JSON; the frontend server's own
//! responses use camelCase like the browser scripts expect.

mod entry;
mod question;
mod questionnaire;
mod status;
mod user;

pub use entry::*;
pub use question::*;
pub use questionnaire::*;
pub use status::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Accepts either a single string or a list of strings.
///
/// Older records store `subject`/`use` as a plain string.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) if value.trim().is_empty() => Vec::new(),
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
        OneOrMany::Null(()) => Vec::new(),
    })
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
