// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read JSON:API documents as a navigable resource graph.
//!
//! `ouroboros-jsonapi` takes a decoded JSON:API document (primary `data`,
//! optional `included`, optional top-level `links`/`meta`) and registers every
//! resource in one identity map keyed by `(type, id)`. Relationships are read
//! through that map, so following `article → author → articles → article`
//! lands on the very same [`ResourceView`] the walk started from.
//!
//! ```
//! let doc = ouroboros_jsonapi::parse(r#"{
//!     "data": {"type": "articles", "id": "1", "attributes": {"title": "T"},
//!              "relationships": {"author": {"data": {"type": "people", "id": "9"}}}},
//!     "included": [{"type": "people", "id": "9", "attributes": {"firstName": "Dan"}}]
//! }"#)?;
//!
//! let article = doc.primary().expect("single primary resource");
//! assert_eq!(article.attribute("title"), Some(&"T".into()));
//!
//! let author = article.related("author").expect("author is included");
//! assert_eq!(author.attribute("firstName"), Some(&"Dan".into()));
//! # Ok::<(), ouroboros_jsonapi::Error>(())
//! ```
//!
//! # Field namespace
//!
//! Attributes and relationships of a resource share one namespace, see
//! [`ResourceView::field`]. The structural names in [`RESERVED_NAMES`] are
//! off limits, and a name cannot be both an attribute and a relationship.
//! Violations are reported as [`UsageError`]s when the document is built.
//!
//! # Partial graphs
//!
//! A relationship whose target is not in the document reads as `None`. This
//! is not an error: servers routinely omit resources the client did not ask
//! to include.
#![forbid(unsafe_code)]

mod document;
mod error;
mod identifier;
mod links;
mod options;
mod raw;
mod relationship;
mod resource;

pub use document::{Document, PrimaryData};
pub use error::{Error, Result, UsageError};
pub use identifier::Identifier;
pub use links::{Link, LinkRegistry};
pub use options::{DuplicatePolicy, Options};
pub use relationship::{Linkage, Related, RelationshipInfo, RelationshipView};
pub use resource::{is_reserved, Field, ResourceView, Top, RESERVED_NAMES};

use serde_json::Value;

/// Decode `text` as JSON and build a [`Document`] from it.
///
/// The primary resource is [`Document::primary`].
pub fn parse(text: &str) -> Result<Document> {
    parse_with(text, &Options::default())
}

/// [`parse`] with explicit [`Options`].
pub fn parse_with(text: &str, options: &Options) -> Result<Document> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| UsageError::InvalidJson(err.to_string()))?;
    consume_with(&value, options)
}

/// Build a [`Document`] from an already decoded JSON value.
///
/// Anything other than an object with a `data` member is rejected with
/// [`UsageError::MissingPrimaryData`].
pub fn consume(value: &Value) -> Result<Document> {
    consume_with(value, &Options::default())
}

/// [`consume`] with explicit [`Options`].
pub fn consume_with(value: &Value, options: &Options) -> Result<Document> {
    Document::from_value_with(value, options)
}
