// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resource identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::raw::{scalar_string, Shape};

/// A `(type, id)` pair identifying one resource within a document.
///
/// This is the key of the document's identity map. The `Display` impl renders
/// `type:id` for logging and error messages.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

impl Identifier {
    /// Build an identifier from its parts.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Resource type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Resource id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity of a resource object. Missing or non-scalar members read as "".
    pub(crate) fn of_resource(members: &Map<String, Value>) -> Self {
        Self::new(
            identity_member(members, "type").unwrap_or_default(),
            identity_member(members, "id").unwrap_or_default(),
        )
    }

    /// Identity named by one resource identifier object of a linkage.
    ///
    /// `None` unless both `type` and `id` are present scalars. A client-local
    /// `lid` never matches a registered resource.
    pub(crate) fn of_linkage(value: &Value) -> Option<Self> {
        let members = Shape::of(value).as_object()?;
        Some(Self::new(
            identity_member(members, "type")?,
            identity_member(members, "id")?,
        ))
    }
}

fn identity_member(members: &Map<String, Value>, key: &str) -> Option<String> {
    members.get(key).and_then(scalar_string)
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl<K, I> From<(K, I)> for Identifier
where
    K: Into<String>,
    I: Into<String>,
{
    fn from((kind, id): (K, I)) -> Self {
        Self::new(kind, id)
    }
}
