// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for document construction.
//!
//! Every failure surfaces while the [`Document`](crate::Document) is being
//! built. Reading a relationship never fails: a target that is not part of
//! the document reads as `None`.

use thiserror::Error;

use crate::identifier::Identifier;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller supplied input that violates a precondition.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// An internal invariant did not hold.
    #[error("implementation error: {0}")]
    Implementation(String),
}

impl Error {
    /// Returns `true` for [`Error::Usage`].
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// The usage error, if this is one.
    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(err) => Some(err),
            Self::Implementation(_) => None,
        }
    }
}

/// Ways a caller can misuse the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Input text is not JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Input is not an object, or has no `data` member.
    #[error("JSON:API documents without primary data are not supported")]
    MissingPrimaryData,

    /// An attribute uses a reserved member name.
    #[error("resource {resource} has an attribute named `{name}`, which is a reserved member name")]
    ReservedAttribute {
        /// Resource carrying the attribute.
        resource: Identifier,
        /// Offending attribute name.
        name: String,
    },

    /// A relationship uses a reserved member name.
    #[error("resource {resource} has a relationship named `{name}`, which is a reserved member name")]
    ReservedRelationship {
        /// Resource carrying the relationship.
        resource: Identifier,
        /// Offending relationship name.
        name: String,
    },

    /// The same name is used for an attribute and a relationship.
    #[error("resource {resource} uses `{name}` both as an attribute and as a relationship")]
    FieldConflict {
        /// Resource carrying both members.
        resource: Identifier,
        /// Shared name.
        name: String,
    },

    /// The same identity appears twice and duplicates are rejected.
    #[error("resource {0} appears more than once in the document")]
    DuplicateResource(Identifier),

    /// A member does not have the shape JSON:API requires.
    #[error("malformed {context}: {reason}")]
    Malformed {
        /// Where the problem was found, e.g. `resource object`.
        context: String,
        /// What was wrong.
        reason: String,
    },
}

impl UsageError {
    pub(crate) fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
