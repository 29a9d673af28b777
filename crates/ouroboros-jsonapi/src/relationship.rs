// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Relationship members and their lazy resolution.
//!
//! A relationship keeps its raw resource linkage and looks each identifier up
//! in the owning document's identity map every time [`RelationshipView::data`]
//! is read. Nothing is resolved while the document is being built, which is
//! what makes forward, backward and cyclic references all work the same way.

use serde_json::{Map, Value};
use tracing::trace;

use crate::document::Document;
use crate::error::UsageError;
use crate::identifier::Identifier;
use crate::links::LinkRegistry;
use crate::raw::{expect_object, type_name, Shape};
use crate::resource::ResourceView;

/// Raw resource linkage of a relationship (its `data` member).
///
/// An identifier object without a usable `type` and `id` (for example one
/// carrying only a client-local `lid`) is kept as `None` in its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Linkage {
    /// `"data": null`, an empty to-one relationship.
    Null,
    /// A single resource identifier.
    ToOne(Option<Identifier>),
    /// An array of resource identifiers, in input order.
    ToMany(Vec<Option<Identifier>>),
}

impl Linkage {
    fn from_value(value: &Value) -> Result<Self, UsageError> {
        match Shape::of(value) {
            Shape::Object(_) => Ok(Self::ToOne(Identifier::of_linkage(value))),
            Shape::Array(items) => Ok(Self::ToMany(
                items.iter().map(Identifier::of_linkage).collect(),
            )),
            Shape::Primitive if value.is_null() => Ok(Self::Null),
            Shape::Primitive => Err(UsageError::malformed(
                "relationship data",
                format!(
                    "expected null, an identifier or an array of identifiers, found {}",
                    type_name(value)
                ),
            )),
        }
    }

    /// Usable identifiers referenced by this linkage, in order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> + '_ {
        let slots: &[Option<Identifier>] = match self {
            Self::Null => &[],
            Self::ToOne(ident) => std::slice::from_ref(ident),
            Self::ToMany(idents) => idents,
        };
        slots.iter().flatten()
    }
}

/// A relationship's own `links` and `meta`, as opposed to the data it points at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationshipInfo {
    links: Option<LinkRegistry>,
    meta: Option<Value>,
}

impl RelationshipInfo {
    /// Relationship links (`self`, `related`, ...).
    pub fn links(&self) -> Option<&LinkRegistry> {
        self.links.as_ref()
    }

    /// Relationship meta.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }
}

/// Stored form of one relationship member.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RelationshipRecord {
    pub(crate) linkage: Option<Linkage>,
    pub(crate) info: RelationshipInfo,
}

impl RelationshipRecord {
    pub(crate) fn from_value(name: &str, value: &Value) -> Result<Self, UsageError> {
        let members: &Map<String, Value> =
            expect_object(value, &format!("relationship `{name}`"))?;
        let linkage = members.get("data").map(Linkage::from_value).transpose()?;
        let links = members.get("links").map(LinkRegistry::from_value).transpose()?;
        let meta = members.get("meta").cloned();
        Ok(Self {
            linkage,
            info: RelationshipInfo { links, meta },
        })
    }
}

/// Resolved relationship data.
#[derive(Clone, Debug, PartialEq)]
pub enum Related<'a> {
    /// To-one; `None` for `null` linkage or an identifier missing from the document.
    ToOne(Option<ResourceView<'a>>),
    /// To-many; one entry per raw identifier, `None` where unresolved.
    ToMany(Vec<Option<ResourceView<'a>>>),
}

impl<'a> Related<'a> {
    /// The to-one target, if this is a resolved to-one relationship.
    pub fn one(&self) -> Option<ResourceView<'a>> {
        match self {
            Self::ToOne(target) => *target,
            Self::ToMany(_) => None,
        }
    }

    /// The to-many entries, if this is a to-many relationship.
    pub fn many(&self) -> Option<&[Option<ResourceView<'a>>]> {
        match self {
            Self::ToOne(_) => None,
            Self::ToMany(targets) => Some(targets),
        }
    }

    /// Resolved targets only, skipping unresolved positions.
    pub fn resolved(&self) -> Vec<ResourceView<'a>> {
        match self {
            Self::ToOne(target) => target.iter().copied().collect(),
            Self::ToMany(targets) => targets.iter().flatten().copied().collect(),
        }
    }
}

/// Read-only view over one relationship of a resource.
#[derive(Clone, Copy)]
pub struct RelationshipView<'a> {
    doc: &'a Document,
    name: &'a str,
    record: &'a RelationshipRecord,
}

impl<'a> RelationshipView<'a> {
    pub(crate) fn new(doc: &'a Document, name: &'a str, record: &'a RelationshipRecord) -> Self {
        Self { doc, name, record }
    }

    /// Relationship name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Resolve the relationship data against the document.
    ///
    /// `None` when the relationship has no `data` member. Every call looks the
    /// identifiers up again; results are the same for the life of the document.
    pub fn data(&self) -> Option<Related<'a>> {
        let related = match self.record.linkage.as_ref()? {
            Linkage::Null => Related::ToOne(None),
            Linkage::ToOne(ident) => Related::ToOne(self.resolve(ident.as_ref())),
            Linkage::ToMany(idents) => {
                Related::ToMany(idents.iter().map(|ident| self.resolve(ident.as_ref())).collect())
            }
        };
        Some(related)
    }

    fn resolve(&self, ident: Option<&Identifier>) -> Option<ResourceView<'a>> {
        let Some(ident) = ident else {
            trace!(relationship = self.name, "identifier without a usable id");
            return None;
        };
        let found = self.doc.get(ident);
        if found.is_none() {
            trace!(relationship = self.name, target = %ident, "unresolved relationship target");
        }
        found
    }

    /// Raw resource linkage, unresolved.
    pub fn linkage(&self) -> Option<&'a Linkage> {
        self.record.linkage.as_ref()
    }

    /// The relationship's own links and meta.
    pub fn info(&self) -> &'a RelationshipInfo {
        &self.record.info
    }

    /// Relationship links.
    pub fn links(&self) -> Option<&'a LinkRegistry> {
        self.record.info.links.as_ref()
    }

    /// Relationship meta.
    pub fn meta(&self) -> Option<&'a Value> {
        self.record.info.meta.as_ref()
    }
}

impl PartialEq for RelationshipView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.record, other.record)
    }
}

impl std::fmt::Debug for RelationshipView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipView")
            .field("name", &self.name)
            .field("linkage", &self.record.linkage)
            .finish_non_exhaustive()
    }
}
