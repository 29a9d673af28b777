// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resource objects and the read-only views handed to callers.
//!
//! Attributes and relationships of a resource share one field namespace.
//! Names in [`RESERVED_NAMES`] address structural members and may not be used
//! for either; a name may also not be both an attribute and a relationship.
//! Both rules are checked while the record is built, so a document that
//! breaks them never becomes navigable.

use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::UsageError;
use crate::identifier::Identifier;
use crate::links::LinkRegistry;
use crate::raw::{expect_object, optional_object};
use crate::relationship::{RelationshipInfo, RelationshipRecord, RelationshipView};

/// Member names that attributes and relationships may not use.
pub const RESERVED_NAMES: [&str; 6] = ["type", "id", "relationships", "meta", "links", "top"];

/// Whether `name` is one of [`RESERVED_NAMES`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

const CONTEXT: &str = "resource object";

/// Stored form of one resource object.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResourceRecord {
    pub(crate) ident: Identifier,
    attributes: Map<String, Value>,
    relationships: Vec<(String, RelationshipRecord)>,
    links: Option<LinkRegistry>,
    meta: Option<Value>,
}

impl ResourceRecord {
    pub(crate) fn from_value(value: &Value) -> Result<Self, UsageError> {
        let members = expect_object(value, CONTEXT)?;
        let ident = Identifier::of_resource(members);

        let attributes = optional_object(members, "attributes", CONTEXT)?
            .cloned()
            .unwrap_or_default();
        if let Some(name) = attributes.keys().find(|name| is_reserved(name)) {
            return Err(UsageError::ReservedAttribute {
                resource: ident,
                name: name.clone(),
            });
        }

        let mut relationships = Vec::new();
        if let Some(raw) = optional_object(members, "relationships", CONTEXT)? {
            for (name, rel) in raw {
                if is_reserved(name) {
                    return Err(UsageError::ReservedRelationship {
                        resource: ident,
                        name: name.clone(),
                    });
                }
                if attributes.contains_key(name) {
                    return Err(UsageError::FieldConflict {
                        resource: ident,
                        name: name.clone(),
                    });
                }
                relationships.push((name.clone(), RelationshipRecord::from_value(name, rel)?));
            }
        }

        let links = members.get("links").map(LinkRegistry::from_value).transpose()?;
        let meta = members.get("meta").cloned();

        Ok(Self {
            ident,
            attributes,
            relationships,
            links,
            meta,
        })
    }

    fn relationship(&self, name: &str) -> Option<&RelationshipRecord> {
        self.relationships
            .iter()
            .find(|(rel, _)| rel == name)
            .map(|(_, record)| record)
    }
}

/// A named member of a resource: either an attribute value or a relationship.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<'a> {
    /// Attribute value, as decoded.
    Attribute(&'a Value),
    /// Relationship, resolved on read.
    Relationship(RelationshipView<'a>),
}

/// Read-only view over one resource of a [`Document`].
///
/// Views are cheap `Copy` handles borrowing the document. Two views compare
/// equal only when they address the same resource of the same document, so
/// `==` answers "is this the same instance", not "do these look alike".
#[derive(Clone, Copy)]
pub struct ResourceView<'a> {
    doc: &'a Document,
    slot: usize,
    record: &'a ResourceRecord,
}

impl<'a> ResourceView<'a> {
    pub(crate) fn new(doc: &'a Document, slot: usize, record: &'a ResourceRecord) -> Self {
        Self { doc, slot, record }
    }

    /// Resource type.
    pub fn type_name(&self) -> &'a str {
        self.record.ident.kind()
    }

    /// Resource id.
    pub fn id(&self) -> &'a str {
        self.record.ident.id()
    }

    /// The `(type, id)` pair.
    pub fn identifier(&self) -> &'a Identifier {
        &self.record.ident
    }

    /// Whether `self` and `other` are the same resource instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.slot == other.slot
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&'a Value> {
        self.record.attributes.get(name)
    }

    /// Whether the resource has an attribute called `name`.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.record.attributes.contains_key(name)
    }

    /// Attributes in input order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.record
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Relationship by name.
    pub fn relationship(&self, name: &str) -> Option<RelationshipView<'a>> {
        let doc = self.doc;
        self.record
            .relationships
            .iter()
            .find(|(rel, _)| rel == name)
            .map(|(rel, record)| RelationshipView::new(doc, rel, record))
    }

    /// Relationships in input order.
    pub fn relationships(&self) -> impl Iterator<Item = RelationshipView<'a>> + 'a {
        let doc = self.doc;
        self.record
            .relationships
            .iter()
            .map(move |(rel, record)| RelationshipView::new(doc, rel, record))
    }

    /// Resolved target of a to-one relationship.
    ///
    /// `None` if there is no such relationship, it has no data, it is to-many,
    /// or its target is not part of the document.
    pub fn related(&self, name: &str) -> Option<ResourceView<'a>> {
        self.relationship(name)?.data()?.one()
    }

    /// The relationship's own links and meta, kept apart from its data.
    pub fn relationship_info(&self, name: &str) -> Option<&'a RelationshipInfo> {
        self.record.relationship(name).map(|record| &record.info)
    }

    /// Attribute or relationship by name.
    ///
    /// Structural members (`type`, `id`, `links`, ...) are not fields.
    pub fn field(&self, name: &str) -> Option<Field<'a>> {
        self.attribute(name)
            .map(Field::Attribute)
            .or_else(|| self.relationship(name).map(Field::Relationship))
    }

    /// Every field: attributes first, then relationships, each in input order.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, Field<'a>)> + 'a {
        self.attributes()
            .map(|(name, value)| (name, Field::Attribute(value)))
            .chain(
                self.relationships()
                    .map(|rel| (rel.name(), Field::Relationship(rel))),
            )
    }

    /// Resource links.
    pub fn links(&self) -> Option<&'a LinkRegistry> {
        self.record.links.as_ref()
    }

    /// Resource meta.
    pub fn meta(&self) -> Option<&'a Value> {
        self.record.meta.as_ref()
    }

    /// Top-level links and meta of the owning document.
    ///
    /// `None` when the document has neither.
    pub fn top(&self) -> Option<Top<'a>> {
        let doc = self.doc;
        (doc.links().is_some() || doc.meta().is_some()).then_some(Top { doc })
    }

    /// The document this view belongs to.
    pub fn document(&self) -> &'a Document {
        self.doc
    }
}

impl PartialEq for ResourceView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ResourceView<'_> {}

impl std::fmt::Debug for ResourceView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceView")
            .field("identifier", &self.record.ident)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Back-reference to the owning document's top-level members.
#[derive(Clone, Copy)]
pub struct Top<'a> {
    doc: &'a Document,
}

impl<'a> Top<'a> {
    /// Document links.
    pub fn links(&self) -> Option<&'a LinkRegistry> {
        self.doc.links()
    }

    /// Document meta.
    pub fn meta(&self) -> Option<&'a Value> {
        self.doc.meta()
    }
}

impl std::fmt::Debug for Top<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Top")
            .field("links", &self.links())
            .field("meta", &self.meta())
            .finish()
    }
}
