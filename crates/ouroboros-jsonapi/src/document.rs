// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The resource graph.
//!
//! A [`Document`] owns every resource record in a flat arena plus the identity
//! map from [`Identifier`] to arena slot. `included` is inserted first and
//! primary data last, then the document is frozen. Views borrow the frozen
//! document and resolve relationships through the identity map on read, so
//! the order resources appear in, and any cycles between them, do not matter.
//!
//! # Duplicates
//!
//! Under [`DuplicatePolicy::LastWins`] a repeated identity overwrites the
//! record in its existing slot. Every path to that identity therefore reaches
//! the same instance, including the primary resource when it is also listed in
//! `included`.
//!
//! [`DuplicatePolicy::Reject`] refuses a repeat within `included` or within a
//! primary data array. A primary resource that also appears in `included` is
//! still one resource: the primary copy replaces the included one under
//! either policy.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, instrument, Span};

use crate::error::{Error, Result, UsageError};
use crate::identifier::Identifier;
use crate::links::LinkRegistry;
use crate::options::{DuplicatePolicy, Options};
use crate::raw::{type_name, Shape};
use crate::resource::{ResourceRecord, ResourceView};

#[derive(Clone, Debug, PartialEq, Eq)]
enum PrimarySlots {
    Null,
    One(usize),
    Many(Vec<usize>),
}

/// Primary data of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimaryData<'a> {
    /// `"data": null`.
    Null,
    /// A single resource.
    One(ResourceView<'a>),
    /// A collection of resources, in input order.
    Many(Vec<ResourceView<'a>>),
}

/// A JSON:API document with every resource registered in one identity map.
#[derive(Clone, Debug)]
pub struct Document {
    records: Vec<ResourceRecord>,
    index: HashMap<Identifier, usize>,
    primary: PrimarySlots,
    links: Option<LinkRegistry>,
    meta: Option<Value>,
}

/// Which part of the document a record was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Included,
    Primary,
}

struct Builder {
    records: Vec<ResourceRecord>,
    index: HashMap<Identifier, usize>,
    /// Slots already claimed by primary data.
    primary: HashSet<usize>,
    duplicates: DuplicatePolicy,
}

impl Builder {
    fn insert(&mut self, record: ResourceRecord, section: Section) -> Result<usize> {
        let slot = match self.index.get(&record.ident).copied() {
            None => {
                let slot = self.records.len();
                self.index.insert(record.ident.clone(), slot);
                self.records.push(record);
                slot
            }
            Some(slot) => {
                // Primary data replacing its `included` copy is not a repeat.
                let repeat = section == Section::Included || self.primary.contains(&slot);
                if repeat && self.duplicates == DuplicatePolicy::Reject {
                    return Err(UsageError::DuplicateResource(record.ident).into());
                }
                debug!(resource = %record.ident, slot, "duplicate resource replaces earlier copy");
                let existing = self.records.get_mut(slot).ok_or_else(|| {
                    Error::Implementation(format!(
                        "identity map points past the arena: slot {slot}"
                    ))
                })?;
                *existing = record;
                slot
            }
        };
        if section == Section::Primary {
            self.primary.insert(slot);
        }
        Ok(slot)
    }

    fn insert_value(&mut self, value: &Value, section: Section) -> Result<usize> {
        let record = ResourceRecord::from_value(value)?;
        self.insert(record, section)
    }
}

impl Document {
    /// Build a document with default [`Options`].
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with(value, &Options::default())
    }

    /// Build a document.
    ///
    /// `value` must be an object with a `data` member. Fails on the first
    /// usage error; no partially built document is ever returned.
    #[instrument(level = "debug", skip_all, fields(included = tracing::field::Empty, resources = tracing::field::Empty))]
    pub fn from_value_with(value: &Value, options: &Options) -> Result<Self> {
        let members = Shape::of(value)
            .as_object()
            .ok_or(UsageError::MissingPrimaryData)?;
        let data = members.get("data").ok_or(UsageError::MissingPrimaryData)?;

        let links = members.get("links").map(LinkRegistry::from_value).transpose()?;
        let meta = members.get("meta").cloned();

        let mut builder = Builder {
            records: Vec::new(),
            index: HashMap::new(),
            primary: HashSet::new(),
            duplicates: options.duplicates,
        };

        if let Some(included) = members.get("included") {
            let Shape::Array(items) = Shape::of(included) else {
                return Err(UsageError::malformed(
                    "document",
                    format!("`included` must be an array, found {}", type_name(included)),
                )
                .into());
            };
            Span::current().record("included", items.len());
            for item in items {
                builder.insert_value(item, Section::Included)?;
            }
        }

        let primary = match Shape::of(data) {
            Shape::Object(_) => PrimarySlots::One(builder.insert_value(data, Section::Primary)?),
            Shape::Array(items) => PrimarySlots::Many(
                items
                    .iter()
                    .map(|item| builder.insert_value(item, Section::Primary))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Shape::Primitive if data.is_null() => PrimarySlots::Null,
            Shape::Primitive => {
                return Err(UsageError::malformed(
                    "document",
                    format!(
                        "`data` must be a resource object, an array or null, found {}",
                        type_name(data)
                    ),
                )
                .into())
            }
        };

        let Builder { records, index, .. } = builder;
        Span::current().record("resources", records.len());
        debug!(resources = records.len(), "document built");
        Ok(Self {
            records,
            index,
            primary,
            links,
            meta,
        })
    }

    fn view(&self, slot: usize) -> Option<ResourceView<'_>> {
        self.records
            .get(slot)
            .map(|record| ResourceView::new(self, slot, record))
    }

    /// The primary resource, when primary data is a single resource object.
    pub fn primary(&self) -> Option<ResourceView<'_>> {
        match self.primary {
            PrimarySlots::One(slot) => self.view(slot),
            PrimarySlots::Null | PrimarySlots::Many(_) => None,
        }
    }

    /// Primary data in whatever form the document carries it.
    pub fn data(&self) -> PrimaryData<'_> {
        match &self.primary {
            PrimarySlots::Null => PrimaryData::Null,
            PrimarySlots::One(slot) => self
                .view(*slot)
                .map_or(PrimaryData::Null, PrimaryData::One),
            PrimarySlots::Many(slots) => {
                PrimaryData::Many(slots.iter().filter_map(|slot| self.view(*slot)).collect())
            }
        }
    }

    /// Resource registered under `ident`.
    pub fn get(&self, ident: &Identifier) -> Option<ResourceView<'_>> {
        let slot = *self.index.get(ident)?;
        self.view(slot)
    }

    /// Resource registered under `(kind, id)`.
    pub fn lookup(&self, kind: &str, id: &str) -> Option<ResourceView<'_>> {
        self.get(&Identifier::new(kind, id))
    }

    /// Whether a resource is registered under `ident`.
    pub fn contains(&self, ident: &Identifier) -> bool {
        self.index.contains_key(ident)
    }

    /// Every resource in the graph, in first-insertion order (`included`
    /// entries, then primary data).
    pub fn resources(&self) -> impl Iterator<Item = ResourceView<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(move |(slot, record)| ResourceView::new(self, slot, record))
    }

    /// Number of distinct resources.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the graph holds no resources (primary data `null`, nothing included).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Top-level links.
    pub fn links(&self) -> Option<&LinkRegistry> {
        self.links.as_ref()
    }

    /// Top-level meta.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        crate::parse(text)
    }
}
