// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Normalized `links` members.
//!
//! A links member is an object keyed by relation name whose values are either
//! a bare URL string or a link object. Both forms normalize to [`Link`], with
//! `rel` defaulting to the key the link was found under. Arrays of links are
//! accepted too; their keys are the element indexes.

use serde_json::{Map, Value};

use crate::error::UsageError;
use crate::raw::{type_name, Shape};

/// One normalized link.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    rel: String,
    href: Option<String>,
    members: Map<String, Value>,
}

impl Link {
    fn from_entry(key: &str, entry: &Value) -> Result<Option<Self>, UsageError> {
        let mut members = match entry {
            Value::Null => return Ok(None),
            Value::String(href) => {
                let mut members = Map::new();
                members.insert("href".to_owned(), Value::String(href.clone()));
                members
            }
            Value::Object(members) => members.clone(),
            other => {
                return Err(UsageError::malformed(
                    format!("link `{key}`"),
                    format!("expected a string or an object, found {}", type_name(other)),
                ))
            }
        };

        // A non-string `rel` stays in the raw members; the key names the link.
        let rel = match members.get("rel") {
            None => {
                members.insert("rel".to_owned(), Value::String(key.to_owned()));
                key.to_owned()
            }
            Some(Value::String(rel)) => rel.clone(),
            Some(_) => key.to_owned(),
        };
        let href = members.get("href").and_then(Value::as_str).map(str::to_owned);

        Ok(Some(Self { rel, href, members }))
    }

    /// Relation name.
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Target URL, if the link carries one.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Any raw member of the link object (`meta`, `title`, `hreflang`, ...).
    ///
    /// `rel` and `href` are present here as well.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// All raw members in input order.
    pub fn members(&self) -> &Map<String, Value> {
        &self.members
    }
}

/// Ordered, queryable collection of [`Link`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkRegistry {
    links: Vec<Link>,
}

impl LinkRegistry {
    /// Normalize a raw links member.
    ///
    /// `null` entries mean "link not available" and are skipped.
    pub fn from_value(value: &Value) -> Result<Self, UsageError> {
        let mut links = Vec::new();
        match Shape::of(value) {
            Shape::Object(entries) => {
                for (key, entry) in entries {
                    links.extend(Link::from_entry(key, entry)?);
                }
            }
            Shape::Array(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    links.extend(Link::from_entry(&index.to_string(), entry)?);
                }
            }
            Shape::Primitive => {
                return Err(UsageError::malformed(
                    "links",
                    format!("expected an object or an array, found {}", type_name(value)),
                ))
            }
        }
        Ok(Self { links })
    }

    /// First link whose `rel` equals `rel`.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Every link whose `rel` equals `rel`, in order.
    pub fn get_all(&self, rel: &str) -> Vec<&Link> {
        self.links.iter().filter(|link| link.rel == rel).collect()
    }

    /// Whether any link has relation `rel`.
    pub fn has(&self, rel: &str) -> bool {
        self.links.iter().any(|link| link.rel == rel)
    }

    /// Iterate links in insertion order. Each call starts a fresh pass.
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkRegistry {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
