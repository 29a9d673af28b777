// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for resolution order independence and to-many shape.
#![allow(clippy::unwrap_used)]

use ouroboros_jsonapi::{consume, parse};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Ring of `n` resources, each pointing at the next, plus the primary pointing at all.
fn ring(n: usize) -> (Value, Vec<Value>) {
    let included: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "type": "nodes",
                "id": i.to_string(),
                "attributes": {"index": i},
                "relationships": {"next": {"data": {"type": "nodes", "id": ((i + 1) % n).to_string()}}},
            })
        })
        .collect();
    let members: Vec<Value> = (0..n)
        .map(|i| json!({"type": "nodes", "id": i.to_string()}))
        .collect();
    let primary = json!({
        "type": "rings",
        "id": "r",
        "relationships": {"members": {"data": members}},
    });
    (primary, included)
}

proptest! {
    #[test]
    fn included_order_does_not_change_resolution(
        included in (1usize..24).prop_flat_map(|n| Just(ring(n).1).prop_shuffle()),
    ) {
        let n = included.len();
        let (primary, _) = ring(n);
        let doc = consume(&json!({"data": primary, "included": included})).unwrap();
        let root = doc.primary().unwrap();
        let members = root.relationship("members").unwrap().data().unwrap();
        let members = members.many().unwrap();
        prop_assert_eq!(members.len(), n);
        for (i, member) in members.iter().enumerate() {
            let member = member.unwrap();
            let index = json!(i);
            prop_assert_eq!(member.attribute("index"), Some(&index));
            let next = member.related("next").unwrap();
            prop_assert!(next.ptr_eq(&members[(i + 1) % n].unwrap()));
        }
    }

    #[test]
    fn to_many_length_matches_linkage(present in prop::collection::vec(any::<bool>(), 0..32)) {
        let linkage: Vec<Value> = (0..present.len())
            .map(|i| json!({"type": "items", "id": i.to_string()}))
            .collect();
        let included: Vec<Value> = present
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| json!({"type": "items", "id": i.to_string()}))
            .collect();
        let doc = consume(&json!({
            "data": {"type": "lists", "id": "1", "relationships": {"items": {"data": linkage}}},
            "included": included,
        }))
        .unwrap();
        let data = doc.primary().unwrap().relationship("items").unwrap().data().unwrap();
        let items = data.many().unwrap();
        prop_assert_eq!(items.len(), present.len());
        for (item, keep) in items.iter().zip(&present) {
            prop_assert_eq!(item.is_some(), *keep);
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,64}") {
        let _ = parse(&text);
    }
}
