// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tagged classification of decoded JSON values.
//!
//! Everything that walks raw document members goes through [`Shape`] so the
//! object/array/primitive distinction is made once, explicitly.

use serde_json::{Map, Value};

use crate::error::UsageError;

/// Coarse shape of a decoded JSON value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape<'a> {
    /// `null`, booleans, numbers and strings.
    Primitive,
    /// JSON array.
    Array(&'a [Value]),
    /// JSON object.
    Object(&'a Map<String, Value>),
}

impl<'a> Shape<'a> {
    pub(crate) fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Array(items),
            Value::Object(members) => Self::Object(members),
            _ => Self::Primitive,
        }
    }

    pub(crate) fn as_object(self) -> Option<&'a Map<String, Value>> {
        match self {
            Self::Object(members) => Some(members),
            Self::Array(_) | Self::Primitive => None,
        }
    }
}

/// Short name of the JSON type of `value`, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `value` to be an object.
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    context: &str,
) -> Result<&'a Map<String, Value>, UsageError> {
    Shape::of(value).as_object().ok_or_else(|| {
        UsageError::malformed(context, format!("expected an object, found {}", type_name(value)))
    })
}

/// Optional member that must be an object when present.
pub(crate) fn optional_object<'a>(
    members: &'a Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<Option<&'a Map<String, Value>>, UsageError> {
    members
        .get(key)
        .map(|value| {
            expect_object(value, context).map_err(|_| {
                UsageError::malformed(
                    context,
                    format!("`{key}` must be an object, found {}", type_name(value)),
                )
            })
        })
        .transpose()
}

/// Text form of a scalar identity member.
///
/// Strings are taken as-is; numbers and booleans use their JSON spelling so
/// `"id": 1` and `"id": "1"` name the same resource. `null`, arrays and
/// objects have no text form.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_classify_as_objects() {
        let cases = [
            (json!(null), false),
            (json!(false), false),
            (json!(true), false),
            (json!(0), false),
            (json!(1), false),
            (json!(0.1), false),
            (json!(""), false),
            (json!("string"), false),
            (json!([]), false),
            (json!([{}]), false),
            (json!({}), true),
        ];
        for (value, expected) in cases {
            assert_eq!(Shape::of(&value).as_object().is_some(), expected, "{value}");
        }
    }

    #[test]
    fn scalars_have_a_text_form() {
        assert_eq!(scalar_string(&json!("9")).as_deref(), Some("9"));
        assert_eq!(scalar_string(&json!(9)).as_deref(), Some("9"));
        assert_eq!(scalar_string(&json!(-1.5)).as_deref(), Some("-1.5"));
        assert_eq!(scalar_string(&json!(true)).as_deref(), Some("true"));
        assert_eq!(scalar_string(&json!(null)), None);
        assert_eq!(scalar_string(&json!([1])), None);
        assert_eq!(scalar_string(&json!({"id": 1})), None);
    }

    #[test]
    fn optional_object_absent_is_none() {
        let obj = json!({"type": "x"});
        let got = optional_object(obj.as_object().unwrap(), "attributes", "resource object").unwrap();
        assert!(got.is_none());
    }
}
