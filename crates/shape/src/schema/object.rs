use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::{Node, ParseContext};
use crate::error::{FailureKind, ParseError};
use crate::options::UnknownKeys;
use crate::value::{Map, Value};

use super::modifiers::{ModifierExt, Modifiers};
use super::primitive::modifier_ext;
use super::{Schema, SchemaKind};

static MISSING: Value = Value::Undefined;

/// Keyed record with declared fields in insertion order.
///
/// A missing field is parsed as `undefined`, so optional fields tolerate
/// absence. Keys not declared are handled per [`UnknownKeys`].
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) fields: Arc<IndexMap<String, Schema>>,
    pub(crate) unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            fields: Arc::new(IndexMap::new()),
            unknown_keys: UnknownKeys::default(),
        }
    }

    /// Builds from `(name, schema)` pairs; a repeated name keeps its first
    /// position and takes the last schema.
    pub fn from_fields<K, S, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        Self {
            fields: Arc::new(
                fields
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema.into()))
                    .collect(),
            ),
            ..Self::new()
        }
    }

    /// Adds or replaces one field.
    pub fn field(&self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let mut fields = IndexMap::clone(&self.fields);
        fields.insert(name.into(), schema.into());
        Self {
            fields: Arc::new(fields),
            ..self.clone()
        }
    }

    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub const fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    fn with_policy(&self, unknown_keys: UnknownKeys) -> Self {
        Self {
            unknown_keys,
            ..self.clone()
        }
    }

    /// Copy undeclared keys into the output (the default).
    pub fn passthrough(&self) -> Self {
        self.with_policy(UnknownKeys::Passthrough)
    }

    /// Reject undeclared keys.
    pub fn strict(&self) -> Self {
        self.with_policy(UnknownKeys::Strict)
    }

    /// Drop undeclared keys from the output.
    pub fn strip(&self) -> Self {
        self.with_policy(UnknownKeys::Strip)
    }

    /// Field union where `other` wins on shared names.
    ///
    /// Shared names keep their position from `self`. The result carries no
    /// modifiers and keeps `self`'s unknown-key policy.
    pub fn merge(&self, other: &Self) -> Self {
        let mut fields = IndexMap::clone(&self.fields);
        for (name, schema) in other.fields.iter() {
            fields.insert(name.clone(), schema.clone());
        }
        Self {
            modifiers: Modifiers::default(),
            fields: Arc::new(fields),
            unknown_keys: self.unknown_keys,
        }
    }
}

modifier_ext!(ObjectSchema);

impl Node for ObjectSchema {
    fn parse_value(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let Value::Object(entries) = input else {
            return Err(ParseError::type_mismatch(SchemaKind::Object, input.kind()));
        };

        let mut out = Map::with_capacity(entries.len().max(self.fields.len()));
        for (name, schema) in self.fields.iter() {
            let present = entries.get(name);
            let parsed = schema
                .enter(present.unwrap_or(&MISSING), ctx)
                .map_err(|e| e.prefixed(name.as_str()))?;
            if present.is_some() || !parsed.is_undefined() {
                out.insert(name.clone(), parsed);
            }
        }

        let policy = ctx.options.unknown_keys.unwrap_or(self.unknown_keys);
        let mut unknown = entries
            .iter()
            .filter(|(key, _)| !self.fields.contains_key(key.as_str()));
        match policy {
            UnknownKeys::Passthrough => {
                out.extend(unknown.map(|(key, value)| (key.clone(), value.clone())));
            }
            UnknownKeys::Strip => {}
            UnknownKeys::Strict => {
                if unknown.next().is_some() {
                    let keys = entries
                        .keys()
                        .filter(|key| !self.fields.contains_key(key.as_str()))
                        .cloned()
                        .collect();
                    return Err(ParseError::new(FailureKind::UnrecognizedKeys { keys }));
                }
            }
        }
        Ok(Value::Object(out))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    fn user() -> ObjectSchema {
        object! {
            name: string(),
            age: number().optional(),
        }
    }

    #[test]
    fn missing_optional_field_is_omitted() {
        let out = user().parse_json(&json!({"name": "a"})).unwrap();
        assert_eq!(out.into_json(), json!({"name": "a"}));
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let err = user().parse_json(&json!({"age": 3})).unwrap_err();
        assert_eq!(err.to_string(), "name: required value is missing");
    }

    #[test]
    fn defaulted_field_is_present() {
        let schema = user().field("role", string().default("guest"));
        let out = schema.parse_json(&json!({"name": "a"})).unwrap();
        assert_eq!(out.into_json(), json!({"name": "a", "role": "guest"}));
    }

    #[test]
    fn declared_fields_then_passthrough_keys() {
        let out = user()
            .parse_json(&json!({"extra": 1, "age": 2, "name": "n"}))
            .unwrap();
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["name", "age", "extra"]);
    }

    #[test]
    fn strict_and_strip_policies() {
        let input = json!({"name": "n", "x": 1, "y": 2});

        let err = user().strict().parse_json(&input).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized keys: x, y");

        let out = user().strip().parse_json(&input).unwrap();
        assert_eq!(out.into_json(), json!({"name": "n"}));
    }

    #[test]
    fn options_override_node_policy() {
        let input = Value::from(json!({"name": "n", "x": 1}));
        let options = ParseOptions::default().with_unknown_keys(UnknownKeys::Strip);
        let out = user().strict().parse_with(&input, &options).unwrap();
        assert_eq!(out.into_json(), json!({"name": "n"}));
    }

    #[test]
    fn merge_keeps_left_position_and_takes_right_schema() {
        let left = object! { a: boolean(), b: number() }.nullable();
        let right = object! { c: string(), a: number() };
        let merged = left.merge(&right);

        assert_eq!(merged.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(merged.parse_json(&json!({"a": 1, "b": 2, "c": "x"})).is_ok());
        assert!(merged.parse(&Value::Null).is_err());
    }

    #[test]
    fn non_object_input() {
        let err = user().parse_json(&json!([1])).unwrap_err();
        assert_eq!(err.to_string(), "expected object, received array");
    }
}
