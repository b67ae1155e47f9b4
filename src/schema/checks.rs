//! Check descriptors and the check registry
//!
//! A check is a named predicate plus an opaque parameter bag. The codec never
//! evaluates checks; it only needs to know whether a check's parameters can be
//! written in the text format, which is what the registry answers.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use super::errors::{SchemaError, SchemaResult};

/// A named, possibly-parameterized validation predicate
#[derive(Debug, Clone, PartialEq)]
pub struct CheckDescriptor {
    name: String,
    params: Value,
}

impl CheckDescriptor {
    /// Create a check without parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Value::Null,
        }
    }

    /// Create a check with a single parameter
    pub fn with_param(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            params: value.into(),
        }
    }

    /// Create a check with named parameters, kept in the given order
    pub fn with_params<K, V, I>(name: impl Into<String>, params: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut mapping = Mapping::new();
        for (key, value) in params {
            mapping.insert(Value::String(key.into()), value.into());
        }
        Self {
            name: name.into(),
            params: Value::Mapping(mapping),
        }
    }

    /// Create a check from an already-built parameter value
    pub fn from_raw(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn greater_than(min_value: impl Into<Value>) -> Self {
        Self::with_param("greater_than", min_value)
    }

    pub fn greater_than_or_equal_to(min_value: impl Into<Value>) -> Self {
        Self::with_param("greater_than_or_equal_to", min_value)
    }

    pub fn less_than(max_value: impl Into<Value>) -> Self {
        Self::with_param("less_than", max_value)
    }

    pub fn less_than_or_equal_to(max_value: impl Into<Value>) -> Self {
        Self::with_param("less_than_or_equal_to", max_value)
    }

    pub fn equal_to(value: impl Into<Value>) -> Self {
        Self::with_param("equal_to", value)
    }

    pub fn in_range(min_value: impl Into<Value>, max_value: impl Into<Value>) -> Self {
        Self::with_params(
            "in_range",
            [("min_value", min_value.into()), ("max_value", max_value.into())],
        )
    }

    pub fn isin<V: Into<Value>>(allowed: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Value> = allowed.into_iter().map(Into::into).collect();
        Self::with_param("isin", Value::Sequence(values))
    }

    pub fn str_matches(pattern: impl Into<String>) -> Self {
        Self::with_param("str_matches", Value::String(pattern.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter value; `Value::Null` when the check takes none
    pub fn params(&self) -> &Value {
        &self.params
    }
}

/// How a check kind lays out its parameters in the text format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamStyle {
    /// No parameters; encoded as `null`
    Bare,
    /// One positional parameter; encoded as a scalar or sequence
    Single,
    /// Named parameters; encoded as a mapping whose keys come from this list
    Fields(Vec<String>),
}

/// A check kind known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckKind {
    pub name: String,
    pub params: ParamStyle,
}

impl CheckKind {
    pub fn new(name: impl Into<String>, params: ParamStyle) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    fn fields(name: &str, fields: &[&str]) -> Self {
        Self::new(
            name,
            ParamStyle::Fields(fields.iter().map(|f| f.to_string()).collect()),
        )
    }
}

/// Registry of check kinds the encoder accepts.
///
/// Custom predicates are added with [`CheckRegistry::register`].
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    kinds: BTreeMap<String, CheckKind>,
}

impl CheckRegistry {
    /// An empty registry; every check is rejected on encode
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in checks
    pub fn builtin() -> Self {
        let single = [
            "equal_to",
            "not_equal_to",
            "greater_than",
            "greater_than_or_equal_to",
            "less_than",
            "less_than_or_equal_to",
            "isin",
            "notin",
            "str_matches",
            "str_contains",
            "str_startswith",
            "str_endswith",
            "unique_values_eq",
        ];

        let mut kinds = BTreeMap::new();
        for name in single {
            kinds.insert(name.to_string(), CheckKind::new(name, ParamStyle::Single));
        }
        kinds.insert(
            "in_range".to_string(),
            CheckKind::fields(
                "in_range",
                &["min_value", "max_value", "include_min", "include_max"],
            ),
        );
        kinds.insert(
            "str_length".to_string(),
            CheckKind::fields("str_length", &["min_value", "max_value"]),
        );

        Self { kinds }
    }

    /// Adds a custom check kind. Names must be unique.
    pub fn register(&mut self, kind: CheckKind) -> SchemaResult<()> {
        if self.kinds.contains_key(&kind.name) {
            return Err(SchemaError::invalid_descriptor(format!(
                "check kind '{}' is already registered",
                kind.name
            )));
        }
        self.kinds.insert(kind.name.clone(), kind);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CheckKind> {
        self.kinds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Verifies that a check can be written in the text format.
    ///
    /// Parameters must be plain YAML. Registered kinds must also match their
    /// parameter shape; unregistered names pass through as opaque values.
    pub fn validate(&self, check: &CheckDescriptor) -> SchemaResult<()> {
        let params = check.params();
        ensure_untagged(check.name(), params)?;

        let Some(kind) = self.get(check.name()) else {
            return Ok(());
        };

        match (&kind.params, params) {
            (ParamStyle::Bare, Value::Null) => Ok(()),
            (ParamStyle::Bare, _) => Err(SchemaError::unsupported_type(format!(
                "check '{}' takes no parameters",
                check.name()
            ))),
            (ParamStyle::Single, Value::Null | Value::Mapping(_)) => {
                Err(SchemaError::unsupported_type(format!(
                    "check '{}' takes exactly one parameter",
                    check.name()
                )))
            }
            (ParamStyle::Single, _) => Ok(()),
            (ParamStyle::Fields(fields), Value::Mapping(mapping)) if !mapping.is_empty() => {
                for key in mapping.keys() {
                    let known = key
                        .as_str()
                        .map(|k| fields.iter().any(|f| f == k))
                        .unwrap_or(false);
                    if !known {
                        return Err(SchemaError::unsupported_type(format!(
                            "check '{}' has no parameter {:?}",
                            check.name(),
                            key
                        )));
                    }
                }
                Ok(())
            }
            (ParamStyle::Fields(_), _) => Err(SchemaError::unsupported_type(format!(
                "check '{}' takes named parameters",
                check.name()
            ))),
        }
    }
}

/// Tagged YAML values (`!custom ...`) have no place in the schema format.
fn ensure_untagged(check: &str, value: &Value) -> SchemaResult<()> {
    match value {
        Value::Tagged(tagged) => Err(SchemaError::unsupported_type(format!(
            "check '{}' parameter uses tagged value {}",
            check, tagged.tag
        ))),
        Value::Sequence(items) => items.iter().try_for_each(|v| ensure_untagged(check, v)),
        Value::Mapping(mapping) => mapping
            .iter()
            .try_for_each(|(k, v)| ensure_untagged(check, k).and(ensure_untagged(check, v))),
        _ => Ok(()),
    }
}
