//! Order- and duplicate-preserving YAML node tree
//!
//! `serde_yaml::Value` rejects duplicate mapping keys while parsing, which
//! would hide duplicate column names behind a syntax error. The decoder parses
//! into this tree instead so that structural rules are reported by the
//! descriptor model.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde_yaml::{Mapping, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// Null, bool, number or string
    Scalar(Value),
    Seq(Vec<Node>),
    /// Entries in document order; keys may repeat
    Map(Vec<(Node, Node)>),
}

impl Node {
    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Value::Null))
    }

    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Renders a scalar as text; `None` for null and collections
    pub(crate) fn scalar_to_string(&self) -> Option<String> {
        match self {
            Node::Scalar(Value::String(s)) => Some(s.clone()),
            Node::Scalar(Value::Number(n)) => Some(n.to_string()),
            Node::Scalar(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Short name of the node kind, for error messages
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(Value::Null) => "null",
            Node::Scalar(Value::Bool(_)) => "bool",
            Node::Scalar(Value::Number(_)) => "number",
            Node::Scalar(Value::String(_)) => "string",
            Node::Scalar(_) => "scalar",
            Node::Seq(_) => "sequence",
            Node::Map(_) => "mapping",
        }
    }

    /// Converts into an opaque YAML value. Fails on repeated mapping keys.
    pub(crate) fn into_value(self) -> Result<Value, String> {
        match self {
            Node::Scalar(value) => Ok(value),
            Node::Seq(items) => items
                .into_iter()
                .map(Node::into_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Node::Map(entries) => {
                let mut mapping = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = key.into_value()?;
                    let value = value.into_value()?;
                    if mapping.insert(key.clone(), value).is_some() {
                        return Err(format!("duplicate key {:?}", key));
                    }
                }
                Ok(Value::Mapping(mapping))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Number(Number::from(v))))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Number(Number::from(v))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Number(Number::from(v))))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Scalar(Value::String(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Scalar(Value::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Value::Null))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Seq(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<Node, Node>()? {
            entries.push(entry);
        }
        Ok(Node::Map(entries))
    }

    fn visit_enum<A>(self, _data: A) -> Result<Node, A::Error>
    where
        A: EnumAccess<'de>,
    {
        Err(de::Error::custom("tagged values are not supported"))
    }
}
