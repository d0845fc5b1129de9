// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Failsafe YAML loading.
//!
//! Scalars keep their exact source text and are never resolved to numbers or
//! booleans. Only an empty value reads as null.
//!
//! ```text
//! content --> pass 1: Shape (node kinds, via deserialize_any)
//!         --> pass 2: Value (scalar text via deserialize_str, guided by Shape)
//!
//! tag: 1.10     --> "1.10"
//! sha: 1234e5   --> "1234e5"
//! mode: 010     --> "010"
//! marker: ~     --> "~"
//! service:      --> null
//! name: !x api  --> error
//! ```

use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Parse a single YAML document with every scalar kept as its source text.
///
/// Returns `Value::Null` for a document without content.
///
/// # Errors
///
/// Returns an error if the content is not valid YAML, holds more than one
/// document, uses a custom tag, or repeats a mapping key.
pub(crate) fn from_str(content: &str) -> Result<Value, serde_yaml::Error> {
    let shape = Shape::deserialize(serde_yaml::Deserializer::from_str(content))?;
    if matches!(shape, Shape::Empty) {
        return Ok(Value::Null);
    }
    Node(&shape).deserialize(serde_yaml::Deserializer::from_str(content))
}

/// Node kinds of a document.
#[derive(Debug)]
enum Shape {
    Empty,
    Scalar,
    Sequence(Vec<Self>),
    Mapping(Vec<(Self, Self)>),
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShapeVisitor)
    }
}

struct ShapeVisitor;

macro_rules! scalar_shape {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<E: de::Error>(self, _: $ty) -> Result<Shape, E> {
                Ok(Shape::Scalar)
            }
        )*
    };
}

impl<'de> Visitor<'de> for ShapeVisitor {
    type Value = Shape;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML node")
    }

    scalar_shape! {
        visit_bool: bool,
        visit_i64: i64,
        visit_i128: i128,
        visit_u64: u64,
        visit_u128: u128,
        visit_f64: f64,
        visit_str: &str,
    }

    fn visit_unit<E: de::Error>(self) -> Result<Shape, E> {
        Ok(Shape::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Shape, E> {
        Ok(Shape::Empty)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Shape, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Shape::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Shape, A::Error> {
        let mut entries = Vec::new();
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(Shape::Mapping(entries))
    }

    // serde_yaml reports custom tags as enum variants.
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Shape, A::Error> {
        let (tag, _variant) = data.variant::<String>()?;
        Err(de::Error::custom(format!("custom tag !{tag} is not supported")))
    }
}

/// Reads one node as a [`Value`], following its recorded shape.
struct Node<'a>(&'a Shape);

impl<'de> DeserializeSeed<'de> for Node<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        match self.0 {
            Shape::Empty => deserializer.deserialize_str(ScalarText).map(|text| {
                if text.is_empty() {
                    Value::Null
                } else {
                    Value::String(text)
                }
            }),
            Shape::Scalar => deserializer.deserialize_str(ScalarText).map(Value::String),
            Shape::Sequence(items) => deserializer.deserialize_seq(SequenceNodes(items)),
            Shape::Mapping(entries) => deserializer.deserialize_map(MappingNodes(entries)),
        }
    }
}

struct ScalarText;

impl Visitor<'_> for ScalarText {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }
}

struct SequenceNodes<'a>(&'a [Shape]);

impl<'de> Visitor<'de> for SequenceNodes<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {} items", self.0.len())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            let item = seq
                .next_element_seed(Node(shape))?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(items.len(), &self))?;
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }
}

struct MappingNodes<'a>(&'a [(Shape, Shape)]);

impl<'de> Visitor<'de> for MappingNodes<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a mapping of {} entries", self.0.len())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::with_capacity(self.0.len());
        for (key_shape, value_shape) in self.0 {
            let key = map
                .next_key_seed(Node(key_shape))?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(mapping.len(), &self))?;
            let value = map.next_value_seed(Node(value_shape))?;
            if mapping.contains_key(&key) {
                let name = key.as_str().unwrap_or("<complex key>");
                return Err(de::Error::custom(format!("duplicated mapping key {name}")));
            }
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }
}
