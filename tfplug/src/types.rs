//! Core value and diagnostic types
//!
//! Terraform hands configuration to providers as a dynamically typed object
//! in which every attribute may be known, null, or not yet known. This
//! module models those values and the diagnostics a provider reports back.

use crate::error::{Result, TfplugError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// msgpack extension type Terraform uses for unknown values
const UNKNOWN_EXT_TYPE: i8 = 0;

/// Dynamic represents a Terraform value of any type
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null (attribute not set)
    Null,
    Bool(bool),
    /// Terraform numbers are carried as f64
    Number(f64),
    String(String),
    List(Vec<Dynamic>),
    /// Objects and maps share this representation
    Map(HashMap<String, Dynamic>),
    /// Value not yet known (depends on something not applied yet)
    Unknown,
}

impl Dynamic {
    pub fn as_string(&self) -> Option<&String> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown)
    }

    /// True when this value or anything nested in it is unknown
    pub fn contains_unknown(&self) -> bool {
        match self {
            Dynamic::Unknown => true,
            Dynamic::List(items) => items.iter().any(Dynamic::contains_unknown),
            Dynamic::Map(map) => map.values().any(Dynamic::contains_unknown),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(items) => items.serialize(serializer),
            Dynamic::Map(map) => map.serialize(serializer),
            Dynamic::Unknown => serializer.serialize_newtype_struct(
                rmp_serde::MSGPACK_EXT_STRUCT_NAME,
                &(UNKNOWN_EXT_TYPE, UnknownPayload),
            ),
        }
    }
}

/// Single zero byte carried by the unknown-value extension
struct UnknownPayload;

impl Serialize for UnknownPayload {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&[0])
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, IgnoredAny, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a terraform value")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Dynamic, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Dynamic::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::String(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::String(value))
            }

            // Terraform encodes unknown values as msgpack extension type 0,
            // which rmp-serde surfaces as a newtype struct of (tag, payload).
            fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<Dynamic, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let (_tag, _payload): (i8, IgnoredAny) = Deserialize::deserialize(deserializer)?;
                Ok(Dynamic::Unknown)
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Dynamic::List(items))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut values = HashMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Dynamic>()? {
                    values.insert(key, value);
                }
                Ok(Dynamic::Map(values))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// DynamicValue is the encoded config/state object exchanged with Terraform
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self::new(Dynamic::Null)
    }

    pub fn unknown() -> Self {
        Self::new(Dynamic::Unknown)
    }

    /// Builds an object value from attribute name/value pairs
    pub fn object<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Dynamic)>,
        K: Into<String>,
    {
        Self::new(Dynamic::Map(
            attributes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Terraform uses msgpack on the wire by default
    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("msgpack encoding failed: {}", e)))
    }

    pub fn decode_msgpack(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::null());
        }

        let value = rmp_serde::from_slice::<Dynamic>(data)
            .map_err(|e| TfplugError::DecodingError(format!("msgpack decoding failed: {}", e)))?;
        Ok(Self::new(value))
    }

    /// JSON has no representation for unknown values, so they are rejected
    pub fn encode_json(&self) -> Result<Vec<u8>> {
        if self.value.contains_unknown() {
            return Err(TfplugError::EncodingError(
                "json encoding failed: unknown values cannot be represented".to_string(),
            ));
        }
        serde_json::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("json encoding failed: {}", e)))
    }

    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| TfplugError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self::new(value))
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_unknown(&self) -> bool {
        self.value.is_unknown()
    }

    /// Returns the value at `path`, or None when any step is missing
    pub fn get(&self, path: &AttributePath) -> Option<&Dynamic> {
        let mut current = &self.value;
        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => m.get(name)?,
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                    l.get(usize::try_from(*idx).ok()?)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn get_string(&self, path: &AttributePath) -> Result<String> {
        let value = self
            .get(path)
            .ok_or_else(|| TfplugError::AttributeNotFound(path.to_string()))?;
        match value {
            Dynamic::String(s) => Ok(s.clone()),
            other => Err(TfplugError::TypeMismatch {
                expected: "string".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Reads a string attribute keeping Terraform's null/unknown distinction.
    /// An attribute missing from the object reads as null.
    pub fn get_string_value(&self, path: &AttributePath) -> Result<StringValue> {
        match self.get(path) {
            None | Some(Dynamic::Null) => Ok(StringValue::Null),
            Some(Dynamic::Unknown) => Ok(StringValue::Unknown),
            Some(Dynamic::String(s)) => Ok(StringValue::Known(s.clone())),
            Some(other) => Err(TfplugError::TypeMismatch {
                expected: "string".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    pub fn set_string(&mut self, path: &AttributePath, value: impl Into<String>) -> Result<()> {
        self.set(path, Dynamic::String(value.into()))
    }

    /// Sets the value at a top-level or nested object path, creating
    /// intermediate objects as needed
    pub fn set(&mut self, path: &AttributePath, value: Dynamic) -> Result<()> {
        let Some((last, parents)) = path.steps.split_last() else {
            self.value = value;
            return Ok(());
        };

        if !matches!(self.value, Dynamic::Map(_)) {
            self.value = Dynamic::Map(HashMap::new());
        }

        let mut current = &mut self.value;
        for step in parents {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => m
                    .entry(name.clone())
                    .or_insert_with(|| Dynamic::Map(HashMap::new())),
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => usize::try_from(*idx)
                    .ok()
                    .and_then(|i| l.get_mut(i))
                    .ok_or_else(|| TfplugError::Custom(format!("list index {} out of bounds", idx)))?,
                _ => return Err(TfplugError::Custom(format!("invalid path {}", path))),
            };
        }

        match (current, last) {
            (Dynamic::Map(m), AttributePathStep::AttributeName(name))
            | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => {
                m.insert(name.clone(), value);
                Ok(())
            }
            (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                let slot = usize::try_from(*idx)
                    .ok()
                    .and_then(|i| l.get_mut(i))
                    .ok_or_else(|| TfplugError::Custom(format!("list index {} out of bounds", idx)))?;
                *slot = value;
                Ok(())
            }
            _ => Err(TfplugError::Custom(format!("invalid path {}", path))),
        }
    }
}

/// StringValue is a string attribute in one of Terraform's three states
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StringValue {
    /// Not set in configuration
    #[default]
    Null,
    /// Known only after something else is applied
    Unknown,
    Known(String),
}

impl StringValue {
    pub fn is_null(&self) -> bool {
        matches!(self, StringValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StringValue::Unknown)
    }

    /// The set value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            StringValue::Known(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        StringValue::Known(s.to_string())
    }
}

impl From<String> for StringValue {
    fn from(s: String) -> Self {
        StringValue::Known(s)
    }
}

/// AttributePath locates an attribute within a DynamicValue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    /// Path to a top-level attribute
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) if i == 0 => write!(f, "{}", name)?,
                AttributePathStep::AttributeName(name) => write!(f, ".{}", name)?,
                AttributePathStep::ElementKeyString(key) => write!(f, "[{:?}]", key)?,
                AttributePathStep::ElementKeyInt(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributePathStep {
    AttributeName(String),
    /// Map element
    ElementKeyString(String),
    /// List element
    ElementKeyInt(i64),
}

/// Diagnostic is a warning or error reported back to Terraform
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Diagnostics is an ordered collection of diagnostics.
/// Checks append instead of returning early so the user sees every problem
/// in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::warning(summary, detail));
    }

    /// Error scoped to a single attribute, the framework's usual shape for
    /// configuration problems
    pub fn add_attribute_error(
        &mut self,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Diagnostic::error(summary, detail).with_attribute(path));
    }

    pub fn append(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(other);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(items: Vec<Diagnostic>) -> Self {
        Self { items }
    }
}

/// Config represents configuration values
pub type Config = DynamicValue;

/// State represents resource state values
pub type State = DynamicValue;
