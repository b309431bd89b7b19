//! The input side of flattening: a closed tree of data shapes.

use {indexmap::IndexMap, std::fmt, tap::Pipe};

pub mod json;
pub mod scalar;
pub mod ser;

/// A nested value of any supported shape, plus the two shapes flattening must
/// be able to see in order to handle them: values of statically unknown type
/// and values that are not data at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Record(Record),
    /// A value behind a container of unknown static type (`Option` when
    /// produced by [`ser::to_value`]). `None` is the absent value.
    Dynamic(Option<Box<Value>>),
    /// Something that has no data representation (a callback, a handle, an
    /// integer outside the `i64` range). Carries a description of it.
    Opaque(String),
}

static NULL: Value = Value::Null;

/// The root of a flatten call: string keys to arbitrary values.
pub type Document = IndexMap<String, Value>;

/// Associative container. Keys are full [`Value`]s so that non-string keys can
/// be represented, and rejected, rather than coerced on construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(Vec<(Value, Value)>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Vec<_>>()
            .pipe(Mapping)
    }
}

/// Fixed-shape value with named fields, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_field(name, value);
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Value {
    /// Short name of the shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Record(_) => "record",
            Value::Dynamic(_) => "dynamic",
            Value::Opaque(_) => "opaque",
        }
    }

    /// An integer that has no `i64` representation.
    pub(crate) fn out_of_range(kind: &str, value: impl fmt::Display) -> Self {
        format!("{kind} value {value} does not fit in a 64-bit signed integer").pipe(Value::Opaque)
    }

    pub fn dynamic(inner: impl Into<Value>) -> Self {
        inner.into().pipe(Box::new).pipe(Some).pipe(Value::Dynamic)
    }

    /// Strips any number of [`Value::Dynamic`] layers. An absent value comes
    /// back as [`Value::Null`].
    pub fn unwrapped(&self) -> &Value {
        match self {
            Value::Dynamic(Some(inner)) => inner.unwrapped(),
            Value::Dynamic(None) => &NULL,
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Sequence(values) => write!(f, "<sequence of {}>", values.len()),
            Value::Mapping(mapping) => write!(f, "<mapping of {}>", mapping.len()),
            Value::Record(record) => write!(f, "<record {}>", record.name),
            Value::Dynamic(Some(inner)) => fmt::Display::fmt(inner, f),
            Value::Dynamic(None) => f.write_str("<absent>"),
            Value::Opaque(description) => f.write_str(description),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Int(i64::from(value))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(Into::into).collect::<Vec<_>>().pipe(Value::Sequence)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(|v| v.into().pipe(Box::new)).pipe(Value::Dynamic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrapped_strips_nested_dynamics() {
        let value = Value::dynamic(Value::dynamic(7));
        assert_eq!(value.unwrapped(), &Value::Int(7));
        assert_eq!(Value::Dynamic(None).unwrapped(), &Value::Null);
        assert_eq!(Value::dynamic(Value::Dynamic(None)).unwrapped(), &Value::Null);
    }

    #[test]
    fn integer_widths_are_normalized() {
        assert_eq!(Value::from(3u8), Value::Int(3));
        assert_eq!(Value::from(-3i16), Value::Int(-3));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    }

    #[test]
    fn record_keeps_declaration_order() {
        let record = Record::new("Person").field("Name", "astaxie").field("Age", 30);
        assert_eq!(
            record.fields().map(|(name, _)| name).collect::<Vec<_>>(),
            ["Name", "Age"]
        );
        assert_eq!(record.name(), "Person");
    }

    #[test]
    fn mapping_accepts_any_key_shape() {
        let mapping = [(Value::Int(1), Value::from("one"))]
            .into_iter()
            .collect::<Mapping>();
        assert_eq!(mapping.iter().next().map(|(k, _)| k), Some(&Value::Int(1)));
    }
}
