use {
    super::{Document, Mapping, Value, scalar::{FlatMap, Scalar}},
    crate::{error::Result, flatten::Config},
    serde_json::Number,
    tap::Pipe,
};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(number) => number_to_value(&number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(values) => values
                .into_iter()
                .map(Value::from)
                .collect::<Vec<_>>()
                .pipe(Value::Sequence),
            serde_json::Value::Object(map) => map.into_iter().collect::<Mapping>().pipe(Value::Mapping),
        }
    }
}

fn number_to_value(number: &Number) -> Value {
    number
        .as_i64()
        .map(Value::Int)
        .or_else(|| number.as_u64().map(|u| Value::out_of_range("u64", u)))
        .or_else(|| number.as_f64().map(Value::Float))
        .unwrap_or_else(|| number.to_string().pipe(Value::Opaque))
}

impl From<Scalar> for serde_json::Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(b),
            Scalar::Int(i) => serde_json::Value::from(i),
            Scalar::Float(x) => Number::from_f64(x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::String(s) => serde_json::Value::String(s),
        }
    }
}

#[extension_traits::extension(pub trait JsonFlattenExt)]
impl serde_json::Map<String, serde_json::Value> {
    /// Flattens a parsed JSON object into dotted/indexed paths.
    fn flatten_paths(&self, config: &Config) -> Result<FlatMap> {
        self.iter()
            .map(|(key, value)| (key.clone(), Value::from(value.clone())))
            .collect::<Document>()
            .pipe_ref(|document| crate::flatten::flatten_with_config(document, config))
    }
}

#[extension_traits::extension(pub trait FlatMapJsonExt)]
impl FlatMap {
    /// Converts the flattened output into a JSON object with the same keys.
    fn into_json(self) -> serde_json::Map<String, serde_json::Value> {
        self.into_iter()
            .map(|(path, scalar)| (path, serde_json::Value::from(scalar)))
            .collect()
    }
}
