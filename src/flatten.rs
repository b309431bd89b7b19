use {
    crate::{
        error::{Error, Result},
        path::{FieldPath, LENGTH_KEY},
        value::{Document, Mapping, Value, scalar::{FlatMap, Scalar}, ser::to_value},
    },
    indexmap::map::Entry,
    serde::{Deserialize, Serialize},
    tap::{Pipe, TapFallible},
    tracing::{debug, instrument, trace},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emit an extra `<path>.length` leaf with the element count of every
    /// sequence.
    pub add_length_for_arrays: bool,
}

impl Config {
    pub fn with_length_for_arrays(mut self, enabled: bool) -> Self {
        self.add_length_for_arrays = enabled;
        self
    }
}

struct Flattener<'c> {
    config: &'c Config,
    out: FlatMap,
}

impl<'c> Flattener<'c> {
    fn new(config: &'c Config) -> Self {
        Self {
            config,
            out: FlatMap::new(),
        }
    }

    fn leaf(&mut self, path: &FieldPath<'_>, scalar: Scalar) -> Result<()> {
        match self.out.entry(path.to_string()) {
            Entry::Occupied(occupied) => Err(Error::DuplicatePath {
                path: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                trace!(path = %vacant.key(), ?scalar, "leaf");
                vacant.insert(scalar);
                Ok(())
            }
        }
    }

    fn dispatch<'v>(&mut self, path: &FieldPath<'v>, value: &'v Value) -> Result<()> {
        match value {
            Value::Dynamic(Some(inner)) => self.dispatch(path, inner),
            Value::Null | Value::Dynamic(None) => self.leaf(path, Scalar::Null),
            Value::Bool(b) => self.leaf(path, Scalar::Bool(*b)),
            Value::Int(i) => self.leaf(path, Scalar::Int(*i)),
            Value::Float(x) => self.leaf(path, Scalar::Float(*x)),
            Value::String(s) => self.leaf(path, Scalar::String(s.clone())),
            Value::Mapping(mapping) => self.mapping(path, mapping),
            Value::Sequence(values) => self.sequence(path, values),
            Value::Record(record) => record
                .fields()
                .try_for_each(|(name, value)| self.dispatch(&path.join(name), value)),
            Value::Opaque(shape) => Err(Error::UnsupportedShape {
                path: path.to_string(),
                shape: shape.clone(),
            }),
        }
    }

    fn mapping<'v>(&mut self, path: &FieldPath<'v>, mapping: &'v Mapping) -> Result<()> {
        mapping.iter().try_for_each(|(key, value)| match key.unwrapped() {
            Value::String(key) => self.dispatch(&path.join(key.as_str()), value),
            other => Err(Error::NonStringKey {
                path: path.to_string(),
                key: format!("{other} ({})", other.shape_name()),
            }),
        })
    }

    fn sequence<'v>(&mut self, path: &FieldPath<'v>, values: &'v [Value]) -> Result<()> {
        values
            .iter()
            .enumerate()
            .try_for_each(|(idx, value)| self.dispatch(&path.join(idx), value))?;
        match self.config.add_length_for_arrays {
            true => values
                .len()
                .pipe(i64::try_from)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::out_of_range("sequence length", values.len()))
                .pipe_ref(|length| self.dispatch(&path.join(LENGTH_KEY), length)),
            false => Ok(()),
        }
    }

    fn finish(self, result: Result<()>) -> Result<FlatMap> {
        result
            .map(|()| self.out)
            .tap_err(|error| debug!(%error, "flattening failed"))
    }
}

/// Flattens `input` with the default [`Config`].
pub fn flatten(input: &Document) -> Result<FlatMap> {
    flatten_with_config(input, &Config::default())
}

/// Flattens every root entry of `input` into one map, using the root key as
/// the first path segment. Fails as a whole on the first bad value.
///
/// Two values landing on the same path (a root key `"a.b"` next to
/// `{"a": {"b": ..}}`) fail with [`Error::DuplicatePath`] instead of one
/// overwriting the other.
#[instrument(skip_all, fields(keys = input.len(), ?config))]
pub fn flatten_with_config(input: &Document, config: &Config) -> Result<FlatMap> {
    let mut flattener = Flattener::new(config);
    input
        .iter()
        .try_for_each(|(key, value)| flattener.dispatch(&FieldPath::root(key.as_str()), value))
        .pipe(|result| flattener.finish(result))
}

/// Like [`flatten_with_config`], with the root given as a [`Value`]. The root
/// must be a mapping with string keys or a record, whose fields become the
/// root keys.
#[instrument(skip_all, fields(shape = value.shape_name(), ?config))]
pub fn flatten_value(value: &Value, config: &Config) -> Result<FlatMap> {
    let mut flattener = Flattener::new(config);
    match value.unwrapped() {
        root @ (Value::Mapping(_) | Value::Record(_)) => flattener.dispatch(&FieldPath::default(), root),
        other => Err(Error::UnsupportedRoot(other.shape_name())),
    }
    .pipe(|result| flattener.finish(result))
}

/// Lowers `value` through [`to_value`] and flattens the result.
pub fn flatten_serialize<T>(value: &T, config: &Config) -> Result<FlatMap>
where
    T: Serialize + ?Sized,
{
    to_value(value).and_then(|value| flatten_value(&value, config))
}
