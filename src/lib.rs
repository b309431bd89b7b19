//! Flattens nested data into a single map of path strings to scalar leaves.
//!
//! ```
//! use flatmap::{Config, Document, Scalar, Value, flatten_with_config};
//!
//! let input = Document::from_iter([("array".to_owned(), Value::from(vec!["one", "two"]))]);
//! let flat = flatten_with_config(&input, &Config::default().with_length_for_arrays(true))?;
//! assert_eq!(flat["array[1]"], Scalar::from("two"));
//! assert_eq!(flat["array.length"], Scalar::Int(2));
//! # Ok::<(), flatmap::Error>(())
//! ```
//!
//! Mapping entries and record fields are selected with `.name`, sequence
//! elements with `[index]`. Anything serializable can be flattened through
//! [`flatten_serialize`].

pub mod error;
pub mod flatten;
pub mod path;
pub mod value;

pub use {
    error::{Error, Result},
    flatten::{Config, flatten, flatten_serialize, flatten_value, flatten_with_config},
    path::{FieldPath, Segment},
    value::{
        Document, Mapping, Record, Value,
        json::{FlatMapJsonExt, JsonFlattenExt},
        scalar::{FlatMap, Scalar},
        ser::to_value,
    },
};

#[cfg(test)]
mod test;
