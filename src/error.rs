use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported value at '{path}': {shape}")]
    UnsupportedShape { path: String, shape: String },
    #[error("map key under '{path}' is not a string: {key}")]
    NonStringKey { path: String, key: String },
    #[error("more than one value flattens to path '{path}'")]
    DuplicatePath { path: String },
    #[error("unsupported top level value, it expected a mapping or a record, found {0}")]
    UnsupportedRoot(&'static str),
    #[error("serializing value: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, self::Error>;

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Serialize(msg.to_string())
    }
}
