use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigError {
    #[error("Unsupported signature scheme `{0}`, need `pss` or `pkcs1`")]
    InvalidScheme(String),

    #[error("Invalid salt length `{0}`, need `hash`, `max`, `auto` or a decimal number")]
    InvalidSaltLen(String),

    #[error("Invalid key file `{path}`: {msg}")]
    InvalidKeyFile { path: String, msg: String },

    #[error("Validation failed.")]
    ValidationFailed,
}
