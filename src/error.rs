use thiserror::Error;

/// Validation failure raised while constructing or mutating a cookie.
///
/// All validation is eager: a failing constructor or `with_*` call returns
/// an error and leaves no partially built cookie behind. Jar lookups on an
/// unknown name are `Option`, never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCookie {
    #[error("cookie name is empty")]
    EmptyName,
    #[error("cookie name `{name}` contains characters outside the RFC 6265 token set")]
    NameInvalidCharacters { name: String },
    #[error("cookie expiry date `{input}` is not parsable")]
    UnparsableExpiry { input: String },
    #[error("SameSite value `{input}` is not one of None, Lax, Strict")]
    UnrecognizedSameSite { input: String },
}
