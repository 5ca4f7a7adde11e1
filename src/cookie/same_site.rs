use std::fmt;
use std::str::FromStr;

use crate::error::InvalidCookie;

/// Cross-site sending policy carried by the `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    None,
    Lax,
    Strict,
}

impl FromStr for SameSite {
    type Err = InvalidCookie;

    /// Parses the attribute token, accepting any capitalization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(SameSite::None),
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            _ => Err(InvalidCookie::UnrecognizedSameSite {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        })
    }
}
