use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use time::OffsetDateTime;

use crate::cookie::expiry::{fmt_cookie_date, Expiry};
use crate::cookie::same_site::SameSite;
use crate::error::InvalidCookie;

/// Bytes escaped in the cookie value: everything outside the URI unreserved
/// set, so a space renders as `%20` and `+` as `%2B`.
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Offset applied by [`Cookie::expire`]: 365 days plus one second in the
/// past, so the result stays expired regardless of clock skew.
const EXPIRE_OFFSET_SECS: i64 = 31_536_001;

/// An immutable `Set-Cookie` value object.
///
/// Construction validates the name against the RFC 6265 token set and
/// applies the conventional attribute defaults (`Path=/`, `Secure`,
/// `HttpOnly`, `SameSite=Lax`). Every `with_*` mutator returns a new cookie
/// with exactly one attribute replaced; when the new value equals the
/// current one the receiver is returned unchanged, without any field write
/// or allocation.
///
/// ```rust
/// use setcookie::Cookie;
///
/// let cookie = Cookie::new("session", "opaque token")?;
/// assert_eq!(
///     cookie.to_string(),
///     "session=opaque%20token; Path=/; Secure; HttpOnly; SameSite=Lax"
/// );
/// # Ok::<(), setcookie::InvalidCookie>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    /// Unix seconds; `0` means session cookie.
    expires: i64,
    domain: Option<String>,
    path: Option<String>,
    secure: Option<bool>,
    http_only: Option<bool>,
    same_site: Option<SameSite>,
}

impl Cookie {
    /// Create a cookie with the default attribute set: session lifetime,
    /// no domain, `Path=/`, `Secure`, `HttpOnly`, `SameSite=Lax`.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidCookie> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            value: value.into(),
            expires: 0,
            domain: None,
            path: Some("/".to_string()),
            secure: Some(true),
            http_only: Some(true),
            same_site: Some(SameSite::Lax),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Expiry as unix seconds; `0` for a session cookie.
    pub fn expires(&self) -> i64 {
        self.expires
    }

    /// Remaining time-to-live in seconds, clamped at zero.
    pub fn max_age(&self) -> i64 {
        (self.expires - now_epoch()).max(0)
    }

    /// Whether the cookie lives for the client session only.
    pub fn is_session(&self) -> bool {
        self.expires == 0
    }

    /// A session cookie is never expired; otherwise the expiry is compared
    /// against the current time.
    pub fn is_expired(&self) -> bool {
        !self.is_session() && self.expires < now_epoch()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Whether the cookie is restricted to secure transport. Unset reads as
    /// `false`; only an explicit `true` is serialized.
    pub fn is_secure(&self) -> bool {
        self.secure == Some(true)
    }

    /// Whether the cookie is hidden from script access. Same tri-state rule
    /// as [`is_secure`](Cookie::is_secure).
    pub fn is_http_only(&self) -> bool {
        self.http_only == Some(true)
    }

    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    /// Replace the value.
    pub fn with_value(self, value: &str) -> Self {
        if value == self.value {
            return self;
        }
        Self {
            value: value.to_owned(),
            ..self
        }
    }

    /// Replace the expiry. Accepts any [`Expiry`] representation: a unix
    /// timestamp, an [`OffsetDateTime`], a date string, or an `Option` of
    /// those (`None` makes the cookie a session cookie).
    pub fn with_expires(self, expire: impl Into<Expiry>) -> Result<Self, InvalidCookie> {
        let expires = expire.into().resolve()?;
        if expires == self.expires {
            return Ok(self);
        }
        Ok(Self { expires, ..self })
    }

    /// Replace the domain. An empty string or `None` clears it.
    pub fn with_domain(self, domain: Option<&str>) -> Self {
        let domain = domain.filter(|d| !d.is_empty());
        if domain == self.domain.as_deref() {
            return self;
        }
        Self {
            domain: domain.map(str::to_owned),
            ..self
        }
    }

    /// Replace the path. An empty string or `None` clears it.
    pub fn with_path(self, path: Option<&str>) -> Self {
        let path = path.filter(|p| !p.is_empty());
        if path == self.path.as_deref() {
            return self;
        }
        Self {
            path: path.map(str::to_owned),
            ..self
        }
    }

    /// Set the `Secure` flag explicitly.
    pub fn with_secure(self, secure: bool) -> Self {
        if self.secure == Some(secure) {
            return self;
        }
        Self {
            secure: Some(secure),
            ..self
        }
    }

    /// Set the `HttpOnly` flag explicitly.
    pub fn with_http_only(self, http_only: bool) -> Self {
        if self.http_only == Some(http_only) {
            return self;
        }
        Self {
            http_only: Some(http_only),
            ..self
        }
    }

    /// Replace the `SameSite` policy; `None` drops the attribute.
    pub fn with_same_site(self, same_site: Option<SameSite>) -> Self {
        if same_site == self.same_site {
            return self;
        }
        Self { same_site, ..self }
    }

    /// Return a cookie that is already expired. An expired cookie is
    /// returned unchanged; anything else gets an expiry a year and a second
    /// in the past.
    pub fn expire(self) -> Self {
        if self.is_expired() {
            return self;
        }
        Self {
            expires: now_epoch() - EXPIRE_OFFSET_SECS,
            ..self
        }
    }
}

impl fmt::Display for Cookie {
    /// Serializes the cookie as one `Set-Cookie` header value. The
    /// attribute order is fixed: Expires, Max-Age, Domain, Path, Secure,
    /// HttpOnly, SameSite.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            self.name,
            utf8_percent_encode(&self.value, COOKIE_VALUE)
        )?;

        if !self.is_session() {
            let date = fmt_cookie_date(self.expires).ok_or(fmt::Error)?;
            write!(f, "; Expires={}; Max-Age={}", date, self.max_age())?;
        }

        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }

        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }

        if self.secure == Some(true) {
            write!(f, "; Secure")?;
        }

        if self.http_only == Some(true) {
            write!(f, "; HttpOnly")?;
        }

        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={same_site}")?;
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), InvalidCookie> {
    if name.is_empty() {
        return Err(InvalidCookie::EmptyName);
    }

    if !name.bytes().all(is_token_byte) {
        return Err(InvalidCookie::NameInvalidCharacters {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// RFC 6265 cookie-name token charset: US-ASCII without control characters,
/// separators, space, or tab.
fn is_token_byte(byte: u8) -> bool {
    matches!(byte,
        b'a'..=b'z'
        | b'A'..=b'Z'
        | b'0'..=b'9'
        | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+'
        | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~')
}

fn now_epoch() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(Cookie::new("", "v").unwrap_err(), InvalidCookie::EmptyName);
        assert_eq!(
            Cookie::new("foo@bar", "v").unwrap_err(),
            InvalidCookie::NameInvalidCharacters {
                name: "foo@bar".to_string()
            }
        );
        assert_eq!(
            Cookie::new("foo bar", "v").unwrap_err(),
            InvalidCookie::NameInvalidCharacters {
                name: "foo bar".to_string()
            }
        );
        assert!(Cookie::new("a0!#$%&'*+-.^_`|~", "v").is_ok());
    }

    #[test]
    fn test_value_is_percent_encoded() {
        let cookie = Cookie::new("name", "a value+more").unwrap();
        assert!(cookie.to_string().starts_with("name=a%20value%2Bmore;"));
    }

    #[test]
    fn test_unreserved_value_bytes_stay_verbatim() {
        let cookie = Cookie::new("name", "a-b.c_d~e").unwrap();
        assert!(cookie.to_string().starts_with("name=a-b.c_d~e;"));
    }

    #[test]
    fn test_empty_domain_normalizes_to_absent() {
        let cookie = Cookie::new("name", "v").unwrap().with_domain(Some(""));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_empty_path_normalizes_to_absent() {
        let cookie = Cookie::new("name", "v").unwrap().with_path(Some(""));
        assert_eq!(cookie.path(), None);
        assert_eq!(
            cookie.to_string(),
            "name=v; Secure; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_unset_flags_are_not_serialized() {
        let cookie = Cookie::new("name", "v")
            .unwrap()
            .with_secure(false)
            .with_http_only(false)
            .with_same_site(None);
        assert_eq!(cookie.to_string(), "name=v; Path=/");
        assert!(!cookie.is_secure());
        assert!(!cookie.is_http_only());
    }

    #[test]
    fn test_expire_offset() {
        let cookie = Cookie::new("name", "v").unwrap().expire();
        let delta = now_epoch() - cookie.expires();
        assert!((EXPIRE_OFFSET_SECS..EXPIRE_OFFSET_SECS + 5).contains(&delta));
    }
}
