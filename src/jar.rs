//! The response cookie jar.

use http::HeaderValue;

use crate::cookie::Cookie;
use crate::response::SetCookies;

/// Name-keyed collection of cookies destined for one outgoing response.
///
/// Later [`add`](CookieJar::add) calls with an existing name overwrite the
/// prior entry in place, so enumeration order stays deterministic:
/// insertion order for new names, unchanged position on overwrite.
///
/// The jar is plain owned data with no interior mutability; hosts serving
/// requests concurrently keep one jar per in-flight response.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            cookies: Vec::new(),
        }
    }

    /// Insert a cookie, overwriting any prior entry with the same name.
    pub fn add(&mut self, cookie: Cookie) {
        match self.position(cookie.name()) {
            Some(idx) => self.cookies[idx] = cookie,
            None => self.cookies.push(cookie),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|cookie| cookie.name() == name)
    }

    /// The value of the named cookie, if present.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Cookie::value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All stored cookies, in emission order.
    pub fn all(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Remove and return the named cookie; `None` when absent.
    pub fn remove(&mut self, name: &str) -> Option<Cookie> {
        let idx = self.position(name)?;
        Some(self.cookies.remove(idx))
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Write every stored cookie onto the response as a `Set-Cookie` header
    /// value, one value per cookie, in [`all`](CookieJar::all) order.
    ///
    /// With `remove_existing`, any `Set-Cookie` values already on the
    /// response are stripped first. Call this once per outgoing response;
    /// a second call appends the same values again.
    pub fn send<R: SetCookies>(&self, response: R, remove_existing: bool) -> R {
        let mut response = response;
        if remove_existing {
            response = response.without_set_cookies();
        }

        let mut applied = 0usize;
        for cookie in &self.cookies {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    response = response.with_set_cookie(value);
                    applied += 1;
                }
                Err(_) => {
                    // Only reachable through unvalidated domain/path bytes.
                    tracing::warn!(
                        name = %cookie.name(),
                        "serialized cookie is not a valid header value, skipped"
                    );
                }
            }
        }
        tracing::debug!(count = applied, "applied Set-Cookie headers");

        response
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.cookies.iter().position(|cookie| cookie.name() == name)
    }
}

impl FromIterator<Cookie> for CookieJar {
    fn from_iter<I: IntoIterator<Item = Cookie>>(iter: I) -> Self {
        let mut jar = Self::new();
        jar.extend(iter);
        jar
    }
}

impl Extend<Cookie> for CookieJar {
    fn extend<I: IntoIterator<Item = Cookie>>(&mut self, iter: I) {
        for cookie in iter {
            self.add(cookie);
        }
    }
}

impl<'a> IntoIterator for &'a CookieJar {
    type Item = &'a Cookie;
    type IntoIter = std::slice::Iter<'a, Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.iter()
    }
}
