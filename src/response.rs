//! The response collaborator contract.

use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue, Response};

/// Capability of a response to carry `Set-Cookie` header values.
///
/// Both operations consume and return the response, matching the immutable
/// cookie design; a host with a mutable response model implements them as
/// in-place edits on the moved value, which is what the [`http`] impls below
/// do.
pub trait SetCookies: Sized {
    /// Remove every `Set-Cookie` value.
    fn without_set_cookies(self) -> Self;

    /// Append one more `Set-Cookie` value, keeping prior ones.
    fn with_set_cookie(self, value: HeaderValue) -> Self;
}

impl SetCookies for HeaderMap {
    fn without_set_cookies(mut self) -> Self {
        self.remove(SET_COOKIE);
        self
    }

    fn with_set_cookie(mut self, value: HeaderValue) -> Self {
        self.append(SET_COOKIE, value);
        self
    }
}

impl<B> SetCookies for Response<B> {
    fn without_set_cookies(mut self) -> Self {
        self.headers_mut().remove(SET_COOKIE);
        self
    }

    fn with_set_cookie(mut self, value: HeaderValue) -> Self {
        self.headers_mut().append(SET_COOKIE, value);
        self
    }
}
