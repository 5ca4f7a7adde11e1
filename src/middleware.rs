//! Cookie emission as a pipeline step.

use crate::jar::CookieJar;
use crate::response::SetCookies;

/// A request handler producing a response.
pub trait Handler<Req> {
    type Response;

    fn handle(&mut self, request: Req) -> Self::Response;
}

impl<F, Req, Resp> Handler<Req> for F
where
    F: FnMut(Req) -> Resp,
{
    type Response = Resp;

    fn handle(&mut self, request: Req) -> Resp {
        self(request)
    }
}

/// Wraps a handler and applies a [`CookieJar`] to every response it
/// returns.
///
/// Previously set `Set-Cookie` values are removed before emission;
/// [`keep_existing`](SendCookies::keep_existing) turns the emission into a
/// pure append instead. The flag is captured at construction and the
/// adapter holds no other state.
pub struct SendCookies<H> {
    cookies: CookieJar,
    remove_existing: bool,
    inner: H,
}

impl<H> SendCookies<H> {
    pub fn new(cookies: CookieJar, inner: H) -> Self {
        Self {
            cookies,
            remove_existing: true,
            inner,
        }
    }

    /// Keep `Set-Cookie` values already present on the inner handler's
    /// response.
    pub fn keep_existing(mut self) -> Self {
        self.remove_existing = false;
        self
    }

    /// The jar applied to outgoing responses.
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn cookies_mut(&mut self) -> &mut CookieJar {
        &mut self.cookies
    }
}

impl<H, Req> Handler<Req> for SendCookies<H>
where
    H: Handler<Req>,
    H::Response: SetCookies,
{
    type Response = H::Response;

    fn handle(&mut self, request: Req) -> Self::Response {
        let response = self.inner.handle(request);
        self.cookies.send(response, self.remove_existing)
    }
}
