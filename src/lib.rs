//! # setcookie
//!
//! RFC 6265 `Set-Cookie` modeling for HTTP responses.
//!
//! `setcookie` provides an immutable cookie value object with eager
//! validation, a name-keyed jar that emits its contents as response
//! headers, and a middleware adapter that performs the emission as a
//! pipeline step.
//!
//! ## Features
//!
//! - **Cookie values**: immutable attribute bag with copy-on-write
//!   mutators and RFC 6265 name validation
//! - **Serialization**: deterministic `Set-Cookie` header strings with
//!   percent-encoded values and the fixed `Expires` date grammar
//! - **Jar**: replace-by-name storage with stable emission order
//! - **Response contract**: a small capability trait, implemented for
//!   [`http::HeaderMap`] and [`http::Response`], that test fakes can
//!   implement too
//!
//! ## Quick Start
//!
//! ```rust
//! use setcookie::{Cookie, CookieJar};
//!
//! let mut jar = CookieJar::new();
//! jar.add(Cookie::new("session", "opaque-token")?);
//!
//! let headers = jar.send(http::HeaderMap::new(), true);
//! assert_eq!(
//!     headers[http::header::SET_COOKIE],
//!     "session=opaque-token; Path=/; Secure; HttpOnly; SameSite=Lax"
//! );
//! # Ok::<(), setcookie::InvalidCookie>(())
//! ```
//!
//! ## Modules
//!
//! - [`cookie`] - The cookie value object, expiry inputs, SameSite policy
//! - [`jar`] - The response cookie jar
//! - [`response`] - The response collaborator contract
//! - [`middleware`] - Cookie emission as a pipeline step
//! - [`error`] - Validation errors
//!
//! This crate does not parse `Cookie:` request headers back into structured
//! cookies; it models the response side only.

pub mod cookie;
pub mod error;
pub mod jar;
pub mod middleware;
pub mod response;

pub use cookie::{Cookie, Expiry, SameSite};
pub use error::InvalidCookie;
pub use jar::CookieJar;
pub use middleware::{Handler, SendCookies};
pub use response::SetCookies;
