//! Expiry inputs and the fixed `Expires` date grammar.

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::InvalidCookie;

/// `Expires=` grammar emitted in Set-Cookie: `Wed, 01-Jul-2020 00:00:00 GMT`.
static COOKIE_DATE: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT"
);

// Plain forms accepted for expiry strings, assumed UTC.
static DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
static DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// An expiry input in one of its accepted representations.
///
/// Resolution to epoch seconds happens once, at cookie construction or
/// mutation time. A value resolving at or before the epoch collapses to `0`,
/// which means a session cookie.
///
/// `From` conversions cover the usual call sites, so
/// [`Cookie::with_expires`](crate::Cookie::with_expires) can take a
/// timestamp, an [`OffsetDateTime`], a date string, or an `Option` of any of
/// those directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiry {
    /// No expiry: the cookie lives for the client session.
    Session,
    /// Absolute unix timestamp, in seconds.
    Timestamp(i64),
    /// Calendar date-time.
    DateTime(OffsetDateTime),
    /// Human-readable date string, parsed during resolution.
    DateString(String),
}

impl Expiry {
    /// Resolve to normalized epoch seconds; `0` means session.
    pub(crate) fn resolve(self) -> Result<i64, InvalidCookie> {
        let epoch = match self {
            Expiry::Session => 0,
            Expiry::Timestamp(secs) => secs,
            Expiry::DateTime(at) => at.unix_timestamp(),
            Expiry::DateString(input) => parse_date_string(&input)?,
        };
        Ok(epoch.max(0))
    }
}

impl From<i64> for Expiry {
    fn from(secs: i64) -> Self {
        Expiry::Timestamp(secs)
    }
}

impl From<OffsetDateTime> for Expiry {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::DateTime(at)
    }
}

impl From<&str> for Expiry {
    fn from(input: &str) -> Self {
        if input.is_empty() {
            Expiry::Session
        } else {
            Expiry::DateString(input.to_string())
        }
    }
}

impl From<String> for Expiry {
    fn from(input: String) -> Self {
        if input.is_empty() {
            Expiry::Session
        } else {
            Expiry::DateString(input)
        }
    }
}

impl<T: Into<Expiry>> From<Option<T>> for Expiry {
    fn from(value: Option<T>) -> Self {
        value.map_or(Expiry::Session, Into::into)
    }
}

/// Parse a date string against the accepted formats, most specific first.
fn parse_date_string(input: &str) -> Result<i64, InvalidCookie> {
    if let Ok(at) = OffsetDateTime::parse(input, &Rfc3339) {
        return Ok(at.unix_timestamp());
    }
    if let Ok(at) = OffsetDateTime::parse(input, &Rfc2822) {
        return Ok(at.unix_timestamp());
    }
    if let Ok(at) = PrimitiveDateTime::parse(input, DATE_TIME) {
        return Ok(at.assume_utc().unix_timestamp());
    }
    if let Ok(date) = Date::parse(input, DATE) {
        return Ok(date.midnight().assume_utc().unix_timestamp());
    }
    Err(InvalidCookie::UnparsableExpiry {
        input: input.to_string(),
    })
}

/// Format epoch seconds with the fixed `Expires` grammar.
pub(crate) fn fmt_cookie_date(epoch: i64) -> Option<String> {
    let at = OffsetDateTime::from_unix_timestamp(epoch).ok()?;
    at.format(COOKIE_DATE).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_resolves_to_zero() {
        assert_eq!(Expiry::Session.resolve().unwrap(), 0);
        assert_eq!(Expiry::from("").resolve().unwrap(), 0);
        assert_eq!(Expiry::from(None::<i64>).resolve().unwrap(), 0);
    }

    #[test]
    fn test_negative_timestamps_clamp_to_session() {
        assert_eq!(Expiry::Timestamp(-5).resolve().unwrap(), 0);
        assert_eq!(Expiry::Timestamp(0).resolve().unwrap(), 0);
        assert_eq!(Expiry::Timestamp(10).resolve().unwrap(), 10);
    }

    #[test]
    fn test_plain_date_parses_to_utc_midnight() {
        let epoch = Expiry::from("2020-07-01").resolve().unwrap();
        assert_eq!(epoch, 1_593_561_600);
    }

    #[test]
    fn test_date_time_string_assumed_utc() {
        let epoch = Expiry::from("2020-07-01 12:30:45").resolve().unwrap();
        assert_eq!(epoch, 1_593_606_645);
    }

    #[test]
    fn test_rfc3339_string() {
        let epoch = Expiry::from("2020-07-01T00:00:00Z").resolve().unwrap();
        assert_eq!(epoch, 1_593_561_600);
    }

    #[test]
    fn test_unparsable_string_is_rejected() {
        let err = Expiry::from("not_good").resolve().unwrap_err();
        assert_eq!(
            err,
            InvalidCookie::UnparsableExpiry {
                input: "not_good".to_string()
            }
        );
    }

    #[test]
    fn test_cookie_date_grammar() {
        assert_eq!(
            fmt_cookie_date(1_593_561_600).unwrap(),
            "Wed, 01-Jul-2020 00:00:00 GMT"
        );
        assert_eq!(
            fmt_cookie_date(0).unwrap(),
            "Thu, 01-Jan-1970 00:00:00 GMT"
        );
    }
}
