use std::{fmt, time::SystemTime};

use time::{
    format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset,
};

/// `Thu, 01 Jan 1970 00:00:00 GMT`
static UTC_STRING: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Value of the `expires` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Expires {
    /// Rendered as an RFC 1123 date in UTC.
    DateTime(#[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))] OffsetDateTime),
    /// Emitted verbatim.
    Literal(String),
}

impl Expires {
    /// The Unix epoch, used to expire a cookie immediately.
    pub const EPOCH: Self = Self::DateTime(OffsetDateTime::UNIX_EPOCH);
}

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expires::DateTime(datetime) => {
                let formatted = datetime
                    .to_offset(UtcOffset::UTC)
                    .format(UTC_STRING)
                    .map_err(|_| fmt::Error)?;
                f.write_str(&formatted)
            }
            Expires::Literal(literal) => f.write_str(literal),
        }
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(value: OffsetDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<SystemTime> for Expires {
    fn from(value: SystemTime) -> Self {
        Self::DateTime(value.into())
    }
}

impl From<String> for Expires {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Expires {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

/// Attributes attached to a cookie on write.
///
/// `None` means the attribute was left undefined: it is not emitted and may be
/// filled in from the accessor's defaults. `secure` only emits its token when
/// it is `Some(true)`; an explicit `Some(false)` still counts as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CookieOptions {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub expires: Option<Expires>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub path: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub domain: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub secure: Option<bool>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_expires<E: Into<Expires>>(mut self, expires: E) -> Self {
        self.expires = Some(expires.into());
        self
    }

    #[must_use]
    pub fn with_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_domain<D: Into<String>>(mut self, domain: D) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Returns a new record where every attribute left undefined here is taken
    /// from `defaults`. Attributes set on `self` always win.
    pub fn merged_with(&self, defaults: &CookieOptions) -> CookieOptions {
        CookieOptions {
            expires: self.expires.clone().or_else(|| defaults.expires.clone()),
            path: self.path.clone().or_else(|| defaults.path.clone()),
            domain: self.domain.clone().or_else(|| defaults.domain.clone()),
            secure: self.secure.or(defaults.secure),
        }
    }

    /// Ordered `key=value` attribute segments, `secure` as a bare token.
    pub(crate) fn segments(&self) -> Vec<String> {
        let mut segments = Vec::with_capacity(4);
        if let Some(expires) = &self.expires {
            segments.push(format!("expires={expires}"));
        }
        if let Some(path) = &self.path {
            segments.push(format!("path={path}"));
        }
        if let Some(domain) = &self.domain {
            segments.push(format!("domain={domain}"));
        }
        if self.secure == Some(true) {
            segments.push("secure".to_owned());
        }
        segments
    }
}

/// Lifts the scope of an issued cookie, so it can be deleted with matching
/// `path` and `domain`.
impl From<&cookie::Cookie<'_>> for CookieOptions {
    fn from(cookie: &cookie::Cookie<'_>) -> Self {
        CookieOptions {
            expires: cookie.expires_datetime().map(Expires::DateTime),
            path: cookie.path().map(str::to_owned),
            domain: cookie.domain().map(str::to_owned),
            secure: cookie.secure(),
        }
    }
}
