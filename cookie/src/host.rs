use std::borrow::Cow;

use http::{header, HeaderMap, HeaderValue};

use crate::error::CookieResult;

/// The environment owning the full cookie set.
///
/// A host exposes everything it holds as one `name1=value1; name2=value2`
/// string and accepts single-entry cookie strings on write. Merging a written
/// entry into the full set is the host's business.
pub trait CookieHost {
    /// The full cookie string.
    fn cookie(&self) -> Cow<'_, str>;

    /// Hands one formatted cookie string to the host.
    fn set_cookie(&mut self, cookie: &str);
}

impl<H> CookieHost for &mut H
where
    H: CookieHost + ?Sized,
{
    fn cookie(&self) -> Cow<'_, str> {
        (**self).cookie()
    }

    fn set_cookie(&mut self, cookie: &str) {
        (**self).set_cookie(cookie)
    }
}

/// A host backed by a plain string. Writing replaces the whole string, the
/// way assigning to a bare `{ cookie }` record would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringHost {
    cookie: String,
}

impl StringHost {
    pub fn new<S: Into<String>>(cookie: S) -> Self {
        Self {
            cookie: cookie.into(),
        }
    }

    pub fn into_inner(self) -> String {
        self.cookie
    }
}

impl From<String> for StringHost {
    fn from(cookie: String) -> Self {
        Self::new(cookie)
    }
}

impl From<&str> for StringHost {
    fn from(cookie: &str) -> Self {
        Self::new(cookie)
    }
}

impl CookieHost for StringHost {
    fn cookie(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.cookie)
    }

    fn set_cookie(&mut self, cookie: &str) {
        cookie.clone_into(&mut self.cookie);
    }
}

/// A host on the HTTP side of a request.
///
/// Cookies are read from the request's `Cookie` headers and every write is
/// appended to an outgoing header map as a `Set-Cookie` header.
#[derive(Debug, Clone, Default)]
pub struct HeaderHost {
    cookie: String,
    set_cookie: HeaderMap,
}

impl HeaderHost {
    /// Collects every `Cookie` header of the request into one string.
    /// Header values that are not visible ASCII are skipped.
    pub fn from_request(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get_all(header::COOKIE)
            .into_iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            cookie,
            set_cookie: HeaderMap::new(),
        }
    }

    /// Appends `cookie` as a `Set-Cookie` header, or fails if it cannot be
    /// carried in a header value.
    pub fn try_set_cookie(&mut self, cookie: &str) -> CookieResult<()> {
        let value = HeaderValue::from_str(cookie)?;
        self.set_cookie.append(header::SET_COOKIE, value);
        Ok(())
    }

    /// The `Set-Cookie` headers written so far.
    pub fn set_cookie_headers(&self) -> &HeaderMap {
        &self.set_cookie
    }

    /// Moves the written `Set-Cookie` headers onto a response header map.
    pub fn apply(self, headers: &mut HeaderMap) {
        for value in self.set_cookie.get_all(header::SET_COOKIE) {
            headers.append(header::SET_COOKIE, value.clone());
        }
    }
}

impl CookieHost for HeaderHost {
    fn cookie(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.cookie)
    }

    fn set_cookie(&mut self, cookie: &str) {
        if let Err(_err) = self.try_set_cookie(cookie) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "Dropping cookie the host cannot carry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_host_replaces_on_write() {
        let mut host = StringHost::new("a=1; b=2");
        host.set_cookie("c=3");
        assert_eq!(host.cookie(), "c=3");
        assert_eq!(host.into_inner(), "c=3");
    }

    #[test]
    fn test_string_host_default_is_empty() {
        assert_eq!(StringHost::default().cookie(), "");
    }

    fn swap<H: CookieHost>(mut host: H, cookie: &str) -> String {
        let previous = host.cookie().into_owned();
        host.set_cookie(cookie);
        previous
    }

    #[test]
    fn test_borrowed_host() {
        let mut host = StringHost::from("a=1");
        assert_eq!(swap(&mut host, "b=2"), "a=1");
        assert_eq!(host.cookie(), "b=2");
    }

    #[test]
    fn test_header_host_joins_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, "session=1234; theme=light".parse().unwrap());
        headers.append(header::COOKIE, "lang=fr".parse().unwrap());

        let host = HeaderHost::from_request(&headers);
        assert_eq!(host.cookie(), "session=1234; theme=light; lang=fr");
    }

    #[test]
    fn test_header_host_without_cookies() {
        let host = HeaderHost::from_request(&HeaderMap::new());
        assert_eq!(host.cookie(), "");
    }

    #[test]
    fn test_header_host_appends_set_cookie() {
        let mut host = HeaderHost::default();
        host.set_cookie("a=1; path=/");
        host.set_cookie("b=2");

        let values: Vec<_> = host
            .set_cookie_headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(values, ["a=1; path=/", "b=2"]);

        let mut response = HeaderMap::new();
        host.apply(&mut response);
        assert_eq!(response.get_all(header::SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_header_host_rejects_invalid_value() {
        let mut host = HeaderHost::default();
        assert!(host.try_set_cookie("a=1; path=/\n").is_err());

        host.set_cookie("a=1; path=/\r\nx");
        assert!(host.set_cookie_headers().is_empty());
    }
}
