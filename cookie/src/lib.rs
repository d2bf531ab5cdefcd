pub mod builder;
mod encoding;
pub mod error;
mod host;
mod options;

use builder::CookieAccessorBuilder;
pub use encoding::{decode_component, encode_component};
use error::{CookieError, CookieResult};
pub use host::{CookieHost, HeaderHost, StringHost};
pub use options::{CookieOptions, Expires};

/// Reads, writes and deletes entries of a host's flat cookie string.
///
/// The host string is parsed once, when the accessor is built. Writes go
/// straight to the host and are never reflected in later reads on the same
/// accessor; build a new one to observe them.
#[derive(Debug)]
pub struct CookieAccessor<H = StringHost> {
    host: H,
    entries: Vec<String>,
    defaults: Option<CookieOptions>,
}

impl<H: CookieHost> CookieAccessor<H> {
    pub fn builder(host: H) -> CookieAccessorBuilder<H> {
        CookieAccessorBuilder::new(host)
    }

    pub fn new(host: H) -> Self {
        Self::builder(host).build()
    }

    /// Gets the decoded value of the first entry named `name`.
    ///
    /// Returns `None` if no entry matches, or if the matched value does not
    /// decode to UTF-8.
    pub fn get(&self, name: &str) -> Option<String> {
        match self.try_get(name) {
            Ok(value) => value,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "Ignoring undecodable cookie");
                None
            }
        }
    }

    /// Gets the decoded value of the first entry named `name`.
    /// Returns an error if the matched value does not decode to UTF-8.
    ///
    /// `name` is compared raw, without encoding. The scan stops at the first
    /// empty entry.
    pub fn try_get(&self, name: &str) -> CookieResult<Option<String>> {
        let prefix = format!("{name}=");
        let raw = self
            .entries
            .iter()
            .take_while(|entry| !entry.is_empty())
            .find_map(|entry| entry.strip_prefix(prefix.as_str()));

        let Some(raw) = raw else {
            return Ok(None);
        };

        let value = decode_component(raw).map_err(|source| CookieError::Decode {
            name: name.to_owned(),
            source,
        })?;
        Ok(Some(value.into_owned()))
    }

    /// Checks whether [`get`](Self::get) would find an entry named `name`.
    pub fn contains(&self, name: &str) -> bool {
        let prefix = format!("{name}=");
        self.entries
            .iter()
            .take_while(|entry| !entry.is_empty())
            .any(|entry| entry.starts_with(&prefix))
    }

    /// Writes a cookie to the host and returns the exact string written.
    ///
    /// `name` and `value` are percent-encoded. Attributes follow in a fixed
    /// order: `expires`, `path`, `domain`, `secure`. Attributes `options`
    /// leaves undefined are taken from the accessor's defaults.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, value, options)))]
    pub fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> String {
        let merged;
        let options = match &self.defaults {
            Some(defaults) => {
                merged = options.merged_with(defaults);
                &merged
            }
            None => options,
        };

        let mut pairs = vec![format!(
            "{}={}",
            encode_component(name),
            encode_component(value)
        )];
        pairs.extend(options.segments());
        let cookie = pairs.join("; ");

        #[cfg(feature = "tracing")]
        tracing::debug!(attributes = pairs.len() - 1, "Writing cookie to host");

        self.host.set_cookie(&cookie);
        cookie
    }

    /// Deletes a cookie by writing it with an empty value, expired at the
    /// Unix epoch. Any `expires` in `options` is replaced.
    ///
    /// The host only drops the cookie when `path` and `domain` match the ones
    /// it was set with.
    pub fn del(&mut self, name: &str, options: &CookieOptions) -> String {
        let options = CookieOptions {
            expires: Some(Expires::EPOCH),
            ..options.clone()
        };
        self.set(name, "", &options)
    }

    /// The raw entries parsed at construction, in host order.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn defaults(&self) -> Option<&CookieOptions> {
        self.defaults.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl Default for CookieAccessor<StringHost> {
    fn default() -> Self {
        Self::new(StringHost::default())
    }
}

/// Splits on `;` along with any whitespace around it. Whitespace at the very
/// start and end of the string is kept.
pub(crate) fn split_entries(cookie: &str) -> Vec<String> {
    let last = cookie.matches(';').count();
    cookie
        .split(';')
        .enumerate()
        .map(|(index, entry)| {
            let entry = if index > 0 { entry.trim_start() } else { entry };
            let entry = if index < last { entry.trim_end() } else { entry };
            entry.to_owned()
        })
        .collect()
}
