use crate::{host::CookieHost, options::CookieOptions, CookieAccessor};

#[derive(Debug)]
pub struct CookieAccessorBuilder<H> {
    host: H,
    defaults: Option<CookieOptions>,
}

impl<H: CookieHost> CookieAccessorBuilder<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            defaults: None,
        }
    }

    /// Attributes applied to every write that leaves them undefined.
    pub fn with_defaults(mut self, defaults: CookieOptions) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Reads the host once and splits its cookie string into entries.
    pub fn build(self) -> CookieAccessor<H> {
        let entries = crate::split_entries(&self.host.cookie());

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = entries.len(), "Parsed host cookie string");

        CookieAccessor {
            host: self.host,
            entries,
            defaults: self.defaults,
        }
    }
}
