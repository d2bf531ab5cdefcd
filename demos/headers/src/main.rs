use anyhow::Context;
use document_cookie::{CookieAccessor, CookieOptions, HeaderHost};
use http::{header, HeaderMap, HeaderValue};
use tracing_subscriber::EnvFilter;

const DEFAULTS: &str = r#"{ "path": "/", "secure": true }"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cookie = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "theme=dark; session=abc%20def".to_owned());

    let mut request = HeaderMap::new();
    request.insert(
        header::COOKIE,
        HeaderValue::from_str(&cookie).context("cookie argument is not a valid header value")?,
    );

    let defaults: CookieOptions =
        serde_json::from_str(DEFAULTS).context("failed to parse cookie defaults")?;
    let mut cookies = CookieAccessor::builder(HeaderHost::from_request(&request))
        .with_defaults(defaults)
        .build();

    tracing::info!(entries = cookies.entries().count(), "Parsed request cookies");
    for entry in cookies.entries() {
        let name = entry.split_once('=').map_or(entry, |(name, _)| name);
        println!("{name}: {:?}", cookies.get(name));
    }

    cookies.set("theme", "light", &CookieOptions::new());
    cookies.del("session", &CookieOptions::new());

    let mut response = HeaderMap::new();
    cookies.into_host().apply(&mut response);
    for value in response.get_all(header::SET_COOKIE) {
        println!("Set-Cookie: {}", value.to_str()?);
    }

    Ok(())
}
