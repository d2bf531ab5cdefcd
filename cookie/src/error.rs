use std::str::Utf8Error;

use http::header::InvalidHeaderValue;

pub type CookieResult<T> = Result<T, CookieError>;

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("value of cookie `{name}` is not valid UTF-8 once decoded")]
    Decode {
        name: String,
        #[source]
        source: Utf8Error,
    },
    #[error("cookie string is not a valid header value")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}
