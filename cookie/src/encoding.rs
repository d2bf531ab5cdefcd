use std::{borrow::Cow, str::Utf8Error};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left untouched by URI component encoding, everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `input` as a URI component.
///
/// Alphanumerics and `-_.!~*'()` pass through, every other byte of the UTF-8
/// representation becomes `%XX`.
pub fn encode_component(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, COMPONENT).into()
}

/// Reverses [`encode_component`].
///
/// Malformed escapes such as `%zz` are kept verbatim. Fails only when the
/// decoded bytes are not valid UTF-8.
pub fn decode_component(input: &str) -> Result<Cow<'_, str>, Utf8Error> {
    percent_decode_str(input).decode_utf8()
}
