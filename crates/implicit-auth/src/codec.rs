//! URL encoding capability

/// Percent-encodes and decodes query parameter values.
pub trait UrlCodec {
    fn encode(&self, value: &str) -> String;
    fn decode(&self, value: &str) -> String;
}

/// RFC 3986 percent encoding: everything but unreserved characters is escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PercentCodec;

impl UrlCodec for PercentCodec {
    fn encode(&self, value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Invalid UTF-8 sequences decode to U+FFFD rather than failing.
    fn decode(&self, value: &str) -> String {
        String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned()
    }
}

/// Leaves values untouched. Useful when asserting on exact URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCodec;

impl UrlCodec for IdentityCodec {
    fn encode(&self, value: &str) -> String {
        value.to_owned()
    }

    fn decode(&self, value: &str) -> String {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_codec_escapes_reserved_characters() {
        let codec = PercentCodec;
        assert_eq!(
            codec.encode("https://www.googleapis.com/auth/plus.me email"),
            "https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fplus.me%20email"
        );
        assert_eq!(codec.encode("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn percent_codec_decodes() {
        let codec = PercentCodec;
        assert_eq!(codec.decode("Bad%20dog%21"), "Bad dog!");
        assert_eq!(codec.decode("no-escapes"), "no-escapes");
        assert_eq!(codec.decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn identity_codec_is_a_no_op() {
        assert_eq!(IdentityCodec.encode("popup.html?x=1"), "popup.html?x=1");
        assert_eq!(IdentityCodec.decode("a%20b"), "a%20b");
    }
}
