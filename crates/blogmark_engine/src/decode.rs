use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Set when some bytes were not valid in the chosen encoding and got replaced.
    pub had_replacements: bool,
}

/// Decode a response body into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// Malformed sequences are replaced rather than rejected; article pages with a
/// stray invalid byte are still worth converting.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(&['"', '\''][..]);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_replacements) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_replacements,
    }
}
