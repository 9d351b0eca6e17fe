// ABOUTME: Content classification for extracted page text.
// ABOUTME: Distinguishes base64 payloads from recognized proxy-link formats.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Recognized proxy-link scheme markers, matched as substrings anywhere in
/// the text, not anchored.
const LINK_SCHEMES: &[&str] = &["vmess://", "trojan://", "clash://", "ss://", "vlss://"];

/// The result of classifying a block of extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Base64,
    FormattedLink,
    Unrecognized,
}

/// Classify extracted text.
///
/// The base64 test runs first: ASCII text whose trimmed form decodes under
/// the standard alphabet is treated as a payload even when it also contains
/// a recognized scheme substring. Short alphanumeric strings that happen to
/// satisfy base64 padding rules are therefore misclassified as payloads; a
/// known weakness of the heuristic, kept as-is.
pub fn classify(text: &str) -> Classification {
    if is_base64_payload(text) {
        Classification::Base64
    } else if has_link_format(text) {
        Classification::FormattedLink
    } else {
        Classification::Unrecognized
    }
}

/// ASCII check plus a strict standard-alphabet decode of the trimmed text.
fn is_base64_payload(text: &str) -> bool {
    if !text.is_ascii() {
        return false;
    }
    STANDARD.decode(text.trim()).is_ok()
}

/// True when any recognized scheme marker appears anywhere in the text.
fn has_link_format(text: &str) -> bool {
    LINK_SCHEMES.iter().any(|scheme| text.contains(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_base64_is_base64() {
        assert_eq!(classify("aGVsbG8="), Classification::Base64);
    }

    #[test]
    fn base64_wins_even_when_payload_is_a_link() {
        // "c3M6Ly9hYmM=" decodes to "ss://abc"; classification still says
        // Base64 because that test runs first.
        assert_eq!(classify("c3M6Ly9hYmM="), Classification::Base64);
    }

    #[test]
    fn surrounding_whitespace_does_not_defeat_base64() {
        assert_eq!(classify("  aGVsbG8=\n"), Classification::Base64);
    }

    #[test]
    fn each_scheme_marker_is_recognized() {
        for scheme in LINK_SCHEMES {
            let text = format!("page header {}server:443 footer", scheme);
            assert_eq!(
                classify(&text),
                Classification::FormattedLink,
                "scheme {} not recognized",
                scheme
            );
        }
    }

    #[test]
    fn bare_link_is_formatted_link() {
        assert_eq!(classify("ss://abc123"), Classification::FormattedLink);
    }

    #[test]
    fn plain_html_text_is_unrecognized() {
        assert_eq!(
            classify("<html>unrelated text</html>"),
            Classification::Unrecognized
        );
    }

    #[test]
    fn non_ascii_text_is_unrecognized() {
        assert_eq!(classify("订阅已失效"), Classification::Unrecognized);
    }

    #[test]
    fn bad_padding_is_unrecognized() {
        assert_eq!(classify("aGVsbG8"), Classification::Unrecognized);
    }
}
