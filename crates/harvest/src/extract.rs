// ABOUTME: Visible-text extraction from HTML using a fixed-priority selector chain.
// ABOUTME: Falls back to whole-document text when no candidate selector matches.

use scraper::{Html, Selector};
use tracing::debug;

/// Candidate selectors tried in priority order. The first one matching a node
/// wins; the placeholders are kept as configuration slots for site-specific
/// containers.
const SELECTOR_CANDIDATES: &[&str] = &[
    "#app",
    ".content",
    "div",
    ".my-class",
    "#my-id",
    "[name=\"my-name\"]",
    ".my-parent .my-child",
];

/// Extract the page's visible text.
///
/// Tries each candidate selector in order and returns the concatenated text
/// of the first matching element. Selector errors are logged at debug level
/// and the next candidate is tried; they are never surfaced to the caller.
/// When no candidate matches, returns the whole document's text.
pub fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    for css in SELECTOR_CANDIDATES {
        let selector = match Selector::parse(css) {
            Ok(s) => s,
            Err(e) => {
                debug!(selector = css, error = ?e, "skipping unparseable selector");
                continue;
            }
        };
        if let Some(element) = doc.select(&selector).next() {
            return element.text().collect();
        }
    }

    doc.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_selector_wins_over_class() {
        let html = r#"<html><body>
            <div id="app">app text</div>
            <div class="content">content text</div>
        </body></html>"#;

        assert_eq!(page_text(html), "app text");
    }

    #[test]
    fn class_selector_wins_over_generic_div() {
        let html = r#"<html><body>
            <div>first div</div>
            <p class="content">tagged text</p>
        </body></html>"#;

        assert_eq!(page_text(html), "tagged text");
    }

    #[test]
    fn first_div_wins_when_nothing_more_specific() {
        let html = r#"<html><body>
            <div>alpha</div>
            <div>beta</div>
        </body></html>"#;

        assert_eq!(page_text(html), "alpha");
    }

    #[test]
    fn matched_element_text_includes_descendants() {
        let html = r#"<html><body>
            <div id="app"><span>a</span><span>b</span></div>
        </body></html>"#;

        assert_eq!(page_text(html), "ab");
    }

    #[test]
    fn falls_back_to_document_text() {
        let html = "<html><body><p>plain paragraph</p></body></html>";

        assert!(page_text(html).contains("plain paragraph"));
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(page_text(""), "");
    }
}
