use crate::parsers::ParseResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text becomes a block in the output file
pub const CONTENT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, div, span, article, section, main";

/// Elements whose text is never visible
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Parses HTML content to extract text blocks and links
pub fn parse(html: &str, base_url: &Url) -> ParseResult {
    let doc = Html::parse_document(html);

    let text_blocks = extract_text_blocks(&doc);
    let links = extract_links(&doc, base_url);

    ::log::debug!(
        "HTML parser found {} text blocks and {} links",
        text_blocks.len(),
        links.len()
    );

    ParseResult::new(text_blocks, links)
}

/// Collects the trimmed, non-empty text of every content element
///
/// Text inside `script` and `style` is skipped. Nested content elements
/// each produce their own block.
pub fn extract_text_blocks(doc: &Html) -> Vec<String> {
    let Some(selector) = selector(CONTENT_SELECTOR) else {
        return Vec::new();
    };

    doc.select(&selector)
        .map(visible_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Resolves the `href` of every anchor against `base_url`
///
/// Hrefs that cannot be resolved are dropped. No domain policy is applied.
pub fn extract_links(doc: &Html, base_url: &Url) -> Vec<Url> {
    let Some(selector) = selector("a[href]") else {
        return Vec::new();
    };

    doc.select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| match base_url.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::trace!("Dropping unresolvable href {:?}: {}", href, e);
                None
            }
        })
        .collect()
}

/// Parses markup and only resolves its links
pub fn parse_links_only(html: &str, base_url: &Url) -> Vec<Url> {
    extract_links(&Html::parse_document(html), base_url)
}

/// Concatenated text of all descendants not hidden inside script/style
///
/// Walks the subtree once in document order with an explicit stack, pruning
/// hidden subtrees where they start; deep nesting cannot overflow the call stack.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    let mut stack: Vec<_> = element.children().rev().collect();

    while let Some(node) = stack.pop() {
        let value = node.value();
        if let Some(chunk) = value.as_text() {
            text.push_str(chunk);
        } else if let Some(e) = value.as_element() {
            if !HIDDEN_ELEMENTS.contains(&e.name()) {
                stack.extend(node.children().rev());
            }
        }
    }

    text
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            ::log::error!("Invalid selector {:?}: {}", css, e);
            None
        }
    }
}
