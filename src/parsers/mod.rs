pub mod html;

#[cfg(test)]
mod tests;

use url::Url;

/// Result of parsing a rendered page
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Visible text blocks in document order
    pub text_blocks: Vec<String>,
    /// Absolute URLs of every resolvable link, in document order
    pub links: Vec<Url>,
}

impl ParseResult {
    /// Creates a new parse result with the given text blocks and links
    pub fn new(text_blocks: Vec<String>, links: Vec<Url>) -> Self {
        Self { text_blocks, links }
    }

    /// Whether the page yielded any text worth writing
    pub fn has_text(&self) -> bool {
        !self.text_blocks.is_empty()
    }
}

/// Main parser entry point for rendered markup
pub struct Parser;

impl Parser {
    /// Parse rendered markup fetched from `base_url`
    pub fn parse(markup: &str, base_url: &Url) -> ParseResult {
        html::parse(markup, base_url)
    }
}
