use crate::parsers::Parser;
use url::Url;

#[test]
fn test_parse_page() {
    let base = Url::parse("https://example.com/").unwrap();
    let html = r#"<html><body>
        <main><h1>Welcome</h1></main>
        <a href="/a">A</a>
        <a href="https://example.com/b">B</a>
    </body></html>"#;

    let result = Parser::parse(html, &base);
    assert!(result.has_text());
    assert_eq!(result.text_blocks[0], "Welcome");
    assert_eq!(result.links.len(), 2);
    assert_eq!(result.links[0].as_str(), "https://example.com/a");
    assert_eq!(result.links[1].as_str(), "https://example.com/b");
}

#[test]
fn test_parse_empty_page() {
    let base = Url::parse("https://example.com/").unwrap();
    let result = Parser::parse("<html><body></body></html>", &base);
    assert!(!result.has_text());
    assert!(result.links.is_empty());
}
