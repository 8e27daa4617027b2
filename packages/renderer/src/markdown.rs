use pulldown_cmark::{html, Options, Parser};

/// Convert a post body's Markdown to HTML. pulldown-cmark escapes raw
/// markup-significant characters in the source itself, so bodies are not
/// pre-escaped; they are emoji-converted first and handed over whole.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = markdown_to_html("We found the **lost** crown.");
        assert!(html.contains("<strong>lost</strong>"));
    }

    #[test]
    fn test_raw_html_is_not_double_escaped_text() {
        let html = markdown_to_html("a < b & c");
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));
    }
}
