use crate::record::{PostRecord, PostType};
use std::collections::BTreeMap;

/// Parse a session document into post records, in document order.
///
/// Blocks are separated by a line consisting solely of `---` (the line must
/// be bounded by line breaks; a `---` embedded mid-line or with surrounding
/// spaces is body text). Markdown horizontal rules inside a body must
/// therefore use `***` or `___`.
///
/// Parsing never fails: empty input yields no records, and a block with no
/// recognizable headers degrades to a `text` record.
pub fn parse(source: &str) -> Vec<PostRecord> {
    if source.trim().is_empty() {
        return Vec::new();
    }

    split_blocks(source)
        .into_iter()
        .map(|chunk| parse_block(&chunk))
        .collect()
}

/// Split on delimiter lines. `str::lines` strips a trailing `\r`, which
/// makes the comparison tolerant of CRLF input.
fn split_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in source.lines() {
        if line == "---" {
            blocks.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    blocks.push(current.join("\n"));

    blocks
        .into_iter()
        .map(|block| block.trim().to_string())
        .filter(|block| !block.is_empty())
        .collect()
}

fn parse_block(chunk: &str) -> PostRecord {
    let mut fields = BTreeMap::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in chunk.lines() {
        if in_body {
            body_lines.push(line);
        } else if line.trim().is_empty() {
            // The separating blank line is consumed, not kept.
            in_body = true;
        } else if let Some((key, value)) = header_line(line) {
            fields.insert(key, value);
        } else {
            // Transition-and-keep: an unmatched line starts the body.
            in_body = true;
            body_lines.push(line);
        }
    }

    let post_type = fields
        .get("type")
        .map(|raw| PostType::parse(raw))
        .unwrap_or(PostType::Text);

    PostRecord {
        post_type,
        fields,
        body: body_lines.join("\n").trim().to_string(),
    }
}

/// Match `^([A-Za-z]+):\s*(.*)$`, returning the lower-cased key and the
/// trimmed value.
fn header_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((key.to_ascii_lowercase(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }

    #[test]
    fn test_single_block() {
        let records = parse("Type: text\nTitle: T\n\nBody line");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].post_type, PostType::Text);
        assert_eq!(records[0].title(), Some("T"));
        assert_eq!(records[0].body, "Body line");
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let source = "Type: quote\nAuthor: A\n\nfirst\n---\nType: text\n\nsecond\n---\nType: image\n\nhttp://x/y.png";
        let records = parse(source);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].post_type, PostType::Quote);
        assert_eq!(records[1].post_type, PostType::Text);
        assert_eq!(records[2].post_type, PostType::Image);
        assert_eq!(records[2].body, "http://x/y.png");
    }

    #[test]
    fn test_crlf_input() {
        let records = parse("Type: text\r\nTitle: T\r\n\r\nline one\r\n---\r\nType: quote\r\n\r\nhi");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), Some("T"));
        assert_eq!(records[1].post_type, PostType::Quote);
    }

    #[test]
    fn test_delimiter_must_be_full_line() {
        // An indented or embedded --- is body text, not a block boundary.
        let records = parse("Type: text\n\nbefore\n --- \nafter");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body, "before\n --- \nafter");
    }

    #[test]
    fn test_header_only_block() {
        let records = parse("Type: recap\nTitle: Recap One");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].post_type, PostType::Recap);
        assert_eq!(records[0].title(), Some("Recap One"));
        assert_eq!(records[0].body, "");
    }

    #[test]
    fn test_leading_blank_line_enters_body() {
        let records = parse("\nKey: looks like a header\nmore");
        assert_eq!(records.len(), 1);
        // split_blocks trims the chunk, so the first non-blank line is
        // scanned as a header after all.
        assert_eq!(records[0].field("key"), Some("looks like a header"));
    }

    #[test]
    fn test_unmatched_line_becomes_first_body_line() {
        let records = parse("Type: text\nnot a header line\nsecond body line");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].post_type, PostType::Text);
        assert_eq!(
            records[0].body,
            "not a header line\nsecond body line"
        );
    }

    #[test]
    fn test_missing_type_defaults_to_text() {
        let records = parse("Title: untyped\n\nhello");
        assert_eq!(records[0].post_type, PostType::Text);
    }

    #[test]
    fn test_header_keys_lower_cased() {
        let records = parse("TYPE: Quote\nAUTHOR: Bob\n\nhello");
        assert_eq!(records[0].post_type, PostType::Quote);
        assert_eq!(records[0].field("author"), Some("Bob"));
        assert_eq!(records[0].field("AUTHOR"), None);
    }

    #[test]
    fn test_non_alphabetic_key_is_body() {
        let records = parse("Type: text\n12:30 we set out\nmore");
        assert_eq!(records[0].body, "12:30 we set out\nmore");
    }

    #[test]
    fn test_unrecognized_keys_retained() {
        let records = parse("Type: text\nMood: grim\n\nbody");
        assert_eq!(records[0].field("mood"), Some("grim"));
    }

    #[test]
    fn test_blank_separator_not_in_body() {
        let records = parse("Type: text\n\n\n\nbody");
        assert_eq!(records[0].body, "body");
    }
}
