use chrono::Local;
use std::collections::BTreeMap;

/// Neutralize markup-significant characters before interpolation.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Pass a date through, or fall back to today as `Mon D, YYYY`.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        _ => Local::now().format("%b %-d, %Y").to_string(),
    }
}

const BUILTIN_EMOJI: &[(&str, &str)] = &[
    ("smile", "\u{1F604}"),
    ("grin", "\u{1F601}"),
    ("laughing", "\u{1F606}"),
    ("cry", "\u{1F622}"),
    ("angry", "\u{1F620}"),
    ("thinking", "\u{1F914}"),
    ("tada", "\u{1F389}"),
    ("heart", "\u{2764}\u{FE0F}"),
    ("fire", "\u{1F525}"),
    ("skull", "\u{1F480}"),
    ("dragon", "\u{1F409}"),
    ("sword", "\u{1F5E1}\u{FE0F}"),
    ("crossed_swords", "\u{2694}\u{FE0F}"),
    ("shield", "\u{1F6E1}\u{FE0F}"),
    ("bow_and_arrow", "\u{1F3F9}"),
    ("crown", "\u{1F451}"),
    ("scroll", "\u{1F4DC}"),
    ("moneybag", "\u{1F4B0}"),
    ("game_die", "\u{1F3B2}"),
    ("mage", "\u{1F9D9}"),
];

/// Expands `:shortcode:` tokens to glyphs. Unknown shortcodes are left
/// verbatim, so text like "3:00" or a stray colon passes through.
#[derive(Debug, Clone, Default)]
pub struct EmojiMap {
    map: BTreeMap<String, String>,
}

impl EmojiMap {
    /// Built-in table merged with per-project overrides; overrides win.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut map: BTreeMap<String, String> = BUILTIN_EMOJI
            .iter()
            .map(|(code, glyph)| (code.to_string(), glyph.to_string()))
            .collect();
        for (code, glyph) in overrides {
            map.insert(code.clone(), glyph.clone());
        }
        Self { map }
    }

    pub fn convert(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(':') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find(':') {
                Some(end) if self.map.contains_key(&after[..end]) => {
                    output.push_str(&self.map[&after[..end]]);
                    rest = &after[end + 1..];
                }
                Some(_) | None => {
                    // Not a known shortcode; keep the colon and rescan from
                    // the next character so "3:00 :fire:" still converts.
                    output.push(':');
                    rest = after;
                }
            }
        }
        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & more"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; more"
        );
    }

    #[test]
    fn test_format_date_passthrough() {
        assert_eq!(format_date(Some(" Jan 1, 2024 ")), "Jan 1, 2024");
    }

    #[test]
    fn test_format_date_fallback_shape() {
        let now = format_date(None);
        // "Mon D, YYYY" always contains a comma and no padding zero day.
        assert!(now.contains(", "));
        assert!(!now.contains(" 0"));
    }

    #[test]
    fn test_emoji_known_shortcode() {
        let emoji = EmojiMap::with_overrides(&BTreeMap::new());
        assert_eq!(emoji.convert("roll :game_die: now"), "roll \u{1F3B2} now");
    }

    #[test]
    fn test_emoji_unknown_left_verbatim() {
        let emoji = EmojiMap::with_overrides(&BTreeMap::new());
        assert_eq!(emoji.convert(":not_a_code:"), ":not_a_code:");
        assert_eq!(emoji.convert("meet at 3:00"), "meet at 3:00");
    }

    #[test]
    fn test_emoji_mixed_colons() {
        let emoji = EmojiMap::with_overrides(&BTreeMap::new());
        assert_eq!(emoji.convert("3:00 :fire:"), "3:00 \u{1F525}");
    }

    #[test]
    fn test_emoji_overrides_win() {
        let mut overrides = BTreeMap::new();
        overrides.insert("fire".to_string(), "FIRE".to_string());
        overrides.insert("ale".to_string(), "\u{1F37A}".to_string());
        let emoji = EmojiMap::with_overrides(&overrides);
        assert_eq!(emoji.convert(":fire: :ale:"), "FIRE \u{1F37A}");
    }
}
