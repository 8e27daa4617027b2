use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The declared kind of a post, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    Text,
    Image,
    Quote,
    Conversation,
    Recap,
    Character,
    Location,
    Travel,
    /// Unrecognized type value, preserved verbatim for the fallback card.
    Unknown(String),
}

impl PostType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => PostType::Text,
            "image" => PostType::Image,
            "quote" => PostType::Quote,
            "conversation" => PostType::Conversation,
            "recap" => PostType::Recap,
            "character" => PostType::Character,
            "location" => PostType::Location,
            "travel" => PostType::Travel,
            _ => PostType::Unknown(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostType::Text => "text",
            PostType::Image => "image",
            PostType::Quote => "quote",
            PostType::Conversation => "conversation",
            PostType::Recap => "recap",
            PostType::Character => "character",
            PostType::Location => "location",
            PostType::Travel => "travel",
            PostType::Unknown(raw) => raw,
        };
        write!(f, "{}", name)
    }
}

/// One parsed block of a session document.
///
/// Header keys are stored lower-cased; unrecognized keys are retained but
/// ignored by rendering. `body` is trimmed and never contains the blank
/// line that separated it from the header region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub post_type: PostType,
    pub fields: BTreeMap<String, String>,
    pub body: String,
}

impl PostRecord {
    /// Look up a header field by its lower-cased key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.field("date")
    }

    pub fn author(&self) -> Option<&str> {
        self.field("author")
    }

    pub fn caption(&self) -> Option<&str> {
        self.field("caption")
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name")
    }

    pub fn from(&self) -> Option<&str> {
        self.field("from")
    }

    pub fn to(&self) -> Option<&str> {
        self.field("to")
    }

    /// Comma-separated `characters` list, each name trimmed, empties dropped.
    pub fn characters(&self) -> Vec<&str> {
        self.field("characters")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_case_insensitive() {
        assert_eq!(PostType::parse("Quote"), PostType::Quote);
        assert_eq!(PostType::parse("CONVERSATION"), PostType::Conversation);
        assert_eq!(PostType::parse("  travel "), PostType::Travel);
    }

    #[test]
    fn test_post_type_unknown_preserved() {
        assert_eq!(
            PostType::parse("Poem"),
            PostType::Unknown("Poem".to_string())
        );
        assert_eq!(PostType::Unknown("Poem".to_string()).to_string(), "Poem");
    }

    #[test]
    fn test_characters_trimmed() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "characters".to_string(),
            " Elora , Brum,, Kaelen ".to_string(),
        );
        let record = PostRecord {
            post_type: PostType::Location,
            fields,
            body: String::new(),
        };
        assert_eq!(record.characters(), vec!["Elora", "Brum", "Kaelen"]);
    }
}
