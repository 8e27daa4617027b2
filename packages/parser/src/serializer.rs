use crate::record::PostType;

/// Builder for a new post block, the inverse of [`crate::parse`].
///
/// `serialize` emits the header lines, a blank separator, and the body,
/// with no leading or trailing delimiter. Round-trips through the parser
/// for values free of newlines and of a `Key:` prefix ambiguity.
#[derive(Debug, Clone)]
pub struct NewPost {
    post_type: PostType,
    date: String,
    title: Option<String>,
    caption: Option<String>,
    author: Option<String>,
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
    characters: Option<String>,
    body: String,
}

impl NewPost {
    pub fn new(post_type: PostType, date: impl Into<String>) -> Self {
        Self {
            post_type,
            date: date.into(),
            title: None,
            caption: None,
            author: None,
            name: None,
            from: None,
            to: None,
            characters: None,
            body: String::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.to = Some(to.into());
        self
    }

    pub fn characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Produce the markup block for this post.
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        push_field(&mut output, "Type", &self.post_type.to_string());
        push_field(&mut output, "Date", &self.date);

        match self.post_type {
            PostType::Text | PostType::Recap => {
                if let Some(title) = &self.title {
                    push_field(&mut output, "Title", title);
                }
            }
            PostType::Image => {
                if let Some(caption) = &self.caption {
                    push_field(&mut output, "Caption", caption);
                }
            }
            PostType::Quote => {
                if let Some(author) = &self.author {
                    push_field(&mut output, "Author", author);
                }
            }
            PostType::Character => {
                if let Some(name) = &self.name {
                    push_field(&mut output, "Name", name);
                }
            }
            PostType::Location => {
                if let Some(name) = &self.name {
                    push_field(&mut output, "Name", name);
                }
                if let Some(characters) = &self.characters {
                    push_field(&mut output, "Characters", characters);
                }
            }
            PostType::Travel => {
                if let Some(from) = &self.from {
                    push_field(&mut output, "From", from);
                }
                if let Some(to) = &self.to {
                    push_field(&mut output, "To", to);
                }
            }
            // Conversation bodies carry the whole script; unknown types
            // have no dedicated field lines.
            PostType::Conversation | PostType::Unknown(_) => {}
        }

        output.push('\n');
        output.push_str(&self.body);
        output
    }
}

fn push_field(output: &mut String, key: &str, value: &str) {
    output.push_str(key);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}

/// Prepend a serialized block to an existing document. The newest block
/// goes on top; a blank existing document becomes just the new block.
pub fn prepend(block: &str, existing: &str) -> String {
    if existing.trim().is_empty() {
        block.to_string()
    } else {
        format!("{}\n---\n{}", block, existing)
    }
}
