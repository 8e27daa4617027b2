use crate::helpers::{escape_html, format_date, EmojiMap};
use crate::markdown::markdown_to_html;
use crate::portraits::PortraitBook;
use chronicle_parser::{PostRecord, PostType};

/// Which side of the conversation a bubble sits on. Two-person scripts
/// alternate by the parity of the surviving line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// One rendered line of a conversation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: String,
    pub text: String,
    pub side: Side,
}

/// Split a conversation body into turns. Lines without a colon are
/// dropped, as are lines whose speaker or utterance trims to empty;
/// dropped lines do not consume a left/right parity slot.
pub fn conversation_turns(body: &str) -> Vec<Turn> {
    body.lines()
        .filter_map(|line| {
            let (speaker, text) = line.split_once(':')?;
            let speaker = speaker.trim();
            let text = text.trim();
            if speaker.is_empty() || text.is_empty() {
                return None;
            }
            Some((speaker.to_string(), text.to_string()))
        })
        .enumerate()
        .map(|(index, (speaker, text))| Turn {
            speaker,
            text,
            side: if index % 2 == 0 { Side::Left } else { Side::Right },
        })
        .collect()
}

/// Fragment buffer shared by the card and page compilers.
pub(crate) struct Context {
    buffer: String,
    depth: usize,
}

impl Context {
    pub(crate) fn new() -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
        }
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn into_output(self) -> String {
        self.buffer
    }
}

/// Compiles post records to HTML card fragments.
///
/// Owns the resolved helper surface (portrait book, emoji table); it never
/// reads configuration or any ambient state itself. Rendering is total: an
/// unrecognized type gets the visible fallback card rather than an error.
pub struct Renderer {
    portraits: PortraitBook,
    emoji: EmojiMap,
}

impl Renderer {
    pub fn new(portraits: PortraitBook, emoji: EmojiMap) -> Self {
        Self { portraits, emoji }
    }

    /// Render one record to a card fragment.
    pub fn render_post(&self, record: &PostRecord) -> String {
        let mut ctx = Context::new();
        match &record.post_type {
            PostType::Text => self.card_text(record, false, &mut ctx),
            PostType::Recap => self.card_text(record, true, &mut ctx),
            PostType::Image => self.card_image(record, &mut ctx),
            PostType::Quote => self.card_quote(record, &mut ctx),
            PostType::Conversation => self.card_conversation(record, &mut ctx),
            PostType::Character => self.card_character(record, &mut ctx),
            PostType::Location => self.card_location(record, &mut ctx),
            PostType::Travel => self.card_travel(record, &mut ctx),
            PostType::Unknown(raw) => self.card_unknown(raw, record, &mut ctx),
        }
        ctx.into_output()
    }

    /// Escape, then expand emoji. For plain-text fields only; Markdown
    /// bodies go through [`Renderer::body_html`] instead.
    fn inline(&self, text: &str) -> String {
        self.emoji.convert(&escape_html(text))
    }

    /// Emoji-convert first, then hand the whole body to the Markdown
    /// renderer, which does its own escaping.
    fn body_html(&self, body: &str) -> String {
        markdown_to_html(&self.emoji.convert(body))
    }

    fn timestamp(&self, record: &PostRecord, ctx: &mut Context) {
        ctx.add_line(&format!(
            "<span class=\"timestamp\">{}</span>",
            escape_html(&format_date(record.date()))
        ));
    }

    fn card_text(&self, record: &PostRecord, recap: bool, ctx: &mut Context) {
        let class = if recap { "card recap-card" } else { "card" };
        ctx.add_line(&format!("<article class=\"{}\">", class));
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        if let Some(title) = record.title() {
            ctx.add_line(&format!(
                "<h2 class=\"text-title\">{}</h2>",
                self.inline(title)
            ));
        }
        ctx.add_line(&format!(
            "<div class=\"text-body\">{}</div>",
            self.body_html(&record.body).trim_end()
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_image(&self, record: &PostRecord, ctx: &mut Context) {
        let caption = record.caption().unwrap_or("");
        ctx.add_line("<article class=\"card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-image\">");
        ctx.indent();
        // The body is a bare URL. Broken-image substitution is the
        // viewer's concern, not ours.
        ctx.add_line(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(record.body.trim()),
            escape_html(caption)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.add_line("<div class=\"image-caption\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line(&self.inline(caption));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_quote(&self, record: &PostRecord, ctx: &mut Context) {
        let author = record.author().unwrap_or("Unknown");
        ctx.add_line("<article class=\"card quote-container\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line(&format!(
            "<div class=\"quote-text\">{}</div>",
            self.inline(&record.body)
        ));
        ctx.add_line(&format!(
            "<div class=\"quote-author\">\u{2014} {}</div>",
            self.inline(author)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_conversation(&self, record: &PostRecord, ctx: &mut Context) {
        ctx.add_line("<article class=\"card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line("<div class=\"chat-container\">");
        ctx.indent();
        for turn in conversation_turns(&record.body) {
            ctx.add_line(&format!(
                "<div class=\"chat-bubble-row {}\">",
                turn.side.as_str()
            ));
            ctx.indent();
            ctx.add_line(&format!(
                "<img class=\"chat-portrait\" src=\"{}\" alt=\"{}\">",
                escape_html(self.portraits.lookup(&turn.speaker)),
                escape_html(&turn.speaker)
            ));
            ctx.add_line(&format!(
                "<span class=\"speaker-name\">{}</span>",
                self.inline(&turn.speaker)
            ));
            ctx.add_line(&format!(
                "<div class=\"chat-bubble {}\">{}</div>",
                turn.side.as_str(),
                self.inline(&turn.text)
            ));
            ctx.dedent();
            ctx.add_line("</div>");
        }
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_character(&self, record: &PostRecord, ctx: &mut Context) {
        let name = record.name().unwrap_or("Unknown Character");
        ctx.add_line("<article class=\"card character-card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line("<div class=\"character-header\">");
        ctx.indent();
        ctx.add_line(&format!(
            "<img class=\"portrait\" src=\"{}\" alt=\"{}\">",
            escape_html(self.portraits.lookup(name)),
            escape_html(name)
        ));
        ctx.add_line(&format!(
            "<h2 class=\"character-name\">{}</h2>",
            self.inline(name)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.add_line(&format!(
            "<div class=\"text-body\">{}</div>",
            self.body_html(&record.body).trim_end()
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_location(&self, record: &PostRecord, ctx: &mut Context) {
        let name = record.name().unwrap_or("Unknown");
        ctx.add_line("<article class=\"card location-card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line(&format!(
            "<h2 class=\"location-name\">{}</h2>",
            self.inline(name)
        ));
        ctx.add_line(&format!(
            "<div class=\"text-body\">{}</div>",
            self.body_html(&record.body).trim_end()
        ));
        let roster = record.characters();
        if !roster.is_empty() {
            ctx.add_line("<div class=\"location-roster\">");
            ctx.indent();
            for character in roster {
                ctx.add_line("<div class=\"mini-card\">");
                ctx.indent();
                ctx.add_line(&format!(
                    "<img class=\"portrait\" src=\"{}\" alt=\"{}\">",
                    escape_html(self.portraits.lookup(character)),
                    escape_html(character)
                ));
                ctx.add_line(&format!("<span>{}</span>", self.inline(character)));
                ctx.dedent();
                ctx.add_line("</div>");
            }
            ctx.dedent();
            ctx.add_line("</div>");
        }
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_travel(&self, record: &PostRecord, ctx: &mut Context) {
        let from = record.from().unwrap_or("Origin");
        let to = record.to().unwrap_or("Destination");
        ctx.add_line("<article class=\"card travel-card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line("<div class=\"travel-route\">");
        ctx.indent();
        ctx.add_line(&format!(
            "<span class=\"travel-from\">{}</span>",
            self.inline(from)
        ));
        ctx.add_line("<span class=\"travel-arrow\">\u{2192}</span>");
        ctx.add_line(&format!(
            "<span class=\"travel-to\">{}</span>",
            self.inline(to)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.add_line(&format!(
            "<div class=\"text-body\">{}</div>",
            self.body_html(&record.body).trim_end()
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }

    fn card_unknown(&self, raw_type: &str, record: &PostRecord, ctx: &mut Context) {
        ctx.add_line("<article class=\"card unknown-card\">");
        ctx.indent();
        ctx.add_line("<div class=\"card-padding\">");
        ctx.indent();
        self.timestamp(record, ctx);
        ctx.add_line(&format!(
            "<p class=\"unknown-type\">Unsupported post type: {}</p>",
            escape_html(raw_type)
        ));
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</article>");
    }
}
