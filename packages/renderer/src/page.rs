use crate::card::{Context, Renderer};
use crate::helpers::{escape_html, format_date};
use crate::session::Session;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid theme color {0:?}: expected #rgb or #rrggbb")]
    InvalidThemeColor(String),
}

/// Theme color comes from configuration and lands inside a <style> block,
/// so only hex colors are accepted.
fn check_theme_color(color: &str) -> Result<(), RenderError> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| RenderError::InvalidThemeColor(color.to_string()))?;
    if (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(RenderError::InvalidThemeColor(color.to_string()))
    }
}

const PAGE_CSS: &str = r#"
:root { --theme: var(--theme-color); }
body { margin: 0; font-family: Georgia, 'Times New Roman', serif; background: #f4f1ea; color: #2b2b2b; }
header.masthead { background: var(--theme-color); color: #fff; padding: 24px 16px; text-align: center; }
header.masthead h1 { margin: 0; font-size: 28px; }
header.masthead .session-line { opacity: 0.85; font-size: 14px; }
main.feed { max-width: 640px; margin: 24px auto; padding: 0 12px; }
.card { background: #fff; border-radius: 10px; box-shadow: 0 1px 4px rgba(0,0,0,0.12); margin-bottom: 20px; overflow: hidden; }
.card-padding { padding: 16px 20px; }
.timestamp { display: block; font-size: 12px; color: #8a8578; margin-bottom: 6px; }
.text-title, .character-name, .location-name { margin: 0 0 8px; font-size: 20px; }
.recap-card { border-left: 5px solid var(--theme-color); }
.card-image img { display: block; width: 100%; }
.image-caption { padding: 10px 20px 14px; font-size: 14px; }
.quote-container { border-left: 5px solid var(--theme-color); }
.quote-text { font-size: 18px; font-style: italic; }
.quote-author { margin-top: 8px; text-align: right; color: #6b6555; }
.chat-container { display: flex; flex-direction: column; gap: 10px; }
.chat-bubble-row { display: flex; align-items: flex-end; gap: 8px; }
.chat-bubble-row.right { flex-direction: row-reverse; }
.chat-portrait { width: 32px; height: 32px; border-radius: 50%; object-fit: cover; }
.speaker-name { font-size: 11px; color: #8a8578; }
.chat-bubble { padding: 8px 12px; border-radius: 14px; max-width: 70%; }
.chat-bubble.left { background: #ece7dc; }
.chat-bubble.right { background: var(--theme-color); color: #fff; }
.character-header { display: flex; align-items: center; gap: 12px; margin-bottom: 8px; }
.portrait { width: 56px; height: 56px; border-radius: 50%; object-fit: cover; }
.location-roster { display: flex; flex-wrap: wrap; gap: 10px; margin-top: 10px; }
.mini-card { display: flex; align-items: center; gap: 6px; font-size: 13px; }
.mini-card .portrait { width: 28px; height: 28px; }
.travel-route { display: flex; justify-content: center; align-items: center; gap: 12px; font-size: 18px; margin: 8px 0; }
.travel-arrow { color: var(--theme-color); }
.unknown-card { opacity: 0.7; }
.session-list { list-style: none; padding: 0; }
.session-list li { background: #fff; border-radius: 10px; box-shadow: 0 1px 4px rgba(0,0,0,0.12); margin-bottom: 12px; }
.session-list a { display: block; padding: 14px 20px; color: inherit; text-decoration: none; }
.session-list .session-date { font-size: 12px; color: #8a8578; }
.empty-state { text-align: center; color: #8a8578; padding: 48px 0; }
"#;

fn page_head(ctx: &mut Context, title: &str, theme_color: &str) {
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.add_line("<style>");
    ctx.add_line(&format!(":root {{ --theme-color: {}; }}", theme_color));
    for line in PAGE_CSS.trim().lines() {
        ctx.add_line(line);
    }
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");
}

impl Renderer {
    /// Render a session's cards, in organizer order, as one fragment.
    pub fn render_session(&self, session: &Session) -> String {
        session
            .posts
            .iter()
            .map(|record| self.render_post(record))
            .collect()
    }

    /// Render a full standalone page for one session.
    pub fn render_page(
        &self,
        session: &Session,
        masthead: &str,
        theme_color: &str,
    ) -> Result<String, RenderError> {
        check_theme_color(theme_color)?;

        let heading = match &session.title {
            Some(title) => format!("Session {} \u{2014} {}", session.number, title),
            None => format!("Session {}", session.number),
        };

        let mut ctx = Context::new();
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html lang=\"en\">");
        ctx.indent();
        page_head(&mut ctx, &heading, theme_color);
        ctx.add_line("<body>");
        ctx.indent();
        ctx.add_line("<header class=\"masthead\">");
        ctx.indent();
        ctx.add_line(&format!("<h1>{}</h1>", escape_html(masthead)));
        ctx.add_line(&format!(
            "<div class=\"session-line\">{} \u{00B7} {}</div>",
            escape_html(&heading),
            escape_html(&format_date(session.date.as_deref()))
        ));
        ctx.dedent();
        ctx.add_line("</header>");
        ctx.add_line("<main class=\"feed\">");
        ctx.indent();
        if session.posts.is_empty() {
            ctx.add_line("<p class=\"empty-state\">Nothing has been written yet.</p>");
        } else {
            for line in self.render_session(session).lines() {
                ctx.add_line(line);
            }
        }
        ctx.dedent();
        ctx.add_line("</main>");
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
        Ok(ctx.into_output())
    }

    /// Render the session index page linking each session's page.
    pub fn render_index(
        &self,
        sessions: &[Session],
        masthead: &str,
        theme_color: &str,
    ) -> Result<String, RenderError> {
        check_theme_color(theme_color)?;

        let mut ctx = Context::new();
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html lang=\"en\">");
        ctx.indent();
        page_head(&mut ctx, masthead, theme_color);
        ctx.add_line("<body>");
        ctx.indent();
        ctx.add_line("<header class=\"masthead\">");
        ctx.indent();
        ctx.add_line(&format!("<h1>{}</h1>", escape_html(masthead)));
        ctx.dedent();
        ctx.add_line("</header>");
        ctx.add_line("<main class=\"feed\">");
        ctx.indent();
        if sessions.is_empty() {
            ctx.add_line("<p class=\"empty-state\">No sessions yet. Welcome to your diary.</p>");
        } else {
            ctx.add_line("<ul class=\"session-list\">");
            ctx.indent();
            for session in sessions {
                let label = match &session.title {
                    Some(title) => format!("Session {} \u{2014} {}", session.number, title),
                    None => format!("Session {}", session.number),
                };
                ctx.add_line("<li>");
                ctx.indent();
                ctx.add_line(&format!(
                    "<a href=\"session-{}.html\">{}<div class=\"session-date\">{}</div></a>",
                    session.number,
                    escape_html(&label),
                    escape_html(&format_date(session.date.as_deref()))
                ));
                ctx.dedent();
                ctx.add_line("</li>");
            }
            ctx.dedent();
            ctx.add_line("</ul>");
        }
        ctx.dedent();
        ctx.add_line("</main>");
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
        Ok(ctx.into_output())
    }
}
