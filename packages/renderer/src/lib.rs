pub mod card;
pub mod helpers;
pub mod markdown;
pub mod page;
pub mod portraits;
pub mod session;

#[cfg(test)]
mod tests;

pub use card::Renderer;
pub use helpers::{escape_html, format_date, EmojiMap};
pub use page::RenderError;
pub use portraits::PortraitBook;
pub use session::{organize, Session};
