pub mod parser;
pub mod record;
pub mod serializer;

pub use parser::parse;
pub use record::{PostRecord, PostType};
pub use serializer::{prepend, NewPost};
