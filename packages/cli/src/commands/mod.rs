mod init;
mod new;
mod render;

pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use render::{render, RenderArgs};
