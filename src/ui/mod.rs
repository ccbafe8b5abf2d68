//! Terminal presentation layer.

pub mod badge;
pub mod render;
pub mod state;

pub use render::{render_json, render_markdown, render_text, write_output};
pub use state::{Popup, PopupState};
