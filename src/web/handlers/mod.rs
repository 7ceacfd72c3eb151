//! HTML handlers for the browser surface.

mod add;
mod favicon;
mod index;
mod preferences;
mod preview;
mod redirect;

pub use add::add_handler;
pub use favicon::favicon_handler;
pub use index::index_handler;
pub use preferences::{disable_preview_handler, enable_preview_handler};
pub use preview::preview_handler;
pub use redirect::redirect_handler;
