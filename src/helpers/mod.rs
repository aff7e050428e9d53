//! Helper functions for templates and handlers

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
