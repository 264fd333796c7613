//! linkshelf UI layer.
//!
//! Renders the bookmark board, navigation bar, settings and notifications as
//! plain text for the terminal.

pub mod renderer;
