// linkshelf shared type definitions
// Each submodule defines types used across the client.

pub mod bookmark;
pub mod errors;
pub mod filter;
pub mod notification;
pub mod settings;
