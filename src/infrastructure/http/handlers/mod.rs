//! HTTP Handlers

mod dispatch;
mod ping;

pub use dispatch::*;
pub use ping::*;
