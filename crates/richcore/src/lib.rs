// Richcore library exports

pub mod config;
pub mod document;
pub mod editor;
pub mod entity;
pub mod parser;
pub mod ranges;
pub mod serializer;
pub mod word;

pub use config::EngineConfig;
pub use document::{Bullet, BulletKind, Document, InvariantViolation, Style, StyleFlag, StyleRun};
pub use editor::{apply_document, snapshot, BufferSurface, HostSurface, StyleEditor};
pub use parser::parse;
pub use ranges::modify_ranges;
pub use serializer::{get_untagged_text, serialize};
pub use word::select_word;

#[cfg(test)]
mod tests;
