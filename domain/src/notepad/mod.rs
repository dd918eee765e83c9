//! Notepad domain
//!
//! - [`entities::Notepad`]: the shared buffer with last-writer attribution
//! - [`parsing::parse_response`]: splits agent replies into speech and update

pub mod entities;
pub mod parsing;

pub use entities::{INITIAL_NOTEPAD_CONTENT, Notepad};
pub use parsing::{
    EMPTY_UPDATE_PLACEHOLDER, NOTEPAD_UPDATE_END, NOTEPAD_UPDATE_START, ParsedResponse,
    SILENT_UPDATE_PLACEHOLDER, parse_response,
};
