//! Application-level configuration.
//!
//! - [`DiscussionConfig`]: turn count, response language, agent personas

pub mod discussion_config;

pub use discussion_config::DiscussionConfig;
