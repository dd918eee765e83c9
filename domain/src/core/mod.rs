//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelDescriptor`] / [`model::ModelRegistry`]: selectable models
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
