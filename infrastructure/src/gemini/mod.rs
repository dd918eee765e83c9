//! Gemini provider
//!
//! Calls the Generative Language REST API (`generateContent`) directly over
//! `reqwest` and implements the [`ModelInvoker`](duet_application::ModelInvoker)
//! port.

mod invoker;
mod types;

pub use invoker::GeminiInvoker;
