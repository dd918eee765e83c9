//! Port definitions (interfaces implemented by outer layers)

pub mod conversation_logger;
pub mod media;
pub mod model_invoker;
pub mod observer;
