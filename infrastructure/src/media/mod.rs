//! Local image handling for attached images

mod local_store;

pub use local_store::LocalMediaStore;
