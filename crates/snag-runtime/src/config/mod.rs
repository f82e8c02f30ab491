//! File and environment based options loading.

pub mod error;
pub mod loader;

pub use error::{LoaderError, LoaderResult};
pub use loader::OptionsLoader;
