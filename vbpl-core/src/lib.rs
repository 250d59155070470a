pub mod common;
pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use common::error::{ImportError, Result};
pub use domain::*;
