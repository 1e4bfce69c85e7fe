// Library for the binary and tests

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod scanner;
pub mod session;
pub mod version;
pub mod worker;

pub use error::{DecodeError, SampleError};
pub use session::{Session, get_current, get_current_encoded};
