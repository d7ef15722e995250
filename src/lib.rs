pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod loader;
pub mod models;
pub mod source;
pub mod store;
pub mod verify;

pub use error::{LoadError, LoadResult, VerificationError};
pub use loader::{LoadReport, run, run_with};
