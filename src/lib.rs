pub mod analysis;
pub mod config;
pub mod error;
pub mod gallery;
pub mod server;
pub mod submission;
pub mod view;

pub use error::{Error, Result};
