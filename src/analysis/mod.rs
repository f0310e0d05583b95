mod client;
mod image;
mod types;

pub use client::*;
pub use image::*;
pub use types::*;
