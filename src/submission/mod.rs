mod controller;
mod payload;

pub use controller::*;
pub use payload::*;
