pub mod assets;
pub mod clear;
pub mod data;
pub mod error;
pub mod identity;
pub mod pipeline;

pub use assets::*;
pub use clear::*;
pub use data::*;
pub use error::*;
pub use identity::*;
pub use pipeline::*;
