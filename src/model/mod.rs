pub mod catalog;
pub mod common;
pub mod document;

pub use catalog::*;
pub use common::*;
pub use document::*;
