//! Geometry reconstruction: model mentions → OCR words → grouped pixel
//! boxes → unit-square highlights.

pub mod types;
pub mod resolver;
pub mod grouping;
pub mod normalize;

pub use types::*;
pub use resolver::*;
pub use grouping::*;
pub use normalize::*;
