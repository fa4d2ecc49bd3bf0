pub mod traits;
pub mod types;

pub mod length_prefixed;

pub use traits::*;
pub use types::*;
pub use length_prefixed::*;

#[cfg(test)]
mod length_prefixed_tests;
