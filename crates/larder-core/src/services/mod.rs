//! Services for Larder.

pub mod advice;

pub use advice::AdviceKind;
