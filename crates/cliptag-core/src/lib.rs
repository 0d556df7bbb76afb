//! Cliptag Core - content classification and title generation.
//!
//! This crate provides the core functionality for the Cliptag clipboard
//! manager: inspecting a pasted text snippet to infer its content type and
//! derive a short display title. Both operations are pure functions of
//! their input and never fail.

pub mod classifier;
pub mod title;

pub use classifier::{Classification, ContentClassifier, ContentType};
pub use title::TitleGenerator;
