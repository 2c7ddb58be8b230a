//! Language-specific structural stripping.

pub mod common;
pub mod python;
pub mod registry;

pub use common::{extract_class_source, PlainTextStripper, StripOptions, StructuralStripper};
pub use python::PythonStripper;
pub use registry::stripper_for_language;
