//! Factory for structural strippers.

use crate::core::config::SourceLanguage;
use crate::core::errors::Result;
use crate::lang::common::{PlainTextStripper, StructuralStripper};
use crate::lang::python::PythonStripper;

/// Create a fresh stripper for `language`.
///
/// Tree-sitter parsers are stateful, so each worker thread gets its own.
pub fn stripper_for_language(language: SourceLanguage) -> Result<Box<dyn StructuralStripper>> {
    match language {
        SourceLanguage::Python => Ok(Box::new(PythonStripper::new()?)),
        SourceLanguage::Text => Ok(Box::new(PlainTextStripper)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_every_language() {
        for language in [SourceLanguage::Python, SourceLanguage::Text] {
            let stripper = stripper_for_language(language).expect("stripper");
            assert_eq!(stripper.language(), language.as_str());
        }
    }
}
