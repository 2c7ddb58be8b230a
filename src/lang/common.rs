//! Common structural stripping abstractions.

use crate::core::errors::Result;

/// Which structural elements a stripper removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOptions {
    /// Remove leading doc-strings of module, function, and class bodies
    pub docstrings: bool,
    /// Remove parameter, return, and assignment type annotations
    pub type_annotations: bool,
}

/// Default implementation for [`StripOptions`].
impl Default for StripOptions {
    fn default() -> Self {
        Self {
            docstrings: true,
            type_annotations: true,
        }
    }
}

/// Removes non-behavioural syntax (doc-strings, annotations) from source text.
///
/// Implementations return an error when the source cannot be parsed; callers
/// treat that as a recoverable degradation and keep the raw text.
pub trait StructuralStripper: Send {
    /// Language key this stripper handles
    fn language(&self) -> &'static str;

    /// Strip the source according to `options`
    fn strip(&mut self, source: &str, options: StripOptions) -> Result<String>;
}

/// Identity stripper for inputs without a structural grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextStripper;

impl StructuralStripper for PlainTextStripper {
    fn language(&self) -> &'static str {
        "text"
    }

    fn strip(&mut self, source: &str, _options: StripOptions) -> Result<String> {
        Ok(source.to_string())
    }
}

/// A byte range of the source to drop while rebuilding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Deletion {
    pub start: usize,
    pub end: usize,
}

/// Rebuild `source` without the given byte ranges.
///
/// Ranges may arrive unsorted; a range overlapping an earlier one is skipped.
/// Returns `None` if a range does not fall on character boundaries.
pub(crate) fn apply_deletions(source: &str, mut deletions: Vec<Deletion>) -> Option<String> {
    deletions.sort();
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    for deletion in deletions {
        if deletion.start < cursor || deletion.end < deletion.start {
            continue;
        }
        output.push_str(source.get(cursor..deletion.start)?);
        cursor = deletion.end;
    }
    output.push_str(source.get(cursor..)?);
    Some(output)
}

/// Slice out the source of `class <name>` up to the next top-level class.
///
/// Only definitions starting at column zero count, so nested classes stay
/// inside the extracted body.
pub fn extract_class_source<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let mut offset = 0;
    let mut start = None;

    for line in source.split_inclusive('\n') {
        if let Some(begin) = start {
            if is_top_level_class(line) {
                return Some(&source[begin..offset]);
            }
        } else if defines_class(line, name) {
            start = Some(offset);
        }
        offset += line.len();
    }

    start.map(|begin| &source[begin..])
}

fn is_top_level_class(line: &str) -> bool {
    line.strip_prefix("class")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

fn defines_class(line: &str, name: &str) -> bool {
    let Some(rest) = line.strip_prefix("class") else {
        return false;
    };
    let rest = rest.trim_start();
    if rest.len() == line.len() - "class".len() {
        // no whitespace after the keyword
        return false;
    }
    let Some(tail) = rest.strip_prefix(name) else {
        return false;
    };
    tail.chars()
        .next()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_deletions_skips_overlaps() {
        let source = "abcdefgh";
        let deletions = vec![
            Deletion { start: 5, end: 6 },
            Deletion { start: 1, end: 3 },
            Deletion { start: 2, end: 4 },
        ];
        assert_eq!(apply_deletions(source, deletions).as_deref(), Some("adegh"));
    }

    #[test]
    fn test_apply_deletions_rejects_split_characters() {
        let source = "aé";
        let deletions = vec![Deletion { start: 2, end: 3 }];
        assert_eq!(apply_deletions(source, deletions), None);
    }

    #[test]
    fn test_plain_text_stripper_is_identity() {
        let mut stripper = PlainTextStripper;
        let source = "x: int = 1  # note";
        assert_eq!(
            stripper.strip(source, StripOptions::default()).unwrap(),
            source
        );
    }

    #[test]
    fn test_extract_class_source() {
        let source = "import os\n\nclass Token:\n    pass\n\nclass Scanner(object):\n    class Inner:\n        pass\n    def scan(self):\n        return 1\n\nclass Parser:\n    pass\n";
        let extracted = extract_class_source(source, "Scanner").expect("scanner class");
        assert!(extracted.starts_with("class Scanner(object):"));
        assert!(extracted.contains("class Inner"));
        assert!(extracted.contains("def scan"));
        assert!(!extracted.contains("Parser"));
    }

    #[test]
    fn test_extract_class_requires_exact_name() {
        let source = "class ScannerError:\n    pass\n";
        assert_eq!(extract_class_source(source, "Scanner"), None);
        assert_eq!(
            extract_class_source(source, "ScannerError"),
            Some("class ScannerError:\n    pass\n")
        );
    }

    #[test]
    fn test_extract_class_runs_to_end_of_file() {
        let source = "class Scanner:\n    def scan(self):\n        pass";
        assert_eq!(extract_class_source(source, "Scanner"), Some(source));
    }
}
