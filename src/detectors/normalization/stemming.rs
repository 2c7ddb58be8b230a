//! Suffix stemming for code tokens.

/// Tokens that are never stemmed.
const PROTECTED_KEYWORDS: &[&str] = &[
    "while", "for", "if", "else", "elif", "try", "except", "finally", "class", "def", "return",
    "yield", "break", "continue", "pass", "raise", "with", "as", "import", "from", "global",
    "nonlocal",
];

/// Stripped suffixes, longest first.
const SUFFIXES: &[&str] = &["ations", "ments", "tion", "ment", "ing", "ers", "ed", "er"];

/// A stem must keep more than this many characters.
const MIN_STEM_CHARS: usize = 2;

/// Lowercase a token and strip at most one known suffix.
pub fn stem(token: &str) -> String {
    let lowered = token.to_lowercase();
    if PROTECTED_KEYWORDS.contains(&lowered.as_str()) {
        return lowered;
    }

    let char_count = lowered.chars().count();
    for suffix in SUFFIXES {
        if lowered.ends_with(suffix) && char_count > suffix.len() + MIN_STEM_CHARS {
            let mut stemmed = lowered;
            stemmed.truncate(stemmed.len() - suffix.len());
            return stemmed;
        }
    }

    lowered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_common_suffixes() {
        assert_eq!(stem("running"), "runn");
        assert_eq!(stem("scanned"), "scann");
        assert_eq!(stem("Scanner"), "scann");
        assert_eq!(stem("tokenizers"), "tokeniz");
        assert_eq!(stem("relations"), "rel");
        assert_eq!(stem("statements"), "state");
        assert_eq!(stem("position"), "posi");
        assert_eq!(stem("argument"), "argu");
    }

    #[test]
    fn test_short_stems_are_kept() {
        assert_eq!(stem("ring"), "ring");
        assert_eq!(stem("bed"), "bed");
        assert_eq!(stem("user"), "user");
        assert_eq!(stem("fed"), "fed");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("being"), "being");
        assert_eq!(stem("seeing"), "see");
    }

    #[test]
    fn test_protected_keywords_only_lowercased() {
        assert_eq!(stem("RETURN"), "return");
        assert_eq!(stem("finally"), "finally");
        assert_eq!(stem("Nonlocal"), "nonlocal");
    }

    #[test]
    fn test_punctuation_passes_through() {
        assert_eq!(stem("("), "(");
        assert_eq!(stem("="), "=");
    }
}
