//! Comment stripping and code tokenization.

/// Drop everything from the first `marker` to the end of each line.
pub fn strip_comments(text: &str, marker: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        match line.find(marker) {
            Some(position) => output.push_str(&line[..position]),
            None => output.push_str(line),
        }
    }
    output
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split code into identifier runs and single punctuation characters.
///
/// Identifiers start with an ASCII letter or underscore and continue over word
/// characters. Every other non-whitespace, non-word character is its own token.
/// Word characters that cannot start an identifier (digits not attached to a
/// name, for instance) are discarded.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_alphabetic() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(index, next)) = chars.peek() {
                if !is_word_char(next) {
                    break;
                }
                end = index + next.len_utf8();
                chars.next();
            }
            tokens.push(&text[start..end]);
        } else if !is_word_char(c) && !c.is_whitespace() {
            tokens.push(&text[start..start + c.len_utf8()]);
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_per_line() {
        let text = "x = 1  # set x\n# full line\ny = 2";
        assert_eq!(strip_comments(text, "#"), "x = 1  \n\ny = 2");
    }

    #[test]
    fn test_strip_comments_custom_marker() {
        assert_eq!(strip_comments("a = b // note", "//"), "a = b ");
    }

    #[test]
    fn test_tokenize_identifiers_and_punctuation() {
        assert_eq!(
            tokenize("self.add_token(TokenType.LEFT_PAREN)"),
            vec!["self", ".", "add_token", "(", "TokenType", ".", "LEFT_PAREN", ")"]
        );
    }

    #[test]
    fn test_tokenize_discards_bare_digits() {
        assert_eq!(tokenize("if x==1: return x"), vec!["if", "x", "=", "=", ":", "return", "x"]);
        assert_eq!(tokenize("var2 = 42"), vec!["var2", "="]);
    }

    #[test]
    fn test_tokenize_unicode() {
        assert_eq!(tokenize("naïve → x"), vec!["naïve", "→", "x"]);
        assert!(tokenize("   \n\t").is_empty());
    }
}
