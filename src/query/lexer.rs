use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("illegal character inside query {0:?}")]
    IllegalCharacter(char),
    #[error("string not terminated")]
    UnterminatedString,
}

/// Splits a query into whitespace separated tokens. A `"` starts a literal
/// span which may contain whitespace; the quotes themselves are dropped.
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    errors: Vec<LexError>,
}

/// Tokenize `raw`, stripping one leading `<` and one trailing `>` first.
///
/// Scanning stops at the first error, so at most one error is returned.
pub fn tokenize(raw: &str) -> (Vec<String>, Vec<LexError>) {
    let raw = raw.strip_prefix('<').unwrap_or(raw);
    let raw = raw.strip_suffix('>').unwrap_or(raw);
    let mut lexer = Lexer {
        chars: raw.chars().peekable(),
        errors: vec![],
    };
    let mut tokens = vec![];
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    (tokens, lexer.errors)
}

impl<'a> Lexer<'a> {
    fn skip_space(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn next_token(&mut self) -> Option<String> {
        if !self.errors.is_empty() {
            return None;
        }
        self.skip_space();
        self.chars.peek()?;
        let mut buff = String::new();
        while let Some(&c) = self.chars.peek() {
            match c {
                '<' | '>' => {
                    self.errors.push(LexError::IllegalCharacter(c));
                    return None;
                }
                '"' => {
                    self.chars.next();
                    buff.push_str(&self.read_string()?);
                }
                c if c.is_whitespace() => break,
                c => {
                    self.chars.next();
                    buff.push(c);
                }
            }
        }
        Some(buff)
    }

    /// Read a literal span, the opening quote already consumed
    fn read_string(&mut self) -> Option<String> {
        let mut buff = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Some(buff),
                Some(c @ ('<' | '>')) => {
                    self.errors.push(LexError::IllegalCharacter(c));
                    return None;
                }
                Some(c) => buff.push(c),
                None => {
                    self.errors.push(LexError::UnterminatedString);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        let (tokens, errors) = tokenize(raw);
        assert!(errors.is_empty(), "unexpected errors {:?}", errors);
        tokens
    }

    #[test]
    fn test_whitespace_split() {
        assert_eq!(tokens("div  class=a\tid=b "), ["div", "class=a", "id=b"]);
        assert_eq!(tokens("   span"), ["span"]);
        assert!(tokens("").is_empty());
        assert!(tokens("  \n ").is_empty());
    }

    #[test]
    fn test_angle_brackets_trimmed_once() {
        assert_eq!(tokens("<a href>"), ["a", "href"]);
        assert!(tokens("<>").is_empty());
        assert_eq!(tokenize("<<a>").1, [LexError::IllegalCharacter('<')]);
    }

    #[test]
    fn test_quoted_spans() {
        assert_eq!(
            tokens(r#"div class="foo bar" id=x"#),
            ["div", "class=foo bar", "id=x"]
        );
        assert_eq!(tokens(r#"p title="a"b"c""#), ["p", "title=abc"]);
        assert_eq!(tokens(r#""" id"#), ["", "id"]);
    }

    #[test]
    fn test_illegal_character() {
        let (tokens, errors) = tokenize("a<b c");
        assert_eq!(errors, [LexError::IllegalCharacter('<')]);
        assert!(tokens.is_empty());

        let (_, errors) = tokenize(r#"a title="x > y""#);
        assert_eq!(errors, [LexError::IllegalCharacter('>')]);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = tokenize(r#"a "unterminated"#);
        assert_eq!(tokens, ["a"]);
        assert_eq!(errors, [LexError::UnterminatedString]);
        assert_eq!(errors[0].to_string(), "string not terminated");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LexError::IllegalCharacter('<').to_string(),
            "illegal character inside query '<'"
        );
    }
}
