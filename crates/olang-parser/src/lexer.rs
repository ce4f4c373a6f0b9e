//! Lexer for the O programming language.
//!
//! Implemented with the logos library; converts source text into a stream of
//! tokens with precise source location information.

use crate::token::{Span, Token};
use logos::Logos;

/// Logos-based token enum used internally for tokenization.
///
/// Converted to the public [`Token`] enum after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    // Keywords (must come before identifiers)
    #[token("class")]
    Class,

    #[token("extends")]
    Extends,

    #[token("is")]
    Is,

    #[token("end")]
    End,

    #[token("var")]
    Var,

    #[token("method")]
    Method,

    #[token("this")]
    This,

    #[token("return")]
    Return,

    #[token("if")]
    If,

    #[token("then")]
    Then,

    #[token("else")]
    Else,

    #[token("while")]
    While,

    #[token("loop")]
    Loop,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Real literals must be tried before integers
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    RealLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLiteral(i64),

    #[regex(r#""([^"\\]|\\.)*""#, unescape_string)]
    StringLiteral(String),

    // Punctuation (2-char before 1-char)
    #[token(":=")]
    Assign,

    #[token("->")]
    Arrow,

    #[token(":")]
    Colon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,
}

/// Strip the surrounding quotes and process escape sequences.
fn unescape_string(lex: &mut logos::Lexer<LogosToken>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next()? {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            other => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    Some(result)
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{char}' at {span}")]
    UnexpectedCharacter { char: char, span: Span },

    #[error("Invalid number literal '{text}' at {span}")]
    InvalidNumber { text: String, span: Span },
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// Fails on the first invalid character; a trailing `Eof` token is always
    /// appended on success.
    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, LexError> {
        let mut logos_lexer = LogosToken::lexer(self.source);
        let mut line = 1u32;
        let mut column = 1u32;
        let mut last_end = 0;

        while let Some(token_result) = logos_lexer.next() {
            let range = logos_lexer.span();

            // Advance line/column over any skipped text
            for c in self.source[last_end..range.start].chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            let span = Span::new(range.start, range.end, line, column);

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(_) => {
                    let char = self.source[range.start..].chars().next().unwrap_or('\0');
                    return Err(LexError::UnexpectedCharacter { char, span });
                }
            }

            for c in self.source[range.start..range.end].chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            last_end = range.end;
        }

        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        Ok(self.tokens)
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Class => Token::Class,
        LogosToken::Extends => Token::Extends,
        LogosToken::Is => Token::Is,
        LogosToken::End => Token::End,
        LogosToken::Var => Token::Var,
        LogosToken::Method => Token::Method,
        LogosToken::This => Token::This,
        LogosToken::Return => Token::Return,
        LogosToken::If => Token::If,
        LogosToken::Then => Token::Then,
        LogosToken::Else => Token::Else,
        LogosToken::While => Token::While,
        LogosToken::Loop => Token::Loop,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Identifier(name) => Token::Identifier(name),
        LogosToken::IntLiteral(value) => Token::IntLiteral(value),
        LogosToken::RealLiteral(value) => Token::RealLiteral(value),
        LogosToken::StringLiteral(value) => Token::StringLiteral(value),
        LogosToken::Assign => Token::Assign,
        LogosToken::Arrow => Token::Arrow,
        LogosToken::Colon => Token::Colon,
        LogosToken::LParen => Token::LParen,
        LogosToken::RParen => Token::RParen,
        LogosToken::Comma => Token::Comma,
        LogosToken::Dot => Token::Dot,
        LogosToken::Whitespace | LogosToken::LineComment => unreachable!("skipped by logos"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("class extends is end var method this");
        assert_eq!(
            tokens,
            vec![
                Token::Class,
                Token::Extends,
                Token::Is,
                Token::End,
                Token::Var,
                Token::Method,
                Token::This,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_not_keyword_prefix() {
        let tokens = lex("classes endif variable");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("classes".into()),
                Token::Identifier("endif".into()),
                Token::Identifier("variable".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("42 3.14 true false \"hi\\n\"");
        assert_eq!(
            tokens,
            vec![
                Token::IntLiteral(42),
                Token::RealLiteral(3.14),
                Token::True,
                Token::False,
                Token::StringLiteral("hi\n".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        let tokens = lex("a := b.c(d, e) : -> T");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".into()),
                Token::Assign,
                Token::Identifier("b".into()),
                Token::Dot,
                Token::Identifier("c".into()),
                Token::LParen,
                Token::Identifier("d".into()),
                Token::Comma,
                Token::Identifier("e".into()),
                Token::RParen,
                Token::Colon,
                Token::Arrow,
                Token::Identifier("T".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = Lexer::new("class A\n  var x : Integer\nend").tokenize().unwrap();
        let (var_tok, var_span) = &tokens[2];
        assert_eq!(*var_tok, Token::Var);
        assert_eq!(var_span.line, 2);
        assert_eq!(var_span.column, 3);
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = lex("class // the root\nA");
        assert_eq!(
            tokens,
            vec![Token::Class, Token::Identifier("A".into()), Token::Eof]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("class @").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { char: '@', .. }));
    }
}
