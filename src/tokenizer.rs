//! The external tokenizer contract, spec Section 4.G. Grounded on
//! `original_source/tokens.h`'s `TokenIterator` (`_read_token`,
//! `_read_white`, `_read_break`, `skipws`, `flushLine`), translated from
//! its char-by-char state machine into a Rust `Iterator`.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
  /// A maximal run of alphanumeric characters (and internal apostrophes,
  /// so contractions like "don't" stay a single token).
  Word(String),
  /// A single non-newline whitespace character.
  Space,
  /// A single newline, separating sentences.
  Newline,
}

impl Token {
  pub fn is_newline(&self) -> bool {
    matches!(self, Token::Newline)
  }

  pub fn is_whitespace(&self) -> bool {
    matches!(self, Token::Space | Token::Newline)
  }
}

pub struct Tokenizer<'a> {
  chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
  pub fn new(input: &'a str) -> Self {
    Tokenizer { chars: input.chars().peekable() }
  }
}

impl<'a> Iterator for Tokenizer<'a> {
  type Item = Token;

  fn next(&mut self) -> Option<Token> {
    let &c = self.chars.peek()?;
    if c == '\n' {
      self.chars.next();
      return Some(Token::Newline);
    }
    if c.is_whitespace() {
      self.chars.next();
      return Some(Token::Space);
    }
    if c.is_alphanumeric() {
      let mut word = String::new();
      while let Some(&c) = self.chars.peek() {
        if c.is_alphanumeric() || (c == '\'' && !word.is_empty()) {
          word.push(c);
          self.chars.next();
        } else {
          break;
        }
      }
      return Some(Token::Word(word));
    }
    // Any other punctuation character is its own single-character word,
    // matching the original's treatment of everything that is neither
    // alnum nor whitespace as a standalone token.
    self.chars.next();
    Some(Token::Word(c.to_string()))
  }
}

/// Skips a single whitespace token if present, then reports whether the
/// stream is now sitting on a newline or has run out (spec 4.G
/// `skipws`): callers use this to decide whether a sentence has ended.
pub fn skipws(tokens: &mut Peekable<Tokenizer>) -> bool {
  if matches!(tokens.peek(), Some(Token::Space)) {
    tokens.next();
  }
  !matches!(tokens.peek(), Some(Token::Word(_)))
}

/// Discards tokens up through (and including) the next newline, or to
/// the end of input if there is none (spec 4.G `flushLine`).
pub fn flush_line(tokens: &mut Peekable<Tokenizer>) {
  for token in tokens.by_ref() {
    if token.is_newline() {
      break;
    }
  }
}
