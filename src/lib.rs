//! A best-first dependency-grammar chart parser for English, spec
//! Section 1 ("Overview"). The module layout below mirrors
//! `original_source/grammatical`'s file split one-for-one: `tag`/
//! `lexeme`/`phrase` are the data model (Section 3), `rules` is the
//! attachment-rule algebra (Section 4.C), `chart` is the agenda-driven
//! parser (Section 4.D), `word_parser` segments a single orthographic
//! word into morphemes (Section 4.E), `lexicon` loads the word list
//! (Section 4.F), and `tokenizer` is the external sentence-splitting
//! contract (Section 4.G).

pub mod chart;
pub mod error;
pub mod lexeme;
pub mod lexicon;
pub mod phrase;
pub mod rules;
pub mod tag;
pub mod tokenizer;
pub mod word_parser;

use crate::chart::Chart;
use crate::lexeme::ArgBag;
use crate::lexicon::Lexicon;
use crate::phrase::Phrase;
use crate::tag::TagSet;
use crate::tokenizer::{Token, Tokenizer};
use std::iter::Peekable;
use std::rc::Rc;

/// The outcome of parsing one sentence.
pub enum SentenceResult {
  /// One or more complete derivations spanning the whole sentence, all
  /// tied for fewest total errors.
  Parses(Vec<Rc<Phrase>>),
  /// No single derivation covered the whole sentence; the best partial
  /// coverage found, as a left-to-right sequence of phrases (spec
  /// 4.D's `_generate_result` fallback).
  Partial(Vec<Rc<Phrase>>),
}

/// Collects the next sentence's words from `tokens` (up to the next
/// newline or end of input), parses each as a word, and runs the chart.
/// Returns `None` only when there were no words to collect at all.
pub fn parse_sentence(lexicon: &Lexicon, tokens: &mut Peekable<Tokenizer>) -> Option<SentenceResult> {
  let mut words = Vec::new();
  loop {
    match tokens.peek() {
      None => break,
      Some(Token::Newline) => {
        tokens.next();
        break;
      }
      Some(Token::Space) => {
        tokens.next();
      }
      Some(Token::Word(_)) => {
        if let Some(Token::Word(word)) = tokens.next() {
          words.push(word);
        }
      }
    }
  }
  if words.is_empty() {
    return None;
  }

  let mut chart = Chart::new(words.len());
  for (index, word) in words.iter().enumerate() {
    let mut alternatives = match crate::word_parser::parse_word(lexicon, word) {
      Ok(alternatives) => alternatives,
      Err(error) => vec![flagged_word(word, error.to_string())],
    };
    if alternatives.is_empty() {
      alternatives.push(unknown_word(word));
    }
    chart.push_token(alternatives, index);
  }

  let parses = chart.run();
  if !parses.is_empty() {
    return Some(SentenceResult::Parses(parses));
  }
  Some(SentenceResult::Partial(chart.longest_segmentations().into_iter().next().unwrap_or_default()))
}

/// A placeholder `Word` phrase for orthography the lexicon has no entry
/// for, carrying a diagnostic rather than aborting the parse (spec
/// 4.G; `original_source/main.cpp`'s `Tokenizer::next`).
fn unknown_word(orth: &str) -> Rc<Phrase> {
  flagged_word(orth, format!("unknown word '{}'", orth))
}

/// A placeholder `Word` phrase carrying an arbitrary diagnostic, e.g.
/// the word parser's structural orthography-length rejection (spec
/// Section 5, Section 7) surfaced as a per-word diagnostic instead of
/// aborting the whole sentence's parse.
fn flagged_word(orth: &str, message: String) -> Rc<Phrase> {
  let morph = Phrase::morpheme(orth, TagSet::EMPTY, None, ArgBag::new());
  let mut flagged = (*morph).clone();
  flagged.errors.push(message);
  Phrase::word(orth, Rc::new(flagged), crate::phrase::no_left, crate::phrase::no_right)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unparsed_vocabulary_still_produces_a_flagged_derivation() {
    let lexicon = Lexicon::new();
    let mut tokens = Tokenizer::new("zzqx").peekable();
    let result = parse_sentence(&lexicon, &mut tokens);
    match result {
      Some(SentenceResult::Partial(phrases)) => {
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].total_errors(), 1);
      }
      _ => panic!("expected a partial result for unknown vocabulary"),
    }
  }

  #[test]
  fn blank_input_yields_no_sentence() {
    let lexicon = Lexicon::new();
    let mut tokens = Tokenizer::new("\n").peekable();
    assert!(parse_sentence(&lexicon, &mut tokens).is_none());
  }

  #[test]
  fn orthography_past_the_bitmask_width_is_flagged_not_panicked() {
    let lexicon = Lexicon::new();
    let too_long: String = std::iter::repeat('a').take(64).collect();
    let mut tokens = Tokenizer::new(&too_long).peekable();
    let result = parse_sentence(&lexicon, &mut tokens);
    match result {
      Some(SentenceResult::Partial(phrases)) => {
        assert_eq!(phrases.len(), 1);
        assert!(phrases[0].errors.iter().any(|e| e.contains("too long")));
      }
      _ => panic!("expected a partial result flagging the oversized word"),
    }
  }
}
