//! Word-level morpheme segmentation, spec Section 4.E. Grounded on
//! `original_source/word_parser.cpp`'s `OrthParser` (`checked` bitmask
//! memoization over substrings, `maybe_parse_rest`/`parse_rest`), reusing
//! the same chart machinery that parses sentences (`chart.rs`) rather
//! than a bespoke segmentation algorithm.

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::phrase::Phrase;
use crate::rules::{morpheme_rules_for, word_rules_for};
use std::rc::Rc;

/// Every analysis of `orth` as a word: one alternative per distinct
/// minimal-error morpheme segmentation the chart finds, each wrapped as
/// a `Word` phrase with its word-level rules installed.
///
/// `orth.chars().count()` must be under 64: the chart indexes
/// substrings by `(from, to)` character offsets, and the original's
/// `checked` memoization bitmask (here implicit in the chart's own
/// agenda dedup) assumed a `u64`-width word. Orthography at or past that
/// width is a structural error (spec Section 5, Section 7), rejected
/// with a clear condition rather than panicking.
pub fn parse_word(lexicon: &Lexicon, orth: &str) -> Result<Vec<Rc<Phrase>>> {
  if orth.chars().count() >= 64 {
    return Err(Error::from(format!("orthography '{}' is too long to segment (>= 64 characters)", orth)));
  }

  let chars: Vec<char> = orth.chars().collect();
  let mut chart = Chart::new(chars.len());
  let mut any_entry = false;

  for from in 0..chars.len() {
    for to in (from + 1)..=chars.len() {
      let substring: String = chars[from..to].iter().collect();
      for entry in lexicon.morphemes_for(&substring) {
        any_entry = true;
        let (left_rule, right_rule) = morpheme_rules_for(entry.syn);
        let base = Phrase::morpheme(substring.clone(), entry.syn, entry.sem.clone(), entry.args.clone());
        let wired = Phrase { left_rule, right_rule, ..(*base).clone() };
        chart.insert(Rc::new(wired), from, to).expect("substring span is always within the chart's own bounds");
      }
    }
  }

  if !any_entry {
    return Ok(Vec::new());
  }

  let derivations = chart.run();
  if !derivations.is_empty() {
    return Ok(
      derivations
        .into_iter()
        .map(|morpheme| {
          let (left, right) = word_rules_for(orth, morpheme.syn);
          Phrase::word(orth, morpheme, left, right)
        })
        .collect(),
    );
  }

  // No single tree spans the whole orthography (an irregular spelling,
  // or a lexicon gap). Fall back to the longest known substring, flagged
  // with a diagnostic rather than silently dropping the rest of the word.
  let fallback = chart.longest_segmentations().into_iter().next().and_then(|seq| seq.into_iter().next());
  Ok(match fallback {
    Some(best) => {
      let mut morph = (*best).clone();
      if best.length < chars.len() {
        morph.errors.push(format!("could not account for all of '{}' as a single word", orth));
      }
      let morph = Rc::new(morph);
      let (left, right) = word_rules_for(orth, morph.syn);
      vec![Phrase::word(orth, morph, left, right)]
    }
    None => Vec::new(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexeme::ArgBag;
  use crate::tag::{Tag, TagSet};

  fn lexicon_with_plural_noun() -> Lexicon {
    let mut lex = Lexicon::new();
    let mut errors = Vec::new();
    lex.load_str("book: nom akk sg rc\ns: suffix\n", &mut errors);
    assert!(errors.is_empty());
    lex
  }

  #[test]
  fn segments_a_regular_plural_noun() {
    let lex = lexicon_with_plural_noun();
    let words = parse_word(&lex, "books").unwrap();
    assert_eq!(words.len(), 1);
    assert!(words[0].syn.has(Tag::Pl));
    assert!(!words[0].syn.has(Tag::Sg));
    assert_eq!(words[0].total_errors(), 0);
  }

  #[test]
  fn single_morpheme_word_parses_directly() {
    let mut lex = Lexicon::new();
    let mut errors = Vec::new();
    lex.load_str("dog: nom akk sg rc\n", &mut errors);
    assert!(errors.is_empty());
    let words = parse_word(&lex, "dog").unwrap();
    assert_eq!(words.len(), 1);
    assert!(words[0].syn.has(Tag::Sg));
  }

  #[test]
  fn unknown_word_yields_no_analyses() {
    let lex = Lexicon::new();
    assert!(parse_word(&lex, "zzqx").unwrap().is_empty());
    let _ = ArgBag::new();
    let _ = TagSet::EMPTY;
  }

  #[test]
  fn orthography_at_the_bitmask_width_is_rejected() {
    let lex = Lexicon::new();
    let too_long: String = std::iter::repeat('a').take(64).collect();
    assert!(parse_word(&lex, &too_long).is_err());
  }
}
