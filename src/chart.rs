//! The agenda-driven best-first chart parser, spec Section 4.D. Grounded
//! on `original_source/parser.h`/`parser.cpp` (`Position`, `Item`,
//! `ErrorOrder`, `Parser::run`, `_match`, `_generate_result`), with the
//! original's raw pointers replaced by `Rc<Phrase>` sharing throughout.

use crate::error::{Error, Result};
use crate::phrase::Phrase;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

struct Item {
  phrase: Rc<Phrase>,
  from: usize,
  to: usize,
}

impl Item {
  fn errors(&self) -> usize {
    self.phrase.total_errors()
  }
}

impl PartialEq for Item {
  fn eq(&self, other: &Self) -> bool {
    self.errors() == other.errors()
  }
}
impl Eq for Item {}

impl PartialOrd for Item {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Item {
  /// `BinaryHeap` is a max-heap; the chart wants the item with the
  /// *fewest* errors popped first (spec: "agenda ordered by ascending
  /// total error count, not probability"), so the comparison is
  /// reversed here.
  fn cmp(&self, other: &Self) -> Ordering {
    other.errors().cmp(&self.errors())
  }
}

#[derive(Default)]
struct Position {
  /// Phrases beginning at this position, paired with where they end.
  begins_with: Vec<(Rc<Phrase>, usize)>,
  /// Phrases ending at this position, paired with where they began.
  ends_with: Vec<(Rc<Phrase>, usize)>,
}

/// One best-first parse of a single sentence. Built fresh per sentence;
/// `length` is the number of tokens (word positions), not characters.
pub struct Chart {
  positions: Vec<Position>,
  agenda: BinaryHeap<Item>,
  top: Vec<Rc<Phrase>>,
  best_errors: Option<usize>,
  debug: bool,
}

impl Chart {
  pub fn new(length: usize) -> Chart {
    let mut positions = Vec::with_capacity(length + 1);
    for _ in 0..=length {
      positions.push(Position::default());
    }
    Chart { positions, agenda: BinaryHeap::new(), top: Vec::new(), best_errors: None, debug: false }
  }

  pub fn set_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  fn length(&self) -> usize {
    self.positions.len() - 1
  }

  /// Queues a single candidate phrase spanning `[from, to)`. Candidates
  /// are not visible to matching until they are popped off the agenda
  /// (spec invariant: a span is only "real" once realized best-first).
  /// Out-of-range spans are a caller mistake (spec Section 7,
  /// "Structural errors"), rejected cleanly rather than left to panic.
  pub fn insert(&mut self, phrase: Rc<Phrase>, from: usize, to: usize) -> Result<()> {
    if to <= from {
      return Err(Error::from(format!("a phrase must span at least one token, got [{}, {})", from, to)));
    }
    if to >= self.positions.len() {
      return Err(Error::from(format!("span [{}, {}) exceeds the chart's length {}", from, to, self.length())));
    }
    self.insert_raw(phrase, from, to);
    Ok(())
  }

  fn insert_raw(&mut self, phrase: Rc<Phrase>, from: usize, to: usize) {
    self.agenda.push(Item { phrase, from, to });
  }

  /// Queues every alternative analysis of one word at position `index`.
  /// The span is always in-range by construction (`index < length`), so
  /// this is infallible.
  pub fn push_token(&mut self, alternatives: Vec<Rc<Phrase>>, index: usize) {
    for phrase in alternatives {
      self.insert_raw(phrase, index, index + 1);
    }
  }

  fn match_adjacent(&mut self, left: &Rc<Phrase>, left_from: usize, right: &Rc<Phrase>, right_to: usize) {
    for result in (left.right_rule)(left, right) {
      self.insert_raw(result, left_from, right_to);
    }
    for result in (right.left_rule)(left, right) {
      self.insert_raw(result, left_from, right_to);
    }
  }

  /// Runs the chart to exhaustion (or until the agenda can no longer
  /// improve on the best full-span parse found so far) and returns every
  /// minimal-error full-span derivation, if any were found.
  pub fn run(&mut self) -> Vec<Rc<Phrase>> {
    let full_span = self.length();
    loop {
      let peek_errors = match self.agenda.peek() {
        Some(item) => item.errors(),
        None => break,
      };
      if let Some(best) = self.best_errors {
        if peek_errors > best {
          break;
        }
      }
      let item = self.agenda.pop().expect("peeked above");
      if self.debug {
        eprintln!("chart: [{}, {}) {} ({} errors)", item.from, item.to, item.phrase, item.errors());
      }

      if item.to - item.from == full_span {
        let errors = item.errors();
        match self.best_errors {
          Some(best) if errors < best => {
            self.best_errors = Some(errors);
            self.top.clear();
            self.top.push(item.phrase.clone());
          }
          Some(best) if errors == best => {
            self.top.push(item.phrase.clone());
          }
          None => {
            self.best_errors = Some(errors);
            self.top.push(item.phrase.clone());
          }
          _ => {}
        }
      }

      let left_neighbours = self.positions[item.from].ends_with.clone();
      let right_neighbours = self.positions[item.to].begins_with.clone();

      self.positions[item.from].begins_with.push((item.phrase.clone(), item.to));
      self.positions[item.to].ends_with.push((item.phrase.clone(), item.from));

      for (left, left_from) in &left_neighbours {
        self.match_adjacent(left, *left_from, &item.phrase, item.to);
      }
      for (right, right_to) in &right_neighbours {
        self.match_adjacent(&item.phrase, item.from, right, *right_to);
      }
    }
    self.top.clone()
  }

  /// Fallback for when no full-span parse exists: the longest sequence
  /// of partial phrases that together cover the sentence, recursing
  /// left to right and branching on ties (spec's `_generate_result`
  /// longest-first reading, `original_source/parser.cpp`).
  pub fn longest_segmentations(&self) -> Vec<Vec<Rc<Phrase>>> {
    fn recurse(positions: &[Position], from: usize, full: usize) -> Vec<Vec<Rc<Phrase>>> {
      if from == full {
        return vec![Vec::new()];
      }
      let candidates = &positions[from].begins_with;
      if candidates.is_empty() {
        return Vec::new();
      }
      let longest_to = candidates.iter().map(|(_, to)| *to).max().unwrap();
      let mut out = Vec::new();
      for (phrase, to) in candidates.iter().filter(|(_, to)| *to == longest_to) {
        for mut tail in recurse(positions, *to, full) {
          let mut seq = vec![phrase.clone()];
          seq.append(&mut tail);
          out.push(seq);
        }
      }
      out
    }
    recurse(&self.positions, 0, self.length())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexeme::ArgBag;
  use crate::rules::{noun_adjective, noun_det};
  use crate::tag::{Tag, TagSet};

  fn word(orth: &str, syn: TagSet, left: crate::phrase::LeftRule, right: crate::phrase::RightRule) -> Rc<Phrase> {
    let morph = Phrase::morpheme(orth, syn, None, ArgBag::new());
    Phrase::word(orth, morph, left, right)
  }

  #[test]
  fn chart_combines_determiner_and_noun() {
    let mut chart = Chart::new(2);
    let the = word("the", TagSet::of(&[Tag::Gen]), crate::phrase::no_left, crate::phrase::no_right);
    let book = word("book", TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Sg]), noun_adjective, crate::phrase::no_right);
    chart.push_token(vec![the], 0);
    chart.push_token(vec![book], 1);
    let results = chart.run();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].to_string(), "[the: book]");
    assert_eq!(results[0].total_errors(), 0);
    let _ = noun_det;
  }

  #[test]
  fn insert_rejects_out_of_range_spans() {
    let mut chart = Chart::new(2);
    let book = word("book", TagSet::EMPTY, crate::phrase::no_left, crate::phrase::no_right);
    assert!(chart.insert(book.clone(), 0, 3).is_err());
    assert!(chart.insert(book, 1, 1).is_err());
  }

  #[test]
  fn chart_falls_back_to_longest_segmentation_when_no_full_span_parse_exists() {
    let mut chart = Chart::new(2);
    let a = word("a", TagSet::EMPTY, crate::phrase::no_left, crate::phrase::no_right);
    let b = word("b", TagSet::EMPTY, crate::phrase::no_left, crate::phrase::no_right);
    chart.push_token(vec![a], 0);
    chart.push_token(vec![b], 1);
    let results = chart.run();
    assert!(results.is_empty());
    let segmentations = chart.longest_segmentations();
    assert_eq!(segmentations.len(), 1);
    assert_eq!(segmentations[0].len(), 2);
  }
}
