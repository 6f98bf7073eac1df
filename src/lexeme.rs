//! Semantic identity and argument frames, spec Section 3 ("Lexeme",
//! "Argument") and Section 4.A. Grounded on `original_source/phrase.h`'s
//! `Lexeme::is`/`parts` and `word_parser.cpp`'s `Rel`/`parse_arg`, with
//! `sem` kept separate from syntactic tags per spec's richer model
//! (tags live on `Phrase`, not `Lexeme` — see `phrase.rs`).

use std::rc::Rc;

/// Preposition marker a dependent may carry, spec Section 3 ("Mark").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
  None,
  By,
  Of,
  To,
  For,
}

pub fn mark_by_name(name: &str) -> Option<Mark> {
  Some(match name {
    "none" => Mark::None,
    "by" => Mark::By,
    "of" => Mark::Of,
    "to" => Mark::To,
    "for" => Mark::For,
    _ => return None,
  })
}

/// The four dependency slots a head exposes, spec Section 3 ("Rel").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rel {
  Spec,
  Mod,
  Comp,
  Bicomp,
}

/// A requirement a head places on a dependent attaching through `rel`
/// (optionally behind a preposition `mark`): the dependent's lexeme must
/// satisfy `sem` (one of a set of alternatives, from a `|`-separated
/// bundle in the lexicon file).
#[derive(Clone, Debug)]
pub struct Argument {
  pub rel: Rel,
  pub mark: Mark,
  pub sem: Vec<Rc<Lexeme>>,
}

impl Argument {
  pub fn new(rel: Rel, mark: Mark, sem: Vec<Rc<Lexeme>>) -> Self {
    Self { rel, mark, sem }
  }

  /// True if `candidate` satisfies at least one of this argument's
  /// alternatives.
  pub fn accepts(&self, candidate: &Lexeme) -> bool {
    self.sem.iter().any(|alt| candidate.is(alt))
  }
}

/// An unordered bag of `Argument`s. Small (single digits per lexeme), so
/// a plain `Vec` with O(n) predicate-based operations is the right
/// structure (spec's Design Notes, "Argument bag").
#[derive(Clone, Debug, Default)]
pub struct ArgBag(Vec<Argument>);

impl ArgBag {
  pub fn new() -> Self {
    ArgBag(Vec::new())
  }

  pub fn emplace(&mut self, arg: Argument) {
    self.0.push(arg);
  }

  pub fn iter(&self) -> impl Iterator<Item = &Argument> {
    self.0.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn select<F: Fn(&Argument) -> bool>(&self, pred: F) -> Vec<&Argument> {
    self.0.iter().filter(|a| pred(a)).collect()
  }

  pub fn erase<F: Fn(&Argument) -> bool>(&mut self, pred: F) {
    self.0.retain(|a| !pred(a));
  }

  /// Removes and returns the first argument matching `pred`, if any.
  /// Used by the rule algebra to consume (erase) a satisfied argument so
  /// it cannot be satisfied twice (spec invariant I6).
  pub fn extract<F: Fn(&Argument) -> bool>(&mut self, pred: F) -> Option<Argument> {
    let index = self.0.iter().position(|a| pred(a))?;
    Some(self.0.remove(index))
  }
}

/// The semantic identity of a word or phrase head. `sem` is an ordered
/// list of parent lexemes; `name` may be empty for the anonymous
/// aggregator lexemes the lexicon loader builds for compound references
/// (spec Section 4.F).
#[derive(Debug)]
pub struct Lexeme {
  pub name: String,
  pub sem: Vec<Rc<Lexeme>>,
  pub args: ArgBag,
}

impl Lexeme {
  pub fn new(name: impl Into<String>) -> Self {
    Lexeme { name: name.into(), sem: Vec::new(), args: ArgBag::new() }
  }

  pub fn anonymous() -> Self {
    Lexeme::new("")
  }

  /// `is(target)` is true iff `self == target` (by name, reflexively),
  /// or — when `target` is a conjunctive aggregator with its own parents
  /// — `self` satisfies every one of `target`'s parents, or `self`
  /// reaches `target` through its own `sem` ancestry (transitively).
  /// Spec Section 4.A.
  pub fn is(&self, target: &Lexeme) -> bool {
    if !target.name.is_empty() && self.name == target.name {
      return true;
    }
    if !target.sem.is_empty() {
      return target.sem.iter().all(|part| self.is(part));
    }
    self.sem.iter().any(|parent| parent.is(target))
  }

  /// Scans `candidates`, returning true on the first lexeme that `self`
  /// satisfies (spec's `matchesAny`).
  pub fn matches_any<'a, I: IntoIterator<Item = &'a Rc<Lexeme>>>(&self, candidates: I) -> bool {
    candidates.into_iter().any(|c| self.is(c))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn is_reflexive() {
    let boy = Lexeme::new("boy");
    assert!(boy.is(&boy));
  }

  #[test]
  fn is_transitive_over_parents() {
    let animate = Rc::new(Lexeme::new("animate"));
    let mut person = Lexeme::new("person");
    person.sem.push(Rc::clone(&animate));
    assert!(person.is(&animate));
    assert!(!animate.is(&person));
  }

  #[test]
  fn aggregator_target_requires_every_part() {
    let male = Rc::new(Lexeme::new("male"));
    let child = Rc::new(Lexeme::new("child"));
    let mut target = Lexeme::anonymous();
    target.sem.push(Rc::clone(&male));
    target.sem.push(Rc::clone(&child));

    let mut boy = Lexeme::new("boy");
    boy.sem.push(Rc::clone(&male));
    boy.sem.push(Rc::clone(&child));
    assert!(boy.is(&target));

    let mut girl = Lexeme::new("girl");
    girl.sem.push(Rc::clone(&child));
    assert!(!girl.is(&target));
  }

  #[test]
  fn arg_bag_extract_removes_only_the_matched_entry() {
    let mut bag = ArgBag::new();
    let noun = Rc::new(Lexeme::new("noun"));
    bag.emplace(Argument::new(Rel::Spec, Mark::None, vec![Rc::clone(&noun)]));
    bag.emplace(Argument::new(Rel::Comp, Mark::Of, vec![Rc::clone(&noun)]));
    assert!(bag.extract(|a| a.rel == Rel::Spec).is_some());
    assert!(bag.extract(|a| a.rel == Rel::Spec).is_none());
    assert_eq!(bag.select(|a| a.rel == Rel::Comp).len(), 1);
  }
}
