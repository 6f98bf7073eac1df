//! The phrase tree, spec Section 3 ("Phrase (abstract)") and Section 4.B.
//! Grounded on `original_source/phrase.h` (`Phrase`, `BinaryPhrase`,
//! `LeftBranch`/`RightBranch`, `Word`), re-architected as a tagged sum
//! type per spec's REDESIGN FLAGS instead of the original's virtual-
//! dispatch class hierarchy. Rule callbacks are plain function pointers,
//! never closures, matching the REDESIGN FLAGS' "avoid capturing
//! environment" note.

use crate::lexeme::{ArgBag, Lexeme};
use crate::tag::TagSet;
use std::fmt;
use std::ops::{Add, Sub};
use std::rc::Rc;

pub type LeftRule = fn(&Rc<Phrase>, &Rc<Phrase>) -> Vec<Rc<Phrase>>;
pub type RightRule = fn(&Rc<Phrase>, &Rc<Phrase>) -> Vec<Rc<Phrase>>;

/// A rule that never accepts its neighbour. Installed on phrases that
/// have exhausted a dependency slot, e.g. a verb phrase that has already
/// taken a subject (spec 4.C: "this encodes dependency precedence").
pub fn no_left(_mod_phrase: &Rc<Phrase>, _head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  Vec::new()
}

pub fn no_right(_head: &Rc<Phrase>, _mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  Vec::new()
}

#[derive(Clone)]
pub enum Variant {
  /// A leaf produced by word parsing: a single morpheme of orthography.
  Morpheme { orth: Rc<str> },
  /// A unary wrapper around a morpheme tree, installing the word-level
  /// rules. `text` is the orthographic word as it appeared in the
  /// sentence, kept separately from `sem` because suffix rules may
  /// build an anonymous lexeme that no longer carries the surface form.
  Word { text: Rc<str>, morpheme: Rc<Phrase> },
  /// Head on the right, mod on the left.
  LeftBranch { branch_type: char, head: Rc<Phrase>, mod_phrase: Rc<Phrase> },
  /// Head on the left, mod on the right.
  RightBranch { branch_type: char, head: Rc<Phrase>, mod_phrase: Rc<Phrase> },
}

#[derive(Clone)]
pub struct Phrase {
  pub variant: Variant,
  pub length: usize,
  pub syn: TagSet,
  pub sem: Option<Rc<Lexeme>>,
  pub args: ArgBag,
  /// Diagnostics attached locally to this node (not inherited from
  /// `head`/`mod`): spec Section 3, "Errors are local to each phrase
  /// node." Use `total_errors` for the whole-derivation count.
  pub errors: Vec<String>,
  pub left_rule: LeftRule,
  pub right_rule: RightRule,
}

impl Phrase {
  pub fn morpheme(orth: impl Into<Rc<str>>, syn: TagSet, sem: Option<Rc<Lexeme>>, args: ArgBag) -> Rc<Phrase> {
    let orth = orth.into();
    Rc::new(Phrase {
      length: orth.chars().count(),
      variant: Variant::Morpheme { orth },
      syn,
      sem,
      args,
      errors: Vec::new(),
      left_rule: no_left,
      right_rule: no_right,
    })
  }

  pub fn word(
    text: impl Into<Rc<str>>,
    morpheme: Rc<Phrase>,
    left_rule: LeftRule,
    right_rule: RightRule,
  ) -> Rc<Phrase> {
    Rc::new(Phrase {
      length: 1,
      syn: morpheme.syn,
      sem: morpheme.sem.clone(),
      args: morpheme.args.clone(),
      errors: Vec::new(),
      variant: Variant::Word { text: text.into(), morpheme },
      left_rule,
      right_rule,
    })
  }

  /// `merge_left(mod, type, head, l_rule, r_rule)`: a `LeftBranch`
  /// inheriting `head`'s `syn`/`sem`/`args`, spec Section 4.B.
  pub fn merge_left(
    mod_phrase: Rc<Phrase>,
    branch_type: char,
    head: Rc<Phrase>,
    left_rule: LeftRule,
    right_rule: RightRule,
    errors: Vec<String>,
  ) -> Rc<Phrase> {
    Rc::new(Phrase {
      length: head.length + mod_phrase.length,
      syn: head.syn,
      sem: head.sem.clone(),
      args: head.args.clone(),
      errors,
      variant: Variant::LeftBranch { branch_type, head, mod_phrase },
      left_rule,
      right_rule,
    })
  }

  /// `merge_right(head, type, mod, l_rule, r_rule)`: symmetric with
  /// `merge_left`.
  pub fn merge_right(
    head: Rc<Phrase>,
    branch_type: char,
    mod_phrase: Rc<Phrase>,
    left_rule: LeftRule,
    right_rule: RightRule,
    errors: Vec<String>,
  ) -> Rc<Phrase> {
    Rc::new(Phrase {
      length: head.length + mod_phrase.length,
      syn: head.syn,
      sem: head.sem.clone(),
      args: head.args.clone(),
      errors,
      variant: Variant::RightBranch { branch_type, head, mod_phrase },
      left_rule,
      right_rule,
    })
  }

  /// As `merge_left`, but with an explicit `args` bag instead of
  /// inheriting `head.args` verbatim. Used when a rule has just
  /// extracted (consumed) a satisfied argument, spec invariant I6.
  pub fn merge_left_with_args(
    mod_phrase: Rc<Phrase>,
    branch_type: char,
    head: Rc<Phrase>,
    left_rule: LeftRule,
    right_rule: RightRule,
    errors: Vec<String>,
    args: ArgBag,
  ) -> Rc<Phrase> {
    Rc::new(Phrase {
      length: head.length + mod_phrase.length,
      syn: head.syn,
      sem: head.sem.clone(),
      args,
      errors,
      variant: Variant::LeftBranch { branch_type, head, mod_phrase },
      left_rule,
      right_rule,
    })
  }

  /// As `merge_right`, but with an explicit `args` bag. See
  /// `merge_left_with_args`.
  pub fn merge_right_with_args(
    head: Rc<Phrase>,
    branch_type: char,
    mod_phrase: Rc<Phrase>,
    left_rule: LeftRule,
    right_rule: RightRule,
    errors: Vec<String>,
    args: ArgBag,
  ) -> Rc<Phrase> {
    Rc::new(Phrase {
      length: head.length + mod_phrase.length,
      syn: head.syn,
      sem: head.sem.clone(),
      args,
      errors,
      variant: Variant::RightBranch { branch_type, head, mod_phrase },
      left_rule,
      right_rule,
    })
  }

  /// The orthographic text of the leftmost leaf reached by following
  /// `head` links — e.g. a preposition's own surface form, regardless
  /// of how much it has since absorbed as a complement.
  pub fn head_word(&self) -> Rc<str> {
    match &self.variant {
      Variant::Morpheme { orth } => orth.clone(),
      Variant::Word { text, .. } => text.clone(),
      Variant::LeftBranch { head, .. } | Variant::RightBranch { head, .. } => head.head_word(),
    }
  }

  /// Sum of `errors.len()` over the whole tree (spec Section 3: "total
  /// error count of a derivation is computed by summing errors.size
  /// over the tree"). This is the agenda's ordering key.
  pub fn total_errors(&self) -> usize {
    let children = match &self.variant {
      Variant::LeftBranch { head, mod_phrase, .. } | Variant::RightBranch { head, mod_phrase, .. } => {
        head.total_errors() + mod_phrase.total_errors()
      }
      Variant::Word { morpheme, .. } => morpheme.total_errors(),
      Variant::Morpheme { .. } => 0,
    };
    self.errors.len() + children
  }

  /// Walks the head spine (following `head` links only) looking for a
  /// binary node of the given branch type. Spec Section 4.B.
  pub fn has_branch(&self, branch_type: char) -> bool {
    match &self.variant {
      Variant::LeftBranch { branch_type: t, head, .. } | Variant::RightBranch { branch_type: t, head, .. } => {
        *t == branch_type || head.has_branch(branch_type)
      }
      Variant::Word { .. } | Variant::Morpheme { .. } => false,
    }
  }

  /// True for a bare `Word` phrase (as opposed to a branch spanning more
  /// than one word). Used by `noun_rmod`'s "must be complex" check.
  pub fn is_simple_word(&self) -> bool {
    matches!(self.variant, Variant::Word { .. })
  }

  /// The head of a binary phrase, if any (`None` for `Word`/`Morpheme`).
  pub fn head(&self) -> Option<&Rc<Phrase>> {
    match &self.variant {
      Variant::LeftBranch { head, .. } | Variant::RightBranch { head, .. } => Some(head),
      _ => None,
    }
  }
}

impl fmt::Display for Phrase {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match &self.variant {
      Variant::Morpheme { orth } => write!(f, "{}", orth),
      Variant::Word { text, .. } => write!(f, "{}", text),
      Variant::LeftBranch { branch_type, head, mod_phrase } => {
        write!(f, "[{}{} {}]", mod_phrase, branch_type, head)
      }
      Variant::RightBranch { branch_type, head, mod_phrase } => {
        write!(f, "[{} {}{}]", head, branch_type, mod_phrase)
      }
    }
  }
}

/// Tag-modifier operators, spec Section 4.B: "used by suffix rules to
/// shift word-class." Each yields a fresh phrase — `Phrase` is immutable
/// after construction, so these clone the node and replace `syn`.
impl Add<TagSet> for Rc<Phrase> {
  type Output = Rc<Phrase>;
  fn add(self, tags: TagSet) -> Rc<Phrase> {
    let mut next = (*self).clone();
    next.syn = next.syn + tags;
    Rc::new(next)
  }
}

impl Sub<TagSet> for Rc<Phrase> {
  type Output = Rc<Phrase>;
  fn sub(self, tags: TagSet) -> Rc<Phrase> {
    let mut next = (*self).clone();
    next.syn = next.syn - tags;
    Rc::new(next)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tag::Tag;

  fn leaf(orth: &str, syn: TagSet) -> Rc<Phrase> {
    Phrase::morpheme(orth, syn, None, ArgBag::new())
  }

  #[test]
  fn merge_left_inherits_head_fields() {
    let head = leaf("book", TagSet::of(&[Tag::Sg]));
    let mod_phrase = leaf("the", TagSet::EMPTY);
    let merged = Phrase::merge_left(mod_phrase, ':', head.clone(), no_left, no_right, vec![]);
    assert_eq!(merged.length, 2);
    assert_eq!(merged.syn, head.syn);
    assert_eq!(merged.total_errors(), 0);
  }

  #[test]
  fn total_errors_sums_over_tree() {
    let head = leaf("book", TagSet::EMPTY);
    let mod_phrase = leaf("the", TagSet::EMPTY);
    let merged = Phrase::merge_left(mod_phrase, ':', head, no_left, no_right, vec!["x".into(), "y".into()]);
    assert_eq!(merged.total_errors(), 2);
  }

  #[test]
  fn has_branch_walks_head_spine_only() {
    let det = leaf("the", TagSet::EMPTY);
    let noun = leaf("book", TagSet::EMPTY);
    let np = Phrase::merge_left(det, ':', noun, no_left, no_right, vec![]);
    assert!(np.has_branch(':'));
    assert!(!np.has_branch('+'));
  }

  #[test]
  fn tag_operators_shift_syn_without_touching_children() {
    let morph = leaf("book", TagSet::of(&[Tag::Sg, Tag::Rc]));
    let plural = morph.clone() - TagSet::of(&[Tag::Sg, Tag::Rc]) + Tag::Pl.into();
    assert!(plural.syn.has(Tag::Pl));
    assert!(!plural.syn.has(Tag::Sg));
    assert!(morph.syn.has(Tag::Sg));
  }

  #[test]
  fn display_uses_spec_bracket_format() {
    let head = leaf("book", TagSet::EMPTY);
    let mod_phrase = leaf("the", TagSet::EMPTY);
    let left = Phrase::merge_left(mod_phrase.clone(), ':', head.clone(), no_left, no_right, vec![]);
    assert_eq!(left.to_string(), "[the: book]");
    let right = Phrase::merge_right(head, '<', mod_phrase, no_left, no_right, vec![]);
    assert_eq!(right.to_string(), "[book <the]");
  }
}
