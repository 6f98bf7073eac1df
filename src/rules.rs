//! The attachment-rule algebra, spec Section 4.C. Every function here is
//! a direct translation of `original_source/rules.cpp`'s rule of the
//! same name, generalised to also thread the argument-bag
//! extraction/erasure spec Section 3 ("Argument") and Section 4.C call
//! for (`rules.cpp`'s snapshot predates the argument-bag machinery
//! `word_parser.cpp` already assumes; this module reconciles the two by
//! keeping `rules.cpp`'s control flow and branch types and adding the
//! `args.extract` step spec.md Section 4.C describes).

use crate::lexeme::{mark_by_name, ArgBag, Lexeme, Mark, Rel};
use crate::phrase::{no_left, no_right, LeftRule, Phrase, RightRule};
use crate::tag::{Tag, TagSet};
use std::rc::Rc;

fn take_arg(args: &mut ArgBag, rel: Rel, mark: Mark, sem: &Option<Rc<Lexeme>>) -> bool {
  args
    .extract(|a| a.rel == rel && a.mark == mark && sem.as_ref().map_or(false, |s| a.accepts(s)))
    .is_some()
}

fn has_matching_arg(args: &ArgBag, rel: Rel, mark: Mark) -> bool {
  args.iter().any(|a| a.rel == rel && a.mark == mark)
}

/// True when `a` and `b` are compatible on `mask`: either side carrying
/// no tag in `mask` imposes no constraint, so agreement only fails when
/// both sides restrict themselves to `mask` and share no tag. Mirrors
/// the C++ original's `agreesOn(tags).with(other)`.
fn agrees_on(mask: TagSet, a: TagSet, b: TagSet) -> bool {
  let sa = a.select(mask);
  let sb = b.select(mask);
  sa.is_empty() || sb.is_empty() || sa.has_any(sb)
}

pub fn subject_verb_agreement(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> bool {
  if !head.syn.has_all(TagSet::of(&[Tag::Pres, Tag::Fin])) {
    return true;
  }
  head.syn.has_all(TagSet::SG3) == mod_phrase.syn.has_all(TagSet::SG3)
}

pub fn subject_be_agreement(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> bool {
  if head.syn.has(Tag::Part) {
    return true;
  }
  if head.syn.has_all(TagSet::of(&[Tag::Pl, Tag::Second])) && !mod_phrase.syn.has_any(TagSet::of(&[Tag::Pl, Tag::Second])) {
    return false;
  }
  if head.syn.has(Tag::Sg) && !mod_phrase.syn.has(Tag::Sg) {
    return false;
  }
  agrees_on(TagSet::PERSON, head.syn, mod_phrase.syn)
}

// --- Noun phrases ---------------------------------------------------

pub fn noun_det(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Gen) {
    return Vec::new();
  }
  let mut errors = Vec::new();
  if !agrees_on(TagSet::NUMBER, head.syn, mod_phrase.syn) {
    errors.push("det and noun not compatible".to_string());
  }
  let mut args = head.args.clone();
  let had_spec_arg = args.iter().any(|a| a.rel == Rel::Spec);
  let satisfied = take_arg(&mut args, Rel::Spec, Mark::None, &mod_phrase.sem);
  if had_spec_arg && !satisfied {
    errors.push("determiner does not satisfy noun's specifier argument".to_string());
  }
  vec![Phrase::merge_left_with_args(mod_phrase.clone(), ':', head.clone(), no_left, no_right, errors, args)]
}

pub fn ad_adad(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Adad) {
    return Vec::new();
  }
  vec![Phrase::merge_left(mod_phrase.clone(), '>', head.clone(), no_left, no_right, Vec::new())]
}

pub fn noun_adjective(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if mod_phrase.syn.has(Tag::Adn) {
    return vec![Phrase::merge_left(mod_phrase.clone(), '>', head.clone(), noun_adjective, no_right, Vec::new())];
  }
  noun_det(mod_phrase, head)
}

// --- Prepositional attachment ----------------------------------------

pub fn head_prep(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Prep) {
    return Vec::new();
  }
  let mut errors = Vec::new();
  let mark = mark_by_name(&mod_phrase.head_word()).unwrap_or(Mark::None);
  if !has_matching_arg(&head.args, Rel::Mod, mark) {
    errors.push(format!("no argument for preposition '{}'", mod_phrase.head_word()));
  }
  if !mod_phrase.has_branch('+') {
    errors.push("preposition has no complement".to_string());
  }
  vec![Phrase::merge_right(head.clone(), '<', mod_phrase.clone(), head.left_rule, head_prep, errors)]
}

pub fn noun_rmod(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Part) {
    return head_prep(head, mod_phrase);
  }
  let mut errors = Vec::new();
  if mod_phrase.syn.has(Tag::Past) && (mod_phrase.has_branch('+') || mod_phrase.has_branch('*')) {
    errors.push("past participle modifying noun can't have an object".to_string());
  }
  if mod_phrase.syn.has(Tag::Pres) && mod_phrase.has_branch(':') {
    errors.push("present participle modifying noun can't have subject".to_string());
  }
  if mod_phrase.is_simple_word() {
    errors.push("verb phrase must be complex to right-modify a noun".to_string());
  }
  vec![Phrase::merge_right(head.clone(), '<', mod_phrase.clone(), noun_adjective, no_right, errors)]
}

// --- Verb phrases ------------------------------------------------------

pub fn verb_spec(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Nom) {
    return Vec::new();
  }
  let mut errors = Vec::new();
  let mut args = head.args.clone();
  if !head.syn.has(Tag::Fin) {
    errors.push("verb participle cannot take a subject".to_string());
  }
  if !subject_verb_agreement(mod_phrase, head) {
    errors.push("verb-subject disagreement".to_string());
  }
  // No verb in this grammar declares a `:` argument frame, so there is
  // nothing to flag here (unlike `noun_det`'s specifier); still erase a
  // matching entry per I6 in case one is ever declared.
  take_arg(&mut args, Rel::Spec, Mark::None, &mod_phrase.sem);
  vec![Phrase::merge_left_with_args(mod_phrase.clone(), ':', head.clone(), no_left, no_right, errors, args)]
}

fn head_comp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>, next_right: RightRule) -> Vec<Rc<Phrase>> {
  let mut result = next_right(head, mod_phrase);
  if mod_phrase.syn.has_any(TagSet::of(&[Tag::Akk, Tag::Fin, Tag::Part, Tag::Adn])) {
    let mut errors = Vec::new();
    let mut args = head.args.clone();
    if mod_phrase.syn.has_any(TagSet::of(&[Tag::Fin, Tag::Part])) && mod_phrase.has_branch(':') {
      errors.push("verbal object cannot have a subject".to_string());
    }
    if !take_arg(&mut args, Rel::Comp, Mark::None, &mod_phrase.sem) {
      errors.push("object does not satisfy verb's complement argument".to_string());
    }
    result.push(Phrase::merge_right_with_args(
      head.clone(),
      '+',
      mod_phrase.clone(),
      head.left_rule,
      next_right,
      errors,
      args,
    ));
  }
  result
}

pub fn prep_comp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  head_comp(head, mod_phrase, no_right)
}

pub fn verb_adv(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if mod_phrase.syn.has(Tag::Adv) {
    return vec![Phrase::merge_right(head.clone(), '<', mod_phrase.clone(), head.left_rule, head_prep, Vec::new())];
  }
  head_prep(head, mod_phrase)
}

pub fn verb_comp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  head_comp(head, mod_phrase, verb_adv)
}

pub fn verb_bicomp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = verb_comp(head, mod_phrase);
  if mod_phrase.syn.has(Tag::Akk) {
    let mut errors = Vec::new();
    let mut args = head.args.clone();
    if !take_arg(&mut args, Rel::Bicomp, Mark::None, &mod_phrase.sem) {
      errors.push("object does not satisfy verb's bicomplement argument".to_string());
    }
    result.push(Phrase::merge_right_with_args(
      head.clone(),
      '*',
      mod_phrase.clone(),
      head.left_rule,
      verb_comp,
      errors,
      args,
    ));
  }
  result
}

pub fn verb_rspec(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = verb_bicomp(head, mod_phrase);
  if mod_phrase.syn.has(Tag::Nom) {
    let mut errors = Vec::new();
    let mut args = head.args.clone();
    if !subject_verb_agreement(mod_phrase, head) {
      errors.push("noun-verb number/person disagreement".to_string());
    }
    // See `verb_spec`: no verb declares a `:` argument frame, so only
    // erase a match per I6 without flagging its absence.
    take_arg(&mut args, Rel::Spec, Mark::None, &mod_phrase.sem);
    result.push(Phrase::merge_right_with_args(head.clone(), ':', mod_phrase.clone(), no_left, verb_bicomp, errors, args));
  }
  result
}

// --- Auxiliary "be" ------------------------------------------------------

pub fn be_lspec(mod_phrase: &Rc<Phrase>, head: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Nom) {
    return Vec::new();
  }
  let mut errors = Vec::new();
  if !subject_be_agreement(mod_phrase, head) {
    errors.push("subject does not agree with verb".to_string());
  }
  vec![Phrase::merge_left(mod_phrase.clone(), ':', head.clone(), no_left, no_right, errors)]
}

pub fn be_comp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = head_prep(head, mod_phrase);
  if mod_phrase.syn.has_any(TagSet::of(&[Tag::Akk, Tag::Adn])) {
    result.push(Phrase::merge_right(head.clone(), '+', mod_phrase.clone(), head.left_rule, head_prep, Vec::new()));
  } else if mod_phrase.syn.has_any(TagSet::of(&[Tag::Fin, Tag::Part])) {
    let mut errors = Vec::new();
    if !mod_phrase.syn.has_all(TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Pl])) {
      errors.push("verb object of 'to be' must be dictionary form".to_string());
    }
    result.push(Phrase::merge_right(head.clone(), '+', mod_phrase.clone(), head.left_rule, head_prep, errors));
  }
  result
}

pub fn be_rspec(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = be_comp(head, mod_phrase);
  if mod_phrase.syn.has(Tag::Nom) {
    let mut errors = Vec::new();
    if !subject_be_agreement(mod_phrase, head) {
      errors.push("subject does not agree with verb".to_string());
    }
    result.push(Phrase::merge_right(head.clone(), ':', mod_phrase.clone(), no_left, be_comp, errors));
  }
  result
}

// --- Auxiliary "have" ----------------------------------------------------

pub fn have_comp(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = head_prep(head, mod_phrase);
  if mod_phrase.syn.has(Tag::Akk) {
    result.push(Phrase::merge_right(head.clone(), '+', mod_phrase.clone(), head.left_rule, head_prep, Vec::new()));
  } else if mod_phrase.syn.has_any(TagSet::of(&[Tag::Fin, Tag::Part])) {
    let mut errors = Vec::new();
    if !mod_phrase.syn.has_all(TagSet::of(&[Tag::Past, Tag::Part])) {
      errors.push("verb object of 'to have' must be past participle".to_string());
    }
    result.push(Phrase::merge_right(head.clone(), '+', mod_phrase.clone(), head.left_rule, head_prep, errors));
  }
  result
}

pub fn have_rspec(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  let mut result = have_comp(head, mod_phrase);
  if mod_phrase.syn.has(Tag::Nom) {
    let mut errors = Vec::new();
    if !subject_verb_agreement(mod_phrase, head) {
      errors.push("subject does not agree with verb".to_string());
    }
    result.push(Phrase::merge_right(head.clone(), ':', mod_phrase.clone(), no_left, have_comp, errors));
  }
  result
}

// --- Suffix morphology -----------------------------------------------

pub fn noun_suffix(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Suffix) {
    return Vec::new();
  }
  if &*mod_phrase.head_word() == "s" {
    let merged = Phrase::merge_right(head.clone(), '-', mod_phrase.clone(), no_left, no_right, Vec::new());
    return vec![merged - TagSet::of(&[Tag::Sg, Tag::Rc]) + Tag::Pl.into()];
  }
  Vec::new()
}

pub fn verb_suffix(head: &Rc<Phrase>, mod_phrase: &Rc<Phrase>) -> Vec<Rc<Phrase>> {
  if !mod_phrase.syn.has(Tag::Suffix) {
    return Vec::new();
  }
  let remove_base = TagSet::of(&[Tag::Fin]) + TagSet::PERSON + TagSet::NUMBER + TagSet::VERB_REGULARITY;
  match &*mod_phrase.head_word() {
    "ing" => {
      let merged = Phrase::merge_right(head.clone(), '-', mod_phrase.clone(), no_left, noun_suffix, Vec::new());
      let add = TagSet::of(&[Tag::Part, Tag::Pres, Tag::Nom, Tag::Akk, Tag::Rc, Tag::Adn]) + TagSet::SG3;
      vec![(merged - remove_base) + add]
    }
    "ed" => {
      let mut errors = Vec::new();
      if !head.syn.has_any(TagSet::of(&[Tag::Rpart, Tag::Rpast])) {
        errors.push("verb does not have a regular past tense".to_string());
      }
      let merged = Phrase::merge_right(head.clone(), '-', mod_phrase.clone(), no_left, noun_suffix, errors);
      let add = TagSet::of(&[Tag::Past, Tag::Fin, Tag::Part, Tag::Nom, Tag::Akk, Tag::Rc]) + TagSet::SG3;
      let mut result = (merged - remove_base) + add;
      if !head.syn.has(Tag::Rpast) {
        result = result - TagSet::of(&[Tag::Fin]);
      }
      if !head.syn.has(Tag::Rpart) {
        result = result - TagSet::of(&[Tag::Part]);
      }
      vec![result]
    }
    "er" | "ee" => {
      let merged = Phrase::merge_right(head.clone(), '-', mod_phrase.clone(), no_left, noun_suffix, Vec::new());
      let add = TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Rc]) + TagSet::SG3;
      vec![(merged - remove_base) + add]
    }
    _ => Vec::new(),
  }
}

// --- Rule wiring dispatch ------------------------------------------------

/// Chooses the `(left_rule, right_rule)` pair for a `Word`, spec Section
/// 4.C ("a lookup table keyed by the morpheme's orthographic form
/// installs specialised rules"). Grounded on `rules.cpp`'s
/// `Word::Word` constructor; the auxiliary-"be" surface forms are
/// supplemented here (the snapshot in `original_source` only lists
/// "is", an evident gap against its own example sentences, which
/// include "are" and "am").
pub fn word_rules_for(orth: &str, syn: TagSet) -> (LeftRule, RightRule) {
  match orth {
    "is" | "are" | "am" | "was" | "were" | "be" | "being" | "been" => return (be_lspec, be_rspec),
    "have" | "has" | "had" => return (verb_spec, have_rspec),
    "having" => return (no_left, have_rspec),
    _ => {}
  }
  if syn.has_any(TagSet::of(&[Tag::Nom, Tag::Akk])) {
    return (noun_adjective, noun_rmod);
  }
  if syn.has_any(TagSet::of(&[Tag::Fin, Tag::Part])) {
    let left = if syn.has(Tag::Fin) { verb_spec } else { no_left };
    let right = if syn.has(Tag::Free) { verb_rspec } else { verb_bicomp };
    return (left, right);
  }
  if syn.has(Tag::Adn) {
    return (ad_adad, no_right);
  }
  if syn.has(Tag::Prep) {
    return (no_left, prep_comp);
  }
  (no_left, no_right)
}

/// Chooses the `(left_rule, right_rule)` pair for a bare `Morpheme`,
/// spec Section 4.C's suffix-morphology paragraph. Grounded on
/// `rules.cpp`'s `Morpheme::Morpheme` constructor.
pub fn morpheme_rules_for(syn: TagSet) -> (LeftRule, RightRule) {
  let mut right = no_right;
  if syn.has(Tag::Rc) {
    right = noun_suffix;
  }
  if syn.has_all(TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Pl])) {
    right = verb_suffix;
  } else if syn.has_any(TagSet::of(&[Tag::Verbe, Tag::Verby])) {
    right = verb_suffix;
  }
  (no_left, right)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexeme::ArgBag;

  fn word(syn: TagSet, sem: Option<Rc<Lexeme>>) -> Rc<Phrase> {
    let morph = Phrase::morpheme("x", syn, sem, ArgBag::new());
    let (l, r) = word_rules_for("x", syn);
    Phrase::word("x", morph, l, r)
  }

  #[test]
  fn noun_adjective_attaches_and_recurses_left() {
    let noun = word(TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Sg]), None);
    let adj = word(TagSet::of(&[Tag::Adn]), None);
    let result = noun_adjective(&adj, &noun);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].to_string(), "[x> x]");
    assert_eq!(result[0].left_rule as usize, noun_adjective as usize);
  }

  #[test]
  fn noun_det_requires_genitive_tag() {
    let noun = word(TagSet::of(&[Tag::Nom, Tag::Akk]), None);
    let plain = word(TagSet::EMPTY, None);
    assert!(noun_det(&plain, &noun).is_empty());
  }

  #[test]
  fn noun_det_with_no_specifier_frame_is_silent() {
    let noun = word(TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Sg]), None);
    let the = word(TagSet::of(&[Tag::Gen]), None);
    let result = noun_det(&the, &noun);
    assert_eq!(result.len(), 1);
    assert!(result[0].errors.is_empty());
  }

  #[test]
  fn noun_det_flags_number_disagreement() {
    let noun = word(TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Pl]), None);
    let det = word(TagSet::of(&[Tag::Gen, Tag::Sg]), None);
    let result = noun_det(&det, &noun);
    assert_eq!(result.len(), 1);
    assert!(result[0].errors.iter().any(|e| e.contains("not compatible")));
  }

  #[test]
  fn noun_det_flags_unsatisfied_specifier_only_when_frame_present() {
    use crate::lexeme::Argument;
    let animate = Rc::new(Lexeme::new("animate"));
    let mut args = ArgBag::new();
    args.emplace(Argument::new(Rel::Spec, Mark::None, vec![Rc::clone(&animate)]));
    let noun = {
      let morph = Phrase::morpheme("book", TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Sg]), None, args);
      let (l, r) = word_rules_for("book", morph.syn);
      Phrase::word("book", morph, l, r)
    };
    let inanimate_det = word(TagSet::of(&[Tag::Gen]), Some(Rc::new(Lexeme::new("thing"))));
    let result = noun_det(&inanimate_det, &noun);
    assert_eq!(result.len(), 1);
    assert!(result[0].errors.iter().any(|e| e.contains("specifier")));

    let animate_det = word(TagSet::of(&[Tag::Gen]), Some(Rc::clone(&animate)));
    let satisfied = noun_det(&animate_det, &noun);
    assert!(satisfied[0].errors.is_empty());
  }

  #[test]
  fn verb_spec_flags_subject_verb_disagreement() {
    let verb = word(TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Sg, Tag::Third]), None);
    let subject = word(TagSet::of(&[Tag::Nom, Tag::Pl, Tag::First]), None);
    let result = verb_spec(&subject, &verb);
    assert_eq!(result.len(), 1);
    assert!(result[0].errors.iter().any(|e| e.contains("disagreement")));
  }

  #[test]
  fn verb_spec_does_not_flag_absent_argument_frame() {
    let verb = word(TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Pl]), None);
    let subject = word(TagSet::of(&[Tag::Nom, Tag::Pl]), None);
    let result = verb_spec(&subject, &verb);
    assert_eq!(result.len(), 1);
    assert!(result[0].errors.is_empty());
  }

  #[test]
  fn subject_be_agreement_tolerates_a_person_less_be_form() {
    let are = word(TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Pl]), None);
    let you = word(TagSet::of(&[Tag::Nom, Tag::Second]), None);
    assert!(subject_be_agreement(&you, &are));
  }

  #[test]
  fn verb_comp_consumes_complement_argument_once() {
    use crate::lexeme::Argument;
    let object_lex = Rc::new(Lexeme::new("book"));
    let mut args = ArgBag::new();
    args.emplace(Argument::new(Rel::Comp, Mark::None, vec![Rc::clone(&object_lex)]));
    let verb = {
      let morph = Phrase::morpheme("sell", TagSet::of(&[Tag::Fin, Tag::Pres, Tag::Pl]), None, args);
      let (l, r) = word_rules_for("sell", morph.syn);
      Phrase::word("sell", morph, l, r)
    };
    let object = word(TagSet::of(&[Tag::Akk, Tag::Sg]), Some(object_lex));
    let result = verb_comp(&verb, &object);
    let matched = result.iter().find(|p| p.to_string().contains('+')).unwrap();
    assert!(matched.errors.is_empty());
  }

  #[test]
  fn noun_suffix_pluralizes_regular_countable_noun() {
    let singular = {
      let morph = Phrase::morpheme("book", TagSet::of(&[Tag::Nom, Tag::Akk, Tag::Sg, Tag::Rc]), None, ArgBag::new());
      morph
    };
    let suffix = {
      let morph = Phrase::morpheme("s", TagSet::of(&[Tag::Suffix]), None, ArgBag::new());
      morph
    };
    let result = noun_suffix(&singular, &suffix);
    assert_eq!(result.len(), 1);
    assert!(result[0].syn.has(Tag::Pl));
    assert!(!result[0].syn.has(Tag::Sg));
  }
}
