//! Closed tag enumeration and its bitset, spec Section 3 ("Tag", "TagSet").
//! Grounded on `original_source/phrase.h`'s `tag::` string constants and
//! `rules.cpp`'s `Tag::`/`tags::` bitflags, translated into a real Rust
//! bitset instead of ad hoc `string_view` comparisons.

use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
  // Word-class.
  Prep,
  Adv,
  Adn,
  Adad,
  Suffix,
  // Number.
  Sg,
  Pl,
  Uc,
  Rc,
  // Person.
  First,
  Second,
  Third,
  // Case.
  Nom,
  Akk,
  Gen,
  // Tense / form.
  Pres,
  Past,
  Dict,
  Modal,
  Fin,
  Part,
  Free,
  // Regularity.
  Rsg,
  Rpast,
  Rpart,
  // Morphological affix class.
  Verbe,
  Verby,
}

impl Tag {
  const fn bit(self) -> u32 {
    1 << (self as u32)
  }
}

/// Fixed-width bitset of `Tag`s. 27 tags fit comfortably under the 32-bit
/// budget spec Section 3 calls out ("≤ 32 tags").
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TagSet(u32);

impl TagSet {
  pub const EMPTY: TagSet = TagSet(0);

  pub const NUMBER: TagSet = TagSet(Tag::Sg.bit() | Tag::Pl.bit() | Tag::Uc.bit());
  pub const PERSON: TagSet = TagSet(Tag::First.bit() | Tag::Second.bit() | Tag::Third.bit());
  pub const SG3: TagSet = TagSet(Tag::Sg.bit() | Tag::Third.bit());
  pub const NONSG3: TagSet = TagSet(Tag::Pl.bit() | Tag::First.bit() | Tag::Second.bit());
  pub const VERB_REGULARITY: TagSet = TagSet(Tag::Rsg.bit() | Tag::Rpast.bit() | Tag::Rpart.bit());

  pub fn of(tags: &[Tag]) -> TagSet {
    tags.iter().fold(TagSet::EMPTY, |acc, &t| acc.insert(t))
  }

  pub fn has(self, tag: Tag) -> bool {
    self.0 & tag.bit() != 0
  }

  pub fn has_any(self, other: TagSet) -> bool {
    self.0 & other.0 != 0
  }

  pub fn has_all(self, other: TagSet) -> bool {
    self.0 & other.0 == other.0
  }

  pub fn insert(self, tag: Tag) -> TagSet {
    TagSet(self.0 | tag.bit())
  }

  pub fn select(self, mask: TagSet) -> TagSet {
    TagSet(self.0 & mask.0)
  }

  pub fn is_empty(self) -> bool {
    self.0 == 0
  }
}

impl From<Tag> for TagSet {
  fn from(tag: Tag) -> TagSet {
    TagSet(tag.bit())
  }
}

impl Add for TagSet {
  type Output = TagSet;
  fn add(self, other: TagSet) -> TagSet {
    TagSet(self.0 | other.0)
  }
}

impl Add<Tag> for TagSet {
  type Output = TagSet;
  fn add(self, tag: Tag) -> TagSet {
    self.insert(tag)
  }
}

impl Sub for TagSet {
  type Output = TagSet;
  fn sub(self, other: TagSet) -> TagSet {
    TagSet(self.0 & !other.0)
  }
}

impl Sub<Tag> for TagSet {
  type Output = TagSet;
  fn sub(self, tag: Tag) -> TagSet {
    TagSet(self.0 & !tag.bit())
  }
}

pub fn tag_by_name(name: &str) -> Option<Tag> {
  use Tag::*;
  Some(match name {
    "prep" => Prep,
    "adv" => Adv,
    "adn" => Adn,
    "adad" => Adad,
    "suffix" => Suffix,
    "sg" => Sg,
    "pl" => Pl,
    "uc" => Uc,
    "rc" => Rc,
    "1" | "first" => First,
    "2" | "second" => Second,
    "3" | "third" => Third,
    "nom" => Nom,
    "akk" => Akk,
    "gen" => Gen,
    "pres" => Pres,
    "past" => Past,
    "dict" => Dict,
    "modal" => Modal,
    "fin" => Fin,
    "part" => Part,
    "free" => Free,
    "rsg" => Rsg,
    "rpast" => Rpast,
    "rpart" => Rpart,
    "verbe" => Verbe,
    "verby" => Verby,
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_and_has() {
    let set = TagSet::EMPTY.insert(Tag::Sg).insert(Tag::Third);
    assert!(set.has(Tag::Sg));
    assert!(set.has(Tag::Third));
    assert!(!set.has(Tag::Pl));
  }

  #[test]
  fn sg3_matches_named_aggregate() {
    let set = TagSet::of(&[Tag::Sg, Tag::Third]);
    assert!(set.has_all(TagSet::SG3));
    assert!(!set.has_all(TagSet::NONSG3));
  }

  #[test]
  fn has_any_and_has_all() {
    let set = TagSet::of(&[Tag::Nom, Tag::Akk]);
    assert!(set.has_any(TagSet::of(&[Tag::Akk, Tag::Gen])));
    assert!(!set.has_all(TagSet::of(&[Tag::Akk, Tag::Gen])));
  }

  #[test]
  fn add_and_sub_operators_mirror_tag_modifier_rules() {
    let set = TagSet::of(&[Tag::Sg, Tag::Rc]) - TagSet::of(&[Tag::Sg, Tag::Rc]) + Tag::Pl;
    assert_eq!(set, TagSet::of(&[Tag::Pl]));
  }

  #[test]
  fn tag_by_name_resolves_known_tags() {
    assert_eq!(tag_by_name("sg3"), None);
    assert_eq!(tag_by_name("sg"), Some(Tag::Sg));
    assert_eq!(tag_by_name("nope"), None);
  }
}
