//! Lazy decomposition of a single field.
//!
//! A [`Field`] borrows the raw field text and the message's delimiters. Nothing is split
//! until a caller asks for repetitions, components or subcomponents, so fields a mapper never
//! reads cost nothing beyond the initial field split.
//!
//! Component and subcomponent indices are 0-based: `PID-5.1` (family name) is
//! `field.component(0)`.

use crate::{escape, Delimiters};
use std::borrow::Cow;

/// Borrowed view of one field of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    raw: &'a str,
    delimiters: &'a Delimiters,
}

impl<'a> Field<'a> {
    pub(crate) fn new(raw: &'a str, delimiters: &'a Delimiters) -> Self {
        Self { raw, delimiters }
    }

    /// The field exactly as it appeared on the wire.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The whole field with escape sequences decoded, without any splitting.
    pub fn value(&self) -> Cow<'a, str> {
        escape::decode(self.raw, self.delimiters)
    }

    /// All repetitions of this field, in order. An empty field has one empty repetition.
    pub fn repetitions(&self) -> impl Iterator<Item = Repetition<'a>> + 'a {
        let delimiters = self.delimiters;
        self.raw
            .split(delimiters.repetition)
            .map(move |raw| Repetition { raw, delimiters })
    }

    /// The first repetition, which is what single-valued mappings read.
    pub fn first_repetition(&self) -> Repetition<'a> {
        self.repetitions().next().unwrap_or(Repetition {
            raw: "",
            delimiters: self.delimiters,
        })
    }

    /// Decoded component `index` of the first repetition.
    pub fn component(&self, index: usize) -> Option<Cow<'a, str>> {
        self.first_repetition().component(index)
    }

    /// Decoded components of the first repetition.
    pub fn components(&self) -> Vec<Cow<'a, str>> {
        self.first_repetition().components()
    }
}

/// One repetition of a field: a component group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repetition<'a> {
    raw: &'a str,
    delimiters: &'a Delimiters,
}

impl<'a> Repetition<'a> {
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    fn raw_components(&self) -> impl Iterator<Item = &'a str> {
        self.raw.split(self.delimiters.component)
    }

    /// Decoded component `index`, or `None` when the repetition has fewer components.
    pub fn component(&self, index: usize) -> Option<Cow<'a, str>> {
        let delimiters = self.delimiters;
        self.raw_components()
            .nth(index)
            .map(|c| escape::decode(c, delimiters))
    }

    pub fn components(&self) -> Vec<Cow<'a, str>> {
        let delimiters = self.delimiters;
        self.raw_components()
            .map(|c| escape::decode(c, delimiters))
            .collect()
    }

    /// Decoded subcomponents of component `index`. Empty when the component is absent.
    pub fn subcomponents(&self, index: usize) -> Vec<Cow<'a, str>> {
        let delimiters = self.delimiters;
        self.raw_components()
            .nth(index)
            .map(|c| {
                c.split(delimiters.subcomponent)
                    .map(|s| escape::decode(s, delimiters))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(raw: &'a str, d: &'a Delimiters) -> Field<'a> {
        Field::new(raw, d)
    }

    #[test]
    fn first_component_of_identifier() {
        let d = Delimiters::default();
        let f = field("MRN123456^^^MRN", &d);
        assert_eq!(f.component(0).as_deref(), Some("MRN123456"));
        assert_eq!(f.component(3).as_deref(), Some("MRN"));
        assert_eq!(f.component(4), None);
    }

    #[test]
    fn components_of_name() {
        let d = Delimiters::default();
        let f = field("Smith^John^A", &d);
        assert_eq!(f.components(), vec!["Smith", "John", "A"]);
    }

    #[test]
    fn repetitions_are_split_before_components() {
        let d = Delimiters::default();
        let f = field("A1^^^MRN~B2^^^SSN", &d);
        let reps: Vec<_> = f.repetitions().map(|r| r.raw()).collect();
        assert_eq!(reps, vec!["A1^^^MRN", "B2^^^SSN"]);
        assert_eq!(f.component(0).as_deref(), Some("A1"));
        assert_eq!(f.component(3).as_deref(), Some("MRN"));
    }

    #[test]
    fn subcomponents_of_assigning_authority() {
        let d = Delimiters::default();
        let f = field("123^^^HOSP&1.2.3&ISO", &d);
        let subs = f.first_repetition().subcomponents(3);
        assert_eq!(subs, vec!["HOSP", "1.2.3", "ISO"]);
        assert!(f.first_repetition().subcomponents(9).is_empty());
    }

    #[test]
    fn components_are_decoded_after_splitting() {
        let d = Delimiters::default();
        let f = field("O\\S\\Brien^Pat", &d);
        assert_eq!(f.component(0).as_deref(), Some("O^Brien"));
        assert_eq!(f.component(1).as_deref(), Some("Pat"));
    }

    #[test]
    fn empty_field_has_one_empty_component() {
        let d = Delimiters::default();
        let f = field("", &d);
        assert!(f.is_empty());
        assert_eq!(f.component(0).as_deref(), Some(""));
        assert_eq!(f.repetitions().count(), 1);
    }

    #[test]
    fn value_decodes_without_splitting() {
        let d = Delimiters::default();
        let f = field("Blue\\T\\Cross^Shield", &d);
        assert_eq!(f.value(), "Blue&Cross^Shield");
    }
}
