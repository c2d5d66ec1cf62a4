//! The delimiter set declared by an HL7 v2 message header.

use crate::{Hl7Error, Hl7Result, HEADER_SEGMENT};

/// Separator and escape characters for one message.
///
/// Read once from `MSH-1`/`MSH-2` and never changed for the rest of the message. When a
/// message has no header the HL7 defaults (`|^~\&`) apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Read the delimiter set from a raw `MSH` segment.
    ///
    /// The character immediately after `MSH` is the field separator. The encoding characters
    /// run from there to the next field separator, in the order component, repetition, escape,
    /// subcomponent. Older messages sometimes declare fewer than four; the missing ones keep
    /// their default.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MalformedHeader`] if the segment is not an `MSH` segment or has no
    /// field separator.
    pub fn from_header(segment: &str) -> Hl7Result<Self> {
        let rest = segment.strip_prefix(HEADER_SEGMENT).ok_or_else(|| {
            Hl7Error::MalformedHeader(format!("expected {HEADER_SEGMENT} segment"))
        })?;

        let mut chars = rest.chars();
        let field = chars.next().ok_or_else(|| {
            Hl7Error::MalformedHeader("header declares no field separator".into())
        })?;

        let defaults = Self::default();
        let mut encoding = chars.take_while(|c| *c != field);

        Ok(Self {
            field,
            component: encoding.next().unwrap_or(defaults.component),
            repetition: encoding.next().unwrap_or(defaults.repetition),
            escape: encoding.next().unwrap_or(defaults.escape),
            subcomponent: encoding.next().unwrap_or(defaults.subcomponent),
        })
    }

    /// The `MSH-2` encoding characters for this set.
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    /// Whether `c` is one of the five characters that must be escaped inside a value.
    pub fn is_reserved(&self, c: char) -> bool {
        c == self.field
            || c == self.component
            || c == self.repetition
            || c == self.escape
            || c == self.subcomponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_standard_header() {
        let d = Delimiters::from_header("MSH|^~\\&|EPIC|HOSPITAL").expect("valid header");
        assert_eq!(d, Delimiters::default());
        assert_eq!(d.encoding_characters(), "^~\\&");
    }

    #[test]
    fn reads_custom_delimiters() {
        let d = Delimiters::from_header("MSH#*@!%#APP").expect("valid header");
        assert_eq!(d.field, '#');
        assert_eq!(d.component, '*');
        assert_eq!(d.repetition, '@');
        assert_eq!(d.escape, '!');
        assert_eq!(d.subcomponent, '%');
    }

    #[test]
    fn short_encoding_keeps_defaults() {
        let d = Delimiters::from_header("MSH|^~|APP").expect("valid header");
        assert_eq!(d.component, '^');
        assert_eq!(d.repetition, '~');
        assert_eq!(d.escape, '\\');
        assert_eq!(d.subcomponent, '&');
    }

    #[test]
    fn rejects_header_without_separator() {
        let err = Delimiters::from_header("MSH").expect_err("no separator");
        assert!(matches!(err, Hl7Error::MalformedHeader(_)));
    }

    #[test]
    fn rejects_non_header_segment() {
        assert!(Delimiters::from_header("PID|1").is_err());
    }

    #[test]
    fn reserved_characters() {
        let d = Delimiters::default();
        for c in ['|', '^', '~', '\\', '&'] {
            assert!(d.is_reserved(c));
        }
        assert!(!d.is_reserved('a'));
    }
}
