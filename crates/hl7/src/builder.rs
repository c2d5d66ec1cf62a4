//! Building segments for outbound messages.
//!
//! [`SegmentBuilder`] places values at explicit HL7 field indices rather than appending them
//! one after another, so a value always lands where the parser will look for it. Gaps are
//! filled with empty fields.

use crate::{escape, Delimiters, HEADER_SEGMENT, SEGMENT_TERMINATOR};

/// Positional builder for one segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentBuilder {
    delimiters: Delimiters,
    fields: Vec<String>,
}

impl SegmentBuilder {
    /// Start a body segment such as `PID` or `IN1`.
    pub fn new(segment_type: &str, delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            fields: vec![segment_type.to_owned()],
        }
    }

    /// Start an `MSH` header with `MSH-1` and `MSH-2` filled from `delimiters`.
    pub fn header(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            fields: vec![
                HEADER_SEGMENT.to_owned(),
                delimiters.field.to_string(),
                delimiters.encoding_characters(),
            ],
        }
    }

    /// Set field `index` to a plain text value, escaping any reserved characters.
    pub fn text(mut self, index: usize, value: &str) -> Self {
        let encoded = escape::encode(value, &self.delimiters).into_owned();
        self.put(index, encoded);
        self
    }

    /// Set field `index` to a component group. Each component is escaped before joining.
    pub fn components(mut self, index: usize, components: &[&str]) -> Self {
        let joined = components
            .iter()
            .map(|c| escape::encode(c, &self.delimiters))
            .collect::<Vec<_>>()
            .join(&self.delimiters.component.to_string());
        self.put(index, joined);
        self
    }

    /// Make sure the segment has at least `index` fields after the type code, so a trailing
    /// empty field is still written out.
    pub fn through(mut self, index: usize) -> Self {
        if self.fields.len() <= index {
            self.fields.resize(index + 1, String::new());
        }
        self
    }

    /// Render the segment text (without a terminator).
    pub fn build(self) -> String {
        let sep = self.delimiters.field.to_string();
        if self.fields.first().map(String::as_str) == Some(HEADER_SEGMENT) && self.fields.len() > 1
        {
            // MSH-1 is the separator itself: write it once, not as a field between separators.
            let mut out = String::from(HEADER_SEGMENT);
            out.push_str(&sep);
            out.push_str(&self.fields[2..].join(&sep));
            return out;
        }
        self.fields.join(&sep)
    }

    fn put(&mut self, index: usize, value: String) {
        if index == 0 {
            return;
        }
        if self.fields.len() <= index {
            self.fields.resize(index + 1, String::new());
        }
        self.fields[index] = value;
    }
}

/// Join rendered segments into a message using the HL7 segment terminator.
pub fn join_segments(segments: &[String]) -> String {
    segments.join(&SEGMENT_TERMINATOR.to_string())
}
