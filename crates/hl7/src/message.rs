//! Tokenizing raw HL7 v2 text into segments and fields.

use crate::field::Field;
use crate::{Delimiters, Hl7Error, Hl7Result, HEADER_SEGMENT, SEGMENT_TERMINATOR};

/// A tokenized HL7 v2 message.
///
/// Segments keep their original order. The delimiter set is fixed at parse time and shared
/// by every segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    delimiters: Delimiters,
    segments: Vec<Segment>,
}

/// One segment: a type code followed by its fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    delimiters: Delimiters,
    fields: Vec<String>,
}

impl Message {
    /// Tokenize raw message text.
    ///
    /// Any mix of CRLF, LF and CR line endings is accepted. Blank segments (including a
    /// trailing terminator) are dropped. The delimiter set comes from the first segment when
    /// it is an `MSH` header, otherwise the HL7 defaults are used.
    ///
    /// # Errors
    ///
    /// - [`Hl7Error::EmptyMessage`] if the input is empty or whitespace only.
    /// - [`Hl7Error::MalformedHeader`] if the header declares no field separator.
    pub fn parse(input: &str) -> Hl7Result<Self> {
        if input.trim().is_empty() {
            return Err(Hl7Error::EmptyMessage);
        }

        let normalised = normalise_line_endings(input);
        let lines: Vec<&str> = normalised
            .split(SEGMENT_TERMINATOR)
            .filter(|line| !line.trim().is_empty())
            .collect();

        let delimiters = match lines.first() {
            Some(first) if first.starts_with(HEADER_SEGMENT) => Delimiters::from_header(first)?,
            _ => {
                tracing::debug!("message has no {HEADER_SEGMENT} header, using default delimiters");
                Delimiters::default()
            }
        };

        let segments = lines
            .into_iter()
            .map(|line| Segment::tokenize(line, delimiters))
            .collect();

        Ok(Self {
            delimiters,
            segments,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The first segment with the given type code.
    pub fn segment(&self, segment_type: &str) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.segment_type() == segment_type)
    }

    /// Every segment with the given type code, in message order.
    pub fn segments_of<'a>(&'a self, segment_type: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments
            .iter()
            .filter(move |s| s.segment_type() == segment_type)
    }

    /// Type codes of all segments, in message order.
    pub fn segment_types(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::segment_type).collect()
    }
}

impl Segment {
    fn tokenize(line: &str, delimiters: Delimiters) -> Self {
        let mut fields: Vec<String> = line.split(delimiters.field).map(str::to_owned).collect();

        // MSH-1 is the field separator itself, so it never appears as a split result.
        if fields.first().map(String::as_str) == Some(HEADER_SEGMENT) {
            fields.insert(1, delimiters.field.to_string());
        }

        Self { delimiters, fields }
    }

    /// The segment type code (field 0), e.g. `PID`.
    pub fn segment_type(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    /// Number of fields including the type code.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field `index`, or `None` when the segment is shorter.
    pub fn field(&self, index: usize) -> Option<Field<'_>> {
        self.fields
            .get(index)
            .map(|raw| Field::new(raw, &self.delimiters))
    }

    /// Field `index` only when it exists and is not empty.
    pub fn non_empty_field(&self, index: usize) -> Option<Field<'_>> {
        self.field(index).filter(|f| !f.is_empty())
    }
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\r").replace('\n', "\r")
}
