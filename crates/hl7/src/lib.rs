//! HL7 v2 wire support for the ADT bridge.
//!
//! This crate owns everything that touches the pipe-delimited text format:
//! - the delimiter set declared by the `MSH` header ([`Delimiters`])
//! - tokenizing raw text into segments and fields ([`Message`], [`Segment`])
//! - lazy decomposition of a field into repetitions, components and subcomponents ([`Field`])
//! - escape sequence decoding and encoding ([`escape`])
//! - building segments for outbound messages ([`SegmentBuilder`])
//! - a small diagnostic inspector ([`MessageInfo`])
//!
//! Field indices follow HL7 numbering: index 0 is the segment type code, so `PID-3` is
//! `segment.field(3)`. For `MSH`, index 1 is the field separator itself and index 2 the
//! encoding characters, which keeps every later `MSH-n` at index `n`.
//!
//! Nothing here knows about FHIR. Mapping lives in `bridge-core`.

pub mod builder;
pub mod delimiters;
pub mod escape;
pub mod field;
pub mod inspect;
pub mod message;

pub use builder::{join_segments, SegmentBuilder};
pub use delimiters::Delimiters;
pub use field::{Field, Repetition};
pub use inspect::MessageInfo;
pub use message::{Message, Segment};

/// Segment type code of the message header.
pub const HEADER_SEGMENT: &str = "MSH";

/// Terminator placed between segments on the wire.
pub const SEGMENT_TERMINATOR: char = '\r';

/// Errors returned while tokenizing HL7 v2 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Hl7Error {
    #[error("empty message")]
    EmptyMessage,

    #[error("malformed header: {0}")]
    MalformedHeader(String),
}

/// Type alias for Results that can fail with an [`Hl7Error`].
pub type Hl7Result<T> = Result<T, Hl7Error>;
