//! Segment-to-resource mappers.
//!
//! Each mapper is a table of [`FieldRule`]s: the HL7 field it reads, the FHIR element it
//! fills, and the transform between them. A rule only runs when its field is present and
//! non-empty, so missing optional fields leave the resource at its defaults rather than
//! failing.

pub mod date;
pub mod gender;
pub mod in1;
pub mod pid;

use hl7_v2::{Field, Segment};

/// One row of a mapping table.
pub struct FieldRule<T> {
    /// HL7 field index within the segment.
    pub index: usize,
    /// FHIR element the rule fills, for logs and auditing.
    pub target: &'static str,
    pub apply: fn(&mut T, Field<'_>),
}

/// Run every rule in `rules` against `segment`, writing into `resource`.
pub fn apply_rules<T>(segment: &Segment, rules: &[FieldRule<T>], resource: &mut T) {
    for rule in rules {
        let Some(field) = segment.non_empty_field(rule.index) else {
            continue;
        };
        (rule.apply)(resource, field);
        tracing::trace!(
            segment = segment.segment_type(),
            field = rule.index,
            target = rule.target,
            "applied field rule"
        );
    }
}

pub use date::normalize_hl7_date;
pub use gender::map_gender;
pub use in1::{map_in1, IN1_RULES};
pub use pid::{map_pid, PID_RULES};
