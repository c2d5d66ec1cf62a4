//! Diagnostic summary of a message.

use crate::{Hl7Result, Message};
use serde::Serialize;

/// Segment codes present in a message, for logging and troubleshooting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageInfo {
    pub segment_count: usize,
    pub segments: Vec<String>,
}

impl MessageInfo {
    pub fn from_message(message: &Message) -> Self {
        let segments: Vec<String> = message
            .segment_types()
            .into_iter()
            .map(str::to_owned)
            .collect();
        Self {
            segment_count: segments.len(),
            segments,
        }
    }

    /// Tokenize `raw` and summarise it.
    pub fn inspect(raw: &str) -> Hl7Result<Self> {
        Message::parse(raw).map(|m| Self::from_message(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hl7Error;

    #[test]
    fn lists_segment_codes_in_order() {
        let info = MessageInfo::inspect("MSH|^~\\&|A\nPID|1\nIN1|1\n").expect("inspect");
        assert_eq!(info.segment_count, 3);
        assert_eq!(info.segments, vec!["MSH", "PID", "IN1"]);
    }

    #[test]
    fn serialises_as_json_object() {
        let info = MessageInfo::inspect("MSH|^~\\&\rPID|1").expect("inspect");
        let json = serde_json::to_value(&info).expect("json");
        assert_eq!(json["segment_count"], 2);
        assert_eq!(json["segments"][1], "PID");
    }

    #[test]
    fn empty_message_is_an_error() {
        assert_eq!(MessageInfo::inspect("\n"), Err(Hl7Error::EmptyMessage));
    }
}
