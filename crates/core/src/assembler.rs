//! Combining mapper outputs into one conversion result.

use crate::constants::{IN1_SEGMENT, PID_SEGMENT, TEMP_PATIENT_ID};
use crate::mapping::{map_in1, map_pid};
use crate::BridgeResult;
use fhir::{Coverage, CoverageData, Patient, PatientData};
use hl7_v2::Message;
use serde_json::{Map, Value};

/// Resources produced from one inbound message.
///
/// `coverage` is only ever present alongside `patient`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversion {
    pub patient: Option<PatientData>,
    pub coverage: Option<CoverageData>,
}

impl Conversion {
    /// True when the message had no `PID` segment.
    pub fn is_empty(&self) -> bool {
        self.patient.is_none()
    }

    /// Replace the placeholder beneficiary with the persisted Patient id.
    pub fn resolve_patient_id(&mut self, patient_id: &str) {
        if let Some(coverage) = self.coverage.as_mut() {
            coverage.rebind_beneficiary(patient_id);
        }
    }

    /// `{"patient": {...}, "coverage": {...}}`, with absent resources left out.
    pub fn to_json(&self) -> BridgeResult<Value> {
        let mut out = Map::new();
        if let Some(patient) = &self.patient {
            out.insert("patient".into(), Patient::to_value(patient)?);
        }
        if let Some(coverage) = &self.coverage {
            out.insert("coverage".into(), Coverage::to_value(coverage)?);
        }
        Ok(Value::Object(out))
    }
}

/// Tokenize `raw` and map it to FHIR resources.
///
/// # Errors
///
/// Returns [`crate::BridgeError::Parse`] for empty or malformed input. A message without a
/// `PID` is not an error; it yields an empty [`Conversion`].
pub fn convert_message(raw: &str) -> BridgeResult<Conversion> {
    let message = Message::parse(raw)?;
    Ok(assemble(&message))
}

/// Map the first `PID` and first `IN1` of `message`.
///
/// Later duplicates of either segment are ignored. The Coverage beneficiary is a placeholder
/// built from the Patient's identifier, or `Patient/temp` when it has none.
pub fn assemble(message: &Message) -> Conversion {
    let Some(pid) = message.segment(PID_SEGMENT) else {
        tracing::debug!("message has no {PID_SEGMENT} segment");
        return Conversion::default();
    };
    warn_on_duplicates(message, PID_SEGMENT);

    let patient = map_pid(pid);

    let coverage = message.segment(IN1_SEGMENT).map(|in1| {
        warn_on_duplicates(message, IN1_SEGMENT);
        let patient_id = patient.primary_identifier().unwrap_or(TEMP_PATIENT_ID);
        map_in1(in1, &format!("Patient/{patient_id}"))
    });

    tracing::debug!(
        identifier = patient.primary_identifier().unwrap_or_default(),
        has_coverage = coverage.is_some(),
        "assembled resources"
    );

    Conversion {
        patient: Some(patient),
        coverage,
    }
}

fn warn_on_duplicates(message: &Message, segment_type: &str) {
    let count = message.segments_of(segment_type).count();
    if count > 1 {
        tracing::warn!(
            segment = segment_type,
            count,
            "multiple segments present, only the first is used"
        );
    }
}
