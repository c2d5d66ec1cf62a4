//! FHIR-aligned coverage wire models and translation helpers.
//!
//! A Coverage records one insurance membership for a beneficiary: the payor, the member id
//! and the group/plan classes it falls under.
//!
//! Notes:
//! - `beneficiary` is produced with a placeholder reference during conversion and is meant to
//!   be rebound once the caller knows the persisted Patient id
//!   ([`CoverageData::rebind_beneficiary`]).
//! - An empty `class` list is omitted from the JSON entirely.

use crate::datatypes::{CodeableConceptWire, Coding, Reference, COVERAGE_CLASS_SYSTEM};
use crate::{parse_wire, FhirError, FhirResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Lifecycle status of a Coverage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoverageStatus {
    #[default]
    Active,
    Cancelled,
    Draft,
    EnteredInError,
}

impl CoverageStatus {
    fn to_wire(self) -> &'static str {
        match self {
            CoverageStatus::Active => "active",
            CoverageStatus::Cancelled => "cancelled",
            CoverageStatus::Draft => "draft",
            CoverageStatus::EnteredInError => "entered-in-error",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CoverageStatus::Active),
            "cancelled" => Some(CoverageStatus::Cancelled),
            "draft" => Some(CoverageStatus::Draft),
            "entered-in-error" => Some(CoverageStatus::EnteredInError),
            _ => None,
        }
    }
}

/// `Coverage.class.type` codes from the coverage-class code system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageClassKind {
    Group,
    SubGroup,
    Plan,
    SubPlan,
    Class,
    SubClass,
}

impl CoverageClassKind {
    pub fn code(self) -> &'static str {
        match self {
            CoverageClassKind::Group => "group",
            CoverageClassKind::SubGroup => "subgroup",
            CoverageClassKind::Plan => "plan",
            CoverageClassKind::SubPlan => "subplan",
            CoverageClassKind::Class => "class",
            CoverageClassKind::SubClass => "subclass",
        }
    }

    fn display(self) -> &'static str {
        match self {
            CoverageClassKind::Group => "Group",
            CoverageClassKind::SubGroup => "SubGroup",
            CoverageClassKind::Plan => "Plan",
            CoverageClassKind::SubPlan => "SubPlan",
            CoverageClassKind::Class => "Class",
            CoverageClassKind::SubClass => "SubClass",
        }
    }

    fn from_code(s: &str) -> Option<Self> {
        match s {
            "group" => Some(CoverageClassKind::Group),
            "subgroup" => Some(CoverageClassKind::SubGroup),
            "plan" => Some(CoverageClassKind::Plan),
            "subplan" => Some(CoverageClassKind::SubPlan),
            "class" => Some(CoverageClassKind::Class),
            "subclass" => Some(CoverageClassKind::SubClass),
            _ => None,
        }
    }

    /// The full coding for this class type.
    pub fn coding(self) -> Coding {
        Coding::new(COVERAGE_CLASS_SYSTEM, self.code(), self.display())
    }
}

/// One classification of the coverage (group number, plan name, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageClass {
    pub kind: CoverageClassKind,
    pub value: String,
    pub name: Option<String>,
}

/// Domain-level carrier for a Coverage resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageData {
    /// Server-assigned logical id, once the resource has been persisted.
    pub id: Option<String>,

    pub status: CoverageStatus,

    /// Insurer-assigned member id.
    pub subscriber_id: Option<String>,

    pub beneficiary: Reference,

    pub payors: Vec<Reference>,

    pub classes: Vec<CoverageClass>,
}

impl CoverageData {
    /// Point the beneficiary at the persisted Patient `patient_id`.
    pub fn rebind_beneficiary(&mut self, patient_id: &str) {
        self.beneficiary = Reference::patient(patient_id);
    }

    /// Literal beneficiary reference, e.g. `Patient/123`.
    pub fn beneficiary_reference(&self) -> Option<&str> {
        self.beneficiary.reference.as_deref()
    }

    /// Value of the first class of `kind`.
    pub fn class_value(&self, kind: CoverageClassKind) -> Option<&str> {
        self.classes
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.value.as_str())
    }
}

// ============================================================================
// Public Coverage operations
// ============================================================================

/// Entry points for reading and writing Coverage JSON.
pub struct Coverage;

impl Coverage {
    /// Parse a Coverage resource from FHIR JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the JSON does not match the wire schema, resourceType is not
    /// "Coverage", or `status`/`class.type` carry unknown codes.
    pub fn parse(json_text: &str) -> FhirResult<CoverageData> {
        let wire: CoverageWire = parse_wire(json_text, "Coverage")?;

        if wire.resource_type != "Coverage" {
            return Err(FhirError::InvalidInput(format!(
                "resourceType must be 'Coverage', found '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }

    /// Render a Coverage resource as pretty-printed FHIR JSON.
    pub fn render(data: &CoverageData) -> FhirResult<String> {
        serde_json::to_string_pretty(&domain_to_wire(data))
            .map_err(|e| FhirError::Translation(format!("cannot serialise Coverage: {e}")))
    }

    /// Render a Coverage resource as a JSON value.
    pub fn to_value(data: &CoverageData) -> FhirResult<serde_json::Value> {
        serde_json::to_value(domain_to_wire(data))
            .map_err(|e| FhirError::Translation(format!("cannot serialise Coverage: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CoverageWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub status: String,

    #[serde(rename = "subscriberId", skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,

    pub beneficiary: Reference,

    #[serde(default)]
    pub payor: Vec<Reference>,

    #[serde(rename = "class", default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<CoverageClassWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CoverageClassWire {
    #[serde(rename = "type")]
    pub type_concept: CodeableConceptWire,

    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: CoverageWire) -> FhirResult<CoverageData> {
    let status = CoverageStatus::from_wire(&wire.status).ok_or_else(|| {
        FhirError::InvalidInput(format!("Unknown coverage status '{}'", wire.status))
    })?;

    let classes = wire
        .classes
        .into_iter()
        .map(|c| {
            let code = c
                .type_concept
                .coding
                .iter()
                .find_map(|coding| coding.code.clone())
                .ok_or_else(|| FhirError::InvalidInput("Coverage class has no type code".into()))?;
            let kind = CoverageClassKind::from_code(&code).ok_or_else(|| {
                FhirError::InvalidInput(format!("Unknown coverage class type '{code}'"))
            })?;
            Ok(CoverageClass {
                kind,
                value: c.value,
                name: c.name,
            })
        })
        .collect::<FhirResult<Vec<_>>>()?;

    Ok(CoverageData {
        id: wire.id,
        status,
        subscriber_id: wire.subscriber_id,
        beneficiary: wire.beneficiary,
        payors: wire.payor,
        classes,
    })
}

fn domain_to_wire(data: &CoverageData) -> CoverageWire {
    CoverageWire {
        resource_type: "Coverage".to_string(),
        id: data.id.clone(),
        status: data.status.to_wire().to_string(),
        subscriber_id: data.subscriber_id.clone(),
        beneficiary: data.beneficiary.clone(),
        payor: data.payors.clone(),
        classes: data
            .classes
            .iter()
            .map(|c| CoverageClassWire {
                type_concept: CodeableConceptWire::from_coding(c.kind.coding()),
                value: c.value.clone(),
                name: c.name.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CoverageData {
        CoverageData {
            id: None,
            status: CoverageStatus::Active,
            subscriber_id: Some("PPO123".into()),
            beneficiary: Reference::patient("MRN123456"),
            payors: vec![Reference::display("BlueCross BlueShield")],
            classes: vec![
                CoverageClass {
                    kind: CoverageClassKind::Group,
                    value: "GRP456789".into(),
                    name: None,
                },
                CoverageClass {
                    kind: CoverageClassKind::Plan,
                    value: "Gold Plan PPO".into(),
                    name: Some("Gold Plan PPO".into()),
                },
            ],
        }
    }

    #[test]
    fn round_trips_rendered_json() {
        let data = sample();
        let json = Coverage::render(&data).expect("render");
        assert_eq!(Coverage::parse(&json).expect("parse"), data);
    }

    #[test]
    fn renders_fhir_shape() {
        let value = Coverage::to_value(&sample()).expect("to value");
        assert_eq!(value["resourceType"], "Coverage");
        assert_eq!(value["status"], "active");
        assert_eq!(value["subscriberId"], "PPO123");
        assert_eq!(value["beneficiary"]["reference"], "Patient/MRN123456");
        assert_eq!(value["payor"][0]["display"], "BlueCross BlueShield");
        assert_eq!(value["class"][0]["type"]["coding"][0]["code"], "group");
        assert_eq!(
            value["class"][0]["type"]["coding"][0]["system"],
            COVERAGE_CLASS_SYSTEM
        );
        assert!(value["class"][0].get("name").is_none());
        assert_eq!(value["class"][1]["type"]["coding"][0]["display"], "Plan");
        assert_eq!(value["class"][1]["name"], "Gold Plan PPO");
    }

    #[test]
    fn empty_class_list_is_omitted() {
        let data = CoverageData {
            classes: vec![],
            ..sample()
        };
        let value = Coverage::to_value(&data).expect("to value");
        assert!(value.get("class").is_none());
        assert!(value.get("payor").is_some());
    }

    #[test]
    fn rebinds_beneficiary() {
        let mut data = sample();
        data.rebind_beneficiary("01HXYZ");
        assert_eq!(data.beneficiary_reference(), Some("Patient/01HXYZ"));
    }

    #[test]
    fn class_value_lookup() {
        let data = sample();
        assert_eq!(data.class_value(CoverageClassKind::Group), Some("GRP456789"));
        assert_eq!(data.class_value(CoverageClassKind::SubPlan), None);
    }

    #[test]
    fn rejects_unknown_class_type() {
        let input = r#"{"resourceType":"Coverage","status":"active","beneficiary":{"reference":"Patient/1"},
            "class":[{"type":{"coding":[{"code":"tier"}]},"value":"x"}]}"#;
        let err = Coverage::parse(input).expect_err("unknown class");
        assert!(matches!(err, FhirError::InvalidInput(msg) if msg.contains("tier")));
    }

    #[test]
    fn requires_beneficiary() {
        let input = r#"{"resourceType":"Coverage","status":"active"}"#;
        let err = Coverage::parse(input).expect_err("missing beneficiary");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("beneficiary")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
