//! The FHIR Patient resource: demographics plus the medical record number.
//!
//! Mappers and callers work with [`PatientData`]. JSON goes through a private wire struct
//! that rejects unknown keys, and coded values (`gender`, `name.use`, `identifier.use`) are
//! checked against their value sets on the way in.

use crate::datatypes::{CodeableConceptWire, Coding};
use crate::{parse_wire, FhirError, FhirResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Administrative gender. Every HL7 sex code maps to exactly one of these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl AdministrativeGender {
    /// FHIR code for this gender.
    pub fn code(self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Other => "other",
            AdministrativeGender::Unknown => "unknown",
        }
    }

    fn from_code(s: &str) -> Option<Self> {
        match s {
            "male" => Some(AdministrativeGender::Male),
            "female" => Some(AdministrativeGender::Female),
            "other" => Some(AdministrativeGender::Other),
            "unknown" => Some(AdministrativeGender::Unknown),
            _ => None,
        }
    }
}

/// `HumanName.use` value set. PID names always map to `Official`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum NameUse {
    Official,
    Usual,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

impl NameUse {
    fn to_wire(self) -> &'static str {
        match self {
            NameUse::Official => "official",
            NameUse::Usual => "usual",
            NameUse::Temp => "temp",
            NameUse::Nickname => "nickname",
            NameUse::Anonymous => "anonymous",
            NameUse::Old => "old",
            NameUse::Maiden => "maiden",
        }
    }

    fn from_wire(code: &str) -> Option<Self> {
        match code {
            "official" => Some(NameUse::Official),
            "usual" => Some(NameUse::Usual),
            "temp" => Some(NameUse::Temp),
            "nickname" => Some(NameUse::Nickname),
            "anonymous" => Some(NameUse::Anonymous),
            "old" => Some(NameUse::Old),
            "maiden" => Some(NameUse::Maiden),
            _ => None,
        }
    }
}

/// Purpose of an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

impl IdentifierUse {
    fn to_wire(self) -> &'static str {
        match self {
            IdentifierUse::Usual => "usual",
            IdentifierUse::Official => "official",
            IdentifierUse::Temp => "temp",
            IdentifierUse::Secondary => "secondary",
            IdentifierUse::Old => "old",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "usual" => Some(IdentifierUse::Usual),
            "official" => Some(IdentifierUse::Official),
            "temp" => Some(IdentifierUse::Temp),
            "secondary" => Some(IdentifierUse::Secondary),
            "old" => Some(IdentifierUse::Old),
            _ => None,
        }
    }
}

/// A business identifier for the patient, such as a medical record number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub use_type: Option<IdentifierUse>,

    /// First coding of `Identifier.type`.
    pub type_coding: Option<Coding>,

    pub system: Option<String>,

    pub value: String,
}

impl Identifier {
    /// A usual-use medical record number.
    pub fn medical_record_number(value: impl Into<String>) -> Self {
        Self {
            use_type: Some(IdentifierUse::Usual),
            type_coding: Some(Coding::medical_record_number()),
            system: None,
            value: value.into(),
        }
    }
}

/// A human name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HumanName {
    pub use_type: Option<NameUse>,
    pub family: Option<String>,
    pub given: Vec<String>,
}

/// Domain-level carrier for a Patient resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientData {
    /// Server-assigned logical id, once the resource has been persisted.
    pub id: Option<String>,

    pub identifiers: Vec<Identifier>,

    pub names: Vec<HumanName>,

    pub gender: AdministrativeGender,

    /// Date of birth as `YYYY-MM-DD`.
    pub birth_date: Option<String>,
}

impl PatientData {
    /// Value of the first identifier, which is the one a conversion populates.
    pub fn primary_identifier(&self) -> Option<&str> {
        self.identifiers.first().map(|i| i.value.as_str())
    }

    /// True when nothing but defaults is present: no identifier, no name, no birth date and
    /// unknown gender.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
            && self.names.is_empty()
            && self.birth_date.is_none()
            && self.gender == AdministrativeGender::Unknown
    }
}

// ============================================================================
// Public Patient operations
// ============================================================================

/// Entry points for reading and writing Patient JSON.
pub struct Patient;

impl Patient {
    /// Parse a Patient resource from FHIR JSON text.
    ///
    /// # Errors
    ///
    /// - [`FhirError::Translation`] when the document does not fit the schema, including
    ///   unknown keys; the message names the failing path.
    /// - [`FhirError::InvalidInput`] for another `resourceType` or an unknown code.
    pub fn parse(json_text: &str) -> FhirResult<PatientData> {
        let wire: PatientWire = parse_wire(json_text, "Patient")?;

        if wire.resource_type != "Patient" {
            return Err(FhirError::InvalidInput(format!(
                "resourceType must be 'Patient', found '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }

    /// Pretty-printed FHIR JSON.
    pub fn render(data: &PatientData) -> FhirResult<String> {
        serde_json::to_string_pretty(&domain_to_wire(data))
            .map_err(|e| FhirError::Translation(format!("cannot serialise Patient: {e}")))
    }

    /// The resource as a JSON value, for embedding in larger documents.
    pub fn to_value(data: &PatientData) -> FhirResult<serde_json::Value> {
        serde_json::to_value(domain_to_wire(data))
            .map_err(|e| FhirError::Translation(format!("cannot serialise Patient: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a Patient resource.
///
/// This is the exact structure that will be serialised to/from JSON.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<IdentifierWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanNameWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct IdentifierWire {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_concept: Option<CodeableConceptWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Wire representation of a human name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct HumanNameWire {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert wire format patient to domain type.
fn wire_to_domain(wire: PatientWire) -> FhirResult<PatientData> {
    let identifiers = wire
        .identifier
        .into_iter()
        .map(|i| {
            let use_type = i
                .use_type
                .as_deref()
                .map(|u| {
                    IdentifierUse::from_wire(u).ok_or_else(|| {
                        FhirError::InvalidInput(format!("Unknown identifier use '{u}'"))
                    })
                })
                .transpose()?;
            let value = i.value.ok_or_else(|| {
                FhirError::InvalidInput("Patient identifier has no value".into())
            })?;
            Ok(Identifier {
                use_type,
                type_coding: i.type_concept.and_then(|t| t.coding.into_iter().next()),
                system: i.system,
                value,
            })
        })
        .collect::<FhirResult<Vec<_>>>()?;

    let names = wire
        .name
        .into_iter()
        .map(|n| {
            let use_type = n
                .use_type
                .as_deref()
                .map(|u| {
                    NameUse::from_wire(u)
                        .ok_or_else(|| FhirError::InvalidInput(format!("Unknown name use '{u}'")))
                })
                .transpose()?;
            Ok(HumanName {
                use_type,
                family: n.family,
                given: n.given,
            })
        })
        .collect::<FhirResult<Vec<_>>>()?;

    let gender = match wire.gender.as_deref() {
        None => AdministrativeGender::Unknown,
        Some(code) => AdministrativeGender::from_code(code)
            .ok_or_else(|| FhirError::InvalidInput(format!("Unknown gender '{code}'")))?,
    };

    Ok(PatientData {
        id: wire.id,
        identifiers,
        names,
        gender,
        birth_date: wire.birth_date,
    })
}

/// Convert domain type to wire format patient.
fn domain_to_wire(data: &PatientData) -> PatientWire {
    PatientWire {
        resource_type: "Patient".to_string(),
        id: data.id.clone(),
        identifier: data
            .identifiers
            .iter()
            .map(|i| IdentifierWire {
                use_type: i.use_type.map(|u| u.to_wire().to_string()),
                type_concept: i.type_coding.clone().map(CodeableConceptWire::from_coding),
                system: i.system.clone(),
                value: Some(i.value.clone()),
            })
            .collect(),
        name: data
            .names
            .iter()
            .map(|n| HumanNameWire {
                use_type: n.use_type.map(|u| u.to_wire().to_string()),
                family: n.family.clone(),
                given: n.given.clone(),
            })
            .collect(),
        gender: Some(data.gender.code().to_string()),
        birth_date: data.birth_date.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatientData {
        PatientData {
            id: None,
            identifiers: vec![Identifier::medical_record_number("MRN123456")],
            names: vec![HumanName {
                use_type: Some(NameUse::Official),
                family: Some("Smith".into()),
                given: vec!["John".into(), "A".into()],
            }],
            gender: AdministrativeGender::Male,
            birth_date: Some("1980-12-15".into()),
        }
    }

    #[test]
    fn round_trips_rendered_json() {
        let data = sample();
        let json = Patient::render(&data).expect("render patient");
        let reparsed = Patient::parse(&json).expect("reparse json");
        assert_eq!(data, reparsed);
    }

    #[test]
    fn renders_fhir_shape() {
        let value = Patient::to_value(&sample()).expect("to value");
        assert_eq!(value["resourceType"], "Patient");
        assert_eq!(value["identifier"][0]["use"], "usual");
        assert_eq!(value["identifier"][0]["type"]["coding"][0]["code"], "MR");
        assert_eq!(value["identifier"][0]["value"], "MRN123456");
        assert_eq!(value["name"][0]["use"], "official");
        assert_eq!(value["name"][0]["given"][1], "A");
        assert_eq!(value["gender"], "male");
        assert_eq!(value["birthDate"], "1980-12-15");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn minimal_patient_omits_empty_members() {
        let value = Patient::to_value(&PatientData::default()).expect("to value");
        assert!(value.get("identifier").is_none());
        assert!(value.get("name").is_none());
        assert!(value.get("birthDate").is_none());
        assert_eq!(value["gender"], "unknown");
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"{"resourceType":"Patient","gender":"male","unexpected_key":1}"#;
        let err = Patient::parse(input).expect_err("should reject unknown key");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("unexpected_key")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_wrong_types() {
        let input = r#"{"resourceType":"Patient","name":[{"family":"Smith","given":"John"}]}"#;
        let err = Patient::parse(input).expect_err("should reject wrong type");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("given")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let err = Patient::parse(r#"{"resourceType":"Coverage"}"#).expect_err("wrong type");
        match err {
            FhirError::InvalidInput(msg) => {
                assert!(msg.contains("Patient"));
                assert!(msg.contains("Coverage"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_gender_code() {
        let err = Patient::parse(r#"{"resourceType":"Patient","gender":"M"}"#)
            .expect_err("unknown gender");
        assert!(matches!(err, FhirError::InvalidInput(_)));
    }

    #[test]
    fn absent_gender_parses_as_unknown() {
        let data = Patient::parse(r#"{"resourceType":"Patient","id":"p1"}"#).expect("parse");
        assert_eq!(data.gender, AdministrativeGender::Unknown);
        assert_eq!(data.id.as_deref(), Some("p1"));
        assert!(data.is_empty());
    }

    #[test]
    fn identifier_helpers() {
        let data = sample();
        assert_eq!(data.primary_identifier(), Some("MRN123456"));
        assert!(!data.is_empty());
    }
}
