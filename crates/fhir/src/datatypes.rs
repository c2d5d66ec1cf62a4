//! FHIR general-purpose data types shared by the resources in this crate.
//!
//! `Coding` and `Reference` have the same shape on the wire and in the domain model, so they
//! are used directly in both.

use serde::{Deserialize, Serialize};

/// Code system for HL7 v2 identifier types (table 0203).
pub const IDENTIFIER_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";

/// Code system for `Coverage.class.type`.
pub const COVERAGE_CLASS_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/coverage-class";

/// A single code from a code system.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(system: &str, code: &str, display: &str) -> Self {
        Self {
            system: Some(system.to_owned()),
            code: Some(code.to_owned()),
            display: Some(display.to_owned()),
        }
    }

    /// `MR` from v2 table 0203.
    pub fn medical_record_number() -> Self {
        Self::new(IDENTIFIER_TYPE_SYSTEM, "MR", "Medical Record Number")
    }
}

/// A reference from one resource to another, by literal reference and/or display text.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Literal reference to a Patient by id, e.g. `Patient/123`.
    pub fn patient(id: &str) -> Self {
        Self {
            reference: Some(format!("Patient/{id}")),
            display: None,
        }
    }

    pub fn display(text: &str) -> Self {
        Self {
            reference: None,
            display: Some(text.to_owned()),
        }
    }
}

/// Wire representation of a CodeableConcept.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct CodeableConceptWire {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConceptWire {
    pub(crate) fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }
}
