//! FHIR R4 wire/boundary support for the HL7 bridge.
//!
//! This crate provides **domain types** and **JSON wire models** for the resources the
//! bridge produces:
//! - `Patient` (demographics and the medical record number)
//! - `Coverage` (insurance membership, payor and group/plan classes)
//!
//! This crate focuses on:
//! - FHIR semantic alignment for the subset of elements the bridge fills
//! - serialisation/deserialisation as FHIR JSON
//! - translation between domain primitives and wire structs
//!
//! It does not know about HL7 v2; mapping from segments lives in `bridge-core`.

pub mod bundle;
pub mod coverage;
pub mod datatypes;
pub mod patient;

// Re-export facades
pub use coverage::Coverage;
pub use patient::Patient;

// Re-export public domain-level types
pub use coverage::{CoverageClass, CoverageClassKind, CoverageData, CoverageStatus};
pub use datatypes::{Coding, Reference};
pub use patient::{AdministrativeGender, HumanName, Identifier, IdentifierUse, NameUse, PatientData};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Deserialize `json_text` into a wire struct, reporting the failing path on mismatch.
pub(crate) fn parse_wire<T>(json_text: &str, resource: &str) -> FhirResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    serde_path_to_error::deserialize::<_, T>(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        FhirError::Translation(format!("{resource} schema mismatch at {path}: {source}"))
    })
}
