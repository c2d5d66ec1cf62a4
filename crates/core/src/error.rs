#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("parse error: {0}")]
    Parse(#[from] hl7_v2::Hl7Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
