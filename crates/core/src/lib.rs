//! # Bridge Core
//!
//! Conversion logic between HL7 v2 ADT messages and FHIR R4 resources.
//!
//! This crate contains the two pure transformation paths:
//! - ingest: raw HL7 text to a [`Conversion`] holding a Patient and optional Coverage
//! - outbound: an [`AdtRegistration`] to an ADT^A04 message via [`AdtGenerator`]
//!
//! Nothing here performs I/O. Persistence, patient de-duplication and transport belong to
//! callers such as `api-rest` and the CLI.

pub mod assembler;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod layout;
pub mod mapping;

pub use assembler::{assemble, convert_message, Conversion};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use error::{BridgeError, BridgeResult};
pub use generator::{format_hl7_date, gender_code, AdtGenerator, AdtRegistration, InsuranceInfo};
