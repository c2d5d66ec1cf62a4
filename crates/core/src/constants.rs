//! Constants used throughout the bridge core crate.
//!
//! Segment codes, synthesized-id prefixes and the default message header identity live here
//! so the mapping and generation paths agree on them.

/// Patient Identification segment.
pub const PID_SEGMENT: &str = "PID";

/// Insurance segment.
pub const IN1_SEGMENT: &str = "IN1";

/// Message type and trigger event written by the generator (`MSH-9`).
pub const ADT_REGISTER: [&str; 2] = ["ADT", "A04"];

/// Identifier type code written after the MRN in `PID-3` (`<mrn>^^^MRN`).
pub const MRN_IDENTIFIER_TYPE: &str = "MRN";

/// Prefix of a synthesized medical record number.
pub const MRN_PREFIX: &str = "MRN";

/// Prefix of a synthesized message control id.
pub const MESSAGE_ID_PREFIX: &str = "MSG";

/// Patient id used in the beneficiary placeholder when the Patient has no identifier.
pub const TEMP_PATIENT_ID: &str = "temp";

/// HL7 `DTM` timestamp at second resolution.
pub const HL7_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub const DEFAULT_SENDING_APPLICATION: &str = "INTEGRATION";
pub const DEFAULT_SENDING_FACILITY: &str = "CLINIC";
pub const DEFAULT_RECEIVING_APPLICATION: &str = "EMR";
pub const DEFAULT_RECEIVING_FACILITY: &str = "HOSPITAL";
pub const DEFAULT_PROCESSING_ID: &str = "P";
pub const DEFAULT_VERSION_ID: &str = "2.5";

/// Environment variables read by the binaries to build a [`crate::CoreConfig`].
pub const ENV_SENDING_APPLICATION: &str = "HL7_SENDING_APPLICATION";
pub const ENV_SENDING_FACILITY: &str = "HL7_SENDING_FACILITY";
pub const ENV_RECEIVING_APPLICATION: &str = "HL7_RECEIVING_APPLICATION";
pub const ENV_RECEIVING_FACILITY: &str = "HL7_RECEIVING_FACILITY";
pub const ENV_PROCESSING_ID: &str = "HL7_PROCESSING_ID";
pub const ENV_VERSION_ID: &str = "HL7_VERSION_ID";
