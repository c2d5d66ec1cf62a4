//! Core runtime configuration.
//!
//! The generator's message header identity is resolved once at process startup and passed
//! into [`crate::AdtGenerator`], rather than read from the environment while handling a
//! request.

use crate::constants::{
    DEFAULT_PROCESSING_ID, DEFAULT_RECEIVING_APPLICATION, DEFAULT_RECEIVING_FACILITY,
    DEFAULT_SENDING_APPLICATION, DEFAULT_SENDING_FACILITY, DEFAULT_VERSION_ID,
    ENV_PROCESSING_ID, ENV_RECEIVING_APPLICATION, ENV_RECEIVING_FACILITY,
    ENV_SENDING_APPLICATION, ENV_SENDING_FACILITY, ENV_VERSION_ID,
};
use crate::{BridgeError, BridgeResult};
use hl7_v2::Delimiters;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    sending_application: String,
    sending_facility: String,
    receiving_application: String,
    receiving_facility: String,
    processing_id: String,
    version_id: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            sending_application: DEFAULT_SENDING_APPLICATION.into(),
            sending_facility: DEFAULT_SENDING_FACILITY.into(),
            receiving_application: DEFAULT_RECEIVING_APPLICATION.into(),
            receiving_facility: DEFAULT_RECEIVING_FACILITY.into(),
            processing_id: DEFAULT_PROCESSING_ID.into(),
            version_id: DEFAULT_VERSION_ID.into(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Every value ends up verbatim in an `MSH` field, so blank values and values containing
    /// HL7 delimiter characters or line breaks are rejected.
    pub fn new(
        sending_application: String,
        sending_facility: String,
        receiving_application: String,
        receiving_facility: String,
        processing_id: String,
        version_id: String,
    ) -> BridgeResult<Self> {
        validate_header_value("sending_application", &sending_application)?;
        validate_header_value("sending_facility", &sending_facility)?;
        validate_header_value("receiving_application", &receiving_application)?;
        validate_header_value("receiving_facility", &receiving_facility)?;
        validate_header_value("processing_id", &processing_id)?;
        validate_header_value("version_id", &version_id)?;

        Ok(Self {
            sending_application,
            sending_facility,
            receiving_application,
            receiving_facility,
            processing_id,
            version_id,
        })
    }

    /// Build a config from environment-style lookups.
    ///
    /// `lookup` is called with each `HL7_*` variable name. Missing or blank values fall back to
    /// the defaults. Binaries pass `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn from_env_values<F>(lookup: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self::new(
            value(ENV_SENDING_APPLICATION, DEFAULT_SENDING_APPLICATION),
            value(ENV_SENDING_FACILITY, DEFAULT_SENDING_FACILITY),
            value(ENV_RECEIVING_APPLICATION, DEFAULT_RECEIVING_APPLICATION),
            value(ENV_RECEIVING_FACILITY, DEFAULT_RECEIVING_FACILITY),
            value(ENV_PROCESSING_ID, DEFAULT_PROCESSING_ID),
            value(ENV_VERSION_ID, DEFAULT_VERSION_ID),
        )
    }

    pub fn sending_application(&self) -> &str {
        &self.sending_application
    }

    pub fn sending_facility(&self) -> &str {
        &self.sending_facility
    }

    pub fn receiving_application(&self) -> &str {
        &self.receiving_application
    }

    pub fn receiving_facility(&self) -> &str {
        &self.receiving_facility
    }

    pub fn processing_id(&self) -> &str {
        &self.processing_id
    }

    pub fn version_id(&self) -> &str {
        &self.version_id
    }
}

fn validate_header_value(name: &str, value: &str) -> BridgeResult<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidConfig(format!("{name} cannot be empty")));
    }

    let delimiters = Delimiters::default();
    if value
        .chars()
        .any(|c| delimiters.is_reserved(c) || c == '\r' || c == '\n')
    {
        return Err(BridgeError::InvalidConfig(format!(
            "{name} cannot contain HL7 delimiter characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_adt_registration_header() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.sending_application(), "INTEGRATION");
        assert_eq!(cfg.sending_facility(), "CLINIC");
        assert_eq!(cfg.receiving_application(), "EMR");
        assert_eq!(cfg.receiving_facility(), "HOSPITAL");
        assert_eq!(cfg.processing_id(), "P");
        assert_eq!(cfg.version_id(), "2.5");
    }

    #[test]
    fn env_values_override_defaults() {
        let cfg = CoreConfig::from_env_values(lookup(&[
            (ENV_SENDING_APPLICATION, "INTAKE"),
            (ENV_PROCESSING_ID, " T "),
        ]))
        .expect("config");
        assert_eq!(cfg.sending_application(), "INTAKE");
        assert_eq!(cfg.processing_id(), "T");
        assert_eq!(cfg.receiving_facility(), "HOSPITAL");
    }

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        let cfg = CoreConfig::from_env_values(lookup(&[(ENV_VERSION_ID, "   ")])).expect("config");
        assert_eq!(cfg, CoreConfig::default());
    }

    #[test]
    fn rejects_delimiters_in_values() {
        let err = CoreConfig::from_env_values(lookup(&[(ENV_SENDING_FACILITY, "A|B")]))
            .expect_err("delimiter");
        assert!(matches!(err, BridgeError::InvalidConfig(msg) if msg.contains("sending_facility")));

        let err = CoreConfig::from_env_values(lookup(&[(ENV_RECEIVING_APPLICATION, "EMR^X")]))
            .expect_err("component separator");
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }

    #[test]
    fn new_rejects_blank_values() {
        let err = CoreConfig::new(
            "A".into(),
            " ".into(),
            "C".into(),
            "D".into(),
            "P".into(),
            "2.5".into(),
        )
        .expect_err("blank");
        assert!(matches!(err, BridgeError::InvalidConfig(msg) if msg == "sending_facility cannot be empty"));
    }
}
