//! Building outbound ADT^A04 registration messages.
//!
//! The generator writes `MSH`, `PID` and optionally `IN1` at the same field positions the
//! mappers read (see [`crate::layout`]), so its output converts back to an equivalent
//! Patient/Coverage pair.
//!
//! The only non-deterministic input is the clock, read once per message for the `MSH-7`
//! timestamp, the control id and a synthesized MRN.

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    ADT_REGISTER, IN1_SEGMENT, MESSAGE_ID_PREFIX, MRN_IDENTIFIER_TYPE, MRN_PREFIX, PID_SEGMENT,
};
use crate::layout::{in1, msh, pid};
use crate::{BridgeError, BridgeResult, CoreConfig};
use hl7_v2::{join_segments, Delimiters, SegmentBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Structured registration input.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdtRegistration {
    /// Medical record number. Synthesized from the clock when absent or empty.
    #[serde(default)]
    pub mrn: Option<String>,
    pub last_name: String,
    pub first_name: String,
    /// Date of birth as `MM/DD/YYYY`.
    pub dob: String,
    /// `Male`/`M` (any case) codes as `M`; anything else codes as `F`.
    pub gender: String,
    #[serde(default)]
    pub insurance: Option<InsuranceInfo>,
}

/// Insurance block of a registration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceInfo {
    pub name: String,
    #[serde(rename = "memberID", alias = "memberId")]
    pub member_id: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
}

/// ADT^A04 message generator.
#[derive(Clone)]
pub struct AdtGenerator {
    config: CoreConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AdtGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdtGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdtGenerator {
    /// Generator reading the system clock.
    pub fn new(config: CoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Render `registration` as a CR-separated HL7 message.
    ///
    /// `IN1` is written only when the insurance block has both a company name and a member
    /// id. Group number and plan are written as empty fields when absent so they keep their
    /// positions.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if `dob` is not `MM/DD/YYYY`.
    pub fn generate(&self, registration: &AdtRegistration) -> BridgeResult<String> {
        let birth_date = format_hl7_date(&registration.dob)?;
        let timestamp = self.clock.hl7_timestamp();
        let mrn = registration
            .mrn
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{MRN_PREFIX}{timestamp}"));
        let control_id = format!("{MESSAGE_ID_PREFIX}{timestamp}");

        let delimiters = Delimiters::default();
        let mut segments = vec![
            self.header(delimiters, &timestamp, &control_id),
            SegmentBuilder::new(PID_SEGMENT, delimiters)
                .text(pid::SET_ID, "1")
                .components(pid::IDENTIFIER_LIST, &[mrn.as_str(), "", "", MRN_IDENTIFIER_TYPE])
                .components(
                    pid::NAME,
                    &[
                        registration.last_name.as_str(),
                        registration.first_name.as_str(),
                    ],
                )
                .text(pid::BIRTH_DATE, &birth_date)
                .text(pid::SEX, gender_code(&registration.gender))
                .build(),
        ];

        if let Some(insurance) = registration
            .insurance
            .as_ref()
            .filter(|i| !i.name.trim().is_empty() && !i.member_id.trim().is_empty())
        {
            segments.push(insurance_segment(delimiters, insurance));
        }

        tracing::debug!(
            control_id = %control_id,
            segments = segments.len(),
            "generated ADT^A04 message"
        );

        Ok(join_segments(&segments))
    }

    fn header(&self, delimiters: Delimiters, timestamp: &str, control_id: &str) -> String {
        SegmentBuilder::header(delimiters)
            .text(msh::SENDING_APPLICATION, self.config.sending_application())
            .text(msh::SENDING_FACILITY, self.config.sending_facility())
            .text(msh::RECEIVING_APPLICATION, self.config.receiving_application())
            .text(msh::RECEIVING_FACILITY, self.config.receiving_facility())
            .text(msh::DATE_TIME, timestamp)
            .components(msh::MESSAGE_TYPE, &ADT_REGISTER)
            .text(msh::CONTROL_ID, control_id)
            .text(msh::PROCESSING_ID, self.config.processing_id())
            .text(msh::VERSION_ID, self.config.version_id())
            .build()
    }
}

fn insurance_segment(delimiters: Delimiters, insurance: &InsuranceInfo) -> String {
    SegmentBuilder::new(IN1_SEGMENT, delimiters)
        .text(in1::SET_ID, "1")
        .text(in1::MEMBER_ID, &insurance.member_id)
        .text(in1::COMPANY_NAME, &insurance.name)
        .text(
            in1::GROUP_NUMBER,
            insurance.group_number.as_deref().unwrap_or_default(),
        )
        .text(in1::PLAN_NAME, insurance.plan.as_deref().unwrap_or_default())
        .through(in1::PLAN_NAME)
        .build()
}

/// `M` for `male`/`m` in any case, `F` otherwise.
pub fn gender_code(gender: &str) -> &'static str {
    let gender = gender.trim();
    if gender.eq_ignore_ascii_case("male") || gender.eq_ignore_ascii_case("m") {
        "M"
    } else {
        "F"
    }
}

/// Convert `MM/DD/YYYY` to HL7 `YYYYMMDD`, zero-padding month and day.
///
/// Calendar values are not range-checked.
///
/// # Errors
///
/// Returns [`BridgeError::Validation`] unless the input is exactly three `/`-separated
/// digit groups: a one or two digit month and day and a four digit year.
pub fn format_hl7_date(dob: &str) -> BridgeResult<String> {
    let invalid = || BridgeError::Validation("invalid date format".into());

    let parts: Vec<&str> = dob.trim().split('/').collect();
    let [month, day, year] = parts[..] else {
        return Err(invalid());
    };

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
    };
    if !digits(month, 1, 2) || !digits(day, 1, 2) || !digits(year, 4, 4) {
        return Err(invalid());
    }

    Ok(format!("{year}{month:0>2}{day:0>2}"))
}
