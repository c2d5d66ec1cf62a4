//! `PID` to Patient.

use super::{apply_rules, map_gender, normalize_hl7_date, FieldRule};
use crate::layout::pid;
use fhir::{HumanName, Identifier, NameUse, PatientData};
use hl7_v2::{Field, Segment};

pub const PID_RULES: &[FieldRule<PatientData>] = &[
    FieldRule {
        index: pid::IDENTIFIER_LIST,
        target: "Patient.identifier",
        apply: identifier,
    },
    FieldRule {
        index: pid::NAME,
        target: "Patient.name",
        apply: name,
    },
    FieldRule {
        index: pid::BIRTH_DATE,
        target: "Patient.birthDate",
        apply: birth_date,
    },
    FieldRule {
        index: pid::SEX,
        target: "Patient.gender",
        apply: gender,
    },
];

/// Build a Patient from a `PID` segment. Never fails; absent fields leave defaults.
pub fn map_pid(segment: &Segment) -> PatientData {
    let mut patient = PatientData::default();
    apply_rules(segment, PID_RULES, &mut patient);
    patient
}

/// ID number of the first repetition of `PID-3`.
fn identifier(patient: &mut PatientData, field: Field<'_>) {
    if let Some(value) = field.component(0).filter(|v| !v.is_empty()) {
        patient
            .identifiers
            .push(Identifier::medical_record_number(value.into_owned()));
    }
}

/// `family^given^middle`, suffix and prefix are not carried.
fn name(patient: &mut PatientData, field: Field<'_>) {
    let components = field.components();
    let part = |i: usize| components.get(i).map(|c| c.to_string()).unwrap_or_default();

    let given = [part(1), part(2)]
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect();

    patient.names.push(HumanName {
        use_type: Some(NameUse::Official),
        family: Some(part(0)),
        given,
    });
}

fn birth_date(patient: &mut PatientData, field: Field<'_>) {
    patient.birth_date = normalize_hl7_date(&field.value());
}

fn gender(patient: &mut PatientData, field: Field<'_>) {
    patient.gender = map_gender(&field.value());
}
