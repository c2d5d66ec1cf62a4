use bridge_core::{
    convert_message, AdtGenerator, AdtRegistration, BridgeError, CoreConfig, FixedClock,
    InsuranceInfo,
};
use chrono::NaiveDate;
use fhir::{AdministrativeGender, CoverageClassKind, NameUse};
use serde_json::json;
use std::sync::Arc;

const ADT_A04: &str = "MSH|^~\\&|EPIC|HOSPITAL|EMR|CLINIC|20231031120000||ADT^A04|MSG00001|P|2.5\r\
PID|1||MRN123456^^^MRN||Smith^John^A||19801215|M|||123 Main St^^Springfield^IL^62701\r\
IN1|1|PPO123|BC001|BlueCross BlueShield||||GRP456789|Gold Plan PPO";

fn generator() -> AdtGenerator {
    let at = NaiveDate::from_ymd_opt(2023, 10, 31)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid instant");
    AdtGenerator::with_clock(CoreConfig::default(), Arc::new(FixedClock(at)))
}

#[test]
fn converts_registration_message() {
    let conversion = convert_message(ADT_A04).expect("convert");
    let json = conversion.to_json().expect("json");

    assert_eq!(
        json["patient"],
        json!({
            "resourceType": "Patient",
            "identifier": [{
                "use": "usual",
                "type": {"coding": [{
                    "system": "http://terminology.hl7.org/CodeSystem/v2-0203",
                    "code": "MR",
                    "display": "Medical Record Number"
                }]},
                "value": "MRN123456"
            }],
            "name": [{"use": "official", "family": "Smith", "given": ["John", "A"]}],
            "gender": "male",
            "birthDate": "1980-12-15"
        })
    );

    assert_eq!(
        json["coverage"],
        json!({
            "resourceType": "Coverage",
            "status": "active",
            "subscriberId": "PPO123",
            "beneficiary": {"reference": "Patient/MRN123456"},
            "payor": [{"display": "BlueCross BlueShield"}],
            "class": [
                {
                    "type": {"coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/coverage-class",
                        "code": "group",
                        "display": "Group"
                    }]},
                    "value": "GRP456789"
                },
                {
                    "type": {"coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/coverage-class",
                        "code": "plan",
                        "display": "Plan"
                    }]},
                    "value": "Gold Plan PPO",
                    "name": "Gold Plan PPO"
                }
            ]
        })
    );
}

#[test]
fn accepts_any_line_ending() {
    let lf = ADT_A04.replace('\r', "\n");
    let crlf = ADT_A04.replace('\r', "\r\n");
    let expected = convert_message(ADT_A04).expect("cr");
    assert_eq!(convert_message(&lf).expect("lf"), expected);
    assert_eq!(convert_message(&format!("{crlf}\r\n")).expect("crlf"), expected);
}

#[test]
fn generated_message_converts_back() {
    let registration = AdtRegistration {
        mrn: Some("MRN1".into()),
        last_name: "Smith".into(),
        first_name: "John".into(),
        dob: "12/15/1980".into(),
        gender: "Male".into(),
        insurance: None,
    };
    let message = generator().generate(&registration).expect("generate");
    let conversion = convert_message(&message).expect("convert");

    let patient = conversion.patient.expect("patient");
    assert_eq!(patient.primary_identifier(), Some("MRN1"));
    assert_eq!(patient.names[0].use_type, Some(NameUse::Official));
    assert_eq!(patient.names[0].family.as_deref(), Some("Smith"));
    assert_eq!(patient.names[0].given, vec!["John"]);
    assert_eq!(patient.birth_date.as_deref(), Some("1980-12-15"));
    assert_eq!(patient.gender, AdministrativeGender::Male);
    assert!(conversion.coverage.is_none());
}

#[test]
fn generated_insurance_converts_back() {
    let registration = AdtRegistration {
        mrn: None,
        last_name: "O'Neil|Grey".into(),
        first_name: "Ann".into(),
        dob: "3/7/1975".into(),
        gender: "female".into(),
        insurance: Some(InsuranceInfo {
            name: "Acme & Sons".into(),
            member_id: "M-42".into(),
            plan: Some("Gold^Plus".into()),
            group_number: None,
        }),
    };
    let message = generator().generate(&registration).expect("generate");
    let conversion = convert_message(&message).expect("convert");

    let patient = conversion.patient.expect("patient");
    assert_eq!(patient.primary_identifier(), Some("MRN20231031120000"));
    assert_eq!(patient.names[0].family.as_deref(), Some("O'Neil|Grey"));
    assert_eq!(patient.birth_date.as_deref(), Some("1975-03-07"));
    assert_eq!(patient.gender, AdministrativeGender::Female);

    let coverage = conversion.coverage.expect("coverage");
    assert_eq!(coverage.subscriber_id.as_deref(), Some("M-42"));
    assert_eq!(coverage.payors[0].display.as_deref(), Some("Acme & Sons"));
    assert_eq!(coverage.class_value(CoverageClassKind::Group), None);
    assert_eq!(coverage.class_value(CoverageClassKind::Plan), Some("Gold^Plus"));
    assert_eq!(
        coverage.beneficiary_reference(),
        Some("Patient/MRN20231031120000")
    );
}

#[test]
fn line_breaks_in_values_stay_inside_their_segment() {
    let registration = AdtRegistration {
        mrn: Some("MRN1".into()),
        last_name: "Smith".into(),
        first_name: "John\rIN1".into(),
        dob: "12/15/1980".into(),
        gender: "M".into(),
        insurance: None,
    };
    let message = generator().generate(&registration).expect("generate");
    assert_eq!(message.split('\r').count(), 2);

    let conversion = convert_message(&message).expect("convert");
    assert!(conversion.coverage.is_none());

    let patient = conversion.patient.expect("patient");
    assert_eq!(patient.names[0].given, vec!["John\rIN1"]);
    assert_eq!(patient.birth_date.as_deref(), Some("1980-12-15"));
    assert_eq!(patient.gender, AdministrativeGender::Male);
}

#[test]
fn message_without_in1_has_no_coverage_key() {
    let conversion =
        convert_message("MSH|^~\\&|A|B|C|D|20230101||ADT^A04|1|P|2.5\rPID|1||MRN9||Doe^Jane")
            .expect("convert");
    let json = conversion.to_json().expect("json");
    assert!(json.get("patient").is_some());
    assert!(json.get("coverage").is_none());
}

#[test]
fn blank_group_and_plan_omit_class() {
    let conversion = convert_message(
        "MSH|^~\\&\rPID|1||MRN9||Doe^Jane\rIN1|1|M1||Acme||||  | ",
    )
    .expect("convert");
    let json = conversion.to_json().expect("json");
    assert!(json["coverage"].get("class").is_none());
    assert_eq!(json["coverage"]["payor"][0]["display"], "Acme");
}

#[test]
fn malformed_dob_is_a_validation_error() {
    let registration = AdtRegistration {
        mrn: None,
        last_name: "Smith".into(),
        first_name: "John".into(),
        dob: "1980-12-15".into(),
        gender: "Male".into(),
        insurance: None,
    };
    let err = generator().generate(&registration).expect_err("bad dob");
    assert!(matches!(err, BridgeError::Validation(msg) if msg == "invalid date format"));
}
