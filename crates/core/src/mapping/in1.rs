//! `IN1` to Coverage.

use super::{apply_rules, FieldRule};
use crate::layout::in1;
use fhir::{CoverageClass, CoverageClassKind, CoverageData, Reference};
use hl7_v2::{Field, Segment};

pub const IN1_RULES: &[FieldRule<CoverageData>] = &[
    FieldRule {
        index: in1::MEMBER_ID,
        target: "Coverage.subscriberId",
        apply: subscriber_id,
    },
    FieldRule {
        index: in1::COMPANY_NAME,
        target: "Coverage.payor",
        apply: payor,
    },
    FieldRule {
        index: in1::GROUP_NUMBER,
        target: "Coverage.class[group]",
        apply: group,
    },
    FieldRule {
        index: in1::PLAN_NAME,
        target: "Coverage.class[plan]",
        apply: plan,
    },
];

/// Build an active Coverage from an `IN1` segment.
///
/// `beneficiary` is written verbatim as `Coverage.beneficiary.reference`.
pub fn map_in1(segment: &Segment, beneficiary: &str) -> CoverageData {
    let mut coverage = CoverageData {
        beneficiary: Reference {
            reference: Some(beneficiary.to_owned()),
            display: None,
        },
        ..CoverageData::default()
    };
    apply_rules(segment, IN1_RULES, &mut coverage);
    coverage
}

fn subscriber_id(coverage: &mut CoverageData, field: Field<'_>) {
    coverage.subscriber_id = field
        .component(0)
        .filter(|v| !v.is_empty())
        .map(|v| v.into_owned());
}

fn payor(coverage: &mut CoverageData, field: Field<'_>) {
    coverage
        .payors
        .push(Reference::display(&field.value()));
}

fn group(coverage: &mut CoverageData, field: Field<'_>) {
    let value = field.value();
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    coverage.classes.push(CoverageClass {
        kind: CoverageClassKind::Group,
        value: value.to_owned(),
        name: None,
    });
}

fn plan(coverage: &mut CoverageData, field: Field<'_>) {
    let value = field.value();
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    coverage.classes.push(CoverageClass {
        kind: CoverageClassKind::Plan,
        value: value.to_owned(),
        name: Some(value.to_owned()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::CoverageStatus;
    use hl7_v2::Message;

    fn in1(line: &str) -> CoverageData {
        let message = Message::parse(line).expect("parse");
        map_in1(message.segment("IN1").expect("IN1 segment"), "Patient/P1")
    }

    #[test]
    fn maps_full_segment() {
        let coverage =
            in1("IN1|1|PPO123|BC001|BlueCross BlueShield||||GRP456789|Gold Plan PPO");
        assert_eq!(coverage.status, CoverageStatus::Active);
        assert_eq!(coverage.subscriber_id.as_deref(), Some("PPO123"));
        assert_eq!(coverage.payors, vec![Reference::display("BlueCross BlueShield")]);
        assert_eq!(coverage.beneficiary_reference(), Some("Patient/P1"));
        assert_eq!(coverage.classes.len(), 2);
        assert_eq!(coverage.classes[0].kind, CoverageClassKind::Group);
        assert_eq!(coverage.classes[0].value, "GRP456789");
        assert_eq!(coverage.classes[0].name, None);
        assert_eq!(coverage.classes[1].kind, CoverageClassKind::Plan);
        assert_eq!(coverage.classes[1].name.as_deref(), Some("Gold Plan PPO"));
    }

    #[test]
    fn blank_group_and_plan_give_no_classes() {
        let coverage = in1("IN1|1|M1||Acme||||   |  ");
        assert!(coverage.classes.is_empty());
        assert_eq!(coverage.payors.len(), 1);
    }

    #[test]
    fn plan_without_group() {
        let coverage = in1("IN1|1|M1||Acme|||||Silver ");
        assert_eq!(coverage.classes.len(), 1);
        assert_eq!(coverage.class_value(CoverageClassKind::Plan), Some("Silver"));
    }

    #[test]
    fn missing_company_name_has_no_payor() {
        let coverage = in1("IN1|1|M1");
        assert!(coverage.payors.is_empty());
        assert_eq!(coverage.subscriber_id.as_deref(), Some("M1"));
    }

    #[test]
    fn subscriber_id_takes_first_component() {
        let coverage = in1("IN1|1|M1^X^Y");
        assert_eq!(coverage.subscriber_id.as_deref(), Some("M1"));
    }
}
