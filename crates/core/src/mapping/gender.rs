use fhir::AdministrativeGender;

/// Map an HL7 administrative sex code (`PID-8`) to a FHIR gender.
///
/// Case-insensitive and total: anything outside `M`/`F`/`O`/`U` is `unknown`. The code is
/// not trimmed, so padded values are `unknown` too.
pub fn map_gender(code: &str) -> AdministrativeGender {
    match code.to_ascii_uppercase().as_str() {
        "M" => AdministrativeGender::Male,
        "F" => AdministrativeGender::Female,
        "O" => AdministrativeGender::Other,
        _ => AdministrativeGender::Unknown,
    }
}
