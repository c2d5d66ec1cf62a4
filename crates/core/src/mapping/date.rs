/// Convert an HL7 date or timestamp (`YYYYMMDD[HHMM[SS...]]`) to `YYYY-MM-DD`.
///
/// Only the first eight characters are used and they must be ASCII digits. Calendar values
/// are not checked, so `20231399` becomes `2023-13-99`. Returns `None` for shorter or
/// non-numeric input.
pub fn normalize_hl7_date(value: &str) -> Option<String> {
    let digits = value.as_bytes().get(..8)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // All eight bytes are ASCII, so these slices sit on char boundaries.
    Some(format!(
        "{}-{}-{}",
        &value[0..4],
        &value[4..6],
        &value[6..8]
    ))
}
