//! Search-result bundle helpers.
//!
//! Bundles returned by a FHIR server carry many optional elements this crate does not model,
//! so they are scanned as untyped JSON rather than through a strict wire struct.

use crate::{FhirError, FhirResult};
use serde_json::Value;

/// Find the first Patient entry in `bundle_json` that has an identifier equal to `value`.
///
/// Used to de-duplicate registrations: a caller searches the server by identifier and only
/// creates a new Patient when this returns `None`.
///
/// # Errors
///
/// Returns [`FhirError::InvalidJson`] if the text is not JSON and [`FhirError::InvalidInput`]
/// if the document is not a Bundle.
pub fn find_patient_by_identifier(bundle_json: &str, value: &str) -> FhirResult<Option<Value>> {
    let bundle: Value = serde_json::from_str(bundle_json)?;

    if bundle.get("resourceType").and_then(Value::as_str) != Some("Bundle") {
        return Err(FhirError::InvalidInput(
            "Expected resourceType 'Bundle'".into(),
        ));
    }

    let Some(entries) = bundle.get("entry").and_then(Value::as_array) else {
        return Ok(None);
    };

    let found = entries
        .iter()
        .filter_map(|entry| entry.get("resource"))
        .filter(|resource| resource.get("resourceType").and_then(Value::as_str) == Some("Patient"))
        .find(|resource| has_identifier(resource, value));

    Ok(found.cloned())
}

fn has_identifier(resource: &Value, value: &str) -> bool {
    resource
        .get("identifier")
        .and_then(Value::as_array)
        .is_some_and(|ids| {
            ids.iter()
                .any(|id| id.get("value").and_then(Value::as_str) == Some(value))
        })
}
