use aquasync_schema::ScanPayload;

use super::AssociationFailure;

/// Extracts the device id from a scanned code.
///
/// The code must be a JSON object carrying a non-blank `deviceId` (or `device_id` / `id`),
/// given as a string or a number.
pub fn parse_scan_payload(raw: &str) -> Result<String, AssociationFailure> {
    let payload: ScanPayload = serde_json::from_str(raw.trim())
        .map_err(|e| AssociationFailure::InvalidPayload(format!("not a JSON device code: {e}")))?;

    match payload.identifier() {
        Some(id) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        Some(_) => Err(AssociationFailure::InvalidPayload(
            "device id is blank".to_string(),
        )),
        None => Err(AssociationFailure::InvalidPayload(
            "device id is missing".to_string(),
        )),
    }
}
