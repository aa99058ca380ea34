use crate::pocket_api::types::{DecodeError, Item, RetrieveResponse};

/// Decode a raw response body into the full response structure.
pub fn decode_response(body: &[u8]) -> Result<RetrieveResponse, DecodeError> {
    let response = serde_json::from_slice::<RetrieveResponse>(body)
        .inspect_err(|e| log::debug!("Failed to decode response body: {}", e))?;
    log::debug!(
        "Decoded response with status {} and {} items (complete: {}, since: {})",
        response.status,
        response.len(),
        response.complete,
        response.since
    );
    Ok(response)
}

/// Decode a raw response body and flatten its keyed list into a sequence of items.
///
/// The order of the returned items is unspecified. Either every item is returned or an
/// error, never a partial list.
pub fn normalize(body: &[u8]) -> Result<Vec<Item>, DecodeError> {
    decode_response(body).map(RetrieveResponse::into_items)
}
