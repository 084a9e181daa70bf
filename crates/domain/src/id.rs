//! ID generation utilities.

use uuid::Uuid;

/// Generates a fresh request identifier as a string.
///
/// Used for the `X-Request-ID` tracing header and for offline queue
/// entry IDs. UUID v7 includes timestamp information and is sortable.
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}
