//! Payload types for the custom `madr/*` workspace commands.

use serde::Deserialize;

/// Single argument carried by `madr/parseDocument` and `madr/listOptions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParams {
    pub uri: String,
}
