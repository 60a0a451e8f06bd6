use crate::handlers::{LIST_OPTIONS_COMMAND, PARSE_DOCUMENT_COMMAND};
use crate::protocol::DocumentParams;
use crate::state::GlobalState;
use madr_core::grammar::OPTIONS_HEADING;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::ExecuteCommandParams;
use url::Url;

fn invalid_params(message: String) -> Error {
    Error {
        code: ErrorCode::InvalidParams,
        message: message.into(),
        data: None,
    }
}

/// Handle "workspace/executeCommand" request
///
/// `madr/parseDocument` returns the structured record of an open document
/// as JSON; `madr/listOptions` returns its considered-option list text.
/// Both take a single `{ "uri": ... }` argument.
pub async fn handle_execute_command(
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let command = params.command;
    let argument = params
        .arguments
        .into_iter()
        .next()
        .ok_or_else(|| invalid_params("expected a document argument".to_string()))?;
    let document: DocumentParams = serde_json::from_value(argument)
        .map_err(|e| invalid_params(format!("malformed document argument: {}", e)))?;
    let uri = Url::parse(&document.uri)
        .map_err(|e| invalid_params(format!("invalid document uri: {}", e)))?;

    let documents = state.documents.read().await;
    let Some(text) = documents.get(&uri) else {
        return Ok(None);
    };

    match command.as_str() {
        PARSE_DOCUMENT_COMMAND => {
            let record = madr_core::parse_document(text);
            Ok(serde_json::to_value(record).ok())
        }
        LIST_OPTIONS_COMMAND => {
            let options = madr_core::extract_list_items(text, OPTIONS_HEADING);
            Ok(serde_json::to_value(options).ok())
        }
        _ => Ok(None),
    }
}
