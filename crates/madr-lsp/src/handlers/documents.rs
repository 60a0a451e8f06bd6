use crate::conversion::{core_diagnostic_to_lsp_diagnostic, document_end_position};
use crate::state::GlobalState;
use madr_core::grammar::OPTIONS_HEADING;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "textDocument/didOpen" notification
pub async fn handle_did_open(
    client: &Client,
    state: &GlobalState,
    params: DidOpenTextDocumentParams,
) {
    let uri = params.text_document.uri;
    let text = params.text_document.text;

    {
        let mut documents = state.documents.write().await;
        documents.insert(uri.clone(), text.clone());
    }

    publish_diagnostics(client, uri, &text).await;
}

/// Handle "textDocument/didChange" notification (full sync)
pub async fn handle_did_change(
    client: &Client,
    state: &GlobalState,
    params: DidChangeTextDocumentParams,
) {
    let uri = params.text_document.uri;

    if let Some(last_change) = params.content_changes.last() {
        let text = last_change.text.clone();

        {
            let mut documents = state.documents.write().await;
            documents.insert(uri.clone(), text.clone());
        }

        publish_diagnostics(client, uri, &text).await;
    }
}

/// Handle "textDocument/didClose" notification
pub async fn handle_did_close(
    client: &Client,
    state: &GlobalState,
    params: DidCloseTextDocumentParams,
) {
    let uri = params.text_document.uri;

    {
        let mut documents = state.documents.write().await;
        documents.remove(&uri);
    }

    // Clear anything previously published for this document.
    client.publish_diagnostics(uri, Vec::new(), None).await;
}

/// Validate one document and push the results to the client.
async fn publish_diagnostics(client: &Client, uri: Url, text: &str) {
    let options = madr_core::extract_list_items(text, OPTIONS_HEADING);
    let diagnostics = madr_core::validate_document(text, &options)
        .into_iter()
        .map(core_diagnostic_to_lsp_diagnostic)
        .collect();
    client.publish_diagnostics(uri, diagnostics, None).await;
}

/// Handle "textDocument/formatting": replace the document with its
/// canonical serialization. A non-conforming document is never rewritten.
pub async fn handle_formatting(
    state: &GlobalState,
    params: DocumentFormattingParams,
) -> Result<Option<Vec<TextEdit>>> {
    let documents = state.documents.read().await;
    let Some(text) = documents.get(&params.text_document.uri) else {
        return Ok(None);
    };

    let record = madr_core::parse_document(text);
    if !record.conforming {
        return Ok(None);
    }

    let formatted = madr_core::serialize_record(&record);
    if formatted == *text {
        return Ok(None);
    }

    Ok(Some(vec![TextEdit {
        range: Range {
            start: Position::new(0, 0),
            end: document_end_position(text),
        },
        new_text: formatted,
    }]))
}
