use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

pub const PARSE_DOCUMENT_COMMAND: &str = "madr/parseDocument";
pub const LIST_OPTIONS_COMMAND: &str = "madr/listOptions";

/// Handle "initialize" request
pub async fn handle_initialize(
    client: &Client,
    params: InitializeParams,
) -> Result<InitializeResult> {
    if let Some(root_uri) = params.root_uri {
        client
            .log_message(
                MessageType::INFO,
                format!("Serving decision records under {}", root_uri),
            )
            .await;
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            document_formatting_provider: Some(OneOf::Left(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![
                    PARSE_DOCUMENT_COMMAND.to_string(),
                    LIST_OPTIONS_COMMAND.to_string(),
                ],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        ..Default::default()
    })
}
