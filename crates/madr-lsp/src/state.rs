use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

/// Global state for the LSP server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// Full text of every open document, keyed by URI.
    /// Read operations (formatting, commands) are concurrent;
    /// write operations (didOpen/didChange) are exclusive.
    pub documents: Arc<RwLock<HashMap<Url, String>>>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
