//! The view.tree language server.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, TextDocumentItem, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, async_trait};

use crate::completion::{CompletionContext, completion_items, current_component};
use crate::config::{TraceLevel, ViewTreeSettings};
use crate::project::{ProjectData, ScanError, SourceKind, scan_project, source_kind};

pub const TRIGGER_CHARACTERS: [&str; 4] = ["$", "_", " ", "\t"];

/// The part of `tower_lsp::Client` the server talks to.
#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn log_message(&self, typ: MessageType, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn log_message(&self, typ: MessageType, message: String) {
        Client::log_message(self, typ, message).await;
    }
}

#[derive(Clone)]
struct DocumentEntry {
    text: Arc<String>,
    /// What the document declares; only view.tree documents have one.
    index: Option<Arc<ProjectData>>,
}

/// Open documents keyed by URI, each with its current text and index.
#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String) {
        let index = (source_kind(Path::new(uri.path())) == Some(SourceKind::ViewTree)).then(|| {
            let mut data = ProjectData::default();
            data.index_view_tree(&text);
            Arc::new(data)
        });
        let entry = DocumentEntry {
            text: Arc::new(text),
            index,
        };
        self.entries.write().await.insert(uri, entry);
    }

    async fn get(&self, uri: &Url) -> Option<Arc<String>> {
        self.entries.read().await.get(uri).map(|entry| Arc::clone(&entry.text))
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }

    /// Merge every open document's index into `data`.
    async fn merge_into(&self, data: &mut ProjectData) {
        for index in self.entries.read().await.values().filter_map(|e| e.index.as_ref()) {
            data.merge(index);
        }
    }
}

pub struct ViewTreeLanguageServer<C = Client> {
    client: C,
    documents: DocumentStore,
    settings: RwLock<ViewTreeSettings>,
    workspace_root: RwLock<Option<PathBuf>>,
    project: RwLock<ProjectData>,
}

impl ViewTreeLanguageServer<Client> {
    pub fn new(client: Client) -> Self {
        Self::with_client(client)
    }
}

impl<C: LspClient> ViewTreeLanguageServer<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            documents: DocumentStore::default(),
            settings: RwLock::new(ViewTreeSettings::default()),
            workspace_root: RwLock::new(None),
            project: RwLock::new(ProjectData::default()),
        }
    }

    pub async fn settings(&self) -> ViewTreeSettings {
        self.settings.read().await.clone()
    }

    pub async fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.read().await.clone()
    }

    /// Snapshot of the scanned index merged with what open documents declare.
    ///
    /// An open document replaces its own earlier contribution on every
    /// change and stops contributing once closed.
    pub async fn project(&self) -> ProjectData {
        let mut data = self.project.read().await.clone();
        self.documents.merge_into(&mut data).await;
        data
    }

    /// Re-index the workspace, replacing the previous index.
    ///
    /// Progress and failures are reported to the client; `Ok(false)` means
    /// there was no workspace root to scan.
    pub async fn rescan(&self) -> std::result::Result<bool, ScanError> {
        let Some(root) = self.workspace_root().await else {
            self.client
                .log_message(MessageType::WARNING, "No workspace root found".to_owned())
                .await;
            return Ok(false);
        };

        self.client
            .log_message(MessageType::INFO, "Starting project scan...".to_owned())
            .await;
        tracing::info!(root = %root.display(), "scanning project");

        let settings = self.settings().await;
        let data = tokio::task::spawn_blocking(move || scan_project(&root, &settings)).await??;

        let message = format!(
            "Scan complete: {} components, {} components with properties",
            data.components.len(),
            data.component_properties.len()
        );
        *self.project.write().await = data;

        tracing::info!("{message}");
        self.client.log_message(MessageType::INFO, message).await;
        Ok(true)
    }

    /// Mirror `message` to the editor when the trace setting allows it.
    async fn trace(&self, level: TraceLevel, message: String) {
        if self.settings.read().await.trace.server >= level {
            self.client.log_message(MessageType::LOG, message).await;
        }
    }
}

#[async_trait]
impl<C: LspClient> tower_lsp::LanguageServer for ViewTreeLanguageServer<C> {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        #[allow(deprecated)]
        let root_uri = params.root_uri;
        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| &folder.uri)
            .or(root_uri.as_ref())
            .and_then(|uri| uri.to_file_path().ok());
        *self.workspace_root.write().await = root;

        let settings =
            ViewTreeSettings::from_value_or_default(params.initialization_options.as_ref());
        *self.settings.write().await = settings;

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(true),
                trigger_characters: Some(TRIGGER_CHARACTERS.map(str::to_owned).to_vec()),
                ..CompletionOptions::default()
            }),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "view-tree-lsp".to_owned(),
                version: Some(env!("CARGO_PKG_VERSION").to_owned()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "ViewTree LSP server initialized!".to_owned())
            .await;

        if !self.settings.read().await.scan_on_startup {
            return;
        }
        if let Err(err) = self.rescan().await {
            tracing::error!(error = %err, "project scan failed");
            self.client
                .log_message(MessageType::ERROR, format!("Project scan failed: {err}"))
                .await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem { uri, text, .. } = params.text_document;
        self.trace(TraceLevel::Messages, format!("opened {uri}")).await;
        self.documents.upsert(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents
                .upsert(params.text_document.uri, change.text)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.trace(TraceLevel::Messages, format!("closed {uri}")).await;
        self.documents.remove(&uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings = ViewTreeSettings::from_value_or_default(Some(&params.settings));
        tracing::debug!(?settings, "configuration changed");
        *self.settings.write().await = settings;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position.position;
        let uri = params.text_document_position.text_document.uri;

        let Some(text) = self.documents.get(&uri).await else {
            tracing::debug!(%uri, "completion for unknown document");
            return Ok(Some(CompletionResponse::Array(Vec::new())));
        };

        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let index = position.line as usize;
        let Some(line) = lines.get(index) else {
            return Ok(Some(CompletionResponse::Array(Vec::new())));
        };

        let context = CompletionContext::detect(line, position.character);
        let component = current_component(&lines, index);
        self.trace(
            TraceLevel::Verbose,
            format!(
                "completion at {}:{}: {context:?}, component {component:?}",
                position.line, position.character
            ),
        )
        .await;

        let project = self.project().await;
        let items = completion_items(context, component, &project);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(item)
    }
}
