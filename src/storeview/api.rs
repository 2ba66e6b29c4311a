//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every storeview operation, whatever the UI.
//!
//! ## Application state
//!
//! [`StoreApi`] owns the only mutable state in the application: which store
//! is selected and the most recent [`Snapshot`]. Commands never see it; they
//! receive what they need as arguments.
//!
//! Every mutating method takes `&mut self` and reloads the snapshot before
//! returning, so a load → mutate → reload sequence cannot interleave with
//! another one against the same API.
//!
//! ## Destructive operations
//!
//! Deleting and clearing go through a [`ConfirmRequest`]: `request_*` builds
//! the question, the UI asks it, and [`StoreApi::confirm`] runs the action
//! only if the answer was yes.
//!
//! ## Generic Over DataStore
//!
//! - Production: `StoreApi<FileStore>`
//! - Testing: `StoreApi<InMemoryStore>`

use crate::commands;
use crate::error::{Result, StoreError};
use crate::model::{ExportDocument, Snapshot, StorageItem, StoreKind};
use crate::store::DataStore;
use log::warn;
use std::path::{Path, PathBuf};

/// Selected store plus the latest read-out of both stores.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub kind: StoreKind,
    pub snapshot: Snapshot,
}

/// The main API facade for storeview operations.
pub struct StoreApi<S: DataStore> {
    store: S,
    state: AppState,
    config_dir: PathBuf,
}

impl<S: DataStore> StoreApi<S> {
    pub fn new(store: S, kind: StoreKind, config_dir: PathBuf) -> Self {
        Self {
            store,
            state: AppState {
                kind,
                snapshot: Snapshot::empty(),
            },
            config_dir,
        }
    }

    /// Re-reads both stores. An unreachable store leaves an empty snapshot
    /// and an error message rather than failing.
    pub fn load(&mut self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        match commands::snapshot::run(&self.store) {
            Ok(snapshot) => self.state.snapshot = snapshot,
            Err(StoreError::AccessDenied(reason)) => {
                warn!("storage not accessible: {}", reason);
                self.state.snapshot = Snapshot::empty();
                result.add_message(CmdMessage::error(format!(
                    "Cannot access storage: {}",
                    reason
                )));
            }
            Err(e) => return Err(e),
        }
        Ok(result)
    }

    pub fn select(&mut self, kind: StoreKind) {
        self.state.kind = kind;
    }

    pub fn kind(&self) -> StoreKind {
        self.state.kind
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state.snapshot
    }

    pub fn list(&self, query: &ItemQuery) -> CmdResult {
        commands::list::run(&self.state.snapshot, self.state.kind, query)
    }

    pub fn get(&self, key: &str) -> Result<&StorageItem> {
        self.state
            .snapshot
            .find(self.state.kind, key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    pub fn edit_session(&self, key: &str) -> Result<EditSession> {
        self.get(key).map(EditSession::prepare)
    }

    /// Saves new text for an existing item, checked against the type the
    /// item had when it was loaded.
    pub fn edit(&mut self, key: &str, text: &str) -> Result<CmdResult> {
        let declared = self.get(key)?.type_tag();
        let result = commands::edit::run(&mut self.store, self.state.kind, key, declared, text)?;
        self.reload(result)
    }

    /// Creates or overwrites an entry. Overwriting an object or array must
    /// keep it one, as with [`StoreApi::edit`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        let kind = self.state.kind;
        let existing = self
            .state
            .snapshot
            .find(kind, key)
            .map(StorageItem::type_tag);
        let result = commands::edit::set(&mut self.store, kind, key, existing, value)?;
        self.reload(result)
    }

    pub fn request_delete(&self, key: &str) -> Result<ConfirmRequest> {
        self.get(key)?;
        Ok(ConfirmRequest::delete(self.state.kind, key))
    }

    pub fn request_clear(&self) -> ConfirmRequest {
        ConfirmRequest::clear(self.state.kind)
    }

    pub fn confirm(&mut self, request: ConfirmRequest, accepted: bool) -> Result<CmdResult> {
        let result = commands::delete::resolve(&mut self.store, request, accepted)?;
        if accepted {
            self.reload(result)
        } else {
            Ok(result)
        }
    }

    /// Backup document of the selected store as currently loaded.
    pub fn export_document(&self) -> ExportDocument {
        commands::export::export_doc(
            self.state.snapshot.items(self.state.kind),
            self.state.kind,
        )
    }

    pub fn export(&self, dir: &Path) -> Result<CmdResult> {
        commands::export::run(&self.store, self.state.kind, dir)
    }

    /// Applies a backup to the selected store. The snapshot is reloaded even
    /// when the import stops partway, so it shows what was written.
    pub fn import(&mut self, text: &str) -> Result<CmdResult> {
        match commands::import::run(&mut self.store, self.state.kind, text) {
            Ok(result) => self.reload(result),
            Err(err) => {
                self.load()?;
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> CmdResult {
        commands::stats::run(&self.state.snapshot)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    fn reload(&mut self, mut result: CmdResult) -> Result<CmdResult> {
        let loaded = self.load()?;
        result.messages.extend(loaded.messages);
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::edit::EditSession;
pub use crate::commands::filter::{ItemQuery, SearchField};
pub use crate::commands::{
    CmdMessage, CmdResult, ConfirmRequest, MessageLevel, PendingAction, StoreStats,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeTag;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn api_with(store: InMemoryStore) -> StoreApi<InMemoryStore> {
        let mut api = StoreApi::new(store, StoreKind::Local, PathBuf::from("."));
        api.load().unwrap();
        api
    }

    #[test]
    fn load_and_list_selected_store() {
        let mut api = api_with(
            StoreFixture::new()
                .with_sample_local()
                .with_session("s", "1")
                .store,
        );
        assert_eq!(api.list(&ItemQuery::default()).listed_items.len(), 4);

        api.select(StoreKind::Session);
        let listed = api.list(&ItemQuery::default()).listed_items;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].key(), "s");
    }

    #[test]
    fn sample_scenario() {
        let api = api_with(StoreFixture::new().with_sample_local().store);
        let types: Vec<_> = api
            .snapshot()
            .items(StoreKind::Local)
            .iter()
            .map(|i| i.type_tag())
            .collect();
        assert_eq!(
            types,
            vec![TypeTag::Number, TypeTag::Array, TypeTag::Object, TypeTag::String]
        );

        let by_text = api.list(&ItemQuery::text("h")).listed_items;
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].key(), "d");

        let arrays = api
            .list(&ItemQuery::default().with_type(Some(TypeTag::Array)))
            .listed_items;
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].key(), "b");
    }

    #[test]
    fn inaccessible_store_loads_empty() {
        let mut store = InMemoryStore::new();
        store.set_inaccessible(true);
        let mut api = StoreApi::new(store, StoreKind::Local, PathBuf::from("."));
        let result = api.load().unwrap();
        assert!(result.has_errors());
        assert_eq!(api.snapshot(), &Snapshot::empty());
    }

    #[test]
    fn edit_validates_against_loaded_type() {
        let mut api = api_with(StoreFixture::new().with_sample_local().store);

        let err = api.edit("b", r#"{"not":"an array"}"#).unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailure(_)));
        assert_eq!(api.get("b").unwrap().value(), "[1,2]");

        api.edit("b", "[9]").unwrap();
        assert_eq!(api.get("b").unwrap().value(), "[9]");
    }

    #[test]
    fn edit_unknown_key_fails() {
        let mut api = api_with(StoreFixture::new().store);
        assert!(matches!(
            api.edit("ghost", "1"),
            Err(StoreError::KeyNotFound(_))
        ));
    }

    #[test]
    fn edit_session_pretty_prints_objects() {
        let api = api_with(StoreFixture::new().with_sample_local().store);
        let session = api.edit_session("c").unwrap();
        assert_eq!(session.text, "{\n  \"x\": 1\n}");
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut api = api_with(StoreFixture::new().with_sample_local().store);

        let request = api.request_delete("a").unwrap();
        api.confirm(request.clone(), false).unwrap();
        assert!(api.get("a").is_ok());

        api.confirm(request, true).unwrap();
        assert!(api.get("a").is_err());
        assert_eq!(api.snapshot().items(StoreKind::Local).len(), 3);
    }

    #[test]
    fn request_delete_of_unknown_key_fails() {
        let api = api_with(StoreFixture::new().store);
        assert!(api.request_delete("ghost").is_err());
    }

    #[test]
    fn clear_targets_selected_store() {
        let mut api = api_with(
            StoreFixture::new()
                .with_sample_local()
                .with_session("s", "1")
                .store,
        );
        api.select(StoreKind::Session);
        let request = api.request_clear();
        api.confirm(request, true).unwrap();

        assert!(api.snapshot().items(StoreKind::Session).is_empty());
        assert_eq!(api.snapshot().items(StoreKind::Local).len(), 4);
    }

    #[test]
    fn import_reloads_snapshot() {
        let mut api = api_with(StoreFixture::new().store);
        let result = api.import(r#"{"entries":{"k":"v","n":"3"}}"#).unwrap();
        assert_eq!(result.imported, Some(2));
        assert_eq!(api.get("n").unwrap().type_tag(), TypeTag::Number);
    }

    #[test]
    fn aborted_import_still_reloads() {
        let mut store = StoreFixture::new().with_local("old", "1").store;
        store.deny_writes_after(1);
        let mut api = api_with(store);

        let err = api
            .import(r#"{"entries":{"first":"a","second":"b"}}"#)
            .unwrap_err();
        assert!(matches!(err, StoreError::AccessDenied(_)));
        assert_eq!(api.get("first").unwrap().value(), "a");
        assert!(api.get("second").is_err());
        assert_eq!(api.snapshot().items(StoreKind::Local).len(), 2);
    }

    #[test]
    fn set_creates_new_keys_unchecked() {
        let mut api = api_with(StoreFixture::new().with_sample_local().store);
        api.set("e", "oops").unwrap();
        assert_eq!(api.get("e").unwrap().type_tag(), TypeTag::String);
    }

    #[test]
    fn set_cannot_change_structured_type() {
        let mut api = api_with(StoreFixture::new().with_sample_local().store);

        let err = api.set("c", "oops").unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailure(r) if r == "must be valid object"));
        assert_eq!(api.get("c").unwrap().type_tag(), TypeTag::Object);

        api.set("a", "oops").unwrap();
        assert_eq!(api.get("a").unwrap().type_tag(), TypeTag::String);
    }

    #[test]
    fn export_document_matches_snapshot() {
        let api = api_with(StoreFixture::new().with_sample_local().store);
        let doc = api.export_document();
        assert_eq!(doc.store_kind, StoreKind::Local);
        let keys: Vec<_> = doc.entries.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
    }
}
