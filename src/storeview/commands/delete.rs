use crate::commands::confirm::{ConfirmRequest, PendingAction};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StoreKind;
use crate::store::DataStore;

/// Runs a confirmed action, or reports that it was cancelled.
pub fn resolve<S: DataStore>(
    store: &mut S,
    request: ConfirmRequest,
    accepted: bool,
) -> Result<CmdResult> {
    if !accepted {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(res);
    }

    match request.action {
        PendingAction::Delete { kind, key } => remove(store, kind, &key),
        PendingAction::Clear { kind } => clear(store, kind),
    }
}

pub fn remove<S: DataStore>(store: &mut S, kind: StoreKind, key: &str) -> Result<CmdResult> {
    store.remove(kind, key)?;
    let mut result = CmdResult::default().with_affected_keys(vec![key.to_string()]);
    result.add_message(CmdMessage::success(format!(
        "Deleted {} from {}",
        key,
        kind.display_name()
    )));
    Ok(result)
}

pub fn clear<S: DataStore>(store: &mut S, kind: StoreKind) -> Result<CmdResult> {
    let keys: Vec<String> = store.read(kind)?.into_keys().collect();
    store.clear(kind)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} ({} entries)",
        kind.display_name(),
        keys.len()
    )));
    Ok(result.with_affected_keys(keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn declined_request_changes_nothing() {
        let mut store = StoreFixture::new().with_sample_local().store;
        let result = resolve(&mut store, ConfirmRequest::clear(StoreKind::Local), false).unwrap();
        assert!(result.affected_keys.is_empty());
        assert_eq!(store.read(StoreKind::Local).unwrap().len(), 4);
    }

    #[test]
    fn accepted_delete_removes_only_that_key() {
        let mut store = StoreFixture::new()
            .with_sample_local()
            .with_session("a", "kept")
            .store;
        let request = ConfirmRequest::delete(StoreKind::Local, "a");
        resolve(&mut store, request, true).unwrap();

        let local = store.read(StoreKind::Local).unwrap();
        assert!(!local.contains_key("a"));
        assert_eq!(local.len(), 3);
        assert_eq!(store.read(StoreKind::Session).unwrap()["a"], "kept");
    }

    #[test]
    fn accepted_clear_empties_one_store() {
        let mut store = StoreFixture::new()
            .with_sample_local()
            .with_session("s", "1")
            .store;
        let result = resolve(&mut store, ConfirmRequest::clear(StoreKind::Local), true).unwrap();
        assert_eq!(result.affected_keys.len(), 4);
        assert!(store.read(StoreKind::Local).unwrap().is_empty());
        assert_eq!(store.read(StoreKind::Session).unwrap().len(), 1);
    }
}
