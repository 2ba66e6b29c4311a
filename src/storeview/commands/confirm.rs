use crate::model::StoreKind;

/// A destructive operation waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Delete { kind: StoreKind, key: String },
    Clear { kind: StoreKind },
}

/// Question to put to the user before running a [`PendingAction`].
///
/// The caller answers with a boolean; nothing happens until it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub action: PendingAction,
}

impl ConfirmRequest {
    pub fn delete(kind: StoreKind, key: &str) -> Self {
        Self {
            title: "Delete entry".to_string(),
            message: format!("Delete \"{}\" from {}?", key, kind.display_name()),
            action: PendingAction::Delete {
                kind,
                key: key.to_string(),
            },
        }
    }

    pub fn clear(kind: StoreKind) -> Self {
        Self {
            title: "Clear store".to_string(),
            message: format!(
                "Remove every {} entry? This cannot be undone.",
                kind.display_name()
            ),
            action: PendingAction::Clear { kind },
        }
    }
}
