use crate::commands::CmdResult;
use crate::model::{Snapshot, StoreKind, TypeTag};

/// Entry count and total size of one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub kind: StoreKind,
    pub entries: usize,
    pub total_size: usize,
    pub by_type: Vec<(TypeTag, usize)>,
}

impl StoreStats {
    pub fn of(snapshot: &Snapshot, kind: StoreKind) -> Self {
        let items = snapshot.items(kind);
        let by_type = TypeTag::all()
            .into_iter()
            .map(|tag| (tag, items.iter().filter(|i| i.type_tag() == tag).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        Self {
            kind,
            entries: items.len(),
            total_size: snapshot.total_size(kind),
            by_type,
        }
    }
}

pub fn run(snapshot: &Snapshot) -> CmdResult {
    let stats = StoreKind::all()
        .into_iter()
        .map(|kind| StoreStats::of(snapshot, kind))
        .collect();
    CmdResult::default().with_stats(stats)
}
