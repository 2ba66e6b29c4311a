use crate::commands::filter::{filter, ItemQuery};
use crate::commands::CmdResult;
use crate::model::{Snapshot, StoreKind};

pub fn run(snapshot: &Snapshot, kind: StoreKind, query: &ItemQuery) -> CmdResult {
    CmdResult::default().with_listed_items(filter(snapshot.items(kind), query))
}

/// Cuts `value` to `max_chars` characters, marking the cut with `...`.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// `512B` below one kilobyte, `1.50KB` from there on. Hundredths round half
/// away from zero: 1152 bytes is `1.13KB`.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else {
        // bytes * 100 / 1024 is exact in f64, so ties are real ties
        let hundredths = (bytes as f64 * 100.0 / 1024.0).round();
        format!("{:.2}KB", hundredths / 100.0)
    }
}
