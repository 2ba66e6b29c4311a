use colored::{ColoredString, Colorize};
use storeview::api::{CmdMessage, ConfirmRequest, MessageLevel, StoreStats};
use storeview::commands::edit::EditSession;
use storeview::commands::list::{format_size, truncate};
use storeview::model::{StorageItem, StoreKind, TypeTag};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_KEY_WIDTH: usize = 32;
const TYPE_WIDTH: usize = 9;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

fn type_badge(tag: TypeTag) -> ColoredString {
    let label = format!("{:<width$}", tag.as_str(), width = TYPE_WIDTH);
    match tag {
        TypeTag::String => label.green(),
        TypeTag::Number => label.blue(),
        TypeTag::Boolean => label.magenta(),
        TypeTag::Object => label.yellow(),
        TypeTag::Array => label.cyan(),
        TypeTag::Null => label.dimmed(),
    }
}

pub(super) fn print_items(items: &[StorageItem], kind: StoreKind, preview_width: usize) {
    if items.is_empty() {
        println!("No entries found in {}.", kind.display_name());
        return;
    }

    let key_width = items
        .iter()
        .map(|item| item.key().width())
        .max()
        .unwrap_or(0)
        .min(MAX_KEY_WIDTH);

    for item in items {
        let key = truncate_to_width(item.key(), key_width);
        let padding = key_width.saturating_sub(key.width());
        let preview = truncate(&single_line(item.value()), preview_width);
        println!(
            "{}{}  {} {:>9}  {}",
            key.bold(),
            " ".repeat(padding),
            type_badge(item.type_tag()),
            format_size(item.size()).dimmed(),
            preview
        );
    }
}

pub(super) fn print_item(item: &StorageItem) {
    let session = EditSession::prepare(item);
    println!("{}", item.key().bold());
    println!(
        "{} {}",
        type_badge(item.type_tag()),
        format_size(item.size()).dimmed()
    );
    println!("--------------------------------");
    println!("{}", session.text);
}

pub(super) fn print_stats(stats: &[StoreStats]) {
    for store in stats {
        println!(
            "{:<16} {:>5} entries {:>10}",
            store.kind.display_name().bold(),
            store.entries,
            format_size(store.total_size)
        );
        for (tag, count) in &store.by_type {
            println!("  {} {:>5}", type_badge(*tag), count);
        }
    }
}

pub(super) fn print_confirm(request: &ConfirmRequest) {
    println!("{}", request.title.bold());
    println!("{}", request.message);
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
