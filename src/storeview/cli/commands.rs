//! # CLI Layer
//!
//! This module is **one possible UI client** for storeview.
//!
//! It is the only place in the codebase that knows about terminal I/O,
//! calls `std::process::exit` (through `main.rs`), parses arguments, or
//! asks the user a question on stdin.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the storage directory, loads configuration
//!   and the first snapshot, and builds the `AppContext`
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::print::{print_confirm, print_item, print_items, print_messages, print_stats};
use super::setup::{Cli, Commands};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use log::debug;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use storeview::api::{ConfigAction, ConfirmRequest, ItemQuery, SearchField, StoreApi};
use storeview::clipboard::copy_to_clipboard;
use storeview::commands::export::default_export_dir;
use storeview::config::StoreviewConfig;
use storeview::editor::edit_value;
use storeview::error::{Result, StoreError};
use storeview::model::{StoreKind, TypeTag};
use storeview::store::fs::FileStore;

struct AppContext {
    api: StoreApi<FileStore>,
    config: StoreviewConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            type_filter,
            field,
        }) => handle_list(&ctx, search, type_filter, field),
        Some(Commands::Search {
            term,
            type_filter,
            field,
        }) => handle_list(&ctx, Some(term), type_filter, field),
        Some(Commands::Get { key }) => handle_get(&ctx, &key),
        Some(Commands::Copy { key }) => handle_copy(&ctx, &key),
        Some(Commands::Set { key, value }) => handle_set(&mut ctx, &key, &value),
        Some(Commands::Edit { key, value }) => handle_edit(&mut ctx, &key, value),
        Some(Commands::Delete { key, yes }) => handle_delete(&mut ctx, &key, yes),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, None, None),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn storage_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "storeview", "storeview")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            StoreError::Api("Could not determine a storage directory; pass --dir".to_string())
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = storage_dir(cli)?;
    debug!("storage directory: {}", dir.display());

    let config = StoreviewConfig::load(&dir)?;
    let kind = if cli.session {
        StoreKind::Session
    } else if cli.local {
        StoreKind::Local
    } else {
        config.default_store
    };

    let mut api = StoreApi::new(FileStore::new(dir.clone()), kind, dir);
    if !matches!(cli.command, Some(Commands::Config { .. })) {
        let loaded = api.load()?;
        print_messages(&loaded.messages);
    }

    Ok(AppContext { api, config })
}

fn build_query(
    ctx: &AppContext,
    search: Option<String>,
    type_filter: Option<String>,
    field: Option<String>,
) -> Result<ItemQuery> {
    let type_tag = type_filter
        .map(|t| t.parse::<TypeTag>())
        .transpose()?;
    let field = match field {
        Some(f) => f.parse::<SearchField>().map_err(StoreError::Api)?,
        None => ctx.config.search_field,
    };
    Ok(ItemQuery::text(search.unwrap_or_default())
        .with_type(type_tag)
        .with_field(field))
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    type_filter: Option<String>,
    field: Option<String>,
) -> Result<()> {
    let query = build_query(ctx, search, type_filter, field)?;
    let result = ctx.api.list(&query);
    print_items(
        &result.listed_items,
        ctx.api.kind(),
        ctx.config.preview_width,
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(ctx: &AppContext, key: &str) -> Result<()> {
    print_item(ctx.api.get(key)?);
    Ok(())
}

fn handle_copy(ctx: &AppContext, key: &str) -> Result<()> {
    let item = ctx.api.get(key)?;
    copy_to_clipboard(item.value())?;
    println!("{}", format!("Copied \"{}\" to clipboard", key).green());
    Ok(())
}

fn handle_set(ctx: &mut AppContext, key: &str, value: &str) -> Result<()> {
    let result = ctx.api.set(key, value)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, key: &str, value: Option<String>) -> Result<()> {
    let text = match value {
        Some(text) => text,
        None => {
            let session = ctx.api.edit_session(key)?;
            let edited = edit_value(&session)?;
            if edited == session.text {
                println!("{}", "No changes.".dimmed());
                return Ok(());
            }
            edited
        }
    };

    let result = ctx.api.edit(key, &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, key: &str, yes: bool) -> Result<()> {
    let request = ctx.api.request_delete(key)?;
    resolve(ctx, request, yes)
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let request = ctx.api.request_clear();
    resolve(ctx, request, yes)
}

fn resolve(ctx: &mut AppContext, request: ConfirmRequest, yes: bool) -> Result<()> {
    let accepted = yes || ask(&request)?;
    let result = ctx.api.confirm(request, accepted)?;
    print_messages(&result.messages);
    Ok(())
}

fn ask(request: &ConfirmRequest) -> Result<bool> {
    print_confirm(request);
    print!("Proceed? [y/N] ");
    io::stdout().flush().map_err(StoreError::Io)?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(StoreError::Io)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let dir = output.unwrap_or_else(|| default_export_dir(ctx.config.export_dir.as_deref()));
    let result = ctx.api.export(&dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &str) -> Result<()> {
    let text = if file == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(StoreError::Io)?;
        buffer
    } else {
        std::fs::read_to_string(file).map_err(StoreError::Io)?
    };

    let result = ctx.api.import(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats();
    print_stats(&result.stats);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (k, v) in config.list_all() {
                println!("{} = {}", k, v);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
