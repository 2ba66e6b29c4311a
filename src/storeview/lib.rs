//! # Storeview Architecture
//!
//! Storeview inspects and edits the two web storage namespaces of a page,
//! `localStorage` and `sessionStorage`: list and search entries, see what type
//! each value holds, copy, edit, delete, clear, and back a store up to JSON
//! and restore it again.
//!
//! It is a **UI-agnostic library** with a CLI client. The same core could sit
//! behind a browser popup, a devtools panel, or a REST endpoint.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, asks for confirmation  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the selected store and the latest snapshot          │
//! │  - Reloads after every mutation                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, detect.rs)                   │
//! │  - Snapshot, filter, export/import, edit validation         │
//! │  - Pure functions over in-memory data                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: read / write / remove / clear           │
//! │  - FileStore (storage directory), InMemoryStore (testing)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Results come back as [`commands::CmdResult`] values carrying
//! data plus leveled messages; the UI decides how to show them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and application state
//! - [`commands`]: Business logic for each operation
//! - [`detect`]: Value type detection
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`StorageItem`, `Snapshot`, `ExportDocument`)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod detect;
pub mod editor;
pub mod error;
pub mod model;
pub mod store;
