//! # Pagesplit Architecture
//!
//! Pagesplit keeps the per-page overrides of the page-split stage of a scanned
//! document pipeline: for every scanned image, whether it is a single page, a page
//! plus an offcut, or two pages, and the split geometry computed for it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, loads/saves projects   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) and commands (commands/*.rs)                  │
//! │  - Parse page references, apply the conflict policy         │
//! │  - Return structured CmdResults, no terminal I/O            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Settings store (settings/)                                 │
//! │  - Thread-safe map ImageId -> (params?, layout type?)       │
//! │  - Tri-state updates, conflict rule, relinking              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is pure in-memory state and never fails. Persistence lives in
//! [`project`], which snapshots a store into a JSON file and restores it.
//!
//! ## Module Overview
//!
//! - [`settings`]: The store, its records and update actions
//! - [`model`]: Layout types, page identities, computed params
//! - [`relink`]: Path substitution for moved images
//! - [`project`]: JSON project file
//! - [`config`]: Configuration management
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing operation
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod project;
pub mod relink;
pub mod settings;
