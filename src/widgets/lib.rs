//! # Widgets Architecture
//!
//! Widgets is a library for keeping a set of rectangles ("widgets") on a
//! shared plane, each with a stacking index (`z`) that is **unique across the
//! whole collection at all times**. Clients may ask for a `z` that is already
//! taken, or for none at all ("put it on top"); the store makes room without
//! ever exposing a duplicate, even under concurrent access.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses session scripts, formats output, exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes paging input against the config               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Field-level checks, user-facing messages                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - WidgetStore trait                                        │
//! │  - InMemoryStore: z-ordered table behind one fair RwLock    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: Storage abstraction, the z-order table and its shift procedure
//! - [`model`]: Core data types (`Widget`, `WidgetChangeSet`)
//! - [`refs`]: `@N` session references to widgets
//! - [`config`]: Paging configuration
//! - [`error`]: Error types and their caller-facing outcomes

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod refs;
pub mod store;
