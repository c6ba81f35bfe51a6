//! # Todoz Architecture
//!
//! Todoz is a **UI-agnostic todo store**. The terminal client in `crates/todoz`
//! is one consumer; nothing in this crate writes to stdout or exits the process.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (CLI list view, shell, tests)                       │
//! │  - Subscribes presentation adapters, issues commands        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Composition root: one Store per TodozApi                 │
//! │  - Input normalisation (submit trims, rejects blank)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dispatch (dispatch.rs)                                     │
//! │  - Command enum → Store operation → Outcome                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store.rs) + Notifier (notifier.rs)                  │
//! │  - Unique-by-text entries, notify after every mutation      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  subscribers
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (persistence.rs) over BlobBackend (backend/)   │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! input → [`api::TodozApi::execute`] → [`store::Store`] mutation →
//! [`notifier::Notifier::notify_all`] → {list view re-render, persistence save}.
//!
//! Everything is single-threaded and synchronous: by the time a mutating call
//! returns, every subscriber has already seen the new state.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade and composition root
//! - [`dispatch`]: Commands, outcomes, the dispatcher
//! - [`store`]: The entry collection
//! - [`notifier`]: Subscriber registry with per-callback failure isolation
//! - [`model`]: `Entry` and its persisted shape
//! - [`persistence`]: Store ⇄ blob mirroring
//! - [`backend`]: Blob storage abstraction and implementations
//! - [`config`]: Configuration file
//! - [`error`]: Error types

pub mod api;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod notifier;
pub mod persistence;
pub mod store;
