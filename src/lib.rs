//! Minimal item API scaffold and commit-driven version bump tool.
//!
//! The server exposes a health check, generated OpenAPI documentation and a
//! placeholder CRUD resource held in memory:
//!
//! ```text
//! GET    /health            {"status":"ok"}
//! GET    /docs              Swagger UI
//! GET    /api/items         all items
//! GET    /api/items/:id     one item, 404 {"message":"Not found"}
//! POST   /api/items         201, body fields + assigned id
//! PUT    /api/items/:id     shallow merge, 404 when absent
//! DELETE /api/items/:id     204 always
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: In-memory item store
//! - [`api`]: HTTP routes, handlers and OpenAPI docs
//! - [`probe`]: Startup database reachability probe
//! - [`bump`]: Version bump from commit messages
//! - [`metrics`]: Prometheus counters
//! - [`utils`]: Utility functions

pub mod api;
pub mod bump;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{Item, ItemStore};
