// Library root
// -----------
// This crate exposes a small library surface for the `tw5` binary.
//
// Module responsibilities:
// - `tiddler`: the in-memory wiki entry and its JSON mapping.
// - `api`: blocking HTTP client for a TiddlyWiki server (fetch, list,
//   create, append, delete).
// - `config`: explicit client configuration (server URL, status policy).
// - `error`: error type shared by the library operations.
// - `ui`: command-line definitions and command dispatch.
pub mod api;
pub mod config;
pub mod error;
pub mod tiddler;
pub mod ui;

pub use api::WikiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use tiddler::Tiddler;
