//! Catalog server - minimal HTTP/1.1 file server
//!
//! Serves GET and HEAD requests from a sandboxed directory and redirects
//! targets missing locally through a flat-file redirect table.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod server;
