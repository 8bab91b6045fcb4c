//! HTTP protocol implementation.
//!
//! A minimal HTTP/1.1 origin server for GET and HEAD with keep-alive and
//! pipelining.
//!
//! # Architecture
//!
//! - **`cursor`**: Fixed-capacity read buffer carried across parser phases and pipelined requests
//! - **`parser`**: Byte-driven state machines for request line, headers and head terminator
//! - **`request`**: Per-connection request record filled in by the parser
//! - **`response`**: Status codes, response heads and the canned response table
//! - **`writer`**: Writes response heads and streams file bodies
//! - **`connection`**: The per-connection request-response loop and dispatch
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse request line, headers, terminator
//!        └──────┬──────┘
//!               │ Head parsed (or rejected)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve target, write exactly one response
//!        └──────┬───────────┘
//!               ├─ Keep-Alive → Reading (same connection, leftover bytes kept)
//!               └─ Close → Closed
//! ```
//!
//! Peer close during Reading goes straight to Closed without a response.
//!
//! # Example
//!
//! ```ignore
//! use catalog_server::http::connection::Connection;
//!
//! let mut conn = Connection::new(socket, catalog.clone());
//! conn.run().await;
//! ```

pub mod connection;
pub mod cursor;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
