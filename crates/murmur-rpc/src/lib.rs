//! Murmur management client
//!
//! Blocking client for the HTTP/JSON management bridge in front of a
//! voice-chat server cluster. Implements the [`murmur_domain`] traits so the
//! janitor can drive real servers.
//!
//! # Example
//!
//! ```no_run
//! use murmur_domain::{MetaServer, VirtualServer};
//! use murmur_rpc::{ConnectOptions, MetaClient};
//!
//! let meta = MetaClient::connect("http://127.0.0.1:6502", ConnectOptions::default())
//!     .expect("Failed to connect");
//!
//! for server in meta.servers().expect("Failed to list servers") {
//!     let status = server.status().expect("Failed to query status");
//!     println!("server {} running: {}", server.id(), status.running);
//! }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
pub mod wire;

pub use client::{ConnectOptions, MetaClient, ServerClient, SECRET_HEADER};
pub use error::RpcError;
