//! Core accounting logic for the traffic report tool.
//!
//! Pure, synchronous building blocks: quantity parsing and formatting, the
//! usage-record model, the accounting window, the shared error type, and
//! runtime settings. No I/O happens in this crate; fetching rows, resolving
//! identities and delivering reports are the collaborator crates' concern.

pub mod error;
pub mod models;
pub mod quantity;
pub mod settings;
