//! Domain logic for the prompt-box catalog: error taxonomy, shared types,
//! the genre tree, tag handling, pagination and the export document format.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod genre_tree;
pub mod pagination;
pub mod tags;
pub mod transfer;
pub mod types;
pub mod validation;
