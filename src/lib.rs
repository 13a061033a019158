//! Single-user task tracker: task lifecycle, collection queries and a JSON
//! task file.

pub mod commands;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod output;
pub mod query;
pub mod store;
