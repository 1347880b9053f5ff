//! HTTP server for the Open Classical tournament engine.
//!
//! Exposes the managers from the [`open_classical`] crate over a JSON
//! API. See [`api`] for the endpoint table and [`config`] for the
//! environment variables the server reads at startup.

pub mod api;
pub mod config;
pub mod logging;
