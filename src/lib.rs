//! Daily news digest: fetches a fixed set of feeds concurrently, merges the
//! newest items, and caches the result in object storage under one key per
//! UTC day.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod services;
pub mod sources;
pub mod storage;
