//! Anuvad - Multi-Provider Translation Gateway
//!
//! An HTTP service that translates UI text between language codes through a
//! prioritized chain of external translation providers. Each provider is
//! guarded by its own circuit breaker and rate limiter, results are kept in
//! a bounded in-process cache, and total provider failure degrades to
//! returning the input text unchanged rather than an error.

pub mod breaker;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod limiter;
pub mod provider;
pub mod server;
pub mod service;
