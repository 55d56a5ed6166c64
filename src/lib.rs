//! HandLine - catalogue, content and back-office API
//!
//! Serves the public website (product catalogue with faceted filtering,
//! brands, blog, case studies, careers, the PPE knowledge hub, search,
//! contact form, order tracking) and the authenticated back office.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: helper commands (`config generate`, `hash-password`)
//!
//! # Architecture
//! - `storage`: SeaORM persistence for products, posts, brands, PPE and messages
//! - `catalog`: facet selection, filtering and facet counts
//! - `content`: localisation helpers and locale-aware form state
//! - `services`: business logic shared by HTTP handlers
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod content;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
