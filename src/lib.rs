//! couponhub - a coupon and deal catalog service
//!
//! This library provides the core functionality for couponhub: the record
//! catalog (stores and coupons), store page assembly, CSV bulk import, blog
//! posts, click-tracking redirects and the admin back office.
//!
//! # Architecture
//! - `storage`: Storage port with JSON file and SeaORM backends
//! - `services`: Catalog, blog and click services plus slug matching
//! - `api`: HTTP services and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
