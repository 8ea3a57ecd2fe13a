//! User-facing interfaces outside the HTTP server

pub mod cli;
