//! Transport layer for the library REST API

pub mod client;

pub use client::ApiClient;
