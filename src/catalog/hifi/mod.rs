//! hifi catalog integration: HTTP client, wire DTOs, domain adapter.

pub mod adapter;
mod client;
pub mod dto;

pub use client::HifiClient;
