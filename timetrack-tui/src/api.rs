pub mod client;
pub mod dev_backend;

pub use client::ApiClient;
