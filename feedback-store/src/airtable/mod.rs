pub mod client;
pub mod types;

pub use client::{AirtableClient, DEFAULT_API_URL};
