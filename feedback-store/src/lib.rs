//! # Feedback Store
//!
//! Record store used by the feedback service, with an Airtable backend.
//!
//! ## Example
//!
//! ```rust,no_run
//! use feedback_store::{airtable::AirtableClient, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AirtableClient::new("your-api-key", "appXXXXXXXXXXXXXX")?;
//!     let records = client
//!         .find_records("Tuition Feedback", "{Feedback ID} = 42")
//!         .await?;
//!
//!     for record in records {
//!         println!("{}: {:?}", record.id, record.text_field("Status"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod airtable;
pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{Fields, Record, RecordStore};
