//! Drug review dataset: typed records, age bucketing, and the read-only
//! store every other RxLens crate queries.
//!
//! # Example
//!
//! ```rust,no_run
//! use rxlens_data::DatasetStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rxlens_data::DataLoadError> {
//!     let store = DatasetStore::load("assets/cleaned_dataset_WebMd.csv").await?;
//!     println!("{} conditions", store.all_conditions().len());
//!     Ok(())
//! }
//! ```

pub mod age;
pub mod error;
pub mod record;
pub mod store;

pub use age::{bucket, parse_age, AgeBucket, AGE_BREAKPOINTS};
pub use error::{DataLoadError, Result};
pub use record::{ReviewRecord, Sex};
pub use store::{decode_text, DatasetStore, LoadReport, TextEncoding, REQUIRED_COLUMNS};
