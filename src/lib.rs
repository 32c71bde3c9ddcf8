//! # ABA File Generator
//!
//! Builds Australian direct-entry (ABA) payment files: one descriptive
//! record, any number of detail records, and a computed file total, each
//! exactly 120 characters wide and CRLF-terminated.
//!
//! ## Design Principles
//!
//! - **Cent-exact money**: Amounts go through `rust_decimal`, never floats
//! - **Validate before mutate**: A rejected record leaves totals and the
//!   document untouched
//! - **Byte-exact layout**: Column offsets, padding, and truncation follow
//!   the direct-entry record layouts
//! - **Enforced ordering**: No detail or total record without a descriptive
//!   record first
//!
//! ## Example
//!
//! ```
//! use aba_generator::{AbaFileGenerator, DescriptiveRecord, DetailRecord};
//!
//! let mut generator = AbaFileGenerator::new();
//! generator.set_descriptive_record(&DescriptiveRecord {
//!     bsb: Some("062-111".to_string()),
//!     account_number: Some("111111111".to_string()),
//!     bank_name: Some("CBA".to_string()),
//!     user_name: Some("FOO BAR CORPORATION".to_string()),
//!     user_number: Some("301500".to_string()),
//!     description: Some("PAYROLL".to_string()),
//!     process_date: Some("290616".to_string()),
//!     remitter: Some("FOO BAR".to_string()),
//! })?;
//! generator.add_transaction(&DetailRecord {
//!     bsb: Some("111-111".to_string()),
//!     account_number: Some("999999999".to_string()),
//!     transaction_code: Some("53".to_string()),
//!     amount: Some("250.87".to_string()),
//!     account_name: Some("Jhon doe".to_string()),
//!     reference: Some("Payroll number".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let document = generator.generate()?;
//! assert_eq!(document.lines().count(), 3);
//! # Ok::<(), aba_generator::AbaError>(())
//! ```

pub mod error;
pub mod format;
pub mod generator;
pub mod money;
pub mod record;
pub mod totals;

mod validate;

pub use error::{AbaError, Result};
pub use format::TruncationPolicy;
pub use generator::AbaFileGenerator;
pub use money::Money;
pub use record::{
    format_process_date, DescriptiveRecord, DetailRecord, TransactionCode, RECORD_LENGTH,
};
pub use totals::FileTotals;
