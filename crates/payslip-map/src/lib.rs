//! Payslip mapping configuration.
//!
//! Holds the per-variant earnings and deductions mappings, resolves them
//! against employee rows, and persists them as a JSON document.

#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod preset;
pub mod resolver;
pub mod store;
pub mod suggest;

pub use document::{CategoryMappings, ConfigDocument, VariantMappings, variant_key};
pub use error::{Result, StoreError};
pub use preset::preset_entries;
pub use resolver::{ResolvedAmounts, cell_amount, is_valid_amount, resolve, resolve_entry};
pub use store::{DEFAULT_CONFIG_FILE, MappingStore, load_document, save_document};
pub use suggest::{MissingColumn, missing_columns, suggest_column};
