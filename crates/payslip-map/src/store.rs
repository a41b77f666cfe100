//! Mapping store with write-through JSON persistence.
//!
//! The store holds the whole [`ConfigDocument`] in memory. Every mutation is
//! saved immediately; there is no batching and no locking, a single writer
//! process is assumed.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use payslip_model::{
    Category, DEFAULT_ORGANIZATION, DisplayName, MappingEntry, PayslipSettings, SourceColumns,
    Variant, month_label, normalize_month_label,
};

use crate::document::{ConfigDocument, VariantMappings, variant_key};
use crate::error::{Result, StoreError};
use crate::preset::preset_entries;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "payslip_config.json";

/// Configuration store for payslip mappings and header settings.
#[derive(Debug, Clone)]
pub struct MappingStore {
    /// Backing file; `None` keeps the store in memory only.
    path: Option<PathBuf>,
    document: ConfigDocument,
}

impl MappingStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing, unreadable or malformed file yields the empty default
    /// configuration. Nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = load_document(&path);
        Self {
            path: Some(path),
            document,
        }
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::from_document(ConfigDocument::default())
    }

    /// An in-memory store seeded with `document`.
    pub fn from_document(mut document: ConfigDocument) -> Self {
        document.normalize();
        Self {
            path: None,
            document,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Variant keys present in the configuration.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.document.variants.keys().map(String::as_str)
    }

    /// Earnings and deductions for a variant; empty for an unknown variant.
    pub fn get_mappings(&self, variant: &str) -> VariantMappings {
        self.document
            .variants
            .get(&variant_key(variant))
            .cloned()
            .unwrap_or_default()
    }

    /// Adds or replaces one mapping entry and persists.
    pub fn add_mapping(
        &mut self,
        variant: &str,
        category: Category,
        name: DisplayName,
        columns: SourceColumns,
    ) -> Result<()> {
        let entry = MappingEntry::new(name, columns)?;
        let key = variant_key(variant);
        debug!(variant = %key, %category, name = %entry.name, columns = %entry.columns, "add mapping");
        self.document
            .variants
            .entry(key)
            .or_default()
            .category_mut(category)
            .upsert(entry);
        self.persist()
    }

    /// Removes one mapping entry and persists. Returns `false` (and writes
    /// nothing) when the entry did not exist.
    pub fn remove_mapping(
        &mut self,
        variant: &str,
        category: Category,
        name: &DisplayName,
    ) -> Result<bool> {
        let removed = self
            .document
            .variants
            .get_mut(&variant_key(variant))
            .and_then(|mappings| mappings.category_mut(category).remove(name))
            .is_some();
        if removed {
            debug!(variant, %category, %name, "removed mapping");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Replaces both categories of `variant` with the built-in item lists.
    pub fn install_preset(&mut self, variant: Variant) -> Result<()> {
        let mappings = VariantMappings {
            earnings: preset_entries(variant, Category::Earnings)
                .into_iter()
                .collect(),
            deductions: preset_entries(variant, Category::Deductions)
                .into_iter()
                .collect(),
        };
        info!(
            %variant,
            earnings = mappings.earnings.len(),
            deductions = mappings.deductions.len(),
            "installed preset mappings"
        );
        self.document
            .variants
            .insert(variant.as_str().to_string(), mappings);
        self.persist()
    }

    /// Configured pay period, or the current calendar month when unset.
    pub fn payslip_month(&self) -> String {
        self.document
            .payslip_month
            .clone()
            .unwrap_or_else(|| month_label(Local::now().date_naive()))
    }

    /// Sets the pay period; `None` or blank text clears it.
    pub fn set_payslip_month(&mut self, month: Option<&str>) -> Result<()> {
        self.document.payslip_month = month
            .map(normalize_month_label)
            .filter(|month| !month.is_empty());
        self.persist()
    }

    pub fn organization(&self) -> &str {
        self.document
            .organization
            .as_deref()
            .unwrap_or(DEFAULT_ORGANIZATION)
    }

    /// Sets the organization line; `None` or blank text restores the default.
    pub fn set_organization(&mut self, organization: Option<&str>) -> Result<()> {
        self.document.organization = organization
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self.persist()
    }

    /// Header settings for composing payslips right now.
    pub fn settings(&self) -> PayslipSettings {
        PayslipSettings::new(self.organization(), self.payslip_month())
    }

    fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => save_document(&self.document, path),
            None => Ok(()),
        }
    }
}

/// Reads the configuration, falling back to defaults on any problem.
pub fn load_document(path: &Path) -> ConfigDocument {
    if !path.exists() {
        debug!(path = %path.display(), "no payslip configuration yet, using defaults");
        return ConfigDocument::default();
    }
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(path = %path.display(), %error, "cannot read payslip configuration, using defaults");
            return ConfigDocument::default();
        }
    };
    match serde_json::from_str::<ConfigDocument>(&contents) {
        Ok(mut document) => {
            document.normalize();
            document
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "malformed payslip configuration, using defaults");
            ConfigDocument::default()
        }
    }
}

/// Writes the configuration atomically (temp file + rename).
pub fn save_document(document: &ConfigDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|source| StoreError::Serialization { source })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(json.as_bytes())
        .map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "saved payslip configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variant_has_empty_mappings() {
        let store = MappingStore::in_memory();
        assert!(store.get_mappings("CASUAL").is_empty());
        let variants: Vec<&str> = store.variants().collect();
        assert_eq!(variants, vec!["FIXED", "FTC"]);
    }

    #[test]
    fn month_defaults_to_current() {
        let store = MappingStore::in_memory();
        assert_eq!(store.payslip_month(), month_label(Local::now().date_naive()));
    }

    #[test]
    fn blank_month_clears_setting() {
        let mut store = MappingStore::in_memory();
        store.set_payslip_month(Some("april  2025")).unwrap();
        assert_eq!(store.document().payslip_month.as_deref(), Some("APRIL 2025"));
        store.set_payslip_month(Some("   ")).unwrap();
        assert_eq!(store.document().payslip_month, None);
    }

    #[test]
    fn organization_defaults() {
        let mut store = MappingStore::in_memory();
        assert_eq!(store.organization(), DEFAULT_ORGANIZATION);
        store.set_organization(Some(" ACME LTD ")).unwrap();
        assert_eq!(store.settings().organization, "ACME LTD");
    }
}
