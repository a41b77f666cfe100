//! Persisted configuration document.
//!
//! # Storage Format
//!
//! ```json
//! {
//!   "FIXED": {
//!     "earnings": [
//!       { "name": "BASIC SAL", "columns": "BASIC SAL" },
//!       { "name": "NORMAL OT", "columns": ["NORMAL OT", "<next>"] }
//!     ],
//!     "deductions": []
//!   },
//!   "FTC": { "earnings": [], "deductions": [] },
//!   "payslip_month": "MAY 2025"
//! }
//! ```
//!
//! Categories are arrays so entry order survives a round trip and two-part
//! display names need no string encoding. The older object form
//! (`{ "BASIC SAL": "BASIC SAL" }`) is still read, in document order.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use payslip_model::{
    Category, DisplayName, MappingEntry, SourceColumns, Variant, normalize_month_label,
};

/// Ordered entries of one (variant, category) scope. Display names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMappings {
    entries: Vec<MappingEntry>,
}

impl CategoryMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &DisplayName) -> Option<&SourceColumns> {
        self.entries
            .iter()
            .find(|entry| entry.name == *name)
            .map(|entry| &entry.columns)
    }

    /// Inserts an entry, or replaces the columns of an existing entry with the
    /// same name in place. Returns `true` when an entry was replaced.
    pub fn upsert(&mut self, entry: MappingEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                existing.columns = entry.columns;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn remove(&mut self, name: &DisplayName) -> Option<MappingEntry> {
        let idx = self.entries.iter().position(|entry| entry.name == *name)?;
        Some(self.entries.remove(idx))
    }

    fn from_loaded(entries: Vec<MappingEntry>) -> Self {
        let mut mappings = Self::new();
        for entry in entries {
            if let Err(error) = entry.validate() {
                warn!(name = %entry.name, %error, "dropping invalid mapping entry");
                continue;
            }
            mappings.upsert(entry);
        }
        mappings
    }
}

impl<'a> IntoIterator for &'a CategoryMappings {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<MappingEntry> for CategoryMappings {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        let mut mappings = Self::new();
        for entry in iter {
            mappings.upsert(entry);
        }
        mappings
    }
}

impl Serialize for CategoryMappings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

/// Object form: display name keys mapped to column values.
struct LegacyEntries(Vec<MappingEntry>);

impl<'de> Deserialize<'de> for LegacyEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LegacyVisitor;

        impl<'de> Visitor<'de> for LegacyVisitor {
            type Value = LegacyEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of display names to source columns")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, columns)) = map.next_entry::<String, SourceColumns>()? {
                    entries.push(MappingEntry {
                        name: DisplayName::Label(name),
                        columns,
                    });
                }
                Ok(LegacyEntries(entries))
            }
        }

        deserializer.deserialize_map(LegacyVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Entries(Vec<MappingEntry>),
    Legacy(LegacyEntries),
}

impl<'de> Deserialize<'de> for CategoryMappings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = match CategoryRepr::deserialize(deserializer)? {
            CategoryRepr::Entries(entries) | CategoryRepr::Legacy(LegacyEntries(entries)) => {
                entries
            }
        };
        Ok(Self::from_loaded(entries))
    }
}

/// Earnings and deductions of one variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantMappings {
    pub earnings: CategoryMappings,
    pub deductions: CategoryMappings,
}

impl VariantMappings {
    pub fn category(&self, category: Category) -> &CategoryMappings {
        match category {
            Category::Earnings => &self.earnings,
            Category::Deductions => &self.deductions,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryMappings {
        match category {
            Category::Earnings => &mut self.earnings,
            Category::Deductions => &mut self.deductions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.earnings.is_empty() && self.deductions.is_empty()
    }
}

/// The whole persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Mappings keyed by upper-case variant name.
    #[serde(flatten)]
    pub variants: BTreeMap<String, VariantMappings>,
    /// Free-text pay period; `None` means "current month".
    #[serde(default)]
    pub payslip_month: Option<String>,
    /// Header organization line; `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        let mut document = Self {
            variants: BTreeMap::new(),
            payslip_month: None,
            organization: None,
        };
        document.ensure_known_variants();
        document
    }
}

impl ConfigDocument {
    /// Makes sure FIXED and FTC are present, empty if absent.
    pub fn ensure_known_variants(&mut self) {
        for variant in Variant::ALL {
            self.variants.entry(variant.as_str().to_string()).or_default();
        }
    }

    /// Brings loaded settings into the form the setters write: month
    /// upper-cased, organization trimmed, blank values unset.
    pub fn normalize(&mut self) {
        self.ensure_known_variants();
        self.payslip_month = self
            .payslip_month
            .as_deref()
            .map(normalize_month_label)
            .filter(|month| !month.is_empty());
        self.organization = self
            .organization
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }
}

/// Canonical key for a variant name.
pub fn variant_key(variant: &str) -> String {
    variant.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use payslip_model::RelativeRef;
    use serde_json::json;

    #[test]
    fn upsert_replaces_in_place() {
        let mut mappings: CategoryMappings = vec![
            MappingEntry {
                name: DisplayName::label("A"),
                columns: SourceColumns::single("COL A"),
            },
            MappingEntry {
                name: DisplayName::label("B"),
                columns: SourceColumns::single("COL B"),
            },
        ]
        .into_iter()
        .collect();

        let replaced = mappings.upsert(MappingEntry {
            name: DisplayName::label("A"),
            columns: SourceColumns::relative("COL A2", RelativeRef::NextColumn),
        });
        assert!(replaced);
        let names: Vec<String> = mappings.iter().map(|e| e.name.to_string()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(mappings.get(&DisplayName::label("A")).unwrap().is_double());
    }

    #[test]
    fn legacy_object_form_keeps_document_order() {
        let text = r#"{
            "earnings": { "ZETA": "Z", "ALPHA": ["A", "<next>"] },
            "deductions": {}
        }"#;
        let mappings: VariantMappings = serde_json::from_str(text).unwrap();
        let names: Vec<String> = mappings.earnings.iter().map(|e| e.name.render()).collect();
        assert_eq!(names, vec!["ZETA", "ALPHA"]);
        assert_eq!(
            mappings.earnings.get(&DisplayName::label("ALPHA")),
            Some(&SourceColumns::relative("A", RelativeRef::NextColumn))
        );
    }

    #[test]
    fn document_round_trip() {
        let mut document = ConfigDocument::default();
        document
            .variants
            .get_mut("FIXED")
            .unwrap()
            .earnings
            .upsert(MappingEntry {
                name: DisplayName::pair("NORMAL", "OT"),
                columns: SourceColumns::relative("NORMAL OT", RelativeRef::NextColumn),
            });
        document.payslip_month = Some("MAY 2025".to_string());

        let json = serde_json::to_string_pretty(&document).unwrap();
        let back: ConfigDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["payslip_month"], json!("MAY 2025"));
        assert_eq!(
            value["FIXED"]["earnings"][0],
            json!({ "name": ["NORMAL", "OT"], "columns": ["NORMAL OT", "<next>"] })
        );
    }

    #[test]
    fn normalize_unsets_blank_settings() {
        let mut document: ConfigDocument =
            serde_json::from_str(r#"{ "payslip_month": "  ", "organization": "" }"#).unwrap();
        document.normalize();
        assert_eq!(document.payslip_month, None);
        assert_eq!(document.organization, None);
        assert!(document.variants.contains_key("FTC"));

        document.payslip_month = Some(" june   2025".to_string());
        document.normalize();
        assert_eq!(document.payslip_month.as_deref(), Some("JUNE 2025"));
    }

    #[test]
    fn invalid_entries_are_dropped_on_load() {
        let value = json!([
            { "name": "", "columns": "X" },
            { "name": "KEEP", "columns": "Y" }
        ]);
        let mappings: CategoryMappings = serde_json::from_value(value).unwrap();
        assert_eq!(mappings.len(), 1);
    }
}
