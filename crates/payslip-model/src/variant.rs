use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Payslip layout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    /// Permanent staff.
    Fixed,
    /// Fixed-term-contract staff.
    Ftc,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Fixed, Variant::Ftc];

    /// Configuration key for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Ftc => "FTC",
        }
    }

    /// Routes a sheet name to a variant.
    ///
    /// A name containing `FIXED` (any case) is FIXED, otherwise one
    /// containing `FTC` is FTC. Anything else is rejected.
    pub fn from_sheet_name(sheet_name: &str) -> Result<Self, ModelError> {
        let upper = sheet_name.to_uppercase();
        if upper.contains("FIXED") {
            Ok(Self::Fixed)
        } else if upper.contains("FTC") {
            Ok(Self::Ftc)
        } else {
            Err(ModelError::UnsupportedVariant {
                name: sheet_name.to_string(),
            })
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sheet_name(s)
    }
}

/// Side of the payslip body a mapping entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Earnings,
    Deductions,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Earnings, Category::Deductions];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earnings => "earnings",
            Self::Deductions => "deductions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earnings" | "earning" => Ok(Self::Earnings),
            "deductions" | "deduction" => Ok(Self::Deductions),
            _ => Err(ModelError::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_route_to_variants() {
        assert_eq!(Variant::from_sheet_name("FIXED April").unwrap(), Variant::Fixed);
        assert_eq!(Variant::from_sheet_name("ftc may 2025").unwrap(), Variant::Ftc);
        assert_eq!(Variant::from_sheet_name("Fixed FTC").unwrap(), Variant::Fixed);
    }

    #[test]
    fn unknown_sheet_name_is_rejected() {
        let err = Variant::from_sheet_name("UNKNOWN").unwrap_err();
        assert_eq!(
            err,
            ModelError::UnsupportedVariant {
                name: "UNKNOWN".to_string()
            }
        );
        assert_eq!(err.to_string(), "unsupported payslip variant: UNKNOWN");
    }

    #[test]
    fn category_parses_loosely() {
        assert_eq!("Earnings".parse::<Category>().unwrap(), Category::Earnings);
        assert_eq!(" deduction ".parse::<Category>().unwrap(), Category::Deductions);
        assert!("bonus".parse::<Category>().is_err());
    }
}
