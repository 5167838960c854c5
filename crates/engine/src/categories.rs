//! The fixed category registry and its display palette.
//!
//! Categories are a closed enumeration: the add-transaction form and the
//! budget panel both work off the same eleven names, so the engine rejects
//! anything else at the write boundary. Matching is case-insensitive and
//! trim-normalized everywhere (see [`crate::util::normalize_category_key`]);
//! "Health" is kept as an alias of `Healthcare` because stored data contains
//! both spellings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EngineError, util::normalize_category_key};

/// Neutral fallback color for anything outside the palette.
pub const DEFAULT_COLOR: &str = "#b3b3b3";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDining,
    HomeAndGarden,
    Transportation,
    Shopping,
    Entertainment,
    BillsAndUtilities,
    Healthcare,
    Travel,
    Education,
    Groceries,
    Other,
}

impl Category {
    /// Every recognized category, in the order the budget panel lists them.
    pub const ALL: [Category; 11] = [
        Category::FoodAndDining,
        Category::HomeAndGarden,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Travel,
        Category::Education,
        Category::Groceries,
        Category::Other,
    ];

    /// Canonical display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::HomeAndGarden => "Home & Garden",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Groceries => "Groceries",
            Self::Other => "Other",
        }
    }

    /// Fixed display color for this category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Shopping => "#4287f5",
            Self::BillsAndUtilities => "#f54242",
            Self::Healthcare => "#42f5b3",
            Self::Groceries => "#f5a142",
            Self::Transportation => "#a142f5",
            Self::FoodAndDining => "#f542a7",
            Self::HomeAndGarden => "#b3f542",
            Self::Entertainment => "#f5e642",
            Self::Travel => "#42cdf5",
            Self::Education => "#7a42f5",
            Self::Other => DEFAULT_COLOR,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_category_key(value).as_str() {
            "food & dining" => Ok(Self::FoodAndDining),
            "home & garden" => Ok(Self::HomeAndGarden),
            "transportation" => Ok(Self::Transportation),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            "bills & utilities" => Ok(Self::BillsAndUtilities),
            "healthcare" | "health" => Ok(Self::Healthcare),
            "travel" => Ok(Self::Travel),
            "education" => Ok(Self::Education),
            "groceries" => Ok(Self::Groceries),
            "other" => Ok(Self::Other),
            _ => Err(EngineError::InvalidCategory(format!(
                "unknown category: {value}"
            ))),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Category::try_from(raw.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Resolve a display color for an arbitrary category string.
///
/// Unrecognized input (including the empty string) maps to
/// [`DEFAULT_COLOR`]; recognized names resolve through the same normalized
/// matching the rest of the engine uses.
pub fn color_for(name: &str) -> &'static str {
    Category::try_from(name)
        .map(Category::color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_insensitive_and_trimmed() {
        assert_eq!(
            Category::try_from("  food & DINING ").unwrap(),
            Category::FoodAndDining
        );
        assert_eq!(Category::try_from("groceries").unwrap(), Category::Groceries);
        assert!(Category::try_from("Crypto").is_err());
    }

    #[test]
    fn health_is_an_alias_of_healthcare() {
        assert_eq!(Category::try_from("Health").unwrap(), Category::Healthcare);
        assert_eq!(
            Category::try_from("healthcare").unwrap(),
            Category::Healthcare
        );
    }

    #[test]
    fn color_resolution_is_deterministic() {
        for category in Category::ALL {
            assert_eq!(category.color(), category.color());
        }
        assert_eq!(color_for("Shopping"), "#4287f5");
        assert_eq!(color_for("shopping"), "#4287f5");
    }

    #[test]
    fn unknown_names_fall_back_to_the_default_color() {
        assert_eq!(color_for("Yacht Maintenance"), DEFAULT_COLOR);
        assert_eq!(color_for(""), DEFAULT_COLOR);
    }
}
