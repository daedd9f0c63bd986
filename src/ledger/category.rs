use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ValidationError;

/// Fixed set of spending categories a transaction can be filed under.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Food,
    Transport,
    Entertainment,
    Bills,
    Shopping,
    Health,
    Other,
}

/// Display colour assigned to a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Orange,
    Blue,
    Purple,
    Red,
    Pink,
    Green,
    Gray,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    /// Stable lowercase identifier used in storage and on the command line.
    pub fn value(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    pub fn color(self) -> CategoryColor {
        match self {
            Category::Food => CategoryColor::Orange,
            Category::Transport => CategoryColor::Blue,
            Category::Entertainment => CategoryColor::Purple,
            Category::Bills => CategoryColor::Red,
            Category::Shopping => CategoryColor::Pink,
            Category::Health => CategoryColor::Green,
            Category::Other => CategoryColor::Gray,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.value().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownCategory(needle.to_string()))
    }
}

// Stored logs may carry category names this build does not know; those fall back to `Other`.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(value.parse().unwrap_or(Category::Other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_case_insensitively() {
        assert_eq!("Food".parse::<Category>(), Ok(Category::Food));
        assert_eq!(" BILLS ".parse::<Category>(), Ok(Category::Bills));
        assert_eq!(
            "groceries".parse::<Category>(),
            Err(ValidationError::UnknownCategory("groceries".into()))
        );
    }

    #[test]
    fn unknown_stored_category_falls_back_to_other() {
        let category: Category = serde_json::from_str("\"salary\"").unwrap();
        assert_eq!(category, Category::Other);
        assert_eq!(category.label(), "Other");
        assert_eq!(category.color(), CategoryColor::Gray);
    }

    #[test]
    fn serializes_as_lowercase_value() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
    }
}
