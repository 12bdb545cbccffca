use anyhow::bail;
use serde::{Deserialize, Serialize};

/// The closed set of recognized expense category labels.
///
/// Membership is advisory on creation: `add_expense` accepts any label and
/// only annotates the confirmation when the label is not listed here. Lookup
/// operations (`filter_expenses`, `remove_expense`) enforce membership
/// strictly and abort on an unrecognized label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Health,
    Education,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    /// Case-insensitive lookup. Returns `None` for labels outside the set.
    pub fn parse(label: &str) -> Option<Category> {
        label.trim().to_lowercase().parse().ok()
    }

    /// Strict lookup used by filter and remove.
    pub fn require(label: &str) -> crate::Result<Category> {
        match Category::parse(label) {
            Some(category) => Ok(category),
            None => bail!(
                "Category '{}' doesn't exist. Valid categories are: {}",
                label.trim(),
                Category::valid_list()
            ),
        }
    }

    /// The valid labels as a comma-separated list, for advisory messages.
    pub fn valid_list() -> String {
        Category::ALL.map(|c| c.to_string()).join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Category::parse("food"), Some(Category::Food));
        assert_eq!(Category::parse("FOOD"), Some(Category::Food));
        assert_eq!(Category::parse("  Transport "), Some(Category::Transport));
    }

    #[test]
    fn test_parse_unknown_label() {
        assert_eq!(Category::parse("bogus"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Category::Health.to_string(), "health");
    }

    #[test]
    fn test_require_names_the_label_and_the_valid_set() {
        let err = Category::require("bogus").unwrap_err().to_string();
        assert!(err.contains("'bogus'"));
        assert!(err.contains("doesn't exist"));
        for category in Category::ALL {
            assert!(err.contains(&category.to_string()));
        }
    }

    #[test]
    fn test_valid_list() {
        assert_eq!(
            Category::valid_list(),
            "food, transport, entertainment, utilities, shopping, health, education, other"
        );
    }
}
