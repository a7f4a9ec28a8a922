//! Candidate filtering.
//!
//! The candidate list is derived state: it is recomputed from the catalog,
//! the current selection, the query and the duplicate policy, never stored.

use std::collections::HashSet;

/// Label prefix of the synthetic custom-entry row.
pub const CUSTOM_ENTRY_LABEL: &str = "Add";

/// A row of the dropdown, addressed by navigation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A catalog option.
    Option(String),
    /// The synthetic "add custom value" row carrying the query.
    Custom(String),
}

impl Row {
    /// The value that would be committed for this row.
    pub fn value(&self) -> &str {
        match self {
            Row::Option(value) | Row::Custom(value) => value,
        }
    }

    /// Display label for the row.
    pub fn label(&self) -> String {
        match self {
            Row::Option(value) => value.clone(),
            Row::Custom(value) => format!("{CUSTOM_ENTRY_LABEL} \"{value}\""),
        }
    }

    /// Returns true for the custom-entry row.
    pub fn is_custom(&self) -> bool {
        matches!(self, Row::Custom(_))
    }
}

/// Filter `catalog` down to the options that should be offered.
///
/// Catalog order is preserved. Unless `keep_duplicates` is set, options
/// already in `selected` (exact match) are dropped. Matching is a
/// case-insensitive substring test; an empty query matches everything.
pub fn filter_options(
    catalog: &[String],
    selected: &[String],
    query: &str,
    keep_duplicates: bool,
) -> Vec<String> {
    let taken: HashSet<&str> = if keep_duplicates {
        HashSet::new()
    } else {
        selected.iter().map(String::as_str).collect()
    };
    let query_lower = query.to_lowercase();

    catalog
        .iter()
        .filter(|option| !taken.contains(option.as_str()))
        .filter(|option| option.to_lowercase().contains(&query_lower))
        .cloned()
        .collect()
}

/// Whether the custom-entry row is offered for `query`.
///
/// Requires custom options to be allowed, a query that is not blank, and a
/// query that is not already a catalog option (exact match).
pub fn admits_custom_entry(catalog: &[String], query: &str, allow_custom: bool) -> bool {
    allow_custom && !query.trim().is_empty() && !catalog.iter().any(|option| option == query)
}

/// The filtered options plus the optional custom-entry row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    /// Filtered catalog options, in catalog order.
    pub options: Vec<String>,
    /// Query offered as a custom value, shown after the options.
    pub custom_entry: Option<String>,
}

impl CandidateList {
    /// Compute the candidate list for the given inputs.
    pub fn compute(
        catalog: &[String],
        selected: &[String],
        query: &str,
        keep_duplicates: bool,
        allow_custom: bool,
    ) -> Self {
        Self {
            options: filter_options(catalog, selected, query, keep_duplicates),
            custom_entry: admits_custom_entry(catalog, query, allow_custom)
                .then(|| query.to_string()),
        }
    }

    /// Number of navigable rows, custom-entry row included.
    pub fn visible_count(&self) -> usize {
        self.options.len() + usize::from(self.custom_entry.is_some())
    }

    /// Returns true if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.visible_count() == 0
    }

    /// Navigation index of the custom-entry row, if present.
    pub fn custom_index(&self) -> Option<usize> {
        self.custom_entry.as_ref().map(|_| self.options.len())
    }

    /// The row at navigation `index`.
    pub fn row(&self, index: usize) -> Option<Row> {
        if let Some(option) = self.options.get(index) {
            return Some(Row::Option(option.clone()));
        }
        match &self.custom_entry {
            Some(value) if index == self.options.len() => Some(Row::Custom(value.clone())),
            _ => None,
        }
    }

    /// All rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.visible_count()).filter_map(|i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_case_insensitive() {
        let out = filter_options(&strings(&["Apple"]), &[], "app", false);
        assert_eq!(out, strings(&["Apple"]));
    }

    #[test]
    fn test_filter_preserves_catalog_order() {
        let catalog = strings(&["Red", "Green", "Blue", "Orange"]);
        let out = filter_options(&catalog, &[], "e", false);
        assert_eq!(out, strings(&["Red", "Green", "Blue", "Orange"]));

        let out = filter_options(&catalog, &[], "RE", false);
        assert_eq!(out, strings(&["Red", "Green"]));
    }

    #[test]
    fn test_filter_drops_selected() {
        let catalog = strings(&["Red", "Green", "Blue"]);
        let out = filter_options(&catalog, &strings(&["Red"]), "re", false);
        assert_eq!(out, strings(&["Green"]));
    }

    #[test]
    fn test_filter_keep_duplicates() {
        let catalog = strings(&["Red", "Green"]);
        let out = filter_options(&catalog, &strings(&["Red"]), "", true);
        assert_eq!(out, catalog);
    }

    #[test]
    fn test_selected_match_is_case_sensitive() {
        let catalog = strings(&["Red"]);
        let out = filter_options(&catalog, &strings(&["red"]), "", false);
        assert_eq!(out, strings(&["Red"]));
    }

    #[test]
    fn test_custom_entry_admission() {
        let catalog = strings(&["Red"]);
        assert!(admits_custom_entry(&catalog, "Purple", true));
        assert!(!admits_custom_entry(&catalog, "Purple", false));
        assert!(!admits_custom_entry(&catalog, "   ", true));
        assert!(!admits_custom_entry(&catalog, "Red", true));
        // Exact match only: a differently cased value is still custom
        assert!(admits_custom_entry(&catalog, "red", true));
    }

    #[test]
    fn test_candidate_list_rows() {
        let catalog = strings(&["Red", "Reddish"]);
        let list = CandidateList::compute(&catalog, &[], "red", false, true);
        assert_eq!(list.visible_count(), 3);
        assert_eq!(list.custom_index(), Some(2));
        assert_eq!(list.row(0), Some(Row::Option("Red".into())));
        assert_eq!(list.row(2), Some(Row::Custom("red".into())));
        assert_eq!(list.row(3), None);
        assert_eq!(list.rows().count(), 3);
        assert_eq!(Row::Custom("red".into()).label(), "Add \"red\"");
    }

    #[test]
    fn test_candidate_list_without_custom() {
        let catalog = strings(&["Red"]);
        let list = CandidateList::compute(&catalog, &[], "x", false, false);
        assert!(list.is_empty());
        assert_eq!(list.custom_index(), None);
    }
}
