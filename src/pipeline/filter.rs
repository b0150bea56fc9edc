use std::collections::{BTreeMap, HashSet};

use crate::product::{ColumnKey, Product};

/// How a filter constraint is compared with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchMode {
    /// Case insensitive equality. Constraints are picked from the column's
    /// unique values, so this is the default.
    #[default]
    Exact,
    /// Case insensitive containment.
    Substring,
}

/// Per column constraints, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    constraints: BTreeMap<ColumnKey, String>,
    mode: MatchMode,
}

impl FilterSet {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            constraints: BTreeMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Set the constraint of a column. An empty value removes it.
    pub fn set(&mut self, key: ColumnKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.constraints.remove(&key);
        } else {
            self.constraints.insert(key, value);
        }
    }

    pub fn get(&self, key: ColumnKey) -> Option<&str> {
        self.constraints.get(&key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.constraints.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn matches(&self, row: &Product) -> bool {
        self.constraints.iter().all(|(key, wanted)| {
            let Some(text) = row.value(*key).to_text() else {
                return false;
            };
            let text = text.to_lowercase();
            let wanted = wanted.to_lowercase();
            match self.mode {
                MatchMode::Exact => text == wanted,
                MatchMode::Substring => text.contains(&wanted),
            }
        })
    }

    pub fn apply<'a>(&self, rows: Vec<&'a Product>) -> Vec<&'a Product> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

/// Distinct string values per column in first seen order.
///
/// Computed from the whole row store, so the options of one column never
/// depend on the filters applied to another.
pub fn unique_values(rows: &[Product]) -> BTreeMap<ColumnKey, Vec<String>> {
    ColumnKey::ALL
        .iter()
        .map(|&key| {
            let mut seen = HashSet::new();
            let values = rows
                .iter()
                .filter_map(|row| row.value(key).to_text())
                .filter(|text| seen.insert(text.clone()))
                .collect();
            (key, values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Product> {
        let mut rows = vec![
            product(1, "iPhone 9", 549.0),
            product(2, "iPhone X", 899.0),
            product(3, "Galaxy", 1249.0),
            product(4, "Oil", 12.0),
        ];
        rows[0].brand = Some("Apple".into());
        rows[1].brand = Some("Apple".into());
        rows[2].brand = Some("Samsung".into());
        rows[0].category = Some("smartphones".into());
        rows[1].category = Some("smartphones".into());
        rows[2].category = Some("smartphones".into());
        rows[3].category = Some("skincare".into());
        rows
    }

    fn ids(rows: &[&Product]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn exact_match_ignores_case() {
        let rows = rows();
        let mut filters = FilterSet::new(MatchMode::Exact);
        filters.set(ColumnKey::Brand, "apple");
        assert_eq!(ids(&filters.apply(rows.iter().collect())), vec![1, 2]);

        filters.set(ColumnKey::Brand, "app");
        assert!(filters.apply(rows.iter().collect()).is_empty());
    }

    #[test]
    fn substring_mode() {
        let rows = rows();
        let mut filters = FilterSet::new(MatchMode::Substring);
        filters.set(ColumnKey::Title, "iphone");
        assert_eq!(ids(&filters.apply(rows.iter().collect())), vec![1, 2]);
    }

    #[test]
    fn constraints_are_anded_and_only_narrow() {
        let rows = rows();
        let mut filters = FilterSet::new(MatchMode::Exact);
        filters.set(ColumnKey::Category, "smartphones");
        let wide = filters.apply(rows.iter().collect());
        assert_eq!(ids(&wide), vec![1, 2, 3]);

        filters.set(ColumnKey::Brand, "Apple");
        let narrow = filters.apply(rows.iter().collect());
        assert_eq!(ids(&narrow), vec![1, 2]);
        assert!(narrow.iter().all(|r| wide.contains(r)));

        filters.set(ColumnKey::Price, "899");
        assert_eq!(ids(&filters.apply(rows.iter().collect())), vec![2]);
    }

    #[test]
    fn empty_value_removes_constraint() {
        let rows = rows();
        let mut filters = FilterSet::new(MatchMode::Exact);
        filters.set(ColumnKey::Brand, "Samsung");
        filters.set(ColumnKey::Brand, "");
        assert!(filters.is_empty());
        assert_eq!(filters.apply(rows.iter().collect()).len(), 4);
    }

    #[test]
    fn missing_value_never_matches() {
        let rows = rows();
        let mut filters = FilterSet::new(MatchMode::Substring);
        filters.set(ColumnKey::Brand, "undefined");
        assert!(filters.apply(rows.iter().collect()).is_empty());
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let rows = rows();
        let values = unique_values(&rows);
        assert_eq!(values[&ColumnKey::Brand], vec!["Apple", "Samsung"]);
        assert_eq!(values[&ColumnKey::Category], vec!["smartphones", "skincare"]);
        assert_eq!(values[&ColumnKey::Price], vec!["549", "899", "1249", "12"]);
        assert!(values[&ColumnKey::Thumbnail].is_empty());
    }
}
