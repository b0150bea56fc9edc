use std::collections::HashSet;

use crate::product::{ColumnDescriptor, ColumnKey};

/// Hidden-column set. Only affects rendering, rows keep all their data.
#[derive(Debug, Clone)]
pub struct ColumnVisibility {
    columns: Vec<ColumnDescriptor>,
    hidden: HashSet<ColumnKey>,
}

impl ColumnVisibility {
    pub fn new(columns: &[ColumnDescriptor]) -> Self {
        Self {
            columns: columns.to_vec(),
            hidden: HashSet::new(),
        }
    }

    pub fn toggle(&mut self, key: ColumnKey) {
        if !self.hidden.remove(&key) {
            self.hidden.insert(key);
        }
    }

    pub fn hide_all(&mut self) {
        self.hidden = self.columns.iter().map(|c| c.key).collect();
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn is_hidden(&self, key: ColumnKey) -> bool {
        self.hidden.contains(&key)
    }

    pub fn visible(&self) -> Vec<ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| !self.is_hidden(c.key))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::COLUMNS;
    use pretty_assertions::assert_eq;

    fn keys(columns: &[ColumnDescriptor]) -> Vec<ColumnKey> {
        columns.iter().map(|c| c.key).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut visibility = ColumnVisibility::new(&COLUMNS);
        visibility.toggle(ColumnKey::Price);
        assert!(visibility.is_hidden(ColumnKey::Price));
        assert_eq!(visibility.visible().len(), COLUMNS.len() - 1);
        visibility.toggle(ColumnKey::Price);
        assert!(!visibility.is_hidden(ColumnKey::Price));
        assert_eq!(keys(&visibility.visible()), keys(&COLUMNS));
    }

    #[test]
    fn hide_all_and_show_all() {
        let mut visibility = ColumnVisibility::new(&COLUMNS);
        visibility.hide_all();
        assert!(visibility.visible().is_empty());
        visibility.show_all();
        assert_eq!(keys(&visibility.visible()), keys(&COLUMNS));
    }

    #[test]
    fn order_is_kept() {
        let mut visibility = ColumnVisibility::new(&COLUMNS);
        visibility.toggle(ColumnKey::Id);
        visibility.toggle(ColumnKey::Brand);
        assert_eq!(
            keys(&visibility.visible()),
            vec![
                ColumnKey::Title,
                ColumnKey::Price,
                ColumnKey::Stock,
                ColumnKey::Rating,
                ColumnKey::Category,
                ColumnKey::Description,
                ColumnKey::Thumbnail,
            ]
        );
    }
}
