use std::collections::HashSet;

use crate::product::Product;

/// Ids removed client side. Only ever grows during a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletedIds(HashSet<String>);

impl DeletedIds {
    /// Returns false if the id was already deleted.
    pub fn mark(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn retain<'a>(&self, rows: Vec<&'a Product>) -> Vec<&'a Product> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter()
            .filter(|row| !self.contains(&row.id_key()))
            .collect()
    }
}
