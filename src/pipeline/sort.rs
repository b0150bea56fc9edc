use crate::product::{ColumnKey, Product, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// The selected sort column. `None` keeps the upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec(Option<(ColumnKey, Direction)>);

impl SortSpec {
    pub fn new(key: ColumnKey, direction: Direction) -> Self {
        Self(Some((key, direction)))
    }

    pub fn field(&self) -> Option<ColumnKey> {
        self.0.map(|(key, _)| key)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.0.map(|(_, direction)| direction)
    }

    /// Header click. A new column starts ascending, the active ascending
    /// column flips to descending. An active descending column goes back to
    /// ascending, or to unsorted when `tri_state` is set.
    pub fn toggle(&mut self, key: ColumnKey, tri_state: bool) {
        self.0 = match self.0 {
            Some((active, Direction::Ascending)) if active == key => {
                Some((key, Direction::Descending))
            }
            Some((active, Direction::Descending)) if active == key && tri_state => None,
            _ => Some((key, Direction::Ascending)),
        };
    }

    /// Stable sort, rows comparing equal keep their relative order.
    ///
    /// Missing values stay at the end in both directions.
    pub fn apply<'a>(&self, mut rows: Vec<&'a Product>) -> Vec<&'a Product> {
        let Some((key, direction)) = self.0 else {
            return rows;
        };
        rows.sort_by(|a, b| {
            let (va, vb) = (a.value(key), b.value(key));
            match direction {
                Direction::Ascending => va.compare(&vb),
                Direction::Descending => match (&va, &vb) {
                    (Value::Missing, _) | (_, Value::Missing) => va.compare(&vb),
                    _ => vb.compare(&va),
                },
            }
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;
    use pretty_assertions::assert_eq;

    fn prices(rows: &[&Product]) -> Vec<f64> {
        rows.iter().filter_map(|r| r.price).collect()
    }

    #[test]
    fn toggle_rule() {
        let mut spec = SortSpec::default();
        spec.toggle(ColumnKey::Price, false);
        assert_eq!(spec, SortSpec::new(ColumnKey::Price, Direction::Ascending));
        spec.toggle(ColumnKey::Price, false);
        assert_eq!(spec, SortSpec::new(ColumnKey::Price, Direction::Descending));
        spec.toggle(ColumnKey::Price, false);
        assert_eq!(spec, SortSpec::new(ColumnKey::Price, Direction::Ascending));
        spec.toggle(ColumnKey::Price, false);
        spec.toggle(ColumnKey::Title, false);
        assert_eq!(spec, SortSpec::new(ColumnKey::Title, Direction::Ascending));
    }

    #[test]
    fn tri_state_toggle_returns_to_unsorted() {
        let mut spec = SortSpec::default();
        spec.toggle(ColumnKey::Stock, true);
        spec.toggle(ColumnKey::Stock, true);
        spec.toggle(ColumnKey::Stock, true);
        assert_eq!(spec, SortSpec::default());
        assert_eq!(spec.field(), None);
    }

    #[test]
    fn price_scenario() {
        let rows = vec![
            product(1, "a", 300.0),
            product(2, "b", 100.0),
            product(3, "c", 200.0),
        ];
        let mut spec = SortSpec::default();
        spec.toggle(ColumnKey::Price, false);
        let sorted = spec.apply(rows.iter().collect());
        assert_eq!(prices(&sorted), vec![100.0, 200.0, 300.0]);
        spec.toggle(ColumnKey::Price, false);
        let sorted = spec.apply(rows.iter().collect());
        assert_eq!(prices(&sorted), vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn unsorted_is_identity() {
        let rows = vec![product(2, "b", 3.0), product(1, "a", 1.0)];
        let sorted = SortSpec::default().apply(rows.iter().collect());
        assert_eq!(sorted.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn sort_is_stable() {
        let rows = vec![
            product(1, "same", 5.0),
            product(2, "other", 1.0),
            product(3, "same", 5.0),
            product(4, "same", 5.0),
        ];
        let asc = SortSpec::new(ColumnKey::Price, Direction::Ascending);
        let asc = asc.apply(rows.iter().collect());
        assert_eq!(asc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1, 3, 4]);
        let desc = SortSpec::new(ColumnKey::Title, Direction::Descending);
        let desc = desc.apply(rows.iter().collect());
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 4, 2]);
    }

    #[test]
    fn numbers_do_not_sort_lexicographically() {
        let rows = vec![
            product(1, "a", 1249.0),
            product(2, "b", 549.0),
            product(3, "c", 12.0),
        ];
        let asc = SortSpec::new(ColumnKey::Price, Direction::Ascending);
        let asc = asc.apply(rows.iter().collect());
        assert_eq!(prices(&asc), vec![12.0, 549.0, 1249.0]);
    }

    #[test]
    fn missing_values_stay_last() {
        let mut missing = product(9, "z", 0.0);
        missing.price = None;
        let rows = vec![missing, product(1, "a", 5.0), product(2, "b", 7.0)];
        for direction in [Direction::Ascending, Direction::Descending] {
            let spec = SortSpec::new(ColumnKey::Price, direction);
            let sorted = spec.apply(rows.iter().collect());
            assert_eq!(sorted.last().map(|r| r.id), Some(9));
        }
    }
}
