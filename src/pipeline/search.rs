use crate::product::{ColumnKey, Product};

/// Fields a free text query is matched against. `id` and the image
/// references are not searchable.
pub const SEARCHABLE_FIELDS: [ColumnKey; 7] = [
    ColumnKey::Title,
    ColumnKey::Description,
    ColumnKey::Price,
    ColumnKey::Rating,
    ColumnKey::Stock,
    ColumnKey::Brand,
    ColumnKey::Category,
];

pub fn matches(row: &Product, query: &str) -> bool {
    let needle = query.to_lowercase();
    SEARCHABLE_FIELDS.iter().any(|&key| {
        row.value(key)
            .to_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

/// Keep the rows where any searchable field contains `query`, ignoring case.
/// An empty query keeps every row.
pub fn search<'a>(rows: Vec<&'a Product>, query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|row| matches(row, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;
    use pretty_assertions::assert_eq;

    fn ids(rows: &[&Product]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let rows = vec![
            product(3, "c", 1.0),
            product(1, "a", 2.0),
            product(2, "b", 3.0),
        ];
        let result = search(rows.iter().collect(), "");
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn matches_description_case_insensitive() {
        let mut phone = product(1, "iPhone 9", 549.0);
        phone.description = Some("An apple mobile which is nothing like apple".into());
        let other = product(2, "Galaxy", 499.0);
        let rows = vec![phone, other];

        let result = search(rows.iter().collect(), "APPLE");
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn numeric_fields_are_searched_as_text() {
        let rows = vec![product(1, "a", 549.0), product(2, "b", 12.5)];
        assert_eq!(ids(&search(rows.iter().collect(), "54")), vec![1]);
        assert_eq!(ids(&search(rows.iter().collect(), "2.5")), vec![2]);
    }

    #[test]
    fn id_and_thumbnail_are_not_searchable() {
        let mut p = product(42, "widget", 1.0);
        p.thumbnail = Some("https://cdn/thumb.jpg".into());
        let rows = vec![p];
        assert!(search(rows.iter().collect(), "42").is_empty());
        assert!(search(rows.iter().collect(), "thumb").is_empty());
    }

    #[test]
    fn every_excluded_row_misses_the_query() {
        let mut rows = vec![product(1, "Laptop", 999.0), product(2, "Perfume", 13.0)];
        rows[1].brand = Some("Lap Perfumes".into());
        let result = search(rows.iter().collect(), "lap");
        assert_eq!(ids(&result), vec![1, 2]);
        let result = search(rows.iter().collect(), "laptop");
        assert_eq!(ids(&result), vec![1]);
        assert!(!matches(&rows[1], "laptop"));
    }
}
