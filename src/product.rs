use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One record of the product collection.
///
/// Only `id` is required. Every other field may be missing in the source and
/// is then kept as `None`, see [`Value::Missing`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKey {
    Id,
    Title,
    Description,
    Price,
    DiscountPercentage,
    Rating,
    Stock,
    Brand,
    Category,
    Thumbnail,
    Images,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 11] = [
        ColumnKey::Id,
        ColumnKey::Title,
        ColumnKey::Description,
        ColumnKey::Price,
        ColumnKey::DiscountPercentage,
        ColumnKey::Rating,
        ColumnKey::Stock,
        ColumnKey::Brand,
        ColumnKey::Category,
        ColumnKey::Thumbnail,
        ColumnKey::Images,
    ];

    /// Field name as used by the products API.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKey::Id => "id",
            ColumnKey::Title => "title",
            ColumnKey::Description => "description",
            ColumnKey::Price => "price",
            ColumnKey::DiscountPercentage => "discountPercentage",
            ColumnKey::Rating => "rating",
            ColumnKey::Stock => "stock",
            ColumnKey::Brand => "brand",
            ColumnKey::Category => "category",
            ColumnKey::Thumbnail => "thumbnail",
            ColumnKey::Images => "images",
        }
    }

    /// Accepts the API name, its snake_case form and is case insensitive.
    pub fn parse(name: &str) -> Option<ColumnKey> {
        let normalized = name.trim().replace('_', "").to_lowercase();
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.name().to_lowercase() == normalized)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub label: &'static str,
}

/// Columns of the product table in display order.
pub const COLUMNS: [ColumnDescriptor; 9] = [
    ColumnDescriptor {
        key: ColumnKey::Id,
        label: "id",
    },
    ColumnDescriptor {
        key: ColumnKey::Title,
        label: "Title",
    },
    ColumnDescriptor {
        key: ColumnKey::Price,
        label: "Price",
    },
    ColumnDescriptor {
        key: ColumnKey::Stock,
        label: "Stock",
    },
    ColumnDescriptor {
        key: ColumnKey::Rating,
        label: "Rating",
    },
    ColumnDescriptor {
        key: ColumnKey::Brand,
        label: "Brand",
    },
    ColumnDescriptor {
        key: ColumnKey::Category,
        label: "Category",
    },
    ColumnDescriptor {
        key: ColumnKey::Description,
        label: "Description",
    },
    ColumnDescriptor {
        key: ColumnKey::Thumbnail,
        label: "Thumbnail",
    },
];

/// A single cell of a product.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    List(&'a [String]),
    Missing,
}

impl Value<'_> {
    /// String form used for search, filter and display.
    ///
    /// `Missing` has no string form, it never matches a search or a filter.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) => Some((*s).to_string()),
            Value::List(l) => Some(l.join(", ")),
            Value::Missing => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Ascending order of two cells. Numbers compare numerically, text
    /// lexicographically and `Missing` after everything else. Mixed kinds
    /// fall back to their string forms so the comparison stays total.
    pub fn compare(&self, other: &Value<'_>) -> Ordering {
        match (self, other) {
            (Value::Missing, Value::Missing) => Ordering::Equal,
            (Value::Missing, _) => Ordering::Greater,
            (_, Value::Missing) => Ordering::Less,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.to_text().cmp(&b.to_text()),
            },
        }
    }
}

impl Product {
    pub fn value(&self, key: ColumnKey) -> Value<'_> {
        fn text(s: &Option<String>) -> Value<'_> {
            s.as_deref().map_or(Value::Missing, Value::Text)
        }
        fn float(f: Option<f64>) -> Value<'static> {
            f.map_or(Value::Missing, Value::Float)
        }

        match key {
            ColumnKey::Id => i64::try_from(self.id)
                .map(Value::Int)
                .unwrap_or(Value::Float(self.id as f64)),
            ColumnKey::Title => text(&self.title),
            ColumnKey::Description => text(&self.description),
            ColumnKey::Price => float(self.price),
            ColumnKey::DiscountPercentage => float(self.discount_percentage),
            ColumnKey::Rating => float(self.rating),
            ColumnKey::Stock => self.stock.map_or(Value::Missing, Value::Int),
            ColumnKey::Brand => text(&self.brand),
            ColumnKey::Category => text(&self.category),
            ColumnKey::Thumbnail => text(&self.thumbnail),
            ColumnKey::Images => self
                .images
                .as_deref()
                .map_or(Value::Missing, Value::List),
        }
    }

    /// Identifier in the string form stored in the deleted-id set.
    pub fn id_key(&self) -> String {
        self.id.to_string()
    }

    /// Display label used in dialogs.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => format!("{} (#{})", title, self.id),
            None => format!("#{}", self.id),
        }
    }
}
