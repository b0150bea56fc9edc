use polars::prelude::*;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::domain::TableError;
use crate::product::{ColumnKey, Product};

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// http(s) addresses are fetched, everything else is a path. `~` and
    /// environment variables in paths are expanded.
    pub fn parse(source: &str) -> Result<Self, TableError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Ok(Source::Url(source.to_string()));
        }
        let expanded = shellexpand::full(source)
            .map_err(|e| TableError::InvalidArgument(e.to_string()))?;
        Ok(Source::File(PathBuf::from(expanded.as_ref())))
    }
}

#[derive(Debug)]
enum FileType {
    JSON,
    CSV,
    PARQUET,
    ARROW,
}

/// Body of the products endpoint. Files may also hold a bare array.
///
/// Records are kept as raw JSON first so one malformed product does not
/// reject the whole list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsPayload {
    Wrapped { products: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

impl ProductsPayload {
    fn into_products(self) -> Vec<Product> {
        let records = match self {
            ProductsPayload::Wrapped { products } => products,
            ProductsPayload::Bare(products) => products,
        };
        records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| match serde_json::from_value(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("Skipping product record {idx}: {e}");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Ready,
    Failed(String),
}

type FetchResult = Result<Vec<Product>, TableError>;

/// The fetched rows. Empty until the one-shot load finished and stays
/// empty if it failed.
#[derive(Debug)]
pub struct RowStore {
    rows: Vec<Product>,
    state: FetchState,
    receiver: Option<Receiver<FetchResult>>,
}

impl RowStore {
    /// Start loading `source` on a background thread.
    pub fn spawn(source: Source) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let result = load(&source);
            // The model may be gone already, nothing left to deliver to.
            let _ = sender.send(result);
        });
        Self {
            rows: Vec::new(),
            state: FetchState::Loading,
            receiver: Some(receiver),
        }
    }

    pub fn from_rows(rows: Vec<Product>) -> Self {
        Self {
            rows: dedup_ids(rows),
            state: FetchState::Ready,
            receiver: None,
        }
    }

    /// Pick up the load result. Returns true once, when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(TableError::LoadingFailed("loader thread stopped".into()))
            }
        };
        self.receiver = None;
        match result {
            Ok(rows) => {
                self.rows = dedup_ids(rows);
                self.state = FetchState::Ready;
            }
            Err(e) => {
                error!("Loading products failed: {e}");
                self.state = FetchState::Failed(e.to_string());
            }
        }
        true
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }
}

fn dedup_ids(rows: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    let total = rows.len();
    let rows: Vec<Product> = rows.into_iter().filter(|r| seen.insert(r.id)).collect();
    if rows.len() != total {
        warn!("Dropped {} rows with duplicate ids", total - rows.len());
    }
    rows
}

pub fn load(source: &Source) -> FetchResult {
    let start_time = Instant::now();
    let rows = match source {
        Source::Url(url) => fetch_products(url)?,
        Source::File(path) => load_file(path)?,
    };
    info!(
        "Loaded {} products from {:?} in {}ms",
        rows.len(),
        source,
        start_time.elapsed().as_millis()
    );
    Ok(rows)
}

/// One GET, no query parameters. All processing happens client side.
pub fn fetch_products(url: &str) -> FetchResult {
    debug!("GET {url}");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let payload: ProductsPayload = response.json()?;
    Ok(payload.into_products())
}

pub fn load_file(path: &Path) -> FetchResult {
    let file_type = get_file_type(path)?;
    trace!("Loading {:?} as {:?}", path, file_type);
    let frame = match file_type {
        FileType::JSON => {
            let text = fs::read_to_string(path)?;
            let payload: ProductsPayload = serde_json::from_str(&text)?;
            return Ok(payload.into_products());
        }
        FileType::CSV => load_csv(path)?,
        FileType::PARQUET => load_parquet(path)?,
        FileType::ARROW => load_arrow(path)?,
    };
    products_from_frame(frame)
}

fn get_file_type(path: &Path) -> Result<FileType, TableError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TableError::FileNotFound,
        ErrorKind::PermissionDenied => TableError::PermissionDenied,
        _ => TableError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(TableError::LoadingFailed("Not a file!".into()));
    }
    detect_file_type(path)
}

fn detect_file_type(path: &Path) -> Result<FileType, TableError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("JSON") => Ok(FileType::JSON),
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(TableError::UnknownFileType),
    }
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
}

fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

/// A column of a data file, every cell as text. Nulls are `None`.
struct TextColumn {
    key: ColumnKey,
    data: Vec<Option<String>>,
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<Option<TextColumn>, PolarsError> {
    let Some(key) = ColumnKey::parse(col_name) else {
        debug!("Ignoring column \"{col_name}\"");
        return Ok(None);
    };
    let col = df.column(col_name)?.cast(&DataType::String)?;
    let data = col
        .str()?
        .into_iter()
        .map(|value| value.map(|s| s.trim().to_string()))
        .collect();
    Ok(Some(TextColumn { key, data }))
}

/// Map the columns of a data file onto products. Each column is converted
/// on its own rayon thread. Rows without a readable id are skipped.
fn products_from_frame(frame: LazyFrame) -> FetchResult {
    let df = Arc::new(frame.collect()?);
    let loaded: Result<Vec<Option<TextColumn>>, _> = df
        .get_column_names()
        .par_iter()
        .map(|name| load_column(&df, name))
        .collect();
    let columns: Vec<TextColumn> = loaded?.into_iter().flatten().collect();

    if !columns.iter().any(|c| c.key == ColumnKey::Id) {
        return Err(TableError::LoadingFailed("no id column".into()));
    }

    let mut products = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut product = Product::default();
        let mut has_id = false;
        for column in columns.iter() {
            let Some(cell) = column.data.get(row).and_then(|c| c.as_deref()) else {
                continue;
            };
            if column.key == ColumnKey::Id {
                if let Some(id) = parse_int(cell).and_then(|i| u64::try_from(i).ok()) {
                    product.id = id;
                    has_id = true;
                }
            } else {
                set_field(&mut product, column.key, cell);
            }
        }
        if has_id {
            products.push(product);
        } else {
            warn!("Skipping row {row} without id");
        }
    }
    Ok(products)
}

fn parse_int(cell: &str) -> Option<i64> {
    cell.parse::<i64>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().map(|f| f as i64))
}

fn set_field(product: &mut Product, key: ColumnKey, cell: &str) {
    let text = || Some(cell.to_string());
    match key {
        ColumnKey::Id => {}
        ColumnKey::Title => product.title = text(),
        ColumnKey::Description => product.description = text(),
        ColumnKey::Brand => product.brand = text(),
        ColumnKey::Category => product.category = text(),
        ColumnKey::Thumbnail => product.thumbnail = text(),
        ColumnKey::Price => product.price = cell.parse().ok(),
        ColumnKey::DiscountPercentage => product.discount_percentage = cell.parse().ok(),
        ColumnKey::Rating => product.rating = cell.parse().ok(),
        ColumnKey::Stock => product.stock = parse_int(cell),
        ColumnKey::Images => {
            product.images = Some(
                cell.split([';', ','])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        }
    }
}
