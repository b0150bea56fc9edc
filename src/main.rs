use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod actions;
mod columns;
mod controller;
mod domain;
mod inputter;
mod model;
mod pipeline;
mod product;
mod store;
mod ui;

use controller::Controller;
use domain::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_SOURCE, TableConfig, TableError};
use model::{Model, Status};
use pipeline::{Direction, FilterSet, MatchMode, Pagination, PipelineInput, SortSpec};
use product::{COLUMNS, ColumnKey};
use store::{RowStore, Source};
use ui::TableUI;

/// Browse a product list with search, filters, sorting and pagination.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Products endpoint or a local .json, .csv, .parquet or .arrow file
    #[arg(default_value = DEFAULT_SOURCE)]
    source: String,

    #[arg(short = 'n', long, default_value_t = DEFAULT_ITEMS_PER_PAGE)]
    items_per_page: usize,

    /// How filter values are matched
    #[arg(long, value_enum, default_value_t = MatchMode::Exact)]
    filter_mode: MatchMode,

    /// Sorting the active descending column again removes the sort
    #[arg(long)]
    tri_state_sort: bool,

    /// Log file, filtered with RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one page to stdout instead of starting the viewer
    #[arg(long)]
    dump: bool,

    #[arg(long, requires = "dump")]
    search: Option<String>,

    /// column=value, may be repeated
    #[arg(long = "filter", requires = "dump", value_parser = parse_filter)]
    filters: Vec<(ColumnKey, String)>,

    /// column or column:desc
    #[arg(long, requires = "dump", value_parser = parse_sort)]
    sort: Option<SortSpec>,

    #[arg(long, requires = "dump", default_value_t = 1)]
    page: usize,
}

fn parse_column(name: &str) -> Result<ColumnKey, String> {
    ColumnKey::parse(name).ok_or_else(|| format!("unknown column \"{name}\""))
}

fn parse_filter(arg: &str) -> Result<(ColumnKey, String), String> {
    let (column, value) = arg
        .split_once('=')
        .ok_or_else(|| "expected column=value".to_string())?;
    Ok((parse_column(column)?, value.to_string()))
}

fn parse_sort(arg: &str) -> Result<SortSpec, String> {
    let (column, direction) = match arg.split_once(':') {
        Some((column, "desc")) => (column, Direction::Descending),
        Some((column, "asc")) => (column, Direction::Ascending),
        Some((_, other)) => return Err(format!("unknown direction \"{other}\"")),
        None => (arg, Direction::Ascending),
    };
    Ok(SortSpec::new(parse_column(column)?, direction))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.clone()) {
        eprintln!("Error: could not set up logging: {e}");
        return ExitCode::FAILURE;
    }
    match run(args) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(log_file: Option<PathBuf>) -> Result<(), TableError> {
    let path = log_file.unwrap_or_else(|| std::env::temp_dir().join("pt.log"));
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn build_config(args: &Args) -> Result<TableConfig, TableError> {
    if args.items_per_page == 0 {
        return Err(TableError::InvalidArgument(
            "items per page must be positive".into(),
        ));
    }
    Ok(TableConfig::default()
        .with_items_per_page(args.items_per_page)
        .with_match_mode(args.filter_mode)
        .with_tri_state_sort(args.tri_state_sort))
}

fn run(args: Args) -> Result<(), TableError> {
    let config = build_config(&args)?;
    let source = Source::parse(&args.source)?;
    info!("Starting pt for {:?} with {:?}", source, config);

    if args.dump {
        return dump(&args, &config, &source, &mut io::stdout().lock());
    }

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &config, source);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    config: &TableConfig,
    source: Source,
) -> Result<(), TableError> {
    let mut model = Model::init(config, RowStore::spawn(source));
    let mut ui = TableUI::new(config);
    let controller = Controller::new(config);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }
    Ok(())
}

/// Load synchronously, run the pipeline once and write the requested page as
/// tab separated text.
fn dump(
    args: &Args,
    config: &TableConfig,
    source: &Source,
    out: &mut impl Write,
) -> Result<(), TableError> {
    let store = RowStore::from_rows(store::load(source)?);

    let mut filters = FilterSet::new(config.match_mode);
    for (key, value) in args.filters.iter() {
        filters.set(*key, value.as_str());
    }
    let mut input = PipelineInput {
        query: args.search.clone().unwrap_or_default(),
        filters,
        sort: args.sort.unwrap_or_default(),
        pagination: Pagination::new(config.items_per_page),
        ..PipelineInput::default()
    };
    let processed = pipeline::process(store.rows(), &input);
    input.pagination.set_page(args.page, processed.total());

    let header: Vec<&str> = COLUMNS.iter().map(|c| c.label).collect();
    writeln!(out, "{}", header.join("\t"))?;
    for row in processed.page(&input.pagination) {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|c| row.value(c.key).to_text().unwrap_or_default())
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    writeln!(
        out,
        "Total records: {} / Current page: {} / Total pages: {}",
        processed.total(),
        input.pagination.page(),
        processed.page_count
    )?;
    Ok(())
}
