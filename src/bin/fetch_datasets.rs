use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use coursework_datasets::app::App;
use coursework_datasets::cifar::Cifar10Cache;
use coursework_datasets::config::{Caltech101Source, Cifar10Source};
use coursework_datasets::domain::DatasetSelection;
use coursework_datasets::error::DatasetError;
use coursework_datasets::http::HttpDownloader;
use coursework_datasets::output::ConsoleOutput;
use coursework_datasets::store::Store;

#[derive(Parser)]
#[command(name = "fetch-datasets")]
#[command(about = "Download datasets for coursework")]
#[command(version)]
struct Cli {
    /// Which dataset to download
    #[arg(long, value_enum, default_value_t = DatasetSelection::All)]
    dataset: DatasetSelection,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<DatasetError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DatasetError) -> u8 {
    match error {
        DatasetError::Http(_) | DatasetError::HttpStatus { .. } => 3,
        DatasetError::NestedArchiveMissing(_)
        | DatasetError::CleanupArchiveMissing(_)
        | DatasetError::MissingSplitFile(_) => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let downloader = HttpDownloader::new()?;
    let cifar = Cifar10Source::default();
    let cache = Cifar10Cache::new(downloader.clone(), cifar.clone());
    let app = App::with_sources(
        Store::default(),
        downloader,
        cache,
        Caltech101Source::default(),
        cifar,
    );

    let result = app.run(cli.dataset, &ConsoleOutput)?;
    ConsoleOutput::print_summary(&result).into_diagnostic()?;
    Ok(())
}
