mod cli;

use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::Context;
use clap::Parser;
use hireflow_core::config::load_config;
use hireflow_filter::{EngineOptions, Record, RecordFilterEngine};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

use crate::cli::Cli;

/// Installs the stderr subscriber before settings load, so config events are
/// logged too. Returns the filter handle unless `RUST_LOG` is set, in which
/// case it wins over the configured level.
fn init_tracing() -> Option<reload::Handle<EnvFilter, Registry>> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let overridable = from_env.is_none();
    let (filter_layer, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("debug")));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    overridable.then_some(filter_handle)
}

fn apply_log_level(handle: &reload::Handle<EnvFilter, Registry>, level: &str) {
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.modify(|current| *current = filter) {
                tracing::warn!(error = %e, "Failed to update log filter from config");
            }
        }
        Err(_) => tracing::warn!(%level, "Invalid log level in config, keeping debug"),
    }
}

fn read_records(cli: &Cli) -> anyhow::Result<Vec<Record>> {
    let file = File::open(&cli.records)
        .with_context(|| format!("Failed to open {}", cli.records.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a JSON array of records", cli.records.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter_handle = init_tracing();

    let settings = load_config(cli.config.as_deref())?;
    if let Some(handle) = &filter_handle {
        apply_log_level(handle, &settings.logging.level);
    }

    let engine = RecordFilterEngine::new(EngineOptions::from_settings(&settings)?);

    let mut records = read_records(&cli)?;
    if cli.normalize {
        let fields = [
            engine.options().created_field.as_str(),
            engine.options().updated_field.as_str(),
        ];
        let converted: usize = records
            .iter_mut()
            .map(|record| record.normalize_timestamps(&fields, engine.options().timezone))
            .sum();
        tracing::debug!(converted, "Timestamps normalized");
    }

    let params = cli.params();
    let view = engine.derive(&records, &params);
    tracing::info!(total = records.len(), matched = view.len(), "Records filtered");

    let rows = match cli.page {
        Some(page) => {
            tracing::info!(
                page,
                pages = view.page_count(cli.page_size),
                "Printing page"
            );
            view.page(page, cli.page_size)
        }
        None => view.rows(),
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, rows)?;
    writeln!(stdout)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_replaces_startup_filter() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("debug"));

        apply_log_level(&handle, "warn");
        assert_eq!(handle.with_current(ToString::to_string).unwrap(), "warn");

        apply_log_level(&handle, "hireflow=loud");
        assert_eq!(handle.with_current(ToString::to_string).unwrap(), "warn");
    }
}
