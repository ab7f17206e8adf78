use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use hireflow_filter::date_range::parse_bound;
use hireflow_filter::{DateRangeType, FilterParams, RecordKind, SortOrder};

/// Filter, sort and page a JSON dump of CRM records.
#[derive(Debug, Parser)]
#[command(name = "hireflow", version)]
pub struct Cli {
    /// JSON file holding an array of records.
    #[arg(long, short)]
    pub records: PathBuf,

    /// Settings file. Defaults to `hireflow.toml` in the working directory.
    #[arg(long, short, env = "HIREFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Free-text search for one record kind, as `KIND=TEXT`. Repeatable.
    #[arg(long = "search", short = 's', value_name = "KIND=TEXT", value_parser = parse_search)]
    pub search: Vec<(RecordKind, String)>,

    /// First day of the date range (`YYYY-MM-DD`).
    #[arg(long, value_parser = parse_bound, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last day of the date range (`YYYY-MM-DD`).
    #[arg(long, value_parser = parse_bound, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Truncate the range to whole days, months or years.
    #[arg(long)]
    pub granularity: Option<DateRangeType>,

    /// Field path to sort on, e.g. `recruiter.name`.
    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Zero-based page to print. Prints every row when omitted.
    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long, default_value_t = 25)]
    pub page_size: usize,

    /// Convert the created/updated fields to timestamps before filtering.
    #[arg(long)]
    pub normalize: bool,
}

impl Cli {
    #[must_use]
    pub fn params(&self) -> FilterParams {
        let mut params = FilterParams::new();
        for (kind, text) in &self.search {
            params = params.with_search(*kind, text.clone());
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            params = params.with_date_range(from, to);
        }
        if let Some(granularity) = self.granularity {
            params = params.with_date_range_type(granularity);
        }
        if let Some(sort_by) = &self.sort_by {
            params = params.with_sort(sort_by.clone(), self.order);
        }
        params
    }
}

fn parse_search(arg: &str) -> Result<(RecordKind, String), String> {
    let (kind, text) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=TEXT, got `{arg}`"))?;
    let kind = kind.parse::<RecordKind>().map_err(|e| e.to_string())?;
    Ok((kind, text.to_string()))
}
