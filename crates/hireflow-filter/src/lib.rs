//! Client-side list engine for the recruitment CRM.
//!
//! Turns a slice of loosely-typed [`Record`]s plus caller-owned query
//! parameters into an ordered [`DerivedView`]: free-text search per record
//! kind, a created/updated date range, and a single-field sort.

pub mod allow_list;
pub mod date_range;
pub mod engine;
pub mod error;
pub mod query;
pub mod record;
pub mod sort;
pub mod state;
pub mod timestamp;
pub mod value;
pub mod view;

pub use allow_list::AllowLists;
pub use date_range::{DateRange, DateRangeType};
pub use engine::{EngineOptions, RecordFilterEngine};
pub use error::{FilterError, FilterResult};
pub use hireflow_core::types::RecordKind;
pub use query::FilterQuery;
pub use record::Record;
pub use sort::{SortKey, SortOrder, SortSpec};
pub use state::{FilterParams, FilterState};
pub use value::FieldValue;
pub use view::{DerivedView, ViewRow};
