//! Screen Time Survey Common Library
//!
//! 入力フォームと可視化ページで共有される型・検証・グラフ射影

pub mod types;
pub mod error;
pub mod csv;
pub mod frame;
pub mod aggregate;
pub mod validator;
pub mod projector;
pub mod export;

pub use types::{
    AggregateDocument, ChartSection, FilterState, LinePoint, Projection, RankedPoint, Record,
    ScatterPoint, ValidatedFrame,
};
pub use error::{Error, Result};
pub use frame::{parse_frame, parse_raw_table, RawTable};
pub use aggregate::parse_aggregate;
pub use validator::{validate, validate_detailed, ValidationReport, MAX_ENTRIES};
pub use projector::{above_threshold, by_selection, category_options, ranked_from_document, ranked_static};
