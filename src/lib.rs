pub mod analyzers;
pub mod config;
pub mod currency;
pub mod error;
pub mod output;
pub mod parser;
pub mod record;
pub mod stats;

pub use analyzers::analyzer::{analyze_file, analyze_reader};
pub use analyzers::types::DerivedStats;
pub use config::ReportConfig;
pub use currency::ExchangeTable;
pub use error::StatsError;
pub use stats::VacancyStats;
