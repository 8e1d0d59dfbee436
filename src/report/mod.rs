//! Results aggregation and report export

pub mod aggregate;
pub mod export;
pub mod sink;

pub use aggregate::{calculate_stats, generate_results, DetailRow, HasStatus, ResultsView, Stats};
pub use export::{build_report, report_file_name, Report};
pub use sink::{Delivery, DirectorySink, ReportSink, StdoutSink};
