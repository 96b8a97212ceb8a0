pub mod extractor;
pub mod log;

pub use extractor::parse_search_query;
pub use log::{
    dispatch, flush_after, parse_and_log, parse_query, QueryLogger, RestQueryLogger,
    TracingQueryLogger,
};
