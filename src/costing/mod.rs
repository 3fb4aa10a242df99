pub mod aggregate;
pub mod calculate;
pub mod config;
pub mod error;
pub mod flatten;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod schema;

pub use error::{FormattingWarning, ReportError, Result};
