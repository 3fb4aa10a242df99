//! Core library for the scope-cost-report command line application.
//!
//! The library turns a labor-hours table and a material-purchases table into
//! a per-scope cost workbook. Responsibilities are kept narrow: CSV and Excel
//! adapters live under [`costing::io`], column checks in [`costing::schema`],
//! markups in [`costing::calculate`], grouping in [`costing::aggregate`], the
//! sheet layout in [`costing::flatten`], and the end-to-end run in
//! [`costing::pipeline`].

pub mod costing;

pub use costing::{
    FormattingWarning, ReportError, Result, aggregate, calculate, config, error, flatten, io,
    model, pipeline, schema,
};
