//! Bench Curves
//!
//! Statistical performance curves for optimization benchmarking runs.
//!
//! Runs are numeric matrices whose columns are measured dimensions such as
//! elapsed time and best objective value. A curve aggregation reduces many
//! runs to one curve: for every x value where any run changes, it computes a
//! statistic (median, minimum, quantile, ...) over the runs' y values.
//! Curves of run sets are pooled into curves of experiments and of whole
//! experiment collections with a second statistic.
//!
//! This crate provides the core implementation for the `bench-curves` CLI.
//!
//! ## Getting Started
//!
//! ```bash
//! bench-curves aggregate --runs runs.json --curves curves.toml --scope run_set,experiment
//! bench-curves --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod composition;
pub mod functions;
pub mod matrix;
pub mod output;
pub mod parser;
pub mod stats;
pub mod utils;
