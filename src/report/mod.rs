//! Renderers for a validated [`AboutCollector`](crate::collector::AboutCollector).
//!
//! - [`csv`] — inventory with one row per metadata file.
//! - [`attribution`] — `{{ field }}` template rendered once per record.
//! - [`terminal`] — colored summary and message tables; respects `--verbose` / `--quiet`.

pub mod attribution;
pub mod csv;
pub mod terminal;
