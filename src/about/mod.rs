//! Reading one ABOUT metadata file.
//!
//! - [`names`] — allowed characters in field and file names.
//! - [`preprocess`] — tolerant line cleanup producing IGNORED warnings.
//! - [`normalize`] — field entries, lower-case names, duplicate folding.
//! - [`schema`] — the known field set and the normalized field map.
//! - [`record`] — [`AboutRecord`](record::AboutRecord), the full pipeline for one file.

pub mod names;
pub mod normalize;
pub mod preprocess;
pub mod record;
pub mod schema;
