//! SPDX license identifiers and expressions found in `license_spdx` fields.
//!
//! - [`spdx`] — the table of known identifiers, built in or loaded from disk.
//! - [`expression`] — splits an expression into the identifiers to check.

pub mod expression;
pub mod spdx;
