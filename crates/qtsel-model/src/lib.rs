//! Core vocabulary for selecting Qt installer components.
//!
//! This crate defines the coordinates of an install (host, target, version)
//! and the canonical package record that every metadata view is derived from.

pub mod error;
pub mod package;
pub mod platform;
pub mod size;
pub mod version;

pub use error::{ModelError, Result};
pub use package::{
    PackageRecord, RawPackageRecord, RawUpdateFile, StringOrList, archive_base_name, normalize,
    normalize_updates,
};
pub use platform::{Host, Target};
pub use size::{format_raw_size, format_size};
pub use version::QtVersion;
