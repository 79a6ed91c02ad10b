//! Metadata derivations for the Qt installer selector.
//!
//! Pure functions that turn directory listings and canonical package records
//! into the lists a user chooses from, plus the boundary through which raw
//! documents are fetched.

pub mod directory;
pub mod error;
pub mod locator;
pub mod packages;
pub mod source;

pub use directory::{Directory, VersionGroups, derive_tools, derive_versions, stratify};
pub use error::{FetchError, Result};
pub use locator::{
    MetadataLocator, document_path, extension_for_arch, folder_extensions, qt_folder,
};
pub use packages::{
    derive_architectures, derive_archives, derive_modules, derive_tool_variants, module_name,
};
pub use source::{Catalog, MetadataSource};
