//! Records produced and returned by the winget client.
//!
//! Everything here is a plain value object: listings build new records on
//! every call and mutations report through [`OperationResult`].

pub mod result;
pub mod types;

pub use result::OperationResult;
pub use types::{
    ConnectionStatus, DEFAULT_SOURCE_NAME, Package, PackageSource, PackageStatus,
    SearchFilterType, UNKNOWN_SOURCE_TYPE, UNKNOWN_VERSION,
};
