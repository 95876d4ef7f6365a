//! Parameter resolution and lookup dispatch.

pub mod lookup;
pub mod params;

pub use lookup::{ApiFactory, Lookup, PaapiFactory};
pub use params::PaapiParams;
