//! Configuration types for requestr.
//!
//! Settings come from an optional `requestr.yaml` file and are then
//! overridden by environment variables such as `HTTP_PROXY`.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
