pub mod error;
pub mod ledger;
pub mod registry;

pub use error::*;
pub use ledger::*;
pub use registry::*;
