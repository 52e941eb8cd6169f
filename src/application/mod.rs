// Application layer: the lock-guarded service every client goes through.
// The domain ledger stays synchronous and silent; logging happens here.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
