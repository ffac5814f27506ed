//! Restriction module - locking scene interactions the current step does
//! not ask for.

mod environment;
mod lockables;

pub use environment::RestrictiveEnvironment;
pub use lockables::{ExtractFn, LockableRegistry};
