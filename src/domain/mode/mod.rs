//! Mode module - execution modes and the runtime context.
//!
//! - `KindRule` - immutable set of entity kinds
//! - `Mode` - skip rules plus typed parameters
//! - `RuntimeConfiguration` - modes and the scene, passed to `configure`

mod kind_rule;
#[allow(clippy::module_inception)]
mod mode;
mod runtime_configuration;

pub use kind_rule::KindRule;
pub use mode::Mode;
pub use runtime_configuration::RuntimeConfiguration;
