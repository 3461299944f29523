//! Command implementations

mod calculate;
mod extract;
mod propose;
mod serve;

pub use calculate::cmd_calculate;
pub use extract::cmd_extract;
pub use propose::cmd_propose;
pub use serve::cmd_serve;
