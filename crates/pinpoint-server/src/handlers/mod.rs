//! API route handlers

mod fees;
mod health;
mod proposals;
mod statements;

pub use fees::{calculate_fees, get_schedule};
pub use health::get_health;
pub use proposals::create_proposal;
pub use statements::extract_statement;
