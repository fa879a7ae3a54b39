//! Value objects with construction-time invariants.

mod credits;

pub use credits::{Credits, CreditsError, MAX_CREDITS};
