//! Use cases - consistency checks and mutation orchestration.
//!
//! `consistency` holds the cross-entity rules that need stored state.
//! `management` sequences validation, those rules, and the storage call for
//! each record type.

pub mod consistency;
pub mod management;

pub use consistency::{ConsistencyChecker, ConsistencyError};
pub use management::{ManagementError, ManagementUseCases};
