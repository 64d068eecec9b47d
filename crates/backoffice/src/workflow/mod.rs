//! Workflow operations: status transitions and the soft-delete lifecycle.

pub mod bin;
pub mod transitions;

pub use bin::{BinKind, BinSnapshot};
pub use transitions::ReviewRequest;
