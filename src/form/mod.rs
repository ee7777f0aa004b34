//! The form engine: pure state transitions over the value tree, plus the
//! pure flattening of schema + tree into renderable control rows.

pub mod action;
pub mod controls;
pub mod reducer;
pub mod validate;

pub use action::FormAction;
pub use controls::{build_controls, Control, ControlRow, FormContext, Gate};
pub use reducer::apply;
pub use validate::{save_allowed, validate_tree, Issue, IssueKind, NumericPolicy};
