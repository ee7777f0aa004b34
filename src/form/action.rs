use crate::path::FieldPath;
use crate::value::Value;

/// One user-driven change to the value tree.
///
/// Every action carries the full path of the field it targets, so nested
/// updates address any depth directly instead of mutating one layer at a
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Replace the value at `path`.
    UpdateScalar { path: FieldPath, value: Value },
    /// Append a kind-appropriate empty element to the list at `path`.
    Add { path: FieldPath },
    /// Remove the element at `index` (by position) from the list at `path`.
    Remove { path: FieldPath, index: usize },
    /// Replace one named field of the object at `index` in the list at
    /// `path`, leaving every sibling item and sibling field untouched.
    UpdateSubField {
        path: FieldPath,
        index: usize,
        field: String,
        value: Value,
    },
}
