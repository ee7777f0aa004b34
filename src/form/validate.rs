use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::schema::{ListKind, Setting, SettingKind};
use crate::value::Value;

/// What to do with `Value::Invalid` leaves at save time.
///
/// The original editor silently forwarded unparsed numeric input; here the
/// choice is explicit and configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Invalid values may be saved as their raw text (matches the original
    /// editor's behavior).
    #[default]
    Permissive,
    /// Persistence is blocked while any invalid value exists.
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// A numeric field holds unparseable input.
    InvalidNumber { raw: String },
    /// An object list item is missing one of its schema fields.
    MissingListField { name: String },
    /// A value's shape does not match its setting kind.
    ShapeMismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: FieldPath,
    pub kind: IssueKind,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::InvalidNumber { raw } => {
                write!(f, "{}: not a number: {:?}", self.path, raw)
            }
            IssueKind::MissingListField { name } => {
                write!(f, "{}: list item is missing field '{}'", self.path, name)
            }
            IssueKind::ShapeMismatch => write!(f, "{}: value shape does not match schema", self.path),
        }
    }
}

/// Walk the value tree against its schema, collecting every issue.
pub fn validate_tree(schema: &[Setting], tree: &Value) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(fields) = tree.as_object() else {
        issues.push(Issue {
            path: FieldPath::root(),
            kind: IssueKind::ShapeMismatch,
        });
        return issues;
    };
    for setting in schema {
        if matches!(setting.kind, SettingKind::Divider | SettingKind::Unknown) {
            continue;
        }
        let path = FieldPath::field(&setting.name);
        match fields.get(&setting.name) {
            Some(value) => check_field(setting, value, path, &mut issues),
            None => {}
        }
    }
    issues
}

/// Whether a save may proceed under the given policy.
pub fn save_allowed(policy: NumericPolicy, issues: &[Issue]) -> bool {
    match policy {
        NumericPolicy::Permissive => true,
        NumericPolicy::Strict => !issues
            .iter()
            .any(|issue| matches!(issue.kind, IssueKind::InvalidNumber { .. })),
    }
}

fn check_field(setting: &Setting, value: &Value, path: FieldPath, issues: &mut Vec<Issue>) {
    match (setting.kind, value) {
        (_, Value::Null) => {}
        (SettingKind::Int | SettingKind::Float, Value::Invalid(raw)) => issues.push(Issue {
            path,
            kind: IssueKind::InvalidNumber { raw: raw.clone() },
        }),
        (SettingKind::Int, Value::Int(_)) => {}
        (SettingKind::Float, Value::Float(_) | Value::Int(_)) => {}
        (SettingKind::Text | SettingKind::LongText | SettingKind::Select | SettingKind::Options, Value::Text(_)) => {}
        (SettingKind::Boolean, Value::Bool(_)) => {}
        (SettingKind::File, Value::File(_)) => {}
        (SettingKind::TagList, Value::Tags(_)) => {}
        (SettingKind::List, Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_list_item(setting, item, path.index(i), issues);
            }
        }
        _ => issues.push(Issue {
            path,
            kind: IssueKind::ShapeMismatch,
        }),
    }
}

fn check_list_item(setting: &Setting, item: &Value, path: FieldPath, issues: &mut Vec<Issue>) {
    match setting.list_of {
        Some(ListKind::Object) => {
            let Some(fields) = item.as_object() else {
                issues.push(Issue {
                    path,
                    kind: IssueKind::ShapeMismatch,
                });
                return;
            };
            for sub in &setting.list_schema {
                if matches!(sub.kind, SettingKind::Divider | SettingKind::Unknown) {
                    continue;
                }
                match fields.get(&sub.name) {
                    Some(value) => check_field(sub, value, path.child(&sub.name), issues),
                    None => issues.push(Issue {
                        path: path.clone(),
                        kind: IssueKind::MissingListField {
                            name: sub.name.clone(),
                        },
                    }),
                }
            }
        }
        Some(list_kind) => {
            if let Some(kind) = list_kind.as_scalar_kind() {
                let mut item_setting = setting.clone();
                item_setting.kind = kind;
                check_field(&item_setting, item, path, issues);
            }
        }
        None => {}
    }
}
