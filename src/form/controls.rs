use std::path::PathBuf;

use crate::path::FieldPath;
use crate::schema::{DynamicOptions, ListKind, Setting, SettingKind, SettingOption};
use crate::themes::ThemeOption;
use crate::value::Value;

/// Per-form inputs that are not part of the schema or the value tree.
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Supplemental option set for fields opting into image themes.
    pub dynamic_themes: Vec<ThemeOption>,
    /// Whole-form approval signal. No per-field override exists.
    pub user_approved: bool,
    /// Used only to build the share URL shown on gated fields.
    pub adventure_id: String,
    pub share_base_url: String,
}

impl FormContext {
    fn share_url(&self) -> String {
        format!(
            "{}/adventures/{}",
            self.share_base_url.trim_end_matches('/'),
            self.adventure_id
        )
    }
}

/// Gating info attached to a rendered-but-inert row.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub message: String,
    pub share_url: String,
}

const DEFAULT_GATE_MESSAGE: &str = "This setting requires approval.";

/// The control a row renders as. One entry per setting kind in the dispatch
/// table, plus the structural rows a list field expands into.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput { value: String, multiline: bool },
    NumberInput { display: String, invalid: bool, float: bool },
    Checkbox { checked: bool },
    Select { options: Vec<SettingOption>, current: String },
    RadioGroup { options: Vec<SettingOption>, current: String },
    TagEditor { tags: Vec<String> },
    FilePicker { path: Option<PathBuf> },
    Divider,
    /// Section row introducing a list field.
    ListHeader { len: usize },
    /// Remove control for one list element, addressed by position.
    ListItemRemove { index: usize },
    /// Trailing "add new" control of a list field.
    ListAdd,
}

/// One renderable row of the flattened form.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRow {
    /// Stable identity key for selection and editing state.
    pub path: FieldPath,
    pub label: String,
    pub description: Option<String>,
    pub depth: u16,
    /// Set when this field, or an ancestor, requires approval the user does
    /// not have. The row still mounts; interaction is replaced, not the data.
    pub gate: Option<Gate>,
    pub unused: bool,
    pub control: Control,
}

impl ControlRow {
    pub fn is_interactive(&self) -> bool {
        !matches!(self.control, Control::Divider | Control::ListHeader { .. })
    }
}

/// Flatten schema + value tree into control rows.
///
/// Pure: the same schema, tree and context always produce the same rows.
/// User edits are expressed as [`FormAction`](super::FormAction)s against the
/// row paths, never by mutating rows.
pub fn build_controls(schema: &[Setting], tree: &Value, ctx: &FormContext) -> Vec<ControlRow> {
    let mut rows = Vec::new();
    for setting in schema {
        let path = FieldPath::field(&setting.name);
        let value = tree.get_path(&path);
        push_setting(&mut rows, setting, value, path, 0, None, ctx);
    }
    rows
}

fn push_setting(
    rows: &mut Vec<ControlRow>,
    setting: &Setting,
    value: Option<&Value>,
    path: FieldPath,
    depth: u16,
    inherited_gate: Option<&Gate>,
    ctx: &FormContext,
) {
    let gate = gate_for(setting, inherited_gate, ctx);

    let control = match setting.kind {
        SettingKind::Unknown => return,
        SettingKind::Divider => Control::Divider,
        SettingKind::Text => Control::TextInput {
            value: display_of(value),
            multiline: false,
        },
        SettingKind::LongText => Control::TextInput {
            value: display_of(value),
            multiline: true,
        },
        SettingKind::Int => number_control(value, false),
        SettingKind::Float => number_control(value, true),
        SettingKind::Boolean => Control::Checkbox {
            checked: matches!(value, Some(Value::Bool(true))),
        },
        SettingKind::File => Control::FilePicker {
            path: match value {
                Some(Value::File(p)) => Some(p.clone()),
                _ => None,
            },
        },
        SettingKind::Select => Control::Select {
            options: select_options(setting, ctx),
            current: display_of(value),
        },
        SettingKind::Options => Control::RadioGroup {
            options: setting.options.clone(),
            current: display_of(value),
        },
        SettingKind::TagList => Control::TagEditor {
            // Absent values normalize to an empty sequence before the tag
            // editor ever sees them.
            tags: match value {
                Some(Value::Tags(tags)) => tags.clone(),
                _ => Vec::new(),
            },
        },
        SettingKind::List => {
            push_list(rows, setting, value, path, depth, gate.as_ref(), ctx);
            return;
        }
    };

    rows.push(ControlRow {
        path,
        label: setting.label.clone(),
        description: setting.description.clone(),
        depth,
        gate,
        unused: setting.unused,
        control,
    });
}

fn push_list(
    rows: &mut Vec<ControlRow>,
    setting: &Setting,
    value: Option<&Value>,
    path: FieldPath,
    depth: u16,
    gate: Option<&Gate>,
    ctx: &FormContext,
) {
    let empty = Vec::new();
    let items = value.and_then(Value::as_list).unwrap_or(&empty);

    rows.push(ControlRow {
        path: path.clone(),
        label: setting.label.clone(),
        description: setting.description.clone(),
        depth,
        gate: gate.cloned(),
        unused: setting.unused,
        control: Control::ListHeader { len: items.len() },
    });

    for (i, item) in items.iter().enumerate() {
        let item_path = path.index(i);
        rows.push(ControlRow {
            path: item_path.clone(),
            label: format!("#{}", i + 1),
            description: None,
            depth: depth + 1,
            gate: gate.cloned(),
            unused: false,
            control: Control::ListItemRemove { index: i },
        });

        match setting.list_of {
            Some(ListKind::Object) => {
                for sub in &setting.list_schema {
                    let sub_path = item_path.child(&sub.name);
                    let sub_value = item.as_object().and_then(|fields| fields.get(&sub.name));
                    push_setting(rows, sub, sub_value, sub_path, depth + 2, gate, ctx);
                }
            }
            Some(list_kind) => {
                // Scalar item: the same descriptor with the kind overridden,
                // rendered inline without its own label chrome.
                if let Some(kind) = list_kind.as_scalar_kind() {
                    let mut item_setting = setting.clone();
                    item_setting.kind = kind;
                    item_setting.label = String::new();
                    item_setting.description = None;
                    item_setting.unused = false;
                    push_setting(rows, &item_setting, Some(item), item_path.clone(), depth + 2, gate, ctx);
                }
            }
            None => {}
        }
    }

    rows.push(ControlRow {
        path,
        label: String::new(),
        description: None,
        depth: depth + 1,
        gate: gate.cloned(),
        unused: false,
        control: Control::ListAdd,
    });
}

fn gate_for(setting: &Setting, inherited: Option<&Gate>, ctx: &FormContext) -> Option<Gate> {
    if let Some(gate) = inherited {
        return Some(gate.clone());
    }
    if setting.requires_approval && !ctx.user_approved {
        return Some(Gate {
            message: setting
                .required_text
                .clone()
                .unwrap_or_else(|| DEFAULT_GATE_MESSAGE.to_string()),
            share_url: ctx.share_url(),
        });
    }
    None
}

fn number_control(value: Option<&Value>, float: bool) -> Control {
    let (display, invalid) = match value {
        Some(Value::Invalid(raw)) => (raw.clone(), true),
        Some(v) => (v.display_string(), false),
        None => (String::new(), false),
    };
    Control::NumberInput {
        display,
        invalid,
        float,
    }
}

fn select_options(setting: &Setting, ctx: &FormContext) -> Vec<SettingOption> {
    let mut options = setting.options.clone();
    if setting.include_dynamic_options == Some(DynamicOptions::ImageThemes) {
        options.extend(
            ctx.dynamic_themes
                .iter()
                .map(|theme| SettingOption::new(&theme.value, &theme.label)),
        );
    }
    options
}

fn display_of(value: Option<&Value>) -> String {
    value.map(Value::display_string).unwrap_or_default()
}
