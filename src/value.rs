use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::path::{FieldPath, Seg};
use crate::schema::{ListKind, Setting, SettingKind};

/// One node of the value tree being edited.
///
/// Tagged per the setting kind instead of a dynamic value: numeric parse
/// failures become an explicit `Invalid(raw)` variant rather than a silently
/// propagated not-a-number sentinel, so callers can decide whether to block
/// persistence on them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    File(PathBuf),
    Tags(Vec<String>),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
    /// Raw input that failed numeric parsing. Preserved verbatim.
    Invalid(String),
}

impl Value {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid(_))
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The text shown in an edit buffer or rendered control.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::File(p) => p.display().to_string(),
            Value::Tags(tags) => tags.join(", "),
            Value::List(items) => format!("{} item(s)", items.len()),
            Value::Object(_) => String::new(),
            Value::Invalid(raw) => raw.clone(),
        }
    }

    /// Resolve a path against this tree.
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        let mut node = self;
        for seg in path.segments() {
            node = match (node, seg) {
                (Value::Object(fields), Seg::Field(name)) => fields.get(name)?,
                (Value::List(items), Seg::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(node)
    }

    pub fn get_path_mut(&mut self, path: &FieldPath) -> Option<&mut Value> {
        let mut node = self;
        for seg in path.segments() {
            node = match (node, seg) {
                (Value::Object(fields), Seg::Field(name)) => fields.get_mut(name)?,
                (Value::List(items), Seg::Index(i)) => items.get_mut(*i)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Snapshot form. `Invalid` persists as its raw text so permissive saves
    /// round-trip what the user typed.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::File(p) => serde_json::Value::String(p.display().to_string()),
            Value::Tags(tags) => {
                serde_json::Value::Array(tags.iter().cloned().map(serde_json::Value::String).collect())
            }
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(fields) => serde_json::Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Invalid(raw) => serde_json::Value::String(raw.clone()),
        }
    }
}

/// Parse integer input the way the editor commits it: empty clears the field,
/// anything unparseable is kept as `Invalid`. Never fails.
pub fn parse_int(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<i64>() {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Invalid(raw.to_string()),
    }
}

/// Float twin of [`parse_int`].
pub fn parse_float(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::Invalid(raw.to_string()),
    }
}

/// Coerce a raw snapshot/default JSON value into the tagged form for a kind.
/// Mismatched shapes degrade to `Null`, never to an error.
pub fn coerce(kind: SettingKind, raw: &serde_json::Value) -> Value {
    use serde_json::Value as Json;
    match (kind, raw) {
        (_, Json::Null) => Value::Null,
        (SettingKind::Text | SettingKind::LongText | SettingKind::Select | SettingKind::Options, Json::String(s)) => {
            Value::Text(s.clone())
        }
        (SettingKind::Int, Json::Number(n)) => n.as_i64().map_or(Value::Null, Value::Int),
        (SettingKind::Int, Json::String(s)) => parse_int(s),
        (SettingKind::Float, Json::Number(n)) => n.as_f64().map_or(Value::Null, Value::Float),
        (SettingKind::Float, Json::String(s)) => parse_float(s),
        (SettingKind::Boolean, Json::Bool(b)) => Value::Bool(*b),
        (SettingKind::File, Json::String(s)) => Value::File(PathBuf::from(s)),
        (SettingKind::TagList, Json::Array(items)) => Value::Tags(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Build the session value tree for a schema from an optional snapshot.
///
/// Shape invariants enforced here:
/// - the tree carries no keys absent from the schema (unknown snapshot keys
///   are dropped);
/// - tag lists and lists are always present, empty rather than absent;
/// - every item of an object list carries all list_schema names.
pub fn normalize(schema: &[Setting], snapshot: Option<&serde_json::Value>) -> Value {
    let empty = serde_json::Map::new();
    let fields = snapshot
        .and_then(serde_json::Value::as_object)
        .unwrap_or(&empty);

    let mut tree = BTreeMap::new();
    for setting in schema {
        if matches!(setting.kind, SettingKind::Divider | SettingKind::Unknown) {
            continue;
        }
        let raw = fields.get(&setting.name).or(setting.default.as_ref());
        tree.insert(setting.name.clone(), normalize_field(setting, raw));
    }
    Value::Object(tree)
}

fn normalize_field(setting: &Setting, raw: Option<&serde_json::Value>) -> Value {
    match setting.kind {
        SettingKind::List => {
            let items = raw
                .and_then(serde_json::Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .map(|item| normalize_list_item(setting, item))
                        .collect()
                })
                .unwrap_or_default();
            Value::List(items)
        }
        SettingKind::TagList => match raw {
            Some(json) => match coerce(SettingKind::TagList, json) {
                Value::Null => Value::Tags(Vec::new()),
                tags => tags,
            },
            None => Value::Tags(Vec::new()),
        },
        kind => raw.map_or(Value::Null, |json| coerce(kind, json)),
    }
}

fn normalize_list_item(setting: &Setting, raw: &serde_json::Value) -> Value {
    match setting.list_of {
        Some(ListKind::Object) => {
            let empty = serde_json::Map::new();
            let fields = raw.as_object().unwrap_or(&empty);
            let mut item = BTreeMap::new();
            for sub in &setting.list_schema {
                if matches!(sub.kind, SettingKind::Divider | SettingKind::Unknown) {
                    continue;
                }
                let sub_raw = fields.get(&sub.name).or(sub.default.as_ref());
                item.insert(sub.name.clone(), normalize_field(sub, sub_raw));
            }
            Value::Object(item)
        }
        Some(list_kind) => {
            let kind = list_kind.as_scalar_kind().unwrap_or(SettingKind::Text);
            coerce(kind, raw)
        }
        None => Value::Null,
    }
}

/// The element appended by a list's "add" operation: an object with every
/// list_schema name present for object lists, an empty string for text
/// lists, otherwise null.
pub fn empty_list_item(setting: &Setting) -> Value {
    match setting.list_of {
        Some(ListKind::Object) => {
            let mut item = BTreeMap::new();
            for sub in &setting.list_schema {
                if matches!(sub.kind, SettingKind::Divider | SettingKind::Unknown) {
                    continue;
                }
                item.insert(sub.name.clone(), empty_for(sub));
            }
            Value::Object(item)
        }
        Some(ListKind::Text) => Value::Text(String::new()),
        _ => Value::Null,
    }
}

fn empty_for(setting: &Setting) -> Value {
    match setting.kind {
        SettingKind::TagList => Value::Tags(Vec::new()),
        SettingKind::List => Value::List(Vec::new()),
        SettingKind::Text => Value::Text(String::new()),
        _ => Value::Null,
    }
}
