use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// The control kind of one editable field.
///
/// Unknown kind strings deserialize to `Unknown`, which renders nothing
/// rather than failing the whole schema load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    Text,
    Int,
    Float,
    Boolean,
    File,
    Select,
    Options,
    #[serde(rename = "longtext")]
    LongText,
    TagList,
    Divider,
    List,
    #[serde(other)]
    Unknown,
}

/// Element kind for `List` fields: nested object records, or one scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListKind {
    Object,
    Text,
    Int,
    Float,
    Boolean,
    Select,
    #[serde(rename = "longtext")]
    LongText,
}

impl ListKind {
    /// The scalar kind each list item renders as, or None for object lists.
    pub fn as_scalar_kind(self) -> Option<SettingKind> {
        match self {
            ListKind::Object => None,
            ListKind::Text => Some(SettingKind::Text),
            ListKind::Int => Some(SettingKind::Int),
            ListKind::Float => Some(SettingKind::Float),
            ListKind::Boolean => Some(SettingKind::Boolean),
            ListKind::Select => Some(SettingKind::Select),
            ListKind::LongText => Some(SettingKind::LongText),
        }
    }
}

/// One choice in a `Select` or `Options` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettingOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio_sample: Option<String>,
}

impl SettingOption {
    pub fn new(value: &str, label: &str) -> Self {
        SettingOption {
            value: value.to_string(),
            label: label.to_string(),
            description: None,
            audio_sample: None,
        }
    }
}

/// Externally supplied option sets that can be merged into a field's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DynamicOptions {
    #[serde(rename = "image-themes")]
    ImageThemes,
}

/// Declarative descriptor for one editable field.
///
/// Immutable configuration: the editor never mutates the schema, only the
/// value tree shaped by it.
#[derive(Debug, Clone, Deserialize)]
pub struct Setting {
    pub name: String,
    pub kind: SettingKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw JSON default, coerced per kind when the value tree is built.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub options: Vec<SettingOption>,
    #[serde(default)]
    pub list_of: Option<ListKind>,
    #[serde(default)]
    pub list_schema: Vec<Setting>,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub required_text: Option<String>,
    #[serde(default)]
    pub include_dynamic_options: Option<DynamicOptions>,
    /// Present in the schema but not yet wired into gameplay.
    #[serde(default)]
    pub unused: bool,
}

impl Setting {
    /// Bare scalar descriptor, mostly for tests and fixtures.
    pub fn scalar(name: &str, kind: SettingKind) -> Self {
        Setting {
            name: name.to_string(),
            kind,
            label: name.to_string(),
            description: None,
            default: None,
            options: Vec::new(),
            list_of: None,
            list_schema: Vec::new(),
            requires_approval: false,
            required_text: None,
            include_dynamic_options: None,
            unused: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("duplicate field name '{0}' among siblings")]
    DuplicateName(String),

    #[error("list field '{0}' is missing list_of")]
    ListWithoutElementKind(String),

    #[error("object list field '{0}' is missing list_schema")]
    ObjectListWithoutSchema(String),

    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Check structural invariants of a schema tree.
///
/// Sibling names must be unique within one setting list or one list_schema,
/// and list fields must declare their element shape.
pub fn validate(settings: &[Setting]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for setting in settings {
        if !seen.insert(setting.name.as_str()) {
            return Err(SchemaError::DuplicateName(setting.name.clone()));
        }
        if setting.kind == SettingKind::List {
            match setting.list_of {
                None => return Err(SchemaError::ListWithoutElementKind(setting.name.clone())),
                Some(ListKind::Object) if setting.list_schema.is_empty() => {
                    return Err(SchemaError::ObjectListWithoutSchema(setting.name.clone()));
                }
                Some(_) => {}
            }
        }
        if !setting.list_schema.is_empty() {
            validate(&setting.list_schema)?;
        }
    }
    Ok(())
}

/// Load and validate a schema from a JSON file.
pub fn load(path: &Path) -> Result<Vec<Setting>, SchemaError> {
    let content = fs::read_to_string(path)?;
    let settings: Vec<Setting> = serde_json::from_str(&content)?;
    validate(&settings)?;
    Ok(settings)
}
