use anyhow::{Context, Result};
use std::path::Path;

use crate::schema::{self, ListKind, Setting, SettingKind};

/// Print a schema file as an indented outline.
pub fn run(schema_path: &Path) -> Result<()> {
    let settings = schema::load(schema_path)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;
    for line in outline(&settings) {
        println!("{}", line);
    }
    Ok(())
}

fn outline(settings: &[Setting]) -> Vec<String> {
    let mut lines = Vec::new();
    push_outline(&mut lines, settings, 0);
    lines
}

fn push_outline(lines: &mut Vec<String>, settings: &[Setting], depth: usize) {
    let indent = "  ".repeat(depth);
    for setting in settings {
        let mut line = format!("{}{} [{}]", indent, setting.name, kind_name(setting.kind));
        if let Some(list_of) = setting.list_of {
            line.push_str(&format!(" of {}", list_kind_name(list_of)));
        }
        if !setting.label.is_empty() {
            line.push_str(&format!("  \"{}\"", setting.label));
        }
        if setting.requires_approval {
            line.push_str("  (requires approval)");
        }
        if setting.unused {
            line.push_str("  (unused)");
        }
        lines.push(line);
        if !setting.list_schema.is_empty() {
            push_outline(lines, &setting.list_schema, depth + 1);
        }
    }
}

fn kind_name(kind: SettingKind) -> &'static str {
    match kind {
        SettingKind::Text => "text",
        SettingKind::Int => "int",
        SettingKind::Float => "float",
        SettingKind::Boolean => "boolean",
        SettingKind::File => "file",
        SettingKind::Select => "select",
        SettingKind::Options => "options",
        SettingKind::LongText => "longtext",
        SettingKind::TagList => "tag-list",
        SettingKind::Divider => "divider",
        SettingKind::List => "list",
        SettingKind::Unknown => "unknown",
    }
}

fn list_kind_name(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Object => "object",
        ListKind::Text => "text",
        ListKind::Int => "int",
        ListKind::Float => "float",
        ListKind::Boolean => "boolean",
        ListKind::Select => "select",
        ListKind::LongText => "longtext",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outline_nests_list_schema() {
        let settings: Vec<Setting> = serde_json::from_value(json!([
            {"name": "title", "kind": "text", "label": "Title"},
            {"name": "npcs", "kind": "list", "list_of": "object",
             "requires_approval": true,
             "list_schema": [{"name": "name", "kind": "text"}]}
        ]))
        .unwrap();
        let lines = outline(&settings);
        assert_eq!(lines[0], "title [text]  \"Title\"");
        assert_eq!(lines[1], "npcs [list] of object  (requires approval)");
        assert_eq!(lines[2], "  name [text]");
    }
}
