use tracing::debug;

use crate::path::{FieldPath, Seg};
use crate::schema::Setting;
use crate::value::{empty_list_item, Value};

use super::action::FormAction;

/// Pure form reducer.
///
/// Takes the current tree and an action, returns the new tree. Never errors:
/// unknown paths, out-of-range indices and type-mismatched targets leave the
/// tree unchanged (logged at debug). Validation is the saving layer's job.
pub fn apply(tree: Value, schema: &[Setting], action: FormAction) -> Value {
    let mut new_tree = tree;
    match action {
        FormAction::UpdateScalar { path, value } => {
            match new_tree.get_path_mut(&path) {
                Some(slot) => *slot = value,
                None => debug!("FORM: UpdateScalar on unknown path {}", path),
            }
        }

        FormAction::Add { path } => {
            let Some(setting) = find_setting(schema, &path) else {
                debug!("FORM: Add on path {} with no schema entry", path);
                return new_tree;
            };
            let item = empty_list_item(setting);
            match new_tree.get_path_mut(&path) {
                Some(Value::List(items)) => items.push(item),
                Some(_) => debug!("FORM: Add target {} is not a list", path),
                None => debug!("FORM: Add on unknown path {}", path),
            }
        }

        FormAction::Remove { path, index } => match new_tree.get_path_mut(&path) {
            Some(Value::List(items)) => {
                if index < items.len() {
                    items.remove(index);
                } else {
                    debug!("FORM: Remove index {} out of range on {}", index, path);
                }
            }
            Some(_) => debug!("FORM: Remove target {} is not a list", path),
            None => debug!("FORM: Remove on unknown path {}", path),
        },

        FormAction::UpdateSubField {
            path,
            index,
            field,
            value,
        } => {
            let item_path = path.index(index).child(&field);
            match new_tree.get_path_mut(&item_path) {
                Some(slot) => *slot = value,
                None => debug!("FORM: UpdateSubField on unknown path {}", item_path),
            }
        }
    }
    new_tree
}

/// Walk the schema tree along a path's named segments, descending into
/// list_schema across index segments.
pub fn find_setting<'a>(schema: &'a [Setting], path: &FieldPath) -> Option<&'a Setting> {
    let mut siblings = schema;
    let mut current: Option<&Setting> = None;
    for seg in path.segments() {
        match seg {
            Seg::Field(name) => {
                current = siblings.iter().find(|s| &s.name == name);
                siblings = current.map(|s| s.list_schema.as_slice())?;
            }
            Seg::Index(_) => {
                // Indices do not consume a schema level; list items share
                // their parent's list_schema.
            }
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ListKind, SettingKind};
    use crate::value::normalize;
    use serde_json::json;

    fn npc_schema() -> Vec<Setting> {
        let mut list = Setting::scalar("npcs", SettingKind::List);
        list.list_of = Some(ListKind::Object);
        list.list_schema = vec![
            Setting::scalar("a", SettingKind::Text),
            Setting::scalar("b", SettingKind::Text),
        ];
        vec![Setting::scalar("title", SettingKind::Text), list]
    }

    fn text_list_schema() -> Vec<Setting> {
        let mut list = Setting::scalar("goals", SettingKind::List);
        list.list_of = Some(ListKind::Text);
        vec![list]
    }

    #[test]
    fn test_update_scalar() {
        let schema = npc_schema();
        let tree = normalize(&schema, None);
        let tree = apply(
            tree,
            &schema,
            FormAction::UpdateScalar {
                path: FieldPath::field("title"),
                value: Value::Text("The Long Road".to_string()),
            },
        );
        assert_eq!(
            tree.get_path(&FieldPath::field("title")),
            Some(&Value::Text("The Long Road".to_string()))
        );
    }

    #[test]
    fn test_add_then_remove_returns_to_empty() {
        let schema = text_list_schema();
        let path = FieldPath::field("goals");
        let tree = normalize(&schema, None);
        assert_eq!(tree.get_path(&path), Some(&Value::List(vec![])));

        // First transition: exactly one empty element.
        let tree = apply(tree, &schema, FormAction::Add { path: path.clone() });
        assert_eq!(
            tree.get_path(&path),
            Some(&Value::List(vec![Value::Text(String::new())]))
        );

        // Second transition: back to the original empty sequence.
        let tree = apply(
            tree,
            &schema,
            FormAction::Remove {
                path: path.clone(),
                index: 0,
            },
        );
        assert_eq!(tree.get_path(&path), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_add_object_item_has_all_fields() {
        let schema = npc_schema();
        let path = FieldPath::field("npcs");
        let tree = normalize(&schema, None);
        let tree = apply(tree, &schema, FormAction::Add { path: path.clone() });
        let item = tree
            .get_path(&path.index(0))
            .and_then(Value::as_object)
            .unwrap();
        assert!(item.contains_key("a"));
        assert!(item.contains_key("b"));
    }

    #[test]
    fn test_update_sub_field_preserves_siblings() {
        let schema = npc_schema();
        let snapshot = json!({
            "npcs": [
                {"a": "a0", "b": "b0"},
                {"a": "a1", "b": "b1"}
            ]
        });
        let tree = normalize(&schema, Some(&snapshot));
        let tree = apply(
            tree,
            &schema,
            FormAction::UpdateSubField {
                path: FieldPath::field("npcs"),
                index: 1,
                field: "b".to_string(),
                value: Value::Text("replaced".to_string()),
            },
        );

        // Item 0 untouched entirely.
        let item0 = tree
            .get_path(&FieldPath::field("npcs").index(0))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(item0.get("a"), Some(&Value::Text("a0".to_string())));
        assert_eq!(item0.get("b"), Some(&Value::Text("b0".to_string())));

        // Item 1 keeps "a", only "b" replaced.
        let item1 = tree
            .get_path(&FieldPath::field("npcs").index(1))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(item1.get("a"), Some(&Value::Text("a1".to_string())));
        assert_eq!(item1.get("b"), Some(&Value::Text("replaced".to_string())));
    }

    #[test]
    fn test_remove_is_positional() {
        let schema = text_list_schema();
        let snapshot = json!({"goals": ["x", "x", "y"]});
        let tree = normalize(&schema, Some(&snapshot));
        let tree = apply(
            tree,
            &schema,
            FormAction::Remove {
                path: FieldPath::field("goals"),
                index: 1,
            },
        );
        assert_eq!(
            tree.get_path(&FieldPath::field("goals")),
            Some(&Value::List(vec![
                Value::Text("x".to_string()),
                Value::Text("y".to_string()),
            ]))
        );
    }

    #[test]
    fn test_unknown_path_is_ignored() {
        let schema = npc_schema();
        let tree = normalize(&schema, None);
        let unchanged = apply(
            tree.clone(),
            &schema,
            FormAction::UpdateScalar {
                path: FieldPath::field("nonexistent"),
                value: Value::Bool(true),
            },
        );
        assert_eq!(unchanged, tree);
    }

    #[test]
    fn test_out_of_range_remove_is_ignored() {
        let schema = text_list_schema();
        let snapshot = json!({"goals": ["only"]});
        let tree = normalize(&schema, Some(&snapshot));
        let unchanged = apply(
            tree.clone(),
            &schema,
            FormAction::Remove {
                path: FieldPath::field("goals"),
                index: 5,
            },
        );
        assert_eq!(unchanged, tree);
    }

    #[test]
    fn test_add_on_scalar_target_is_ignored() {
        let schema = npc_schema();
        let tree = normalize(&schema, None);
        let unchanged = apply(
            tree.clone(),
            &schema,
            FormAction::Add {
                path: FieldPath::field("title"),
            },
        );
        assert_eq!(unchanged, tree);
    }

    #[test]
    fn test_deep_update_beyond_one_layer() {
        // Arbitrary nesting depth via full path addressing: a list inside a
        // list item.
        let mut inner = Setting::scalar("goals", SettingKind::List);
        inner.list_of = Some(ListKind::Text);
        let mut outer = Setting::scalar("npcs", SettingKind::List);
        outer.list_of = Some(ListKind::Object);
        outer.list_schema = vec![Setting::scalar("name", SettingKind::Text), inner];
        let schema = vec![outer];

        let snapshot = json!({"npcs": [{"name": "Ada", "goals": ["a", "b"]}]});
        let tree = normalize(&schema, Some(&snapshot));
        let deep = FieldPath::field("npcs").index(0).child("goals").index(1);
        let tree = apply(
            tree,
            &schema,
            FormAction::UpdateScalar {
                path: deep.clone(),
                value: Value::Text("deepened".to_string()),
            },
        );
        assert_eq!(tree.get_path(&deep), Some(&Value::Text("deepened".to_string())));
        assert_eq!(
            tree.get_path(&FieldPath::field("npcs").index(0).child("name")),
            Some(&Value::Text("Ada".to_string()))
        );
    }

    #[test]
    fn test_find_setting_through_list() {
        let schema = npc_schema();
        let path = FieldPath::field("npcs").index(3).child("b");
        let found = find_setting(&schema, &path).unwrap();
        assert_eq!(found.name, "b");
        let list = find_setting(&schema, &FieldPath::field("npcs")).unwrap();
        assert_eq!(list.name, "npcs");
    }
}
