use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::form::{self, NumericPolicy};
use crate::schema;
use crate::store::{FileSnapshotStore, SnapshotStore};
use crate::value::normalize;

/// Check a schema file, and optionally a snapshot against it.
///
/// Prints one line per finding. Fails when the schema itself is malformed,
/// or when `strict` and the snapshot holds invalid numeric values.
pub async fn run(schema_path: &Path, snapshot_path: Option<PathBuf>, strict: bool) -> Result<()> {
    let settings = schema::load(schema_path)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;
    println!("Schema OK: {} top-level settings", settings.len());

    let Some(snapshot_path) = snapshot_path else {
        return Ok(());
    };

    let store = FileSnapshotStore::new(&snapshot_path);
    let snapshot = store
        .load()
        .await
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    if snapshot.is_none() {
        println!("Snapshot {} does not exist yet", snapshot_path.display());
        return Ok(());
    }

    let tree = normalize(&settings, snapshot.as_ref());
    let issues = form::validate_tree(&settings, &tree);

    if issues.is_empty() {
        println!("Snapshot OK");
        return Ok(());
    }

    for issue in &issues {
        println!("  {}", issue);
    }

    let policy = if strict {
        NumericPolicy::Strict
    } else {
        NumericPolicy::Permissive
    };
    if !form::save_allowed(policy, &issues) {
        bail!("{} issue(s), snapshot rejected under strict policy", issues.len());
    }
    println!("{} issue(s), accepted under permissive policy", issues.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn write(dir: &Path, name: &str, content: &serde_json::Value) -> PathBuf {
        let path = dir.join(name);
        tokio::fs::write(&path, serde_json::to_string_pretty(content).unwrap())
            .await
            .unwrap();
        path
    }

    #[tokio::test]
    async fn test_valid_schema_and_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(
            dir.path(),
            "schema.json",
            &json!([{"name": "max_turns", "kind": "int"}]),
        )
        .await;
        let snapshot = write(dir.path(), "snapshot.json", &json!({"max_turns": 5})).await;
        run(&schema, Some(snapshot), true).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Duplicate sibling names are a schema error.
        let schema = write(
            dir.path(),
            "schema.json",
            &json!([
                {"name": "x", "kind": "text"},
                {"name": "x", "kind": "int"}
            ]),
        )
        .await;
        assert!(run(&schema, None, false).await.is_err());
    }

    #[tokio::test]
    async fn test_strict_rejects_invalid_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(
            dir.path(),
            "schema.json",
            &json!([{"name": "max_turns", "kind": "int"}]),
        )
        .await;
        let snapshot = write(dir.path(), "snapshot.json", &json!({"max_turns": "abc"})).await;
        assert!(run(&schema, Some(snapshot.clone()), true).await.is_err());
        // Permissive accepts the same snapshot.
        run(&schema, Some(snapshot), false).await.unwrap();
    }
}
