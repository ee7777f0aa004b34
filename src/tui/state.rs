use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::config::Config;
use crate::form::{build_controls, ControlRow, FormContext, NumericPolicy};
use crate::schema::{Setting, SettingOption};
use crate::value::Value;

/// Input mode of the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Browse,
    /// Inline text entry for the selected row.
    Edit { buffer: String },
    /// Option picker modal for a select row.
    Select {
        options: Vec<SettingOption>,
        index: usize,
    },
}

/// Full editor state. Owned by the runtime, transformed by the reducer.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub schema: Arc<Vec<Setting>>,
    pub tree: Value,
    pub ctx: FormContext,
    pub numeric_policy: NumericPolicy,
    pub autosave: bool,
    /// Selected row index into the flattened control rows.
    pub selected: usize,
    pub mode: Mode,
    pub status: Option<String>,
    pub dirty: bool,
    pub last_saved: Option<DateTime<Local>>,
}

impl Default for EditorState {
    fn default() -> Self {
        EditorState {
            schema: Arc::new(Vec::new()),
            tree: Value::Object(Default::default()),
            ctx: FormContext::default(),
            numeric_policy: NumericPolicy::default(),
            autosave: true,
            selected: 0,
            mode: Mode::Browse,
            status: None,
            dirty: false,
            last_saved: None,
        }
    }
}

impl EditorState {
    pub fn new(schema: Vec<Setting>, tree: Value, ctx: FormContext, config: &Config) -> Self {
        let mut state = EditorState {
            schema: Arc::new(schema),
            tree,
            ctx,
            numeric_policy: config.numeric_policy,
            autosave: config.autosave,
            ..EditorState::default()
        };
        // Land on the first interactive row.
        let rows = state.rows();
        state.selected = rows
            .iter()
            .position(|r| r.is_interactive())
            .unwrap_or(0);
        state
    }

    /// Flatten the current schema + tree into renderable rows.
    ///
    /// Rebuilt on demand; the flattening is pure and the forms involved are
    /// small enough that caching has not been worth it.
    pub fn rows(&self) -> Vec<ControlRow> {
        build_controls(&self.schema, &self.tree, &self.ctx)
    }

    pub fn selected_row(&self) -> Option<ControlRow> {
        self.rows().into_iter().nth(self.selected)
    }
}
