use tracing::debug;

use crate::form::{self, Control, ControlRow, FormAction};
use crate::value::{parse_float, parse_int, Value};

use super::action::{Action, Effect};
use super::state::{EditorState, Mode};

/// Pure editor reducer: state + action in, new state + effect out.
///
/// All persistence happens through the returned effect; the reducer never
/// touches the filesystem.
pub fn reduce(mut state: EditorState, action: Action) -> (EditorState, Effect) {
    match action {
        Action::SnapshotSaved(ts) => {
            state.dirty = false;
            state.last_saved = Some(ts);
            state.status = Some(format!("Saved at {}", ts.format("%H:%M:%S")));
            (state, Effect::None)
        }
        Action::SaveFailed(err) => {
            state.status = Some(format!("Save failed: {}", err));
            (state, Effect::None)
        }
        Action::Quit => (state, Effect::None),
        action => match state.mode.clone() {
            Mode::Browse => browse(state, action),
            Mode::Edit { buffer } => edit(state, buffer, action),
            Mode::Select { options, index } => select(state, options, index, action),
        },
    }
}

fn browse(mut state: EditorState, action: Action) -> (EditorState, Effect) {
    match action {
        Action::MoveUp => {
            state.status = None;
            move_selection(&mut state, -1);
            (state, Effect::None)
        }
        Action::MoveDown => {
            state.status = None;
            move_selection(&mut state, 1);
            (state, Effect::None)
        }
        Action::Activate => activate(state),
        Action::Save => {
            let effect = try_save(&mut state);
            (state, effect)
        }
        _ => (state, Effect::None),
    }
}

fn activate(mut state: EditorState) -> (EditorState, Effect) {
    let Some(row) = state.selected_row() else {
        return (state, Effect::None);
    };

    // Gated rows stay visible but inert; activation surfaces the overlay
    // text and the share link instead of the control.
    if let Some(gate) = &row.gate {
        state.status = Some(format!("{} Share to get approval: {}", gate.message, gate.share_url));
        return (state, Effect::None);
    }

    match row.control {
        Control::Checkbox { checked } => {
            let effect = apply_form_action(
                &mut state,
                FormAction::UpdateScalar {
                    path: row.path,
                    value: Value::Bool(!checked),
                },
            );
            (state, effect)
        }
        Control::TextInput { value, .. } => {
            state.mode = Mode::Edit { buffer: value };
            (state, Effect::None)
        }
        Control::NumberInput { display, .. } => {
            state.mode = Mode::Edit { buffer: display };
            (state, Effect::None)
        }
        Control::TagEditor { tags } => {
            state.mode = Mode::Edit {
                buffer: tags.join(", "),
            };
            (state, Effect::None)
        }
        Control::FilePicker { path } => {
            state.mode = Mode::Edit {
                buffer: path
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            (state, Effect::None)
        }
        Control::Select { options, current } => {
            if options.is_empty() {
                debug!("TUI: select field {} has no options", row.path);
                return (state, Effect::None);
            }
            let index = options.iter().position(|o| o.value == current).unwrap_or(0);
            state.mode = Mode::Select { options, index };
            (state, Effect::None)
        }
        Control::RadioGroup { options, current } => {
            if options.is_empty() {
                return (state, Effect::None);
            }
            // Activation cycles to the next option.
            let i = options.iter().position(|o| o.value == current);
            let next = match i {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            };
            let value = Value::Text(options[next].value.clone());
            let effect = apply_form_action(
                &mut state,
                FormAction::UpdateScalar {
                    path: row.path,
                    value,
                },
            );
            (state, effect)
        }
        Control::ListItemRemove { index } => {
            let effect = apply_form_action(
                &mut state,
                FormAction::Remove {
                    path: row.path.parent(),
                    index,
                },
            );
            (state, effect)
        }
        Control::ListAdd => {
            let effect = apply_form_action(&mut state, FormAction::Add { path: row.path });
            (state, effect)
        }
        Control::Divider | Control::ListHeader { .. } => (state, Effect::None),
    }
}

fn edit(mut state: EditorState, mut buffer: String, action: Action) -> (EditorState, Effect) {
    match action {
        Action::InputChar(c) => {
            buffer.push(c);
            state.mode = Mode::Edit { buffer };
            (state, Effect::None)
        }
        Action::Backspace => {
            buffer.pop();
            state.mode = Mode::Edit { buffer };
            (state, Effect::None)
        }
        Action::Cancel => {
            state.mode = Mode::Browse;
            (state, Effect::None)
        }
        Action::Commit => {
            state.mode = Mode::Browse;
            let Some(row) = state.selected_row() else {
                return (state, Effect::None);
            };
            let value = commit_value(&row, &buffer);
            let effect = apply_form_action(
                &mut state,
                FormAction::UpdateScalar {
                    path: row.path,
                    value,
                },
            );
            (state, effect)
        }
        _ => {
            state.mode = Mode::Edit { buffer };
            (state, Effect::None)
        }
    }
}

/// Turn the edit buffer into a value, per the control being edited.
fn commit_value(row: &ControlRow, buffer: &str) -> Value {
    match &row.control {
        Control::NumberInput { float: false, .. } => parse_int(buffer),
        Control::NumberInput { float: true, .. } => parse_float(buffer),
        Control::TagEditor { .. } => Value::Tags(
            buffer
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        ),
        Control::FilePicker { .. } => {
            if buffer.trim().is_empty() {
                Value::Null
            } else {
                Value::File(buffer.trim().into())
            }
        }
        _ => Value::Text(buffer.to_string()),
    }
}

fn select(
    mut state: EditorState,
    options: Vec<crate::schema::SettingOption>,
    index: usize,
    action: Action,
) -> (EditorState, Effect) {
    match action {
        Action::MoveUp => {
            let index = index.saturating_sub(1);
            state.mode = Mode::Select { options, index };
            (state, Effect::None)
        }
        Action::MoveDown => {
            let index = (index + 1).min(options.len().saturating_sub(1));
            state.mode = Mode::Select { options, index };
            (state, Effect::None)
        }
        Action::Cancel => {
            state.mode = Mode::Browse;
            (state, Effect::None)
        }
        Action::Commit => {
            state.mode = Mode::Browse;
            let Some(row) = state.selected_row() else {
                return (state, Effect::None);
            };
            let Some(option) = options.get(index) else {
                return (state, Effect::None);
            };
            let value = Value::Text(option.value.clone());
            let effect = apply_form_action(
                &mut state,
                FormAction::UpdateScalar {
                    path: row.path,
                    value,
                },
            );
            (state, effect)
        }
        _ => {
            state.mode = Mode::Select { options, index };
            (state, Effect::None)
        }
    }
}

/// Run a form action through the pure form reducer, mark the tree dirty and
/// autosave if configured.
fn apply_form_action(state: &mut EditorState, action: FormAction) -> Effect {
    state.tree = form::apply(std::mem::take(&mut state.tree), &state.schema, action);
    state.dirty = true;

    // Removing rows can leave the selection past the end.
    let len = state.rows().len();
    if len > 0 && state.selected >= len {
        state.selected = len - 1;
    }

    if state.autosave {
        try_save(state)
    } else {
        Effect::None
    }
}

/// Validate and, if the policy allows, emit a save effect.
fn try_save(state: &mut EditorState) -> Effect {
    let issues = form::validate_tree(&state.schema, &state.tree);
    if !form::save_allowed(state.numeric_policy, &issues) {
        let invalid = issues
            .iter()
            .filter(|i| matches!(i.kind, form::IssueKind::InvalidNumber { .. }))
            .count();
        state.status = Some(format!(
            "Save blocked: {} invalid number value(s)",
            invalid
        ));
        return Effect::None;
    }
    Effect::Save(state.tree.to_json())
}

fn move_selection(state: &mut EditorState, dir: isize) {
    let rows = state.rows();
    if rows.is_empty() {
        return;
    }
    let mut i = state.selected as isize;
    loop {
        i += dir;
        if i < 0 || i as usize >= rows.len() {
            return; // no interactive row further in that direction
        }
        if rows[i as usize].is_interactive() {
            state.selected = i as usize;
            return;
        }
    }
}
