use chrono::{DateTime, Local};
use std::future::Future;
use std::pin::Pin;

/// Everything the user (or an async task) can do to the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Act on the selected row: toggle, start editing, open the picker,
    /// add/remove a list item.
    Activate,
    InputChar(char),
    Backspace,
    /// Confirm the current edit buffer or picker choice.
    Commit,
    /// Abandon the current edit buffer or picker.
    Cancel,
    Save,
    SnapshotSaved(DateTime<Local>),
    SaveFailed(String),
    Quit,
}

/// Side effects returned by the reducer. The runtime interprets these; the
/// reducer itself stays pure.
pub enum Effect {
    None,
    /// Persist the given snapshot through the runtime's store.
    Save(serde_json::Value),
    /// Arbitrary async work that resolves to a follow-up action.
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Save(_) => write!(f, "Effect::Save(..)"),
            Effect::Async(_) => write!(f, "Effect::Async(..)"),
        }
    }
}
