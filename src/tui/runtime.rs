use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

use crate::store::SnapshotStore;

use super::action::{Action, Effect};
use super::reducer::reduce;
use super::state::EditorState;

/// Editor runtime: owns the state, feeds actions through the reducer and
/// executes the effects it returns.
///
/// Async effects run on a dedicated executor task that awaits them one at a
/// time, in dispatch order, so a slow save can never be overtaken by a later
/// one. Completion actions flow back through the action channel and are
/// drained by [`process_actions`](Self::process_actions) on the next loop
/// turn.
pub struct Runtime {
    state: EditorState,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    effect_tx: mpsc::UnboundedSender<Effect>,

    store: Arc<dyn SnapshotStore>,
}

impl Runtime {
    pub fn new(initial_state: EditorState, store: Arc<dyn SnapshotStore>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();

        // Spawn effect executor task
        let action_tx_clone = action_tx.clone();
        tokio::spawn(async move {
            Self::run_effect_executor(&mut effect_rx, action_tx_clone).await;
        });

        Self {
            state: initial_state,
            action_tx,
            action_rx,
            effect_tx,
            store,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Dispatch an action through the reducer and execute the effect.
    ///
    /// Uses mem::take to move the state through the pure reducer without a
    /// clone.
    pub fn dispatch(&mut self, action: Action) {
        trace!("ACTION: Dispatching {:?}", action);
        let state = std::mem::take(&mut self.state);
        let (new_state, effect) = reduce(state, action);
        self.state = new_state;
        self.execute_effect(effect);
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Save(snapshot) => {
                // Turn the save into an async effect against our store; the
                // result comes back as an action.
                let store = self.store.clone();
                let future = Box::pin(async move {
                    match store.save(&snapshot).await {
                        Ok(ts) => Action::SnapshotSaved(ts),
                        Err(e) => Action::SaveFailed(e.to_string()),
                    }
                });
                let _ = self.effect_tx.send(Effect::Async(future));
            }
            Effect::Async(_) => {
                let _ = self.effect_tx.send(effect);
            }
        }
    }

    /// Drain the action queue, dispatching everything that async effects have
    /// produced. Returns the number of actions processed.
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    async fn run_effect_executor(
        effect_rx: &mut mpsc::UnboundedReceiver<Effect>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) {
        while let Some(effect) = effect_rx.recv().await {
            match effect {
                Effect::None | Effect::Save(_) => {}
                Effect::Async(future) => {
                    // Awaited inline: effects complete in the order they were
                    // dispatched, so the newest snapshot is the last write.
                    let action = future.await;
                    let _ = action_tx.send(action);
                }
            }
        }
    }
}
