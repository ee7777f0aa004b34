// Module declarations
pub mod action;
pub mod keys;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod widgets;

pub use action::{Action, Effect};
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::{EditorState, Mode};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::config::Config;
use crate::form::FormContext;
use crate::schema::Setting;
use crate::store::{self, SnapshotStore};
use crate::tui::widgets::{render_form, render_select_modal, render_status_bar};

/// Main entry point for TUI mode
pub async fn run(
    schema: Vec<Setting>,
    store: Arc<dyn SnapshotStore>,
    ctx: FormContext,
    config: Config,
) -> anyhow::Result<()> {
    let tree = store::load_tree(store.as_ref(), &schema).await?;
    let initial_state = EditorState::new(schema, tree, ctx, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = config.theme.clone();
    let mut runtime = Runtime::new(initial_state, store);

    // Main loop
    loop {
        // Drain actions produced by async effects first, so save completions
        // are visible on this frame.
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::debug!("LOOP: Processed {} actions", actions_processed);
            continue;
        }

        terminal.draw(|f| {
            let area = f.area();
            let footer_height = 2u16.min(area.height);
            let form_area = Rect::new(
                area.x,
                area.y,
                area.width,
                area.height.saturating_sub(footer_height),
            );
            let footer_area = Rect::new(
                area.x,
                area.y + area.height.saturating_sub(footer_height),
                area.width,
                footer_height,
            );

            let state = runtime.state();
            render_form(state, form_area, f.buffer_mut(), &theme);
            render_status_bar(state, footer_area, f.buffer_mut(), &theme);

            if let Mode::Select { options, index } = &state.mode {
                render_select_modal(options, *index, area, f.buffer_mut(), &theme);
            }
        })?;

        // Poll for keyboard events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let Some(action) = key_to_action(key, runtime.state()) else {
                    continue;
                };
                if matches!(action, Action::Quit) {
                    tracing::debug!("ACTION: Quitting editor");
                    break;
                }
                runtime.dispatch(action);
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
