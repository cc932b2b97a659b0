use super::*;
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

const LOG_HEIGHT: u16 = 8;

/// Route the current view and render the resulting screen with its header,
/// optional log pane and footer.
///
pub fn all(frame: &mut Frame, state: &State, router: &Router) {
    let resolved = router.resolve(state.current_view(), &state.context());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    header(frame, rows[0], state, &resolved);
    match &resolved.inputs {
        ScreenInputs::Home(_) => home(frame, rows[1], state),
        ScreenInputs::Menu(inputs) => menu(frame, rows[1], inputs, state),
        ScreenInputs::Checklist(inputs) => checklist(frame, rows[1], inputs, state),
        ScreenInputs::Resets(inputs) => resets(frame, rows[1], inputs, state),
    }
    if state.is_log_visible() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[rows.len() - 1], state, &resolved);
}
