use super::Frame;
use crate::config::HotkeyAction;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::ResetsInputs;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const OPTIONS: [(HotkeyAction, &str); 3] = [
    (HotkeyAction::ResetNormal, "Reset all normal checklists"),
    (HotkeyAction::ResetNonNormal, "Reset all non-normal checklists"),
    (HotkeyAction::ResetAll, "Reset everything"),
];

/// Render the resets screen.
///
pub fn resets(frame: &mut Frame, size: Rect, _inputs: &ResetsInputs, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Resets")
        .border_style(styling::active_block_border_style(theme));

    let lines: Vec<Line> = OPTIONS
        .iter()
        .map(|(action, label)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:>8}  ", state.hotkeys().display(*action)),
                    styling::active_block_title_style(),
                ),
                Span::styled(*label, styling::normal_text_style(theme)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), size);
}
