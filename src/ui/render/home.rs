use super::Frame;
use crate::config::HotkeyAction;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const BANNER: &str = "
       _               _    _ _     _
   ___| |__   ___  ___| | _| (_)___| |_
  / __| '_ \\ / _ \\/ __| |/ / | / __| __|
 | (__| | | |  __/ (__|   <| | \\__ \\ |_
  \\___|_| |_|\\___|\\___|_|\\_\\_|_|___/\\__|
";

const OPTIONS: [(HotkeyAction, &str); 3] = [
    (HotkeyAction::OpenNormal, "Normal checklists"),
    (HotkeyAction::OpenNonNormal, "Non-normal checklists"),
    (HotkeyAction::OpenResets, "Resets"),
];

/// Render the home screen.
///
pub fn home(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .margin(2)
        .split(size);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Home")
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, size);

    let banner = Paragraph::new(BANNER).style(styling::banner_style(theme));
    frame.render_widget(banner, rows[0]);

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
    frame.render_widget(Paragraph::new(lines), rows[1]);
}
