use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::ChecklistInputs;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, List, ListItem, ListState,
    },
};

const COMPLETE_TEXT: &str = "CHECKLIST COMPLETE";

/// Render the open checklist: one row per item, challenge on the left and
/// expected response on the right.
///
pub fn checklist(frame: &mut Frame, size: Rect, inputs: &ChecklistInputs, state: &State) {
    let theme = state.theme();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            format!("{} / {}", inputs.category.title, inputs.checklist.title),
            styling::active_block_title_style(),
        ));

    let complete = !inputs.statuses.is_empty() && inputs.statuses.iter().all(|s| s.is_complete());
    if complete {
        block = block.title(
            Title::from(Span::styled(COMPLETE_TEXT, styling::banner_style(theme)))
                .position(Position::Bottom),
        );
    }
    if inputs.show_next {
        block = block.title(
            Title::from(format!(
                "{}: next checklist",
                state.hotkeys().display(crate::config::HotkeyAction::NextChecklist)
            ))
            .position(Position::Bottom),
        );
    }

    let width = size.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = inputs
        .checklist
        .items
        .iter()
        .zip(inputs.statuses.iter())
        .map(|(item, status)| {
            let marker = format!("{:<6}", styling::item_status_marker(*status));
            let used = marker.chars().count()
                + item.challenge.chars().count()
                + item.response.chars().count()
                + 2;
            let dots = ".".repeat(width.saturating_sub(used));
            let style = styling::item_status_style(theme, *status);
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(item.challenge.clone(), style),
                Span::styled(format!(" {} ", dots), styling::muted_text_style(theme)),
                Span::styled(item.response.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default();
    list_state.select(inputs.focused);
    frame.render_stateful_widget(list, size, &mut list_state);
}
