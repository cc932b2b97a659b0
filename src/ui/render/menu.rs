use super::Frame;
use crate::checklist::progress::{completion, is_category_complete};
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::MenuInputs;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render the category menu of one group.
///
pub fn menu(frame: &mut Frame, size: Rect, inputs: &MenuInputs, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            inputs.group.title(),
            styling::active_block_title_style(),
        ));

    if inputs.categories.is_empty() {
        let list = List::new(vec![ListItem::new("No checklists")])
            .style(styling::muted_text_style(theme))
            .block(block);
        frame.render_widget(list, size);
        return;
    }

    let items: Vec<ListItem> = inputs
        .categories
        .iter()
        .map(|category| {
            let (done, total) = completion(category, inputs.items);
            let marker = match is_category_complete(category, inputs.items) {
                Some(true) => "[x]",
                _ => "[ ]",
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), styling::muted_text_style(theme)),
                Span::styled(category.title.clone(), styling::normal_text_style(theme)),
                Span::styled(
                    format!("  {}/{}", done, total),
                    styling::muted_text_style(theme),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::current_list_item_style(theme));
    let mut list_state = ListState::default();
    list_state.select(Some(inputs.cursor.min(inputs.categories.len() - 1)));
    frame.render_stateful_widget(list, size, &mut list_state);
}
