use super::Frame;
use crate::checklist::progress::completion;
use crate::checklist::MenuGroup;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::{Resolved, ScreenInputs};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the header: where the user is and how far along each group is.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State, resolved: &Resolved) {
    let theme = state.theme();
    let location = match &resolved.inputs {
        ScreenInputs::Home(_) => "Home".to_string(),
        ScreenInputs::Menu(inputs) => inputs.group.title().to_string(),
        ScreenInputs::Checklist(inputs) => format!(
            "{} / {}",
            MenuGroup::from(inputs.group).title(),
            inputs.category.title
        ),
        ScreenInputs::Resets(_) => MenuGroup::Resets.title().to_string(),
    };

    let mut spans = vec![Span::styled(location, styling::active_block_title_style())];
    for group in [MenuGroup::Normal, MenuGroup::NonNormal] {
        let (done, total) = state
            .tree()
            .categories_in(group)
            .map(|c| completion(c, state.items()))
            .fold((0, 0), |(d, t), (cd, ct)| (d + cd, t + ct));
        spans.push(Span::styled(
            format!("   {}: {}/{}", group.title(), done, total),
            styling::muted_text_style(theme),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Checklists")
        .border_style(styling::normal_block_border_style(theme));
    let paragraph = Paragraph::new(Line::from(spans))
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(paragraph, size);
}
