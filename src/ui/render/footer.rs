use super::Frame;
use crate::config::hotkeys::{build_footer_text, screen_actions, HotkeyAction};
use crate::state::State;
use crate::ui::theme::ColorSpec;
use crate::ui::{Resolved, ScreenInputs};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Footer actions for the resolved screen. Controls the screen did not
/// receive a callback for are left out.
///
fn footer_actions(resolved: &Resolved) -> Vec<(HotkeyAction, &'static str)> {
    screen_actions(resolved.screen)
        .iter()
        .copied()
        .filter(|(action, _)| match (&resolved.inputs, action) {
            (ScreenInputs::Menu(inputs), HotkeyAction::Resume) => inputs.on_resume.is_some(),
            (ScreenInputs::Checklist(inputs), HotkeyAction::NextChecklist) => inputs.show_next,
            _ => true,
        })
        .collect()
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State, resolved: &Resolved) {
    let theme = state.theme();
    let controls_text = format!(
        " {}",
        build_footer_text(state.hotkeys(), &footer_actions(resolved))
    );

    let (label, color): (&str, ColorSpec) = if state.is_log_visible() {
        ("LOG:", theme.footer_debug)
    } else {
        match resolved.inputs {
            ScreenInputs::Home(_) => ("HOME:", theme.footer_home),
            ScreenInputs::Menu(_) => ("MENU:", theme.footer_menu),
            ScreenInputs::Checklist(_) => ("CHECKLIST:", theme.footer_checklist),
            ScreenInputs::Resets(_) => ("RESETS:", theme.footer_resets),
        }
    };
    let controls_content = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            controls_text,
            Style::default().fg(theme.warning.to_color()),
        ),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::fixtures::tree;
    use crate::checklist::{ChecklistGroup, MenuGroup};
    use crate::state::{CurrentView, Dispatcher, ItemStateMap};
    use crate::ui::{AppContext, Router};

    fn actions_for(view: CurrentView, active_category: Option<&str>) -> Vec<HotkeyAction> {
        let tree = tree();
        let items = ItemStateMap::new();
        let (dispatcher, _rx) = Dispatcher::channel();
        let ctx = AppContext {
            tree: &tree,
            items: &items,
            active_category,
            focused_item: None,
            menu_cursor: 0,
            dispatcher: &dispatcher,
        };
        let resolved = Router::default().resolve(view, &ctx);
        footer_actions(&resolved)
            .into_iter()
            .map(|(action, _)| action)
            .collect()
    }

    #[test]
    fn test_resume_only_on_normal_menu() {
        assert!(actions_for(CurrentView::Menu(MenuGroup::Normal), None)
            .contains(&HotkeyAction::Resume));
        assert!(!actions_for(CurrentView::Menu(MenuGroup::NonNormal), None)
            .contains(&HotkeyAction::Resume));
    }

    #[test]
    fn test_next_only_when_successor_exists() {
        let view = CurrentView::Checklist(ChecklistGroup::Normal);
        assert!(actions_for(view, Some("preflight")).contains(&HotkeyAction::NextChecklist));
        assert!(!actions_for(view, Some("taxi")).contains(&HotkeyAction::NextChecklist));
    }
}
