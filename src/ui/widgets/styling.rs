use crate::state::ItemStatus;
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the list item under the cursor.
///
pub fn current_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

/// Return the style for secondary text.
///
pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default().fg(theme.banner.to_color())
}

/// Return the style for a checklist item in the given status.
///
pub fn item_status_style(theme: &Theme, status: ItemStatus) -> Style {
    match status {
        ItemStatus::Unchecked => normal_text_style(theme),
        ItemStatus::Checked => Style::default().fg(theme.success.to_color()),
        ItemStatus::Overridden => Style::default().fg(theme.warning.to_color()),
        ItemStatus::CheckedOverridden => Style::default()
            .fg(theme.warning.to_color())
            .add_modifier(Modifier::ITALIC),
    }
}

/// Return the marker drawn in front of a checklist item.
///
pub fn item_status_marker(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Unchecked => "[ ]",
        ItemStatus::Checked => "[x]",
        ItemStatus::Overridden => "[o]",
        ItemStatus::CheckedOverridden => "[x/o]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_item_status_style() {
        let theme = Theme::default();
        assert_eq!(
            item_status_style(&theme, ItemStatus::Checked).fg,
            Some(theme.success.to_color())
        );
        assert_eq!(
            item_status_style(&theme, ItemStatus::Overridden).fg,
            Some(theme.warning.to_color())
        );
        assert_ne!(
            item_status_style(&theme, ItemStatus::Unchecked).fg,
            Some(Color::Reset)
        );
    }

    #[test]
    fn test_item_status_marker_is_unique() {
        let markers: std::collections::HashSet<_> =
            ItemStatus::ALL.iter().map(|s| item_status_marker(*s)).collect();
        assert_eq!(markers.len(), ItemStatus::ALL.len());
    }
}
