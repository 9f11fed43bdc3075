use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::ConfirmState;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_confirm_delete(f: &mut Frame, area: Rect, confirm: &ConfirmState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    // Calculate popup area (50% width, 35% height, centered)
    let popup = popup_area(area, 50, 35);

    // Clear the background first - this prevents content from showing through
    f.render_widget(Clear, popup);

    let mut all_lines = Vec::new();

    all_lines.push(Line::from(Span::styled(
        "Delete this todo?",
        Style::default().fg(fg_color).bg(bg_color),
    )));
    all_lines.push(Line::from(Span::styled("", Style::default())));
    all_lines.push(Line::from(Span::styled(
        confirm.todo.text.clone(),
        Style::default().fg(fg_color).bg(bg_color),
    )));
    all_lines.push(Line::from(Span::styled("", Style::default())));

    let options = ["Delete", "Cancel"];
    for (index, option) in options.iter().enumerate() {
        let is_selected = index == confirm.selection;
        let prefix = if is_selected { "> " } else { "  " };
        let text = format!("{}{}", prefix, option);

        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(fg_color).bg(bg_color)
        };

        all_lines.push(Line::from(Span::styled(text, style)));
    }

    all_lines.push(Line::from(Span::styled("", Style::default())));
    all_lines.push(Line::from(Span::styled(
        "Use ↑↓ to navigate, Enter to confirm, Esc to cancel",
        Style::default().fg(fg_color).bg(bg_color),
    )));

    let paragraph = Paragraph::new(all_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true })
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
