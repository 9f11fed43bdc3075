use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    // Calculate popup area (55% width, 65% height, centered)
    let popup = popup_area(area, 55, 65);

    // Clear the background first - this prevents content from showing through
    f.render_widget(Clear, popup);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

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

fn build_help_text(config: &Config) -> String {
    let keys = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!(
        "  {} / {}: Move selection up/down\n",
        format_key_binding_for_display(&keys.list_up),
        format_key_binding_for_display(&keys.list_down)
    ));
    text.push_str("  ↑ / ↓: Move selection\n");
    text.push('\n');

    text.push_str("Actions:\n");
    text.push_str(&format!(
        "  {}: Add a new todo\n",
        format_key_binding_for_display(&keys.add)
    ));
    text.push_str(&format!(
        "  {}: Toggle completion of the selected todo\n",
        format_key_binding_for_display(&keys.toggle)
    ));
    text.push_str(&format!(
        "  {}: Edit the selected todo\n",
        format_key_binding_for_display(&keys.edit)
    ));
    text.push_str(&format!(
        "  {}: Delete the selected todo\n",
        format_key_binding_for_display(&keys.delete)
    ));
    text.push_str(&format!(
        "  {}: Refresh the list from the server\n",
        format_key_binding_for_display(&keys.refresh)
    ));
    text.push_str(&format!(
        "  {}: Copy todo text to clipboard\n",
        format_key_binding_for_display(&keys.copy)
    ));
    text.push('\n');

    text.push_str("Editing:\n");
    text.push_str("  Tab / Shift+Tab: Move between fields\n");
    text.push_str(&format!(
        "  {}: Save changes\n",
        format_key_binding_for_display(&keys.save)
    ));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("Other:\n");
    text.push_str(&format!(
        "  {}: This help\n",
        format_key_binding_for_display(&keys.help)
    ));
    text.push_str(&format!(
        "  {}: Quit\n",
        format_key_binding_for_display(&keys.quit)
    ));

    text
}
