use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::Config;
use crate::tui::widgets::color::parse_color;

/// One-line bar of key hints with bullet separators, fitting as many hints
/// as the width allows and ending with an ellipsis when truncated.
pub fn render_status_bar(f: &mut Frame, area: Rect, key_hints: &[String], config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let max_width = area.width as usize;
    let separator = " • ";
    let separator_len = separator.chars().count();

    let mut hints_text = String::new();
    for (i, hint) in key_hints.iter().enumerate() {
        let hint_len = hint.chars().count();
        let current_len = hints_text.chars().count();

        let would_be_len = if i == 0 {
            hint_len
        } else {
            current_len + separator_len + hint_len
        };

        if would_be_len > max_width {
            let ellipsis = "...";
            let ellipsis_len = ellipsis.chars().count();
            if !hints_text.is_empty() {
                if current_len + ellipsis_len <= max_width {
                    hints_text.push_str(ellipsis);
                } else {
                    let truncate_to = max_width.saturating_sub(ellipsis_len);
                    hints_text = hints_text.chars().take(truncate_to).collect::<String>();
                    hints_text.push_str(ellipsis);
                }
            } else if i == 0 {
                // Even the first hint is too long, truncate it with ellipsis
                let truncate_to = max_width.saturating_sub(ellipsis_len);
                hints_text = hint.chars().take(truncate_to).collect::<String>();
                hints_text.push_str(ellipsis);
            }
            break;
        }

        if i > 0 {
            hints_text.push_str(separator);
        }
        hints_text.push_str(hint);
    }

    let paragraph = Paragraph::new(hints_text)
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, area);
}
