use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

/// The "new todo" text box at the top of the screen. Focused while the app
/// is in Input mode; otherwise shows a hint (or the not-yet-submitted text,
/// which survives a failed create).
pub fn render_input_box(f: &mut Frame, area: Rect, app: &mut App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let focused = app.ui.mode == Mode::Input;
    let border_style = if focused {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };

    let viewport_width = area.width.saturating_sub(2) as usize;
    app.input.update_scroll(viewport_width);

    let (content, style) = if !focused && app.input.is_empty() {
        (
            format!(
                "Press '{}' to add a todo",
                format_key_binding_for_display(&app.config.key_bindings.add)
            ),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            app.input.visible_content(viewport_width),
            Style::default().fg(fg_color),
        )
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("New Todo")
                .border_style(border_style),
        )
        .style(style);
    f.render_widget(paragraph, area);

    if focused {
        f.set_cursor_position((
            area.x + 1 + app.input.cursor_offset() as u16,
            area.y + 1,
        ));
    }
}
