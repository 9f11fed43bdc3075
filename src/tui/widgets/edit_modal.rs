use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::{EditField, EditForm};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Centered modal for editing a todo: text field, completed checkbox, and
/// Save/Cancel buttons. The active field is highlighted; the text field gets
/// the terminal cursor.
pub fn render_edit_modal(f: &mut Frame, area: Rect, form: &mut EditForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup = popup_area(area, 60, 40);

    // Clear the background first - this prevents content from showing through
    f.render_widget(Clear, popup);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Edit Todo")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Text field
            Constraint::Length(1), // Completed checkbox
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    // Text field
    let text_active = form.current_field == EditField::Text;
    let border_style = if text_active {
        Style::default().fg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let viewport_width = rows[0].width.saturating_sub(2) as usize;
    form.text.update_scroll(viewport_width);
    let text_field = Paragraph::new(form.text.visible_content(viewport_width))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Text")
                .border_style(border_style),
        )
        .style(Style::default().fg(fg_color));
    f.render_widget(text_field, rows[0]);
    if text_active {
        f.set_cursor_position((
            rows[0].x + 1 + form.text.cursor_offset() as u16,
            rows[0].y + 1,
        ));
    }

    // Completed checkbox
    let checkbox = format!("[{}] Completed", if form.completed { "x" } else { " " });
    let checkbox_style = if form.current_field == EditField::Completed {
        Style::default().fg(highlight_fg).bg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    f.render_widget(Paragraph::new(checkbox).style(checkbox_style), rows[1]);

    // Buttons
    let save_style = if form.current_field == EditField::Save {
        Style::default().fg(highlight_fg).bg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let cancel_style = if form.current_field == EditField::Cancel {
        Style::default().fg(highlight_fg).bg(highlight_bg)
    } else {
        Style::default().fg(fg_color)
    };
    let buttons = Line::from(vec![
        Span::styled("[ Save ]", save_style),
        Span::raw("   "),
        Span::styled("[ Cancel ]", cancel_style),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        rows[3],
    );
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
