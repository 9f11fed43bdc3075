use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::Config;
use crate::models::Todo;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils::format_created_at;

/// Render the todo list: one two-line row per record (checkbox + text, then
/// the formatted creation time), or the empty-state placeholder.
pub fn render_todo_list(
    f: &mut Frame,
    area: Rect,
    todos: &[Todo],
    list_state: &mut ListState,
    config: &Config,
) {
    // Account for borders and the checkbox prefix when truncating
    let max_width = area.width.saturating_sub(4) as usize;

    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let title = format!("Todos ({})", todos.len());

    if todos.is_empty() {
        let paragraph = Paragraph::new("No todos yet. Add one to get started!")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(fg_color))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = todos
        .iter()
        .map(|todo| {
            let checkbox = if todo.completed { "[x]" } else { "[ ]" };

            let mut text = todo.text.clone();
            let prefix_width = 4; // "[x] "
            if text.chars().count() + prefix_width > max_width {
                text = text
                    .chars()
                    .take(max_width.saturating_sub(prefix_width + 3))
                    .collect::<String>()
                    + "...";
            }

            let text_style = if todo.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(fg_color)
            };

            let first_line = Line::from(vec![
                Span::styled(format!("{} ", checkbox), Style::default().fg(fg_color)),
                Span::styled(text, text_style),
            ]);
            let date_line = Line::from(Span::styled(
                format!("    Created: {}", format_created_at(&todo.create_at)),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(vec![first_line, date_line])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    f.render_stateful_widget(list, area, list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn todo(id: i64, text: &str, completed: bool) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            completed,
            create_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    fn draw(todos: &[Todo]) -> Buffer {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut list_state = ListState::default();
        let config = Config::default();
        terminal
            .draw(|f| {
                let area = f.area();
                render_todo_list(f, area, todos, &mut list_state, &config);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in buffer.area.top()..buffer.area.bottom() {
            for x in buffer.area.left()..buffer.area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn zero_records_show_the_placeholder() {
        let text = buffer_text(&draw(&[]));
        assert!(text.contains("No todos yet"));
        assert!(text.contains("Todos (0)"));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn rows_show_checkbox_text_and_creation_date() {
        let todos = vec![todo(1, "Buy milk", false), todo(2, "Ship crate", true)];
        let text = buffer_text(&draw(&todos));
        assert!(text.contains("[ ] Buy milk"));
        assert!(text.contains("[x] Ship crate"));
        assert!(text.contains("Created: 01/01/2024 at 00:00"));
        assert!(text.contains("Todos (2)"));
    }

    #[test]
    fn markup_like_text_renders_verbatim() {
        let todos = vec![todo(1, "<b>x</b>", false)];
        let text = buffer_text(&draw(&todos));
        assert!(text.contains("<b>x</b>"));
    }
}
