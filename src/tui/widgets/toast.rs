use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::Config;
use crate::tui::app::{Toast, ToastKind};
use crate::tui::widgets::color::parse_color;

/// Stack transient notifications in the top-right corner, oldest first.
/// Success and error toasts differ only in color.
pub fn render_toasts(f: &mut Frame, area: Rect, toasts: &[Toast], config: &Config) {
    if toasts.is_empty() {
        return;
    }

    let active_theme = config.get_active_theme();
    let bg_color = parse_color(&active_theme.bg);
    let success_fg = parse_color(&active_theme.success_fg);
    let error_fg = parse_color(&active_theme.error_fg);

    for (i, toast) in toasts.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y + 1 >= area.bottom() {
            break;
        }

        let max_width = area.width.saturating_sub(4);
        let mut message = toast.message.clone();
        let mut width = message.chars().count() as u16 + 2;
        if width > max_width {
            width = max_width;
            message = message
                .chars()
                .take(width.saturating_sub(5) as usize)
                .collect::<String>()
                + "...";
        }
        let x = area.right().saturating_sub(width + 2);
        let rect = Rect::new(x, y, width, 1);

        // Clear first so list content doesn't show through
        f.render_widget(Clear, rect);

        let fg = match toast.kind {
            ToastKind::Success => success_fg,
            ToastKind::Error => error_fg,
        };
        let paragraph = Paragraph::new(format!(" {} ", message))
            .style(Style::default().fg(fg).bg(bg_color).add_modifier(Modifier::BOLD));
        f.render_widget(paragraph, rect);
    }
}
