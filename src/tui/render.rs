use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::Mode;
use crate::tui::widgets::{
    color::parse_color, confirm_delete::render_confirm_delete, edit_modal::render_edit_modal,
    help::render_help, input_box::render_input_box, status_bar::render_status_bar,
    toast::render_toasts, todo_list::render_todo_list,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    // Outer border with the app name centered in the top border
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("todoterm")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_input_box(f, layout.input_area, app);

    if app.ui.loading {
        // Shown until the initial fetch resolves
        let paragraph = Paragraph::new("Loading todos...")
            .block(Block::default().borders(Borders::ALL).title("Todos"))
            .style(Style::default().fg(fg_color));
        f.render_widget(paragraph, layout.list_area);
    } else {
        render_todo_list(
            f,
            layout.list_area,
            app.store.todos(),
            &mut app.ui.list_state,
            &app.config,
        );
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, &key_hints, &app.config);

    // Overlays render after normal content; toasts go last so they sit on top
    let full_area = f.area();

    if app.ui.mode == Mode::Edit {
        if let Some(form) = app.edit.as_mut() {
            render_edit_modal(f, full_area, form, &app.config);
        }
    }

    if let Some(ref confirm) = app.confirm {
        render_confirm_delete(f, full_area, confirm, &app.config);
    }

    if app.ui.mode == Mode::Help {
        render_help(f, full_area, &app.config);
    }

    render_toasts(f, full_area, &app.toasts.toasts, &app.config);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => {
            vec![format!(
                "Esc or {}: Close help",
                format_key_binding_for_display(&bindings.help)
            )]
        }
        Mode::Input => {
            vec![
                "Enter: Add todo".to_string(),
                "Esc: Back to list".to_string(),
            ]
        }
        Mode::Edit => {
            vec![
                "Tab/Shift+Tab: Next/previous field".to_string(),
                format!("{}: Save", format_key_binding_for_display(&bindings.save)),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::ConfirmDelete => {
            vec!["↑/↓: Choose".to_string(), "Enter: Confirm".to_string(), "Esc: Cancel".to_string()]
        }
        Mode::View => {
            vec![
                format!("{}: Quit", format_key_binding_for_display(&bindings.quit)),
                format!("{}: Add", format_key_binding_for_display(&bindings.add)),
                format!("{}: Edit", format_key_binding_for_display(&bindings.edit)),
                format!("{}: Delete", format_key_binding_for_display(&bindings.delete)),
                format!(
                    "{}: Toggle done",
                    format_key_binding_for_display(&bindings.toggle)
                ),
                format!(
                    "{}: Refresh",
                    format_key_binding_for_display(&bindings.refresh)
                ),
                format!("{}: Copy", format_key_binding_for_display(&bindings.copy)),
                format!("{}: Help", format_key_binding_for_display(&bindings.help)),
            ]
        }
    }
}
