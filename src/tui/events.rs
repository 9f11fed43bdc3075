use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

use crate::tui::app::{App, EditField, Mode};
use crate::tui::commands::{Command, Feedback, dispatch};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::editor::Editor;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic
/// This is critical for TUI applications - if the terminal is left in raw mode
/// or alternate screen, the user's terminal will be unusable.
struct TerminalGuard {
    /// Track if we successfully entered raw mode
    raw_mode_enabled: bool,
    /// Track if we successfully entered alternate screen
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    /// Initialize terminal state and return a guard
    /// The guard will restore terminal state when dropped (even on panic)
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal state even if we panic
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen so the error
    // message lands in the normal terminal.
    let (width, height) = terminal_size()?;

    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    // Setup terminal with guard to ensure restoration on panic
    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Draw one frame with the loading indicator before the initial fetch,
    // then fetch. The store stays empty until this resolves.
    draw(&mut terminal, &mut app)?;
    let feedback = dispatch(&app.api, &mut app.store, Command::Refresh);
    app.ui.loading = false;
    app.adjust_selected_index();
    app.apply_feedback(feedback);

    loop {
        // Expired toasts disappear on their own
        app.toasts.prune_expired();

        draw(&mut terminal, &mut app)?;

        // Handle events - only process Press events to avoid duplicate processing on Windows
        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Press
                        && handle_key_event(&mut app, key_event)?
                    {
                        break; // Quit requested
                    }
                }
                Event::Resize(_width, _height) => {
                    // Layout is recomputed from the terminal size on the next draw
                }
                _ => {
                    // Ignore other event types (mouse, etc.)
                }
            }
        }
    }

    // Restore terminal state explicitly (guard will also restore on drop, but this is cleaner)
    guard.restore()?;

    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), TuiError> {
    let size = terminal.size()?;
    let rect = ratatui::layout::Rect::new(0, 0, size.width, size.height);
    terminal.draw(|f| {
        let layout = Layout::calculate(rect);
        crate::tui::render::render(f, app, &layout);
    })?;
    Ok(())
}

/// Check a configured binding string against a key event. Unparseable
/// bindings simply never match.
fn binding_matches(binding: &str, key_event: &KeyEvent) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            if parsed.requires_ctrl {
                key_event.code == parsed.key_code && has_primary_modifier(key_event.modifiers)
            } else {
                key_event.code == parsed.key_code && !has_primary_modifier(key_event.modifiers)
            }
        }
        Err(_) => false,
    }
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match app.ui.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::ConfirmDelete => handle_confirm_delete_modal(app, key_event),
        Mode::Edit => handle_edit_modal(app, key_event),
        Mode::Input => handle_input_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if binding_matches(&app.config.key_bindings.quit, &key_event) {
        return Ok(true);
    }
    if binding_matches(&app.config.key_bindings.add, &key_event) {
        app.enter_input_mode();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.refresh, &key_event) {
        let feedback = dispatch(&app.api, &mut app.store, Command::Refresh);
        app.adjust_selected_index();
        app.apply_feedback(feedback);
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.toggle, &key_event) {
        if let Some(id) = app.selected_todo().map(|t| t.id) {
            let feedback = dispatch(&app.api, &mut app.store, Command::Toggle { id });
            app.apply_feedback(feedback);
        }
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.edit, &key_event) {
        app.enter_edit_mode();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.delete, &key_event) {
        app.open_delete_confirm();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.copy, &key_event) {
        copy_selected_text(app);
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.help, &key_event) {
        app.enter_help_mode();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.list_up, &key_event) {
        app.move_selection_up();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.list_down, &key_event) {
        app.move_selection_down();
        return Ok(false);
    }

    // Arrow keys always work regardless of configured bindings
    match key_event.code {
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        _ => {}
    }
    Ok(false)
}

fn handle_input_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => {
            let text = app.input.content();
            let feedback = dispatch(&app.api, &mut app.store, Command::Add { text });
            // The input is only cleared once the server confirmed the create
            if matches!(feedback, Feedback::Success(_)) {
                app.input.clear();
                app.select_last();
            }
            app.apply_feedback(feedback);
        }
        _ => handle_editor_key(&mut app.input, key_event),
    }
    Ok(false)
}

fn handle_edit_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let Some(current_field) = app.edit.as_ref().map(|f| f.current_field) else {
        app.ui.mode = Mode::View;
        return Ok(false);
    };

    // The save binding works from any field
    if binding_matches(&app.config.key_bindings.save, &key_event) {
        save_edit(app);
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Esc => app.close_edit_modal(),
        KeyCode::Tab => {
            if let Some(form) = app.edit.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = app.edit.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Enter => match current_field {
            EditField::Text | EditField::Completed => {
                if let Some(form) = app.edit.as_mut() {
                    form.next_field();
                }
            }
            EditField::Save => save_edit(app),
            EditField::Cancel => app.close_edit_modal(),
        },
        KeyCode::Up | KeyCode::Down if current_field != EditField::Text => {
            if let Some(form) = app.edit.as_mut() {
                if key_event.code == KeyCode::Down {
                    form.next_field();
                } else {
                    form.prev_field();
                }
            }
        }
        KeyCode::Char(' ') if current_field == EditField::Completed => {
            if let Some(form) = app.edit.as_mut() {
                form.completed = !form.completed;
            }
        }
        _ if current_field == EditField::Text => {
            if let Some(form) = app.edit.as_mut() {
                handle_editor_key(&mut form.text, key_event);
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Save the edit modal's fields; the modal only closes when the server
/// confirmed the update, otherwise it stays open with the edits intact.
fn save_edit(app: &mut App) {
    let Some(form) = app.edit.as_ref() else {
        return;
    };
    let (id, text, completed) = (form.id, form.text.content(), form.completed);
    let feedback = dispatch(
        &app.api,
        &mut app.store,
        Command::SaveEdit {
            id,
            text,
            completed,
        },
    );
    if matches!(feedback, Feedback::Success(_)) {
        app.close_edit_modal();
    }
    app.apply_feedback(feedback);
}

fn handle_confirm_delete_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            // Two options, so moving either way flips the selection
            if let Some(confirm) = app.confirm.as_mut() {
                confirm.selection = 1 - confirm.selection;
            }
        }
        KeyCode::Enter => {
            let choice = app.confirm.as_ref().map(|c| (c.selection, c.todo.id));
            app.close_delete_confirm();
            if let Some((0, id)) = choice {
                let feedback = dispatch(&app.api, &mut app.store, Command::Delete { id });
                app.adjust_selected_index();
                app.apply_feedback(feedback);
            }
        }
        KeyCode::Esc => app.close_delete_confirm(),
        _ => {
            // Ignore all other keys while the confirmation modal is shown
        }
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || binding_matches(&app.config.key_bindings.help, &key_event)
    {
        app.exit_help_mode();
    }
    Ok(false)
}

/// Shared single-line editing keys for the input box and the modal text field.
fn handle_editor_key(editor: &mut Editor, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Left if has_primary_modifier(key_event.modifiers) => {
            editor.move_cursor_word_left()
        }
        KeyCode::Right if has_primary_modifier(key_event.modifiers) => {
            editor.move_cursor_word_right()
        }
        KeyCode::Left => editor.move_cursor_left(),
        KeyCode::Right => editor.move_cursor_right(),
        KeyCode::Home => editor.move_cursor_home(),
        KeyCode::End => editor.move_cursor_end(),
        KeyCode::Char(c)
            if !key_event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            editor.insert_char(c)
        }
        _ => {}
    }
}

fn copy_selected_text(app: &mut App) {
    let Some(text) = app.selected_todo().map(|t| t.text.clone()) else {
        return;
    };
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.toasts.success("Copied todo text to clipboard".to_string()),
        Err(e) => {
            tracing::error!("clipboard copy failed: {e}");
            app.toasts.error("Failed to copy to clipboard".to_string());
        }
    }
}
