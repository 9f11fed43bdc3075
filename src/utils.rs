use directories::ProjectDirs;
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for todoterm
/// If profile is Dev, uses "todoterm-dev" instead of "todoterm"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "todoterm-dev",
        Profile::Prod => "todoterm",
    };
    ProjectDirs::from("com", "todoterm", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for todoterm (log file lives here)
/// If profile is Dev, uses "todoterm-dev" instead of "todoterm"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "todoterm-dev",
        Profile::Prod => "todoterm",
    };
    ProjectDirs::from("com", "todoterm", app_name)
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Format the server's `create_at` timestamp for display.
/// The service serializes a naive UTC datetime (`2024-01-01T12:30:00`), but a
/// trailing offset is accepted too. Unparseable input is shown as-is.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%m/%d/%Y at %H:%M").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%m/%d/%Y at %H:%M").to_string();
    }
    raw.to_string()
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
/// This follows the standard cross-platform TUI pattern where Ctrl and Option/Alt are treated as equivalent
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate modifier
/// On macOS, "Ctrl+" is replaced with "Opt+" for better UX (Option key)
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports: single keys ("q", "a", "j"), special keys ("Enter", "Space", "F1"),
/// and modifiers ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if key_str.starts_with("Ctrl+") {
        let key_part = key_str
            .strip_prefix("Ctrl+")
            .expect("strip_prefix should succeed after starts_with check");
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    match key_str {
        "Enter" => Ok(crossterm::event::KeyCode::Enter),
        "Esc" | "Escape" => Ok(crossterm::event::KeyCode::Esc),
        "Backspace" => Ok(crossterm::event::KeyCode::Backspace),
        "Tab" => Ok(crossterm::event::KeyCode::Tab),
        "Space" | " " => Ok(crossterm::event::KeyCode::Char(' ')),
        "Left" => Ok(crossterm::event::KeyCode::Left),
        "Right" => Ok(crossterm::event::KeyCode::Right),
        "Up" => Ok(crossterm::event::KeyCode::Up),
        "Down" => Ok(crossterm::event::KeyCode::Down),
        "Home" => Ok(crossterm::event::KeyCode::Home),
        "End" => Ok(crossterm::event::KeyCode::End),
        "PageUp" => Ok(crossterm::event::KeyCode::PageUp),
        "PageDown" => Ok(crossterm::event::KeyCode::PageDown),
        "Delete" => Ok(crossterm::event::KeyCode::Delete),
        "F1" => Ok(crossterm::event::KeyCode::F(1)),
        "F2" => Ok(crossterm::event::KeyCode::F(2)),
        "F3" => Ok(crossterm::event::KeyCode::F(3)),
        "F4" => Ok(crossterm::event::KeyCode::F(4)),
        "F5" => Ok(crossterm::event::KeyCode::F(5)),
        _ => {
            if key_str.len() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(crossterm::event::KeyCode::Char(c)),
                    None => Err("Empty key string after length check".to_string()),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn formats_naive_server_timestamp() {
        assert_eq!(
            format_created_at("2024-01-01T00:00:00"),
            "01/01/2024 at 00:00"
        );
        assert_eq!(
            format_created_at("2024-03-05T09:41:07.123456"),
            "03/05/2024 at 09:41"
        );
    }

    #[test]
    fn formats_rfc3339_timestamp() {
        assert_eq!(
            format_created_at("2024-01-01T00:00:00Z"),
            "01/01/2024 at 00:00"
        );
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        assert_eq!(format_created_at("whenever"), "whenever");
    }

    #[test]
    fn parses_plain_and_ctrl_bindings() {
        let plain = parse_key_binding("q").unwrap();
        assert_eq!(plain.key_code, KeyCode::Char('q'));
        assert!(!plain.requires_ctrl);

        let ctrl = parse_key_binding("Ctrl+s").unwrap();
        assert_eq!(ctrl.key_code, KeyCode::Char('s'));
        assert!(ctrl.requires_ctrl);

        let space = parse_key_binding("Space").unwrap();
        assert_eq!(space.key_code, KeyCode::Char(' '));
    }

    #[test]
    fn rejects_unknown_binding() {
        assert!(parse_key_binding("Hyper+q").is_err());
    }
}
