use ratatui::style::Color;

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: black, red, green, yellow, blue, magenta, cyan, white, gray/grey
/// - Extended named colors: darkgray, lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
/// - Hex format: #RRGGBB or #RGB (short form)
/// - RGB format: rgb(255,0,0) or rgb(255, 0, 0) (with spaces)
/// Returns Color::White as default for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "lightgray" | "lightgrey" => Color::Gray, // LightGray not available, use Gray
        _ => {
            if s.starts_with('#') {
                if let Some(color) = parse_hex_color(&s) {
                    return color;
                }
            } else if s.starts_with("rgb(") {
                if let Some(color) = parse_rgb_color(&s) {
                    return color;
                }
            }
            Color::White
        }
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    } else if hex.len() == 3 {
        // Short format: #RGB -> #RRGGBB
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        let r = (r << 4) | r;
        let g = (g << 4) | g;
        let b = (b << 4) | b;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

/// Parse RGB color format (rgb(r,g,b) or rgb(r, g, b))
fn parse_rgb_color(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;

    let parts: Vec<&str> = content.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Calculate relative luminance for a color (WCAG formula)
fn calculate_luminance(color: Color) -> f64 {
    let (r, g, b) = match color {
        Color::Rgb(r, g, b) => (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
        _ => return 0.5,
    };

    let linear = |c: f64| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Determine if a named color is considered "dark" (needs light text)
/// Note: Gray is typically rendered as light in most terminals, so it's treated as light
fn is_dark_color(color: Color) -> bool {
    matches!(
        color,
        Color::Black | Color::Blue | Color::Magenta | Color::Red
    )
}

/// Get an appropriate foreground color for text on a given background color
/// Returns black for light backgrounds, white for dark backgrounds
/// Uses luminance calculation for RGB colors, heuristic for named colors
pub fn get_contrast_text_color(background: Color) -> Color {
    if matches!(background, Color::Rgb(_, _, _)) {
        if calculate_luminance(background) < 0.5 {
            Color::White
        } else {
            Color::Black
        }
    } else if is_dark_color(background) {
        Color::White
    } else {
        Color::Black
    }
}
