/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Work status color: working → green, on break → yellow, idle → grey.
pub fn color_for_status(label: &str) -> &'static str {
    match label {
        "working" => GREEN,
        "on break" => YELLOW,
        _ => GREY,
    }
}

/// Greys out zero values (`¥0`, `00h 00m`, `--`) so real figures stand out.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    let all_zero = v.chars().any(|c| c.is_ascii_digit())
        && v.chars().filter(|c| c.is_ascii_digit()).all(|c| c == '0');
    if v.is_empty() || v == "--" || all_zero {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_money(value: &str) -> String {
    format!("{GREEN}{value}{RESET}")
}
