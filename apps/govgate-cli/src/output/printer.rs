//! Terminal output helpers for consistent CLI formatting

/// Check if color output is enabled
fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message (green checkmark)
pub fn print_success(message: &str) {
    if use_color() {
        println!("\x1b[32m✓\x1b[0m {}", message);
    } else {
        println!("OK: {}", message);
    }
}

/// Print a warning message (yellow), to stderr
pub fn print_warning(message: &str) {
    if use_color() {
        eprintln!("\x1b[33mWarning:\x1b[0m {}", message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

pub fn print_info(message: &str) {
    if use_color() {
        println!("\x1b[34mℹ\x1b[0m {}", message);
    } else {
        println!("Info: {}", message);
    }
}

/// Section title with a rule underneath, sized to the title.
pub fn print_header(title: &str) {
    let width = title.chars().count().max(40);
    println!();
    if use_color() {
        println!("\x1b[1m{}\x1b[0m", title);
    } else {
        println!("{}", title);
    }
    println!("{}", "─".repeat(width));
}

/// Print a key-value pair with consistent formatting
pub fn print_key_value(key: &str, value: &str) {
    if use_color() {
        println!("  \x1b[1m{:<14}\x1b[0m {}", format!("{key}:"), value);
    } else {
        println!("  {:<14} {}", format!("{key}:"), value);
    }
}

/// Pretty JSON on stdout for `--json` output.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> crate::error::CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
