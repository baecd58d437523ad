//! Terminal styling helpers. Plain tags when `NO_COLOR` is set.

use console::{style, StyledObject};

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Self::Success => "[OK]",
            Self::Warning => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }

    fn paint(self, text: &'static str) -> StyledObject<&'static str> {
        let styled = style(text).bold();
        match self {
            Self::Success => styled.green(),
            Self::Warning => styled.yellow(),
            Self::Error => styled.red(),
        }
    }
}

fn tagged(tone: Tone, text: &str) -> String {
    if is_color_disabled() {
        format!("{} {text}", tone.tag())
    } else {
        format!("{} {text}", tone.paint(tone.tag()))
    }
}

/// Print a styled header line.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

pub fn print_success(text: &str) {
    println!("{}", tagged(Tone::Success, text));
}

/// Warnings and errors go to stderr.
pub fn print_warning(text: &str) {
    eprintln!("{}", tagged(Tone::Warning, text));
}

pub fn print_error(text: &str) {
    eprintln!("{}", tagged(Tone::Error, text));
}
