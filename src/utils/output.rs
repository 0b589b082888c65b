use colored::*;
use std::io::{self, Write};

use crate::core::data::Contact;

/// "Contact Manager" in the figlet standard font
const BANNER: &str = r#"  ____            _             _     __  __
 / ___|___  _ __ | |_ __ _  ___| |_  |  \/  | __ _ _ __   __ _  __ _  ___ _ __
| |   / _ \| '_ \| __/ _` |/ __| __| | |\/| |/ _` | '_ \ / _` |/ _` |/ _ \ '__|
| |__| (_) | | | | || (_| | (__| |_  | |  | | (_| | | | | (_| | (_| |  __/ |
 \____\___/|_| |_|\__\__,_|\___|\__| |_|  |_|\__,_|_| |_|\__,_|\__, |\___|_|
                                                               |___/"#;

/// Gradient stops: red, white, blue
const GRADIENT: [(u8, u8, u8); 3] = [(255, 0, 0), (255, 255, 255), (0, 0, 255)];

pub struct OutputStyle;

impl OutputStyle {
    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn value(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Multi-line rendering of one contact, followed by a blank line
pub fn format_contact(contact: &Contact) -> String {
    let fields = [
        ("Contact ID", contact.id.to_string()),
        ("First Name", contact.first_name.clone()),
        ("Last Name", contact.last_name.clone()),
        ("Phone Number", contact.phone_number.clone()),
        ("Email", contact.email.clone()),
        ("Address", contact.display_address().to_string()),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(&format!(
            "{}: {}\n",
            OutputStyle::label(label),
            OutputStyle::value(&value)
        ));
    }
    out
}

/// Color at position `t` (0.0..=1.0) along the banner gradient
pub fn gradient_color(t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let segments = (GRADIENT.len() - 1) as f32;
    let scaled = t * segments;
    let index = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    let local = scaled - index as f32;

    let (from, to) = (GRADIENT[index], GRADIENT[index + 1]);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * local).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Write the banner with a horizontal gradient applied to every line
pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    let width = BANNER.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let span = width.saturating_sub(1).max(1) as f32;

    for line in BANNER.lines() {
        let mut rendered = String::new();
        for (column, ch) in line.chars().enumerate() {
            if ch == ' ' {
                rendered.push(ch);
                continue;
            }
            let (r, g, b) = gradient_color(column as f32 / span);
            rendered.push_str(&ch.to_string().truecolor(r, g, b).to_string());
        }
        writeln!(out, "{}", rendered)?;
    }
    writeln!(out)?;
    out.flush()
}

pub fn print_banner() -> io::Result<()> {
    write_banner(&mut io::stdout().lock())
}
