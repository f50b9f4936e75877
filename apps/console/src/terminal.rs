//! Writing screens and toasts to the terminal.

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

use hubconsole_core::notifications::{Notification, NotificationLevel};
use hubconsole_core::ui_config::UiConfig;

use crate::shell::Screen;

/// Parse a CSS-style color: `#rrggbb`, `#rgb`, or a name crossterm knows.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => Some(Color::Rgb {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            }),
            _ => None,
        };
    }
    Color::try_from(value.to_ascii_lowercase().as_str()).ok()
}

fn banner_line<W: Write>(out: &mut W, text: &str, ui: &UiConfig) -> io::Result<()> {
    if let Some(bg) = parse_color(&ui.background) {
        out.queue(SetBackgroundColor(bg))?;
    }
    if let Some(fg) = parse_color(&ui.color) {
        out.queue(SetForegroundColor(fg))?;
    }
    out.queue(Print(format!(" {} ", text)))?;
    out.queue(ResetColor)?;
    out.queue(Print("\n"))?;
    Ok(())
}

pub fn write_screen<W: Write>(
    out: &mut W,
    navbar: &str,
    screen: &Screen,
    ui: &UiConfig,
) -> io::Result<()> {
    if let Some(header) = &screen.header {
        banner_line(out, header, ui)?;
    }
    out.queue(Print(navbar.bold()))?;
    out.queue(Print("\n\n"))?;
    out.queue(Print(&screen.body))?;
    out.queue(Print("\n"))?;
    if let Some(footer) = &screen.footer {
        out.queue(Print("\n"))?;
        banner_line(out, footer, ui)?;
    }
    out.flush()
}

pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    out.queue(MoveTo(0, 0))?;
    Ok(())
}

pub fn write_notifications<W: Write>(out: &mut W, notifications: &[Notification]) -> io::Result<()> {
    for notification in notifications {
        let styled = match notification.level {
            NotificationLevel::Success => notification.message.as_str().green(),
            NotificationLevel::Error => notification.message.as_str().red(),
        };
        out.queue(Print(styled))?;
        out.queue(Print("\n"))?;
    }
    out.flush()
}
