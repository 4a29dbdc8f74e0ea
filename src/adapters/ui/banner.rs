//! Start-up banner: "SENTIMENT" in figlet's standard font, shaded left to
//! right along the sentiment scale (negative red, neutral amber, positive green).

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "SENTIMENT";
const TAGLINE: &str = "How does Twitter feel today?";

type Rgb = (u8, u8, u8);

/// Color stops of the scale, negative to positive.
const SCALE: [Rgb; 3] = [(0xe5, 0x39, 0x35), (0xfb, 0xc0, 0x2d), (0x43, 0xa0, 0x47)];

/// Color at position `t` of the scale; `t` is clamped to [0, 1].
fn scale_color(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (SCALE[0], SCALE[1], t * 2.0)
    } else {
        (SCALE[1], SCALE[2], (t - 0.5) * 2.0)
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * local).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

/// Prints the banner, the version and the tagline. Terminal write errors are ignored.
pub fn print_welcome() {
    let art = banner_art();
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(1);
    let span = width.saturating_sub(1).max(1) as f64;

    let mut out = stdout();
    for line in art.lines() {
        for (col, ch) in line.chars().enumerate() {
            let _ = out.queue(SetForegroundColor(rgb(scale_color(col as f64 / span))));
            let _ = out.queue(Print(ch));
        }
        let _ = out.queue(ResetColor);
        let _ = out.queue(Print("\r\n"));
    }

    let _ = out.queue(SetForegroundColor(rgb(SCALE[1])));
    let _ = out.queue(Print(format!(
        "{} v{}  {}\r\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        TAGLINE
    )));
    let _ = out.queue(ResetColor);
    let _ = out.flush();
}
