//! Colorschemes for the prompt.
//!
//! A colorscheme assigns one color to every role a prompt field can play.
//! Only one scheme is active per render, picked through [`Scheme`].
//!
//! ## Kanagawa
//!
//! | Role          | RGB             |
//! |---------------|-----------------|
//! | text          | (220, 213, 172) |
//! | username      | (220, 165, 97)  |
//! | hostname      | (210, 126, 153) |
//! | cwd           | (135, 169, 135) |
//! | time          | (149, 127, 184) |
//! | history count | (89, 123, 117)  |
//! | git           | (255, 160, 102) |
//! | job           | (126, 156, 216) |
//!
//! Prepositions ("in", "on", "at") use xterm color 240 in every scheme.

use owo_colors::{AnsiColors, DynColor, DynColors, XtermColors};
use std::fmt;

/// Marks the start of a sequence readline must not count as printed width.
pub const INVISIBLE_START: &str = "\x01";
/// Marks the end of a sequence readline must not count as printed width.
pub const INVISIBLE_END: &str = "\x02";
/// Bold mode, already wrapped in the invisible markers.
pub const BOLD: &str = "\x01\x1b[1m\x02";

/// Brand color of the git icon.
pub const GIT_ICON: DynColors = DynColors::Rgb(241, 80, 47);
/// Brand color of the Ubuntu logo.
pub const UBUNTU_ICON: DynColors = DynColors::Rgb(233, 84, 32);

/// Diff stat colors, plain 8-color so they follow the terminal palette.
pub const MODIFIED: DynColors = DynColors::Ansi(AnsiColors::Yellow);
pub const ADDED: DynColors = DynColors::Ansi(AnsiColors::Green);
pub const REMOVED: DynColors = DynColors::Ansi(AnsiColors::Red);

/// Identifier of a built-in colorscheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Kanagawa,
}

impl Scheme {
    /// Resolve the identifier to its color record
    pub fn colorscheme(self) -> Colorscheme {
        match self {
            Scheme::Kanagawa => Colorscheme {
                text: DynColors::Rgb(220, 213, 172),
                username: DynColors::Rgb(220, 165, 97),
                hostname: DynColors::Rgb(210, 126, 153),
                cwd: DynColors::Rgb(135, 169, 135),
                time: DynColors::Rgb(149, 127, 184),
                history_count: DynColors::Rgb(89, 123, 117),
                git: DynColors::Rgb(255, 160, 102),
                job: DynColors::Rgb(126, 156, 216),
                preposition: DynColors::Xterm(XtermColors::from(240)),
            },
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Kanagawa => f.write_str("kanagawa"),
        }
    }
}

/// One color per prompt role
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colorscheme {
    pub text: DynColors,
    pub username: DynColors,
    pub hostname: DynColors,
    pub cwd: DynColors,
    pub time: DynColors,
    pub history_count: DynColors,
    pub git: DynColors,
    pub job: DynColors,
    pub preposition: DynColors,
}

impl Default for Colorscheme {
    fn default() -> Self {
        Scheme::default().colorscheme()
    }
}

/// Foreground escape for a color, wrapped so readline skips it when
/// measuring the prompt width.
///
/// Unlike `OwoColorize::color` this never emits a reset: the color stays
/// active until the next escape, which is how prompt fragments chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint(pub DynColors);

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVISIBLE_START)?;
        self.0.fmt_ansi_fg(f)?;
        f.write_str(INVISIBLE_END)
    }
}
