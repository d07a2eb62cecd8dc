// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Write;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;
use jiff::Zoned;

use crate::Level;

/// The pattern used when a driver does not configure one.
pub const DEFAULT_PATTERN: &str = "[%D %t][%L]: %M";

/// A layout that renders a message by substituting `%` tokens in a pattern.
///
/// Supported tokens:
///
/// | token | replaced with                      |
/// |-------|------------------------------------|
/// | `%T`  | time as `HH:MM:SS.mmm`             |
/// | `%t`  | time as `HH:MM`                    |
/// | `%D`  | date as `YYYY-MM-DD`               |
/// | `%d`  | date as `MM-DD`                    |
/// | `%L`  | level name, for example `INFO`     |
/// | `%M`  | the message                        |
///
/// Any other `%` sequence is copied verbatim.
///
/// # Examples
///
/// ```
/// use flog::Level;
/// use flog::layout::PatternLayout;
///
/// let layout = PatternLayout::new("%D %T [%L] %M");
/// let now = "2024-08-10T17:12:52.046[UTC]".parse().unwrap();
/// assert_eq!(
///     layout.format(Level::Info, "server started", &now),
///     "2024-08-10 17:12:52.046 [INFO] server started"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PatternLayout {
    pattern: String,
    pieces: Vec<Piece>,
    #[cfg(feature = "colored")]
    colors: Option<LevelColor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    // a strftime format rendered with the message time
    Time(&'static str),
    Level,
    Message,
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl PatternLayout {
    /// Compile a new [`PatternLayout`] from the given pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let pieces = compile(&pattern);
        Self {
            pattern,
            pieces,
            #[cfg(feature = "colored")]
            colors: None,
        }
    }

    /// Color the level name with the given colors.
    #[cfg(feature = "colored")]
    pub fn colored(mut self, colors: LevelColor) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Return the pattern this layout was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a message at the given level and time.
    pub fn format(&self, level: Level, message: &str, now: &Zoned) -> String {
        let mut text = String::with_capacity(self.pattern.len() + message.len() + 16);
        for piece in &self.pieces {
            match piece {
                Piece::Text(s) => text.push_str(s),
                Piece::Time(format) => {
                    // formats are fixed at compile time and always valid
                    let _ = write!(&mut text, "{}", now.strftime(*format));
                }
                Piece::Level => self.write_level(&mut text, level),
                Piece::Message => text.push_str(message),
            }
        }
        text
    }

    #[cfg(not(feature = "colored"))]
    fn write_level(&self, text: &mut String, level: Level) {
        text.push_str(level.as_str());
    }

    #[cfg(feature = "colored")]
    fn write_level(&self, text: &mut String, level: Level) {
        match &self.colors {
            None => text.push_str(level.as_str()),
            Some(colors) => {
                let colored = level.as_str().color(colors.color(level));
                write!(text, "{colored}").unwrap();
            }
        }
    }
}

/// Customize the color of each log level.
#[cfg(feature = "colored")]
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for fatal level.
    pub fatal: Color,
    /// Color for error level.
    pub error: Color,
    /// Color for warning level.
    pub warning: Color,
    /// Color for info level.
    pub info: Color,
    /// Color for debug level.
    pub debug: Color,
}

#[cfg(feature = "colored")]
impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Color::BrightRed,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
        }
    }
}

#[cfg(feature = "colored")]
impl LevelColor {
    fn color(&self, level: Level) -> Color {
        match level {
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warning => self.warning,
            Level::Info => self.info,
            Level::Debug => self.debug,
        }
    }
}

fn compile(pattern: &str) -> Vec<Piece> {
    let mut pieces = vec![];
    let mut text = String::new();

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }

        let Some(&next) = chars.peek() else {
            text.push(c);
            break;
        };
        if !next.is_ascii_alphabetic() {
            text.push(c);
            continue;
        }
        chars.next();

        let piece = match next {
            'T' => Piece::Time("%H:%M:%S.%3f"),
            't' => Piece::Time("%H:%M"),
            'D' => Piece::Time("%Y-%m-%d"),
            'd' => Piece::Time("%m-%d"),
            'L' => Piece::Level,
            'M' => Piece::Message,
            unknown => {
                text.push('%');
                text.push(unknown);
                continue;
            }
        };

        if !text.is_empty() {
            pieces.push(Piece::Text(std::mem::take(&mut text)));
        }
        pieces.push(piece);
    }

    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    pieces
}
