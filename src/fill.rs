// SPDX-License-Identifier: MIT OR Apache-2.0

//! Horizontal fill.
//!
//! The `{hfill}` tag expands to a run of fill characters sized so that whatever follows it ends
//! at the right edge of the terminal. Lengths are *visible* lengths: escape sequences do not
//! take up columns.
//!
//! ```rust
//! use scopelog::fill::{fill_for, Fill};
//!
//! assert_eq!(fill_for(10, 5, Some(20)), Fill::Run(5));
//! assert_eq!(fill_for(18, 5, Some(20)), Fill::Wrap);
//! assert_eq!(fill_for(1, 25, Some(20)), Fill::Single);
//! assert_eq!(fill_for(10, 5, None), Fill::Single);
//! ```

use crate::style::Style;
use unicode_width::UnicodeWidthChar;

/// What to put in place of the fill placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    /// That many fill characters on the same line.
    Run(usize),
    /// A newline, then one fill character; the right part continues on its own line.
    Wrap,
    /// A single fill character.
    Single,
}

/**
Computes the fill between a left part of `left` columns and a right part of `right` columns.

`columns` is the effective width; `None` when the terminal width is unknown.
*/
pub fn fill_for(left: usize, right: usize, columns: Option<usize>) -> Fill {
    let Some(columns) = columns else {
        return Fill::Single;
    };
    let used = left.saturating_add(right);
    if used > columns {
        // the right part does not fit even on its own line: no truncation
        if right > columns {
            Fill::Single
        } else {
            Fill::Wrap
        }
    } else {
        Fill::Run(columns - used)
    }
}

/// Number of terminal columns `text` occupies once escape sequences are removed.
///
/// Wide characters (CJK, most emoji) take two columns; control characters take none.
pub fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // parameters and intermediates, up to and including the final byte
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        } else if !c.is_control() {
            len += c.width().unwrap_or(0);
        }
    }
    len
}

/// Fill character, bounds and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HorizontalFill {
    pub mark: char,
    pub min_columns: usize,
    pub max_columns: usize,
    pub style: Style,
}

impl Default for HorizontalFill {
    fn default() -> Self {
        HorizontalFill {
            mark: '.',
            min_columns: 0,
            max_columns: 300,
            style: Style::none(),
        }
    }
}

impl HorizontalFill {
    /// Terminal width raised to `min_columns`, then lowered to `max_columns`.
    pub fn columns(&self, terminal: Option<usize>) -> Option<usize> {
        terminal.map(|w| w.max(self.min_columns).min(self.max_columns))
    }

    /**
    The styled fill between `left` and `right`.

    Only the line the placeholder sits on counts: the text after the last newline of `left` and
    the text before the first newline of `right`.
    */
    pub fn render(&self, left: &str, right: &str, terminal: Option<usize>) -> String {
        let left_line = left.rsplit('\n').next().unwrap_or(left);
        let right_line = right.split('\n').next().unwrap_or(right);
        let fill = fill_for(
            visible_len(left_line),
            visible_len(right_line),
            self.columns(terminal),
        );
        let run = |n: usize| self.style.wrap(&self.mark.to_string().repeat(n));
        match fill {
            Fill::Run(n) => run(n),
            Fill::Wrap => format!("\n{}", run(1)),
            Fill::Single => run(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Fg;

    #[test]
    fn run_fills_the_gap() {
        assert_eq!(fill_for(10, 5, Some(20)), Fill::Run(5));
        assert_eq!(fill_for(15, 5, Some(20)), Fill::Run(0));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(fill_for(18, 5, Some(20)), Fill::Wrap);
        assert_eq!(fill_for(0, 21, Some(20)), Fill::Single);
    }

    #[test]
    fn unknown_width_is_one_character() {
        assert_eq!(fill_for(0, 0, None), Fill::Single);
    }

    #[test]
    fn escapes_take_no_columns() {
        assert_eq!(visible_len("\x1b[31;1mred\x1b[0m"), 3);
        assert_eq!(visible_len("\x1b[38;2;1;2;3mab\x1b[48;5;9mc"), 3);
        assert_eq!(visible_len("héllo\n"), 5);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(visible_len("日本語"), 6);
        assert_eq!(visible_len("ok 🚀"), 5);
        assert_eq!(visible_len("\x1b[1m漢\x1b[0m\r"), 2);
    }

    #[test]
    fn wide_text_is_right_aligned_by_columns() {
        let fill = HorizontalFill {
            mark: '-',
            ..HorizontalFill::default()
        };
        // 4 columns of text on the left, 3 on the right
        assert_eq!(fill.render("日本", "abc", Some(10)), "---");
    }

    #[test]
    fn bounds_clamp_terminal_width() {
        let fill = HorizontalFill {
            min_columns: 40,
            max_columns: 100,
            ..HorizontalFill::default()
        };
        assert_eq!(fill.columns(Some(20)), Some(40));
        assert_eq!(fill.columns(Some(80)), Some(80));
        assert_eq!(fill.columns(Some(200)), Some(100));
        assert_eq!(fill.columns(None), None);
    }

    #[test]
    fn render_uses_visible_lengths() {
        let fill = HorizontalFill {
            mark: '-',
            ..HorizontalFill::default()
        };
        let left = "\x1b[1mhello\x1b[0m";
        assert_eq!(fill.render(left, "abc", Some(12)), "----");
        assert_eq!(fill.render("prefix\nhello", "abc\n", Some(12)), "----");
        assert_eq!(fill.render("hello hello", "abc", Some(12)), "\n-");
        assert_eq!(fill.render("hello", "abc", None), "-");
    }

    #[test]
    fn run_carries_its_style() {
        let fill = HorizontalFill {
            style: Style::from(Fg::Blue),
            ..HorizontalFill::default()
        };
        assert_eq!(fill.render("ab", "cd", Some(7)), "\x1b[34m...\x1b[0m");
    }
}
