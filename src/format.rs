// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template rendering.
//!
//! Templates are plain text with bracketed tags. Each recognized tag is replaced by a value
//! computed from the message and its call site; anything else, including unknown `{tags}`,
//! is copied through unchanged.
//!
//! | Tag              | Value                                                        |
//! |------------------|--------------------------------------------------------------|
//! | `{msg}`          | the message                                                  |
//! | `{name}`         | the program name                                             |
//! | `{file}`         | the source file, rendered per [`FilenameMode`]               |
//! | `{func}`         | the function name                                            |
//! | `{line}`         | the line number                                              |
//! | `{level}`        | the level name, e.g. `Warning`                               |
//! | `{level_letter}` | its first letter, e.g. `W`                                   |
//! | `{level_short}`  | its four-letter abbreviation, e.g. `Warn`                    |
//! | `{depth}`        | the call depth                                               |
//! | `{depth_marks}`  | the depth mark, repeated once per depth level                |
//! | `{level_fmt}`    | the escape code of the level's style                         |
//! | `{filehash_fmt}` | a style picked by hashing the file path                      |
//! | `{funchash_fmt}` | a style picked by hashing the function name                  |
//! | `{depth_fmt}`    | a style picked by depth                                      |
//! | `{hfill}`        | fill that pushes the rest of the line to the right edge      |
//!
//! Tags are resolved in one left-to-right scan, so a message that happens to contain
//! `{file}` is printed literally. `{hfill}` is sized last, once everything around it is known.
//!
//! ```rust
//! use scopelog::format::Renderer;
//! use scopelog::geometry::NoColumns;
//! use scopelog::{Level, Location};
//! use std::sync::Arc;
//!
//! let renderer = Renderer::new(Arc::new(NoColumns));
//! let here = Location::new("src/db.rs", "open", 7);
//! let row = renderer.render("{level_short} {func}@{line}: {msg} {unknown}", "ready", Level::Info, &here, 0);
//! assert_eq!(row, "Info open@7: ready {unknown}");
//! ```

use crate::fill::HorizontalFill;
use crate::geometry::Geometry;
use crate::level::Level;
use crate::location::{FilenameMode, Location};
use crate::style::{Color256, Fg, Style, Typo};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tag {
    Msg,
    Name,
    File,
    Func,
    Line,
    Level,
    LevelLetter,
    LevelShort,
    Depth,
    DepthMarks,
    LevelFmt,
    FilehashFmt,
    FunchashFmt,
    DepthFmt,
    Hfill,
}

impl Tag {
    fn parse(name: &str) -> Option<Tag> {
        Some(match name {
            "msg" => Tag::Msg,
            "name" => Tag::Name,
            "file" => Tag::File,
            "func" => Tag::Func,
            "line" => Tag::Line,
            "level" => Tag::Level,
            "level_letter" => Tag::LevelLetter,
            "level_short" => Tag::LevelShort,
            "depth" => Tag::Depth,
            "depth_marks" => Tag::DepthMarks,
            "level_fmt" => Tag::LevelFmt,
            "filehash_fmt" => Tag::FilehashFmt,
            "funchash_fmt" => Tag::FunchashFmt,
            "depth_fmt" => Tag::DepthFmt,
            "hfill" => Tag::Hfill,
            _ => return None,
        })
    }
}

fn default_level_styles() -> [Style; 8] {
    let mut styles = [Style::none(); 8];
    styles[Level::Critical as usize] = Style::from(Fg::Red).with(Typo::Underline);
    styles[Level::Error as usize] = Style::from(Fg::Red).with(Typo::Bold);
    styles[Level::Warning as usize] = Style::from(Fg::Magenta).with(Typo::Bold);
    styles
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(std::path::Path::new)
        .and_then(std::path::Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Everything a template needs besides the message and call site.
#[derive(Debug, Clone)]
pub struct Renderer {
    level_styles: [Style; 8],
    filehash_styles: Vec<Style>,
    funchash_styles: Vec<Style>,
    depth_styles: Vec<Style>,
    depth_mark: String,
    filename: FilenameMode,
    program_name: String,
    hfill: HorizontalFill,
    geometry: Arc<dyn Geometry>,
}

impl Renderer {
    pub fn new(geometry: Arc<dyn Geometry>) -> Self {
        Renderer {
            level_styles: default_level_styles(),
            filehash_styles: Vec::new(),
            funchash_styles: Vec::new(),
            depth_styles: Vec::new(),
            depth_mark: ">".to_string(),
            filename: FilenameMode::default(),
            program_name: program_name(),
            hfill: HorizontalFill::default(),
            geometry,
        }
    }

    pub fn level_style(&self, level: Level) -> Style {
        self.level_styles[level as usize]
    }

    pub fn set_level_style(&mut self, level: Level, style: impl Into<Style>) {
        self.level_styles[level as usize] = style.into();
    }

    pub fn set_filehash_styles(&mut self, styles: Vec<Style>) {
        self.filehash_styles = styles;
    }

    pub fn set_funchash_styles(&mut self, styles: Vec<Style>) {
        self.funchash_styles = styles;
    }

    pub fn set_depth_styles(&mut self, styles: Vec<Style>) {
        self.depth_styles = styles;
    }

    pub fn depth_mark(&self) -> &str {
        &self.depth_mark
    }

    pub fn set_depth_mark(&mut self, mark: impl Into<String>) {
        self.depth_mark = mark.into();
    }

    pub fn filename(&self) -> FilenameMode {
        self.filename
    }

    pub fn set_filename(&mut self, mode: FilenameMode) {
        self.filename = mode;
    }

    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program_name = name.into();
    }

    pub fn hfill(&self) -> &HorizontalFill {
        &self.hfill
    }

    pub fn hfill_mut(&mut self) -> &mut HorizontalFill {
        &mut self.hfill
    }

    pub fn set_geometry(&mut self, geometry: Arc<dyn Geometry>) {
        self.geometry = geometry;
    }

    /**
    The style `{depth_fmt}` expands to.

    Depths past the end of the configured list reuse its last entry. With no list, the depth
    indexes the 256-color palette.
    */
    pub fn depth_style(&self, depth: usize) -> Style {
        match self.depth_styles.last() {
            None => Style::indexed((depth % 256) as u8, Color256::NONE),
            Some(last) => *self.depth_styles.get(depth).unwrap_or(last),
        }
    }

    /**
    Renders `template`.

    `depth` is the depth to display, already discounted by strip calls. The whole row is
    wrapped in the level's style.
    */
    pub fn render(
        &self,
        template: &str,
        message: &str,
        level: Level,
        location: &Location<'_>,
        depth: usize,
    ) -> String {
        let mut row = String::with_capacity(template.len() + message.len());
        // byte offsets of {hfill} placeholders in `row`
        let mut fills: Vec<usize> = Vec::new();

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            row.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let tag = after
                .find('}')
                .and_then(|close| Tag::parse(&after[..close]).map(|tag| (tag, close)));
            match tag {
                Some((Tag::Hfill, close)) => {
                    fills.push(row.len());
                    rest = &after[close + 1..];
                }
                Some((tag, close)) => {
                    self.expand(&mut row, tag, message, level, location, depth);
                    rest = &after[close + 1..];
                }
                None => {
                    row.push('{');
                    rest = after;
                }
            }
        }
        row.push_str(rest);

        if let Some(&first) = fills.first() {
            let fill = self
                .hfill
                .render(&row[..first], &row[first..], self.geometry.columns());
            for &at in fills.iter().rev() {
                row.insert_str(at, &fill);
            }
        }

        self.level_style(level).wrap(&row)
    }

    fn expand(
        &self,
        row: &mut String,
        tag: Tag,
        message: &str,
        level: Level,
        location: &Location<'_>,
        depth: usize,
    ) {
        use std::fmt::Write;
        // writing into a String cannot fail
        let _ = match tag {
            Tag::Msg => write!(row, "{message}"),
            Tag::Name => write!(row, "{}", self.program_name),
            Tag::File => write!(row, "{}", self.filename.render(location.file)),
            Tag::Func => write!(row, "{}", location.func),
            Tag::Line => write!(row, "{}", location.line),
            Tag::Level => write!(row, "{}", level.name()),
            Tag::LevelLetter => write!(row, "{}", level.letter()),
            Tag::LevelShort => write!(row, "{}", level.short_name()),
            Tag::Depth => write!(row, "{depth}"),
            Tag::DepthMarks => write!(row, "{}", self.depth_mark.repeat(depth)),
            Tag::LevelFmt => write!(row, "{}", self.level_style(level)),
            Tag::FilehashFmt => write!(row, "{}", Style::hash(location.file, &self.filehash_styles)),
            Tag::FunchashFmt => write!(row, "{}", Style::hash(location.func, &self.funchash_styles)),
            Tag::DepthFmt => write!(row, "{}", self.depth_style(depth)),
            Tag::Hfill => Ok(()),
        };
    }
}
