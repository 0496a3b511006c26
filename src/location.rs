// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site locations.
//!
//! A [`Location`] is the file, function and line a message originates from. The macros fill
//! it in from `file!()`, `line!()` and [`function_name!`](crate::function_name); code that
//! forwards records from elsewhere (for instance the `log` facade bridge) builds one by hand.
//!
//! ```rust
//! use scopelog::{here, Location};
//!
//! fn load_config() -> Location<'static> {
//!     here!()
//! }
//! let loc = load_config();
//! assert_eq!(loc.func, "load_config");
//! assert!(loc.file.ends_with(".rs"));
//! ```

use std::path::Path;

/// Where a message comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location<'a> {
    pub file: &'a str,
    pub func: &'a str,
    pub line: u32,
}

impl<'a> Location<'a> {
    pub const fn new(file: &'a str, func: &'a str, line: u32) -> Self {
        Location { file, func, line }
    }
}

/// How the `{file}` tag renders a path such as `src/net/socket.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilenameMode {
    /// `src/net/socket.rs`
    #[default]
    Path,
    /// `socket.rs`
    Base,
    /// `net`
    Dir,
    /// `net/socket.rs`
    DirBase,
    /// `socket`
    Stem,
    /// `net/socket`
    DirStem,
}

impl FilenameMode {
    pub fn render(self, file: &str) -> String {
        let path = Path::new(file);
        let base = || {
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let stem = || {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let dir = || {
            path.parent()
                .and_then(Path::file_name)
                .map(|s| s.to_string_lossy().into_owned())
        };
        match self {
            FilenameMode::Path => file.to_string(),
            FilenameMode::Base => base(),
            FilenameMode::Dir => dir().unwrap_or_default(),
            FilenameMode::DirBase => match dir() {
                Some(d) => format!("{d}/{}", base()),
                None => base(),
            },
            FilenameMode::Stem => stem(),
            FilenameMode::DirStem => match dir() {
                Some(d) => format!("{d}/{}", stem()),
                None => stem(),
            },
        }
    }
}

/**
Reduces the type name of a probe function nested in some function to that function's name.

`my_crate::module::work::__scopelog_probe` becomes `work`; closures resolve to the function
that defines them.
*/
#[doc(hidden)]
pub fn trim_function_path(probe_path: &'static str) -> &'static str {
    let mut path = probe_path
        .strip_suffix("::__scopelog_probe")
        .unwrap_or(probe_path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// The name of the enclosing function, as a `&'static str`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __scopelog_probe() {}
        fn __scopelog_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::location::trim_function_path(__scopelog_type_name_of(__scopelog_probe))
    }};
}

/// The [Location] of the macro invocation.
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(file!(), $crate::function_name!(), line!())
    };
}
