//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# scopelog

scopelog is a logging library for *printf-debugging at scale*.

# The problem

When a program misbehaves, the first instinct is to sprinkle it with prints. That works until
the output is a wall of text in which the ten interesting lines hide among ten thousand. The
usual remedy, log levels, is too coarse: the noise and the signal are often both at "debug".

scopelog lets you leave verbose messages everywhere and then choose, at run time, *which part*
of the program gets to speak:

* by **level**, as usual, with eight levels from `Critical` to `XDebug`;
* by **depth**, so that only the outer layers of a call tree report;
* by **location**, with regular expressions over the source file, function name and line.

A message is printed only when all three agree.

# Levels

| Level      | Short  | Letter | Compiled in release builds |
|------------|--------|--------|----------------------------|
| `Critical` | `Crit` | `C`    | yes                        |
| `Error`    | `Erro` | `E`    | yes                        |
| `Warning`  | `Warn` | `W`    | yes                        |
| `Progress` | `Prog` | `P`    | yes                        |
| `Note`     | `Note` | `N`    | with `always-on`           |
| `Info`     | `Info` | `I`    | with `always-on`           |
| `Debug`    | `Dbug` | `D`    | with `always-on`           |
| `XDebug`   | `XDbg` | `X`    | with `always-on`           |

A call is logged when its level is at or above the configured threshold in this table, which
defaults to `Error`.

# Quick start

```
use scopelog::{scoped, Level};
use scopelog::global_logger::with_logger_mut;

with_logger_mut(|logger| {
    logger.set_threshold(Level::Debug);
    logger.set_max_depth(1);
    logger.set_func_filter("^(load|parse)$").unwrap();
});

#[scoped]
fn load(path: &str) {
    scopelog::info!("loading {path}");
    parse();
}

#[scoped]
fn parse() {
    // depth 2: filtered out by the depth limit
    scopelog::debug!("parsing");
}

load("config.toml");
```

# Output

Messages are rendered from a template (see [`format`](mod@crate::format)) such as the default

```text
[{name}] {level_letter}:{depth_marks} {msg} {hfill} {func} @ {file}:{line}
```

which right-aligns the call site on the terminal. Templates can pull in ANSI styles picked by
level, by depth, or by hashing the file or function name, so that related lines share a
color. Rendered messages go to a [`Sink`](sink::Sink): stderr by default, or a file, or
memory.

Large values can be written to a file of their own with [`dump!`], under the same scope rules
as messages.

# Depth

Depth comes from a [`DepthProvider`](depth::DepthProvider). The default counts the frames
opened with [`scoped`] or [`depth::enter`] on the current thread; the `backtrace` feature
adds a provider counting real stack frames.

# The `log` facade

With the default `log` feature, [`bridge::init`] installs a `log` backend that forwards
records from crates using `log` to the global logger.
*/

mod level;
mod error;
pub mod style;
pub mod location;
pub mod depth;
pub mod geometry;
pub mod scope;
pub mod fill;
pub mod format;
mod log_record;
pub mod sink;
pub mod logger;
pub mod global_logger;
mod macros;
#[cfg(feature = "log")]
pub mod bridge;
mod spinlock;

pub use level::{levels, Level};
pub use error::{Error, Filter, Result};
pub use location::{FilenameMode, Location};
pub use log_record::LogRecord;
pub use logger::Logger;

pub use scopelog_proc::scoped;

extern crate self as scopelog;
