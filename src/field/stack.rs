//! Lazily rendered call stacks

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

macro_rules! crate_path {
    (< $path:literal) => {
        concat!("<", env!("CARGO_CRATE_NAME"), "::", $path)
    };
    ($path:literal) => {
        concat!(env!("CARGO_CRATE_NAME"), "::", $path)
    };
}

/// Functions between a logging call and the stack walk: field rendering,
/// encoding and the logger itself
const INTERNAL_PREFIXES: &[&str] = &[
    crate_path!("field::stack::Stacktrace"),
    crate_path!(< "field::stack::Stacktrace"),
    crate_path!("field::encode::"),
    crate_path!(< "field::dict::DictObject"),
    crate_path!("core::encoder::"),
    crate_path!(< "core::encoder::"),
    crate_path!("logging::adapter::FieldLogger"),
    crate_path!(< "logging::adapter::FieldLogger"),
    crate_path!("logging::Logger::"),
];

/// Frames of formatting and capture machinery that sit above the caller
const MACHINERY_PREFIXES: &[&str] = &[
    "std::backtrace",
    "core::fmt",
    "<core::fmt",
    "<&T as core::fmt",
    "alloc::fmt",
    "alloc::string",
    "<alloc::string",
    "<T as alloc::string",
    "<alloc::sync",
];

/// A call stack captured when rendered, not when constructed
///
/// Building a `Stacktrace` is free; the walk happens in `Display`, so a
/// stack field attached to an entry that is filtered out costs nothing.
/// Leading frames of the logger's own rendering path and of the formatting
/// machinery are dropped before `skip` further frames are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stacktrace {
    skip: usize,
}

impl Stacktrace {
    pub const fn new(skip: usize) -> Self {
        Self { skip }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Walk the current stack and render it.
    ///
    /// Returns an empty string when the platform cannot capture backtraces.
    #[inline(never)]
    pub fn capture(&self) -> String {
        let trace = Backtrace::force_capture();
        if trace.status() != BacktraceStatus::Captured {
            return String::new();
        }
        render_frames(&trace.to_string(), self.skip)
    }
}

impl fmt::Display for Stacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.capture())
    }
}

#[derive(Debug, PartialEq)]
struct Frame<'a> {
    function: &'a str,
    location: Option<&'a str>,
}

/// Parse the `Display` output of [`Backtrace`] into frames.
///
/// ```text
///    0: app::handler
///              at ./src/main.rs:10:5
/// ```
fn parse_frames(rendered: &str) -> Vec<Frame<'_>> {
    let mut frames: Vec<Frame<'_>> = Vec::new();

    for line in rendered.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                if last.location.is_none() {
                    last.location = Some(strip_column(location));
                }
            }
            continue;
        }

        let function = match line.split_once(": ") {
            Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push(Frame {
            function,
            location: None,
        });
    }

    frames
}

/// `file:line:col` becomes `file:line`
fn strip_column(location: &str) -> &str {
    if let Some((head, col)) = location.rsplit_once(':') {
        if col.parse::<u32>().is_ok() {
            if let Some((_, line)) = head.rsplit_once(':') {
                if line.parse::<u32>().is_ok() {
                    return head;
                }
            }
        }
    }
    location
}

fn is_machinery(function: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .chain(MACHINERY_PREFIXES)
        .any(|p| function.starts_with(p))
}

fn render_frames(rendered: &str, skip: usize) -> String {
    let mut out = String::new();

    let frames = parse_frames(rendered);
    for frame in frames
        .iter()
        .skip_while(|f| is_machinery(f.function))
        .skip(skip)
    {
        out.push_str(frame.function);
        out.push('\n');
        if let Some(location) = frame.location {
            out.push('\t');
            out.push_str(location);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        format!(
            "   0: {krate}::field::stack::Stacktrace::capture\n\
             \x20            at ./src/field/stack.rs:48:21\n\
             \x20  1: <{krate}::field::stack::Stacktrace as core::fmt::Display>::fmt\n\
             \x20            at ./src/field/stack.rs:58:22\n\
             \x20  2: core::fmt::write\n\
             \x20  3: app::handlers::create_user\n\
             \x20            at ./src/handlers.rs:31:9\n\
             \x20  4: app::main\n\
             \x20            at ./src/main.rs:12:5\n",
            krate = env!("CARGO_CRATE_NAME")
        )
    }

    #[test]
    fn test_parse_frames() {
        let text = sample();
        let frames = parse_frames(&text);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[2].function, "core::fmt::write");
        assert_eq!(frames[2].location, None);
        assert_eq!(frames[3].function, "app::handlers::create_user");
        assert_eq!(frames[3].location, Some("./src/handlers.rs:31"));
    }

    #[test]
    fn test_render_drops_machinery() {
        let out = render_frames(&sample(), 0);
        assert_eq!(
            out,
            "app::handlers::create_user\n\t./src/handlers.rs:31\napp::main\n\t./src/main.rs:12\n"
        );
    }

    #[test]
    fn test_render_with_skip() {
        let out = render_frames(&sample(), 1);
        assert_eq!(out, "app::main\n\t./src/main.rs:12\n");

        assert_eq!(render_frames(&sample(), 10), "");
    }

    #[test]
    fn test_callers_inside_the_crate_are_kept() {
        let text = format!(
            "   0: {krate}::field::stack::Stacktrace::capture\n\
             \x20  1: {krate}::field::encode::<impl {krate}::field::Field>::add_to\n\
             \x20  2: <{krate}::logging::adapter::FieldLogger as {krate}::logging::Logger>::log\n\
             \x20  3: {krate}::logging::Logger::error\n\
             \x20  4: {krate}::core::dispatcher::Dispatcher::report\n\
             \x20            at ./src/core/dispatcher.rs:90:5\n\
             \x20  5: app::main\n",
            krate = env!("CARGO_CRATE_NAME")
        );

        let out = render_frames(&text, 0);
        assert!(out.starts_with(&format!(
            "{}::core::dispatcher::Dispatcher::report\n\t./src/core/dispatcher.rs:90\n",
            env!("CARGO_CRATE_NAME")
        )));
        assert!(out.ends_with("app::main\n"));
    }

    #[test]
    fn test_strip_column() {
        assert_eq!(strip_column("src/lib.rs:10:5"), "src/lib.rs:10");
        assert_eq!(strip_column("src/lib.rs:10"), "src/lib.rs:10");
        assert_eq!(strip_column("<unknown>"), "<unknown>");
    }

    #[test]
    fn test_construction_is_free() {
        let st = Stacktrace::new(3);
        assert_eq!(st.skip(), 3);
        assert_eq!(st, Stacktrace::new(3));
    }
}
