//! Diagnostics for malformed charstrings.
//!
//! With the `logging` feature the macros below forward to the `log` crate at
//! the matching level. Without it they only borrow their arguments, so call
//! sites compile the same either way.

macro_rules! log_at {
    ($level:ident, $fmt:literal $(, $($arg:expr),* $(,)?)?) => {
        #[cfg(feature = "logging")]
        ::log::log!(::log::Level::$level, $fmt $(, $($arg),*)?);
        #[cfg(not(feature = "logging"))]
        { $($(let _ = &$arg;)*)? }
    };
}

/// Per-operator tracing of the interpreter loop.
macro_rules! ltrace {
    ($($t:tt)*) => { log_at!(Trace, $($t)*) };
}

/// Flex and `seac` transitions.
macro_rules! ldebug {
    ($($t:tt)*) => { log_at!(Debug, $($t)*) };
}

/// Recoverable problems, e.g. a glyph skipped while scanning a font.
macro_rules! lwarn {
    ($($t:tt)*) => { log_at!(Warn, $($t)*) };
}

/// The reason a glyph failed to decode.
macro_rules! lerror {
    ($($t:tt)*) => { log_at!(Error, $($t)*) };
}
