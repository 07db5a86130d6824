//! Logging macros that flush immediately so output is not lost in async
//! tasks. Standard println!/eprintln! can sit in a buffer until the
//! process exits.

/// Print to stdout with immediate flush.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let _ = writeln!(std::io::stdout(), $($arg)*);
        let _ = std::io::stdout().flush();
    }};
}

/// Print to stderr with immediate flush.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), $($arg)*);
        let _ = std::io::stderr().flush();
    }};
}

/// Print debug information to stderr, debug builds only.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            use std::io::Write;
            let _ = writeln!(std::io::stderr(), "[DEBUG] {}", format!($($arg)*));
            let _ = std::io::stderr().flush();
        }
    }};
}
