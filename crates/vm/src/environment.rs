//! Script environment: the standard I/O surface host functions print
//! through.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Supplies standard I/O to print-family host functions.
pub trait ScriptEnvironment {
    /// Writes `message` to standard output.
    fn print(&self, message: &str);

    /// Writes `message` to standard error.
    fn print_err(&self, message: &str);

    /// Reads one line from standard input, without the trailing newline.
    /// `None` signals end of input.
    fn read_line(&self) -> io::Result<Option<String>>;
}

/// The process-standard environment: stdout, stderr, stdin.
#[derive(Default)]
pub struct StandardEnvironment;

impl StandardEnvironment {
    /// Creates the standard environment.
    pub fn new() -> Self {
        Self
    }
}

impl ScriptEnvironment for StandardEnvironment {
    fn print(&self, message: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(message.as_bytes());
        let _ = out.flush();
    }

    fn print_err(&self, message: &str) {
        let mut err = io::stderr().lock();
        let _ = err.write_all(message.as_bytes());
        let _ = err.flush();
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let count = io::stdin().lock().read_line(&mut line)?;
        if count == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// An in-memory environment that records output and serves queued input.
/// Useful for tests and for embedders that redirect script I/O.
#[derive(Default)]
pub struct CaptureEnvironment {
    out: RefCell<String>,
    err: RefCell<String>,
    input: RefCell<VecDeque<String>>,
}

impl CaptureEnvironment {
    /// Creates an empty capture environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a line to be served by `read_line`.
    pub fn queue_input<S: Into<String>>(&self, line: S) {
        self.input.borrow_mut().push_back(line.into());
    }

    /// Returns everything printed to standard output so far.
    pub fn output(&self) -> String {
        self.out.borrow().clone()
    }

    /// Returns everything printed to standard error so far.
    pub fn error_output(&self) -> String {
        self.err.borrow().clone()
    }
}

impl ScriptEnvironment for CaptureEnvironment {
    fn print(&self, message: &str) {
        self.out.borrow_mut().push_str(message);
    }

    fn print_err(&self, message: &str) {
        self.err.borrow_mut().push_str(message);
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self.input.borrow_mut().pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_both_streams() {
        let environment = CaptureEnvironment::new();
        environment.print("out1 ");
        environment.print("out2");
        environment.print_err("err");

        assert_eq!(environment.output(), "out1 out2");
        assert_eq!(environment.error_output(), "err");
    }

    #[test]
    fn test_capture_serves_queued_input() {
        let environment = CaptureEnvironment::new();
        environment.queue_input("first");

        assert_eq!(environment.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(environment.read_line().unwrap(), None);
    }
}
