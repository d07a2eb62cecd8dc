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

use std::io::Write;

use crate::Error;
use crate::Level;
use crate::driver::Driver;
use crate::layout::DEFAULT_PATTERN;

/// A driver that prints log lines to stdout.
#[derive(Debug)]
pub struct Stdout {
    pattern: String,
}

impl Default for Stdout {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl Stdout {
    /// Creates a new `Stdout` driver with the given pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Driver for Stdout {
    fn log(&self, _: Level, text: &str) -> Result<(), Error> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .map_err(Error::from_io_error)
    }

    fn set_pattern(&mut self, pattern: String) {
        self.pattern = pattern;
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn close(&self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// A driver that prints log lines to stderr.
#[derive(Debug)]
pub struct Stderr {
    pattern: String,
}

impl Default for Stderr {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl Stderr {
    /// Creates a new `Stderr` driver with the given pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Driver for Stderr {
    fn log(&self, _: Level, text: &str) -> Result<(), Error> {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(text.as_bytes())
            .and_then(|()| stderr.write_all(b"\n"))
            .map_err(Error::from_io_error)
    }

    fn set_pattern(&mut self, pattern: String) {
        self.pattern = pattern;
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn close(&self) -> Result<(), Error> {
        std::io::stderr().flush().map_err(Error::from_io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdio_patterns() {
        let mut stdout = Stdout::default();
        assert_eq!(stdout.pattern(), DEFAULT_PATTERN);
        stdout.set_pattern("%L %M".to_string());
        assert_eq!(stdout.pattern(), "%L %M");
        stdout.log(Level::Info, "to stdout").unwrap();
        stdout.close().unwrap();

        let stderr = Stderr::new("%M");
        assert_eq!(stderr.pattern(), "%M");
        stderr.log(Level::Error, "to stderr").unwrap();
        stderr.close().unwrap();
    }
}
