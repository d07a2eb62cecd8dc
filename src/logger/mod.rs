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

use std::borrow::Cow;
use std::fmt;

use jiff::Zoned;

use crate::Error;
use crate::Level;
use crate::Trap;
use crate::driver::Driver;
use crate::layout::PatternLayout;

mod builder;
mod global;
mod log_impl;

pub use self::builder::LoggerBuilder;
pub use self::global::default_logger;
pub use self::global::shutdown;

/// A logger that renders each message once per driver and hands it over in registration order.
///
/// Messages more verbose than the logger's max level are dropped before being formatted.
/// Failures of a driver are reported to the logger's [`Trap`] and do not keep the message from
/// reaching the remaining drivers.
///
/// # Examples
///
/// ```
/// use flog::Level;
/// use flog::Logger;
/// use flog::driver::Stdout;
///
/// let logger = Logger::builder()
///     .max_level(Level::Info)
///     .driver(Stdout::new("[%L] %M"))
///     .build();
///
/// logger.info(format_args!("listening on port {}", 8080));
/// logger.debug(format_args!("not printed"));
/// ```
#[derive(Debug)]
pub struct Logger {
    max_level: Level,
    drivers: Vec<(Box<dyn Driver>, PatternLayout)>,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The most verbose level this logger lets through.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Whether a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    /// The registered drivers, in the order messages reach them.
    pub fn drivers(&self) -> impl ExactSizeIterator<Item = &dyn Driver> {
        self.drivers.iter().map(|(driver, _)| driver.as_ref())
    }

    /// Format and dispatch a message.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let message = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };
        let now = Zoned::now();
        for (driver, layout) in &self.drivers {
            let text = layout.format(level, &message, &now);
            if let Err(err) = driver.log(level, &text) {
                self.trap.trap(&err);
            }
        }
    }

    /// Log a message at [`Level::Debug`].
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    /// Log a message at [`Level::Info`].
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Log a message at [`Level::Warning`].
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }

    /// Log a message at [`Level::Error`].
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Log a message at [`Level::Fatal`]. The process keeps running.
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args);
    }

    /// Close every driver, returning the first error.
    ///
    /// All drivers are closed even when one of them fails.
    pub fn close(&self) -> Result<(), Error> {
        let mut first = None;
        for (driver, _) in &self.drivers {
            if let Err(err) = driver.close() {
                first.get_or_insert(err);
            }
        }
        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::sync::Mutex;

    use crate::Error;
    use crate::Level;
    use crate::driver::Driver;

    /// A driver that records every line, optionally failing each one.
    #[derive(Debug, Clone)]
    pub(crate) struct CaptureDriver {
        pub(crate) name: &'static str,
        pub(crate) pattern: String,
        pub(crate) fail: bool,
        pub(crate) lines: Arc<Mutex<Vec<(&'static str, Level, String)>>>,
    }

    impl CaptureDriver {
        pub(crate) fn new(
            name: &'static str,
            pattern: &str,
            lines: Arc<Mutex<Vec<(&'static str, Level, String)>>>,
        ) -> Self {
            Self {
                name,
                pattern: pattern.to_string(),
                fail: false,
                lines,
            }
        }
    }

    impl Driver for CaptureDriver {
        fn log(&self, level: Level, text: &str) -> Result<(), Error> {
            if self.fail {
                return Err(Error::new(format!("{} refused {text:?}", self.name)));
            }
            self.lines
                .lock()
                .unwrap()
                .push((self.name, level, text.to_string()));
            Ok(())
        }

        fn set_pattern(&mut self, pattern: String) {
            self.pattern = pattern;
        }

        fn pattern(&self) -> &str {
            &self.pattern
        }

        fn close(&self) -> Result<(), Error> {
            if self.fail {
                return Err(Error::new(format!("{} failed to close", self.name)));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::testing::CaptureDriver;
    use super::*;
    use crate::trap::testing::CaptureTrap;

    #[test]
    fn test_fan_out_in_registration_order() {
        let lines = Arc::new(Mutex::new(vec![]));
        let logger = Logger::builder()
            .driver(CaptureDriver::new("first", "%L|%M", lines.clone()))
            .driver(CaptureDriver::new("second", "<%M>", lines.clone()))
            .build();
        assert_eq!(logger.drivers().len(), 2);

        logger.info(format_args!("hello {}", "world"));
        logger.fatal(format_args!("still alive"));

        assert_eq!(
            *lines.lock().unwrap(),
            vec![
                ("first", Level::Info, "INFO|hello world".to_string()),
                ("second", Level::Info, "<hello world>".to_string()),
                ("first", Level::Fatal, "FATAL|still alive".to_string()),
                ("second", Level::Fatal, "<still alive>".to_string()),
            ]
        );
    }

    #[test]
    fn test_max_level_filters() {
        let lines = Arc::new(Mutex::new(vec![]));
        let logger = Logger::builder()
            .max_level(Level::Warning)
            .driver(CaptureDriver::new("only", "%M", lines.clone()))
            .build();

        assert!(logger.enabled(Level::Error));
        assert!(!logger.enabled(Level::Info));

        logger.debug(format_args!("debug"));
        logger.info(format_args!("info"));
        logger.warning(format_args!("warning"));
        logger.error(format_args!("error"));

        let levels = lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, level, _)| *level)
            .collect::<Vec<_>>();
        assert_eq!(levels, vec![Level::Warning, Level::Error]);
    }

    #[test]
    fn test_driver_failures_go_to_trap() {
        let lines = Arc::new(Mutex::new(vec![]));
        let trap = CaptureTrap::default();
        let mut failing = CaptureDriver::new("failing", "%M", lines.clone());
        failing.fail = true;
        let logger = Logger::builder()
            .driver(failing)
            .driver(CaptureDriver::new("healthy", "%M", lines.clone()))
            .trap(trap.clone())
            .build();

        logger.error(format_args!("boom"));
        assert_eq!(lines.lock().unwrap().len(), 1);
        let errors = trap.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("failing refused"), "{errors:?}");

        let err = logger.close().unwrap_err();
        assert!(err.message().contains("failed to close"));
    }
}
