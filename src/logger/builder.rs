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

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::Trap;
use crate::driver::Driver;
use crate::layout::PatternLayout;
use crate::logger::global;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// ## Examples
///
/// Log to stdout and to a rolling file, and route the `log` crate macros to both:
///
/// ```no_run
/// use flog::Level;
/// use flog::Logger;
/// use flog::driver::FileDriver;
/// use flog::driver::Stdout;
/// use flog::file::FileWriter;
///
/// let writer = FileWriter::builder("/var/log/app", "app.log")
///     .max_files(7)
///     .build()
///     .unwrap();
///
/// Logger::builder()
///     .max_level(Level::Info)
///     .driver(Stdout::default())
///     .driver(FileDriver::new(writer))
///     .apply()
///     .unwrap();
///
/// log::info!("This is an info message.");
/// flog::shutdown().unwrap();
/// ```
#[must_use = "call `build` to create the logger or `apply` to install it as the default"]
#[derive(Debug)]
pub struct LoggerBuilder {
    drivers: Vec<(Box<dyn Driver>, PatternLayout)>,
    // default to debug, the most verbose level
    max_level: Level,
    trap: Box<dyn Trap>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a new empty [`LoggerBuilder`].
    pub fn new() -> Self {
        Self {
            drivers: vec![],
            max_level: Level::Debug,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Add a [`Driver`], formatting its lines with the driver's own pattern.
    pub fn driver(self, driver: impl Into<Box<dyn Driver>>) -> Self {
        let driver = driver.into();
        let layout = PatternLayout::new(driver.pattern());
        self.push(driver, layout)
    }

    /// Add a [`Driver`] with an explicit layout, for example a colored one.
    ///
    /// The driver's pattern is replaced with the layout's.
    pub fn driver_with_layout(
        self,
        driver: impl Into<Box<dyn Driver>>,
        layout: PatternLayout,
    ) -> Self {
        let mut driver = driver.into();
        driver.set_pattern(layout.pattern().to_string());
        self.push(driver, layout)
    }

    fn push(mut self, driver: Box<dyn Driver>, layout: PatternLayout) -> Self {
        self.drivers.push((driver, layout));
        self
    }

    /// Set the most verbose level to let through.
    pub fn max_level(mut self, max_level: Level) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the trap receiving driver failures.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Create the [`Logger`].
    pub fn build(self) -> Logger {
        Logger {
            max_level: self.max_level,
            drivers: self.drivers,
            trap: self.trap,
        }
    }

    /// Install the logger as the process default and as the global [`log`] logger.
    ///
    /// This should be called early in the execution of a program. Messages logged through the
    /// `log` macros before installation are ignored.
    ///
    /// # Errors
    ///
    /// An error is returned if a default logger was already installed, or if another library
    /// has already set the global `log` logger.
    pub fn apply(self) -> Result<&'static Logger, Error> {
        global::install(self.build())
    }
}
