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

//! Drivers write formatted log lines to their destinations.

use std::fmt;

use crate::Error;
use crate::Level;

mod file;
mod stdio;

pub use self::file::FileDriver;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;

/// A destination for formatted log lines.
///
/// A driver carries the pattern its lines should be formatted with; the [`Logger`] compiles it
/// into a [`PatternLayout`] when the driver is registered and passes the rendered text to
/// [`Driver::log`].
///
/// [`Logger`]: crate::Logger
/// [`PatternLayout`]: crate::layout::PatternLayout
pub trait Driver: fmt::Debug + Send + Sync + 'static {
    /// Write one formatted line. The driver terminates it with a newline.
    fn log(&self, level: Level, text: &str) -> Result<(), Error>;

    /// Replace the pattern lines are formatted with.
    fn set_pattern(&mut self, pattern: String);

    /// The pattern lines are formatted with.
    fn pattern(&self) -> &str;

    /// Flush and release the destination.
    fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Driver> From<T> for Box<dyn Driver> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
