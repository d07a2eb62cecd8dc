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

use std::time::Duration;

use jiff::Zoned;

use crate::Error;
use crate::ErrorKind;
use crate::file::snapshot::format_label;
use crate::file::snapshot::parse_label;

/// Tunables of a [`FileWriter`](crate::file::FileWriter).
///
/// With the `serde` feature enabled, options can be read from configuration files. Keys are
/// camelCase, every key is optional, and `writeTimeout` is given in milliseconds:
///
/// ```json
/// { "rotateFormat": "%Y-%m-%d-%H", "maxFiles": 24, "maxSize": 1048576, "writeTimeout": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Options {
    /// The strftime-like pattern whose output labels a file generation. A new file starts
    /// whenever the label of the current time differs from the active one.
    pub rotate_format: String,
    /// How many snapshots to keep around before the oldest are deleted; `0` keeps everything.
    pub max_files: usize,
    /// The size in bytes after which the active file is rolled over; `0` disables size
    /// rotation.
    pub max_size: u64,
    /// How many chunks may wait for the background writer.
    pub queue_capacity: usize,
    /// How long a write may wait for room in the queue; zero never waits.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub write_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            rotate_format: "%Y-%m-%d".to_string(),
            max_files: 0,
            max_size: 3 * 1024 * 1024,
            queue_capacity: 8 * 1024,
            write_timeout: Duration::from_secs(1),
        }
    }
}

impl Options {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.queue_capacity == 0 {
            return Err(Error::new("queue capacity must be positive")
                .with_kind(ErrorKind::ConfigInvalid));
        }

        let label = format_label(&self.rotate_format, &Zoned::now())?;
        if label.is_empty() || label.contains(['/', '\\']) {
            return Err(Error::new("rotate format must produce a non-empty file name part")
                .with_kind(ErrorKind::ConfigInvalid)
                .with_context("rotate_format", &self.rotate_format)
                .with_context("label", label));
        }
        if parse_label(&self.rotate_format, &label).is_none() {
            return Err(Error::new("rotate format produces labels that cannot be read back")
                .with_kind(ErrorKind::ConfigInvalid)
                .with_context("rotate_format", &self.rotate_format)
                .with_context("label", label));
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
