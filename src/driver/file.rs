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

use std::thread;

use crate::Error;
use crate::Level;
use crate::driver::Driver;
use crate::file::FileWriter;
use crate::layout::DEFAULT_PATTERN;

/// A driver that writes log lines to one or more [`FileWriter`]s.
///
/// Every line goes to every writer. With [`FileDriver::concurrent`] enabled, the writers are
/// fed from scoped threads so a writer waiting for room in its queue does not hold up the
/// others.
///
/// # Examples
///
/// ```
/// use flog::driver::FileDriver;
/// use flog::file::FileWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let info = FileWriter::builder(dir.path(), "info.log").build().unwrap();
/// let all = FileWriter::builder(dir.path(), "all.log").build().unwrap();
/// let driver = FileDriver::new(info).with_writer(all).concurrent(true);
/// ```
#[derive(Debug)]
pub struct FileDriver {
    writers: Vec<FileWriter>,
    pattern: String,
    concurrent: bool,
}

impl FileDriver {
    /// Create a new `FileDriver` writing to `writer`.
    pub fn new(writer: FileWriter) -> Self {
        Self {
            writers: vec![writer],
            pattern: DEFAULT_PATTERN.to_string(),
            concurrent: false,
        }
    }

    /// Also write every line to `writer`.
    #[must_use]
    pub fn with_writer(mut self, writer: FileWriter) -> Self {
        self.writers.push(writer);
        self
    }

    /// Set the pattern lines are formatted with.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Write to the writers from scoped threads instead of one after another.
    #[must_use]
    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// The writers this driver feeds.
    pub fn writers(&self) -> &[FileWriter] {
        &self.writers
    }
}

impl Driver for FileDriver {
    fn log(&self, _: Level, text: &str) -> Result<(), Error> {
        let mut line = Vec::with_capacity(text.len() + 1);
        line.extend_from_slice(text.as_bytes());
        line.push(b'\n');

        let results = if self.concurrent && self.writers.len() > 1 {
            let line = &line;
            thread::scope(|s| {
                let handles = self
                    .writers
                    .iter()
                    .map(|writer| s.spawn(move || writer.write(line)))
                    .collect::<Vec<_>>();
                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(result) => result,
                        Err(_) => Err(Error::new("file driver thread panicked")),
                    })
                    .collect::<Vec<_>>()
            })
        } else {
            self.writers
                .iter()
                .map(|writer| writer.write(&line))
                .collect::<Vec<_>>()
        };

        match results.into_iter().find_map(Result::err) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn set_pattern(&mut self, pattern: String) {
        self.pattern = pattern;
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn close(&self) -> Result<(), Error> {
        let mut first = None;
        for writer in &self.writers {
            if let Err(err) = writer.close() {
                first.get_or_insert(err);
            }
        }
        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
