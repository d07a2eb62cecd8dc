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

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::mem;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use jiff::Zoned;

use crate::Error;
use crate::Trap;
use crate::file::Options;
use crate::file::handle::LogFile;
use crate::file::snapshot::Snapshot;
use crate::file::snapshot::format_label;
use crate::file::snapshot::scan_snapshots;

/// Owns the active log file and the snapshot history.
///
/// Only the background worker touches a `Rotator` once the writer is built, so none of its
/// state is synchronized except the degraded flag, which the writer reads.
#[derive(Debug)]
pub(crate) struct Rotator {
    dir: PathBuf,
    filename: String,
    rotate_format: String,
    max_files: usize,
    max_size: u64,
    // oldest first; the last one is always the active file
    history: VecDeque<Snapshot>,
    active: LogFile,
    degraded: Arc<AtomicBool>,
    trap: Arc<dyn Trap>,
}

impl Rotator {
    /// Recover the history of `filename` in `dir` and open the newest generation, or start a
    /// fresh one for `now` when there is none.
    pub(crate) fn new(
        dir: PathBuf,
        filename: String,
        options: &Options,
        trap: Arc<dyn Trap>,
        now: &Zoned,
    ) -> Result<Self, Error> {
        let mut history = VecDeque::from(scan_snapshots(&dir, &filename, &options.rotate_format)?);
        if history.is_empty() {
            let label = format_label(&options.rotate_format, now)?;
            history.push_back(Snapshot::new(label, 0, now.datetime()));
        }

        let current = &history[history.len() - 1];
        let active = LogFile::open(dir.join(current.filename(&filename)))?;

        Ok(Self {
            dir,
            filename,
            rotate_format: options.rotate_format.clone(),
            max_files: options.max_files,
            max_size: options.max_size,
            history,
            active,
            degraded: Arc::new(AtomicBool::new(false)),
            trap,
        })
    }

    pub(crate) fn degraded(&self) -> Arc<AtomicBool> {
        self.degraded.clone()
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> Vec<Snapshot> {
        self.history.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn active_path(&self) -> &std::path::Path {
        self.active.path()
    }

    fn current(&self) -> &Snapshot {
        &self.history[self.history.len() - 1]
    }

    /// Evict old snapshots and roll the active file over if `now` asks for it.
    pub(crate) fn rotate(&mut self, now: &Zoned) {
        self.evict();

        let label = match format_label(&self.rotate_format, now) {
            Ok(label) => label,
            Err(err) => {
                self.trap.trap(&err);
                return;
            }
        };

        let current = self.current();
        let date_changed = current.date_label() != label;
        let size_exceeded = self.max_size > 0 && self.active.size() >= self.max_size;
        if !date_changed && !size_exceeded {
            return;
        }

        let index = if date_changed {
            0
        } else {
            match current.index().checked_add(1) {
                Some(index) => index,
                None => {
                    let err = Error::new("no file index left for this date label")
                        .with_context("current", self.active.path().display());
                    self.trap.trap(&err);
                    self.degraded.store(true, Ordering::Release);
                    return;
                }
            }
        };
        self.rollover(Snapshot::new(label, index, now.datetime()));
    }

    fn evict(&mut self) {
        if self.max_files == 0 {
            return;
        }

        while self.history.len() > self.max_files {
            let Some(oldest) = self.history.pop_front() else {
                break;
            };
            let path = self.dir.join(oldest.filename(&self.filename));
            if let Err(err) = fs::remove_file(&path) {
                let err = Error::new("failed to remove old log file")
                    .with_context("path", path.display())
                    .with_source(err);
                self.trap.trap(&err);
            }
        }
    }

    // The new file is opened before the active one is given up, so a failed open leaves the
    // writer on its previous file and the rollover is attempted again on the next write.
    fn rollover(&mut self, snapshot: Snapshot) {
        let path = self.dir.join(snapshot.filename(&self.filename));
        match LogFile::open(&path) {
            Ok(file) => {
                let previous = mem::replace(&mut self.active, file);
                if let Err(err) = previous.close() {
                    self.trap.trap(&err);
                }
                self.history.push_back(snapshot);
                self.degraded.store(false, Ordering::Release);
            }
            Err(err) => {
                let err = Error::new("failed to roll over log file")
                    .with_context("current", self.active.path().display())
                    .with_source(err);
                self.trap.trap(&err);
                self.degraded.store(true, Ordering::Release);
            }
        }
    }

    /// Write a chunk to the active file. Failures are trapped and the chunk is dropped.
    pub(crate) fn write(&mut self, buf: &[u8]) {
        if let Err(err) = self.active.write_all(buf) {
            let err = Error::new("failed to write log file")
                .with_context("path", self.active.path().display())
                .with_context("bytes", buf.len())
                .with_source(err);
            self.trap.trap(&err);
        }
    }

    /// Close the active file, trapping failures.
    pub(crate) fn close(self) {
        let Self { active, trap, .. } = self;
        if let Err(err) = active.close() {
            trap.trap(&err);
        }
    }
}
