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

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use jiff::Zoned;
use jiff::civil::DateTime;
use jiff::civil::Time;
use jiff::fmt::strtime;

use crate::Error;
use crate::ErrorKind;

/// One generation of a rotated log file, either historical or the active one.
///
/// The file of a snapshot is named `<filename>.<date_label>.<index>`, with the index
/// zero-padded to three digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    date_label: String,
    index: u32,
    timestamp: DateTime,
}

impl Snapshot {
    pub(crate) fn new(date_label: impl Into<String>, index: u32, timestamp: DateTime) -> Self {
        Self {
            date_label: date_label.into(),
            index,
            timestamp,
        }
    }

    /// The formatted date this snapshot belongs to.
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// The position of this snapshot within its date.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// When this snapshot was created, or the parsed date for snapshots found on disk.
    pub fn timestamp(&self) -> DateTime {
        self.timestamp
    }

    /// The file name of this snapshot for the given base file name.
    pub fn filename(&self, base: &str) -> String {
        format!("{base}.{}.{:03}", self.date_label, self.index)
    }
}

// oldest is the least
fn compare_snapshot(a: &Snapshot, b: &Snapshot) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.index.cmp(&b.index))
}

/// Format the date label of `now` with the rotation pattern.
pub(crate) fn format_label(rotate_format: &str, now: &Zoned) -> Result<String, Error> {
    strtime::format(rotate_format, now).map_err(|err| {
        Error::new("failed to format rotation date label")
            .with_kind(ErrorKind::ConfigInvalid)
            .with_context("rotate_format", rotate_format)
            .with_source(err)
    })
}

/// Parse a date label back into a point in time.
///
/// Fields the pattern leaves out take fixed defaults: year 0, January, the first day of the
/// month and midnight. Labels such as `%m-%d` or `%H` therefore still order within the range
/// they cover.
pub(crate) fn parse_label(rotate_format: &str, label: &str) -> Option<DateTime> {
    let mut tm = strtime::parse(rotate_format, label).ok()?;
    if tm.year().is_none() {
        tm.set_year(Some(0)).ok()?;
    }
    if tm.month().is_none() {
        tm.set_month(Some(1)).ok()?;
    }
    if tm.day().is_none() {
        tm.set_day(Some(1)).ok()?;
    }
    if tm.hour().is_some() {
        if tm.minute().is_none() {
            tm.set_minute(Some(0)).ok()?;
        }
        if tm.second().is_none() {
            tm.set_second(Some(0)).ok()?;
        }
    }

    let date = tm.to_date().ok()?;
    let time = tm.to_time().unwrap_or(Time::midnight());
    Some(date.to_datetime(time))
}

fn parse_snapshot(name: &str, filename: &str, rotate_format: &str) -> Option<Snapshot> {
    let rest = name.strip_prefix(filename)?.strip_prefix('.')?;
    let (label, index) = rest.rsplit_once('.')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = index.parse::<u32>().ok()?;
    let timestamp = parse_label(rotate_format, label)?;
    Some(Snapshot::new(label, index, timestamp))
}

/// Reconstruct the rotation history of `filename` from the files found in `dir`.
///
/// Files that were not created by this rotation scheme are skipped. The result is ordered
/// from the oldest to the newest snapshot.
pub fn scan_snapshots(
    dir: &Path,
    filename: &str,
    rotate_format: &str,
) -> Result<Vec<Snapshot>, Error> {
    let read_dir = fs::read_dir(dir).map_err(|err| {
        Error::new("failed to read log dir")
            .with_context("dir", dir.display())
            .with_source(err)
    })?;

    let mut snapshots = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            // the writer only creates files, not directories or symlinks
            if !entry.file_type().ok()?.is_file() {
                return None;
            }
            // if the filename is not a UTF-8 string, skip it
            let name = entry.file_name();
            let name = name.to_str()?;
            parse_snapshot(name, filename, rotate_format)
        })
        .collect::<Vec<_>>();

    snapshots.sort_by(compare_snapshot);
    Ok(snapshots)
}
