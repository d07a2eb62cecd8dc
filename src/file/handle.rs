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

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;

/// An open log file together with the number of bytes it holds.
#[derive(Debug)]
pub(crate) struct LogFile {
    path: PathBuf,
    file: File,
    size: u64,
}

impl LogFile {
    /// Open `path` for appending, creating it if absent.
    ///
    /// An existing file is never truncated; its current length is the starting size.
    pub(crate) fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|err| {
                Error::new("failed to open log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;
        let size = file
            .metadata()
            .map_err(|err| {
                Error::new("failed to stat log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?
            .len();
        Ok(Self { path, file, size })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn size(&self) -> u64 {
        self.size
    }

    /// Flush and close the file, reporting errors that dropping would swallow.
    pub(crate) fn close(mut self) -> Result<(), Error> {
        let path = self.path.display().to_string();
        self.file
            .flush()
            .and_then(|()| self.file.sync_all())
            .map_err(|err| {
                Error::new("failed to close log file")
                    .with_context("path", path)
                    .with_source(err)
            })
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .write(buf)
            .inspect(|&n| self.size += n as u64)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_size_tracks_writes_and_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("info.log.2024-01-01.000");

        let mut file = LogFile::open(&path).unwrap();
        assert_eq!(file.size(), 0);
        file.write_all(b"hello\n").unwrap();
        file.write_all(b"world\n").unwrap();
        assert_eq!(file.size(), 12);
        file.close().unwrap();

        let mut file = LogFile::open(&path).unwrap();
        assert_eq!(file.size(), 12);
        file.write_all(b"again\n").unwrap();
        assert_eq!(file.size(), 18);
        assert_eq!(file.path(), path);
        file.close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld\nagain\n");
    }

    #[test]
    fn test_open_in_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = LogFile::open(temp_dir.path().join("absent").join("info.log")).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
