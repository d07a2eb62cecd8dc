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

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use crossbeam_channel::SendTimeoutError;
use crossbeam_channel::Sender;
use crossbeam_channel::TrySendError;
use crossbeam_channel::bounded;

use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::file::Options;
use crate::file::clock::Clock;
use crate::file::pool::BufferPool;
use crate::file::pool::MAX_CHUNK_SIZE;
use crate::file::pool::PooledBuffer;
use crate::file::rotate::Rotator;
use crate::file::worker::Worker;
use crate::trap::DefaultTrap;

const OPEN: u8 = 0;
const CLOSING: u8 = 1;
const CLOSED: u8 = 2;

/// A writer that appends to rotating log files from a background thread.
///
/// Writes are split into chunks of at most 3 KiB, copied into pooled buffers and queued for a
/// dedicated thread, which rolls the file over when the date label changes or the file grows
/// past the configured size, and then writes the chunk. Chunks of one write stay in order;
/// chunks of concurrent writes may interleave, but never within a chunk.
///
/// Errors that happen on the background thread are reported to the [`Trap`] and never to the
/// caller of [`FileWriter::write`].
///
/// # Examples
///
/// ```
/// use flog::file::FileWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = FileWriter::builder(dir.path(), "info.log")
///     .max_files(7)
///     .build()
///     .unwrap();
///
/// writer.write(b"hello\n").unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileWriter {
    write_timeout: Duration,
    pool: BufferPool,
    sender: ArcSwapOption<Sender<PooledBuffer>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    state: AtomicU8,
    degraded: Arc<AtomicBool>,
    trap: Arc<dyn Trap>,
}

#[derive(Debug, Clone, Copy)]
enum Deadline {
    Immediate,
    At(Instant),
    Never,
}

impl Deadline {
    fn after(timeout: Duration) -> Self {
        if timeout.is_zero() {
            return Deadline::Immediate;
        }
        match Instant::now().checked_add(timeout) {
            Some(at) => Deadline::At(at),
            None => Deadline::Never,
        }
    }
}

fn closed_error() -> Error {
    Error::new("file writer already closed").with_kind(ErrorKind::Closed)
}

impl FileWriter {
    /// Create a new [`FileWriterBuilder`] writing `<filename>.<date>.<index>` files in `dir`.
    pub fn builder(dir: impl Into<PathBuf>, filename: impl Into<String>) -> FileWriterBuilder {
        FileWriterBuilder::new(dir, filename)
    }

    /// Queue `payload` to be written.
    ///
    /// Returns the payload length once every chunk is queued. Otherwise the error's
    /// [`written`](Error::written) tells how many leading bytes were queued and will still be
    /// written:
    ///
    /// * [`ErrorKind::Discarded`]: the write timeout is zero and the queue was full.
    /// * [`ErrorKind::Timeout`]: the write timeout elapsed while the queue was full. Chunks that
    ///   did not make it into the queue before the deadline are dropped, never queued later.
    /// * [`ErrorKind::Closed`]: the writer is closed. The unqueued bytes are spilled to the trap.
    pub fn write(&self, payload: &[u8]) -> Result<usize, Error> {
        let sender = match self.state.load(Ordering::Acquire) {
            OPEN => self.sender.load_full(),
            _ => None,
        };
        let Some(sender) = sender else {
            self.trap.spill(payload);
            return Err(closed_error().with_written(0));
        };

        let deadline = Deadline::after(self.write_timeout);
        let mut written = 0;
        for chunk in payload.chunks(MAX_CHUNK_SIZE) {
            let mut buf = self.pool.acquire();
            buf.extend_from_slice(chunk);
            if let Err(err) = enqueue(&sender, buf, deadline) {
                if err.kind() == ErrorKind::Closed {
                    self.trap.spill(&payload[written..]);
                }
                return Err(err.with_written(written));
            }
            written += chunk.len();
        }

        Ok(written)
    }

    /// Whether the last rollover failed to open its new file.
    ///
    /// A degraded writer keeps appending to its previous file and retries the rollover on every
    /// chunk it writes, until one succeeds.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Whether [`FileWriter::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.state.load(Ordering::Acquire) != OPEN
    }

    /// Stop accepting writes and wait until every queued chunk has been written.
    ///
    /// Closing is idempotent: later calls, including concurrent ones, return once the first
    /// close has finished draining.
    pub fn close(&self) -> Result<(), Error> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = self
            .state
            .compare_exchange(OPEN, CLOSING, Ordering::AcqRel, Ordering::Acquire);

        // the queue disconnects once in-flight writes release their senders as well
        drop(self.sender.swap(None));

        let joined = match worker.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::new("file writer thread panicked")),
            None => Ok(()),
        };
        self.state.store(CLOSED, Ordering::Release);
        joined
    }

    fn write_io(&self, buf: &[u8]) -> io::Result<usize> {
        match self.write(buf) {
            Ok(n) => Ok(n),
            Err(err) => match err.written() {
                Some(n) if n > 0 => Ok(n),
                _ => Err(err.into_io_error()),
            },
        }
    }
}

fn enqueue(
    sender: &Sender<PooledBuffer>,
    buf: PooledBuffer,
    deadline: Deadline,
) -> Result<(), Error> {
    match deadline {
        Deadline::Immediate => sender.try_send(buf).map_err(|err| match err {
            TrySendError::Full(_) => {
                Error::new("write queue is full, discard log").with_kind(ErrorKind::Discarded)
            }
            TrySendError::Disconnected(_) => closed_error(),
        }),
        Deadline::At(at) => sender.send_deadline(buf, at).map_err(|err| match err {
            SendTimeoutError::Timeout(_) => {
                Error::new("write timeout, discard log").with_kind(ErrorKind::Timeout)
            }
            SendTimeoutError::Disconnected(_) => closed_error(),
        }),
        Deadline::Never => sender.send(buf).map_err(|_| closed_error()),
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            self.trap.trap(&err);
        }
    }
}

impl io::Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_io(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_io(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A builder for configuring [`FileWriter`].
#[derive(Debug)]
pub struct FileWriterBuilder {
    // required
    dir: PathBuf,
    filename: String,

    // has default
    options: Options,
    thread_name: Option<String>,
    clock: Clock,
    trap: Arc<dyn Trap>,
}

impl FileWriterBuilder {
    /// Create a new [`FileWriterBuilder`] with default [`Options`].
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
            options: Options::default(),
            thread_name: None,
            clock: Clock::DefaultClock,
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the strftime-like pattern labelling each file generation.
    #[must_use]
    pub fn rotate_format(mut self, rotate_format: impl Into<String>) -> Self {
        self.options.rotate_format = rotate_format.into();
        self
    }

    /// Set the number of files to keep besides the active one; `0` keeps everything.
    #[must_use]
    pub fn max_files(mut self, n: usize) -> Self {
        self.options.max_files = n;
        self
    }

    /// Set the size in bytes after which a file is rolled over; `0` disables size rotation.
    #[must_use]
    pub fn max_size(mut self, n: u64) -> Self {
        self.options.max_size = n;
        self
    }

    /// Set how many chunks may wait for the background thread.
    #[must_use]
    pub fn queue_capacity(mut self, n: usize) -> Self {
        self.options.queue_capacity = n;
        self
    }

    /// Set how long a write may wait for room in the queue; zero never waits.
    #[must_use]
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.options.write_timeout = timeout;
        self
    }

    /// Override the background thread's name. It defaults to `flog-<filename>`.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Set the trap receiving background errors and undelivered payloads.
    #[must_use]
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = Arc::from(trap.into());
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`FileWriter`] and start its background thread.
    ///
    /// The directory is created when missing. The newest file left by a previous writer with
    /// the same filename and rotate format is reopened for appending.
    pub fn build(self) -> Result<FileWriter, Error> {
        let Self {
            dir,
            filename,
            options,
            thread_name,
            clock,
            trap,
        } = self;

        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(Error::new("filename must be a non-empty file name")
                .with_kind(ErrorKind::ConfigInvalid)
                .with_context("filename", filename));
        }
        options.validate()?;
        prepare_dir(&dir)?;

        let thread_name = thread_name.unwrap_or_else(|| format!("flog-{filename}"));
        let rotator = Rotator::new(dir, filename, &options, trap.clone(), &clock.now())?;
        let degraded = rotator.degraded();

        let (sender, receiver) = bounded(options.queue_capacity);
        let worker = Worker::new(receiver, rotator, clock);
        let handle = std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || worker.run())
            .map_err(|err| Error::new("failed to spawn file writer thread").with_source(err))?;

        Ok(FileWriter {
            write_timeout: options.write_timeout,
            pool: BufferPool::new(options.queue_capacity),
            sender: ArcSwapOption::from_pointee(sender),
            worker: Mutex::new(Some(handle)),
            state: AtomicU8::new(OPEN),
            degraded,
            trap,
        })
    }
}

fn prepare_dir(dir: &Path) -> Result<(), Error> {
    match fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::new("log path exists and is not a directory")
            .with_kind(ErrorKind::ConfigInvalid)
            .with_context("dir", dir.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => create_dir(dir),
        Err(err) => Err(Error::new("failed to read log dir")
            .with_context("dir", dir.display())
            .with_source(err)),
    }
}

fn create_dir(dir: &Path) -> Result<(), Error> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir).map_err(|err| {
        Error::new("failed to create log directory")
            .with_context("dir", dir.display())
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;
    use std::str::FromStr;
    use std::sync::mpsc;
    use std::thread;

    use jiff::Span;
    use jiff::Zoned;
    use tempfile::TempDir;

    use super::*;
    use crate::file::clock::ManualClock;
    use crate::trap::testing::CaptureTrap;

    fn start() -> Zoned {
        Zoned::from_str("2024-08-10T08:00:00[UTC]").unwrap()
    }

    fn read(dir: &TempDir, name: &str) -> Vec<u8> {
        fs::read(dir.path().join(name)).unwrap()
    }

    fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    /// Parks the worker inside its first trap call until released, so tests can fill the queue.
    #[derive(Debug)]
    struct GateTrap {
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl Trap for GateTrap {
        fn trap(&self, _: &Error) {
            let _ = self.entered.lock().unwrap().send(());
            let _ = self.release.lock().unwrap().recv();
        }
    }

    /// Build a writer whose worker is parked after writing `b"ab"` to the first file.
    fn stalled_writer(
        dir: &TempDir,
        write_timeout: Duration,
    ) -> (FileWriter, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let trap = GateTrap {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        };

        // a directory squatting on the next file name makes the rollover fail and trap
        fs::create_dir(dir.path().join("info.log.2024-08-10.001")).unwrap();

        let writer = FileWriter::builder(dir.path(), "info.log")
            .max_size(1)
            .queue_capacity(2)
            .write_timeout(write_timeout)
            .clock(Clock::ManualClock(ManualClock::new(start())))
            .trap(trap)
            .build()
            .unwrap();

        assert_eq!(writer.write(b"a").unwrap(), 1);
        assert_eq!(writer.write(b"b").unwrap(), 1);
        entered_rx.recv().unwrap();
        (writer, release_tx)
    }

    #[test]
    fn test_single_write_lands_in_todays_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileWriter::builder(temp_dir.path(), "info.log")
            .clock(Clock::ManualClock(ManualClock::new(start())))
            .build()
            .unwrap();

        assert_eq!(writer.write(b"hello\n").unwrap(), 6);
        writer.close().unwrap();

        assert_eq!(count_files(temp_dir.path()), 1);
        assert_eq!(read(&temp_dir, "info.log.2024-08-10.000"), b"hello\n");
    }

    #[test]
    fn test_multi_chunk_writes_keep_order() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileWriter::builder(temp_dir.path(), "info.log")
            .max_size(0)
            .queue_capacity(4)
            .clock(Clock::ManualClock(ManualClock::new(start())))
            .build()
            .unwrap();

        let mut expected = vec![];
        for i in 0..20u8 {
            let payload = vec![b'a' + i; MAX_CHUNK_SIZE * 2 + 17 * i as usize];
            assert_eq!(writer.write(&payload).unwrap(), payload.len());
            expected.extend_from_slice(&payload);
        }
        assert_eq!(writer.write(&[]).unwrap(), 0);
        writer.close().unwrap();

        assert_eq!(read(&temp_dir, "info.log.2024-08-10.000"), expected);
    }

    #[test]
    fn test_date_change_rolls_over() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(start());
        let writer = FileWriter::builder(temp_dir.path(), "info.log")
            .clock(Clock::ManualClock(clock.clone()))
            .write_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        writer.write(b"day one\n").unwrap();
        // give the worker a chance to drain before the clock moves on
        while writer.pool.idle() == 0 {
            thread::yield_now();
        }
        clock.set_now(start() + Span::new().days(1));
        writer.write(b"day two\n").unwrap();
        writer.close().unwrap();

        assert_eq!(read(&temp_dir, "info.log.2024-08-10.000"), b"day one\n");
        assert_eq!(read(&temp_dir, "info.log.2024-08-11.000"), b"day two\n");
    }

    #[test]
    fn test_restart_without_year_continues_numbering() {
        let temp_dir = TempDir::new().unwrap();
        let run = |payload: &[u8]| {
            let writer = FileWriter::builder(temp_dir.path(), "info.log")
                .rotate_format("%m-%d")
                .max_size(1)
                .write_timeout(Duration::from_secs(10))
                .clock(Clock::ManualClock(ManualClock::new(start())))
                .build()
                .unwrap();
            for _ in 0..3 {
                writer.write(payload).unwrap();
            }
            writer.close().unwrap();
        };

        run(b"a");
        run(b"b");

        let mut names = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(
            names,
            (0..6)
                .map(|i| format!("info.log.08-10.{i:03}"))
                .collect::<Vec<_>>()
        );
        for (i, expected) in [b"a", b"a", b"a", b"b", b"b", b"b"].iter().enumerate() {
            assert_eq!(read(&temp_dir, &format!("info.log.08-10.{i:03}")), *expected);
        }
    }

    #[test]
    fn test_closed_writer_rejects_and_spills() {
        let temp_dir = TempDir::new().unwrap();
        let trap = CaptureTrap::default();
        let writer = FileWriter::builder(temp_dir.path(), "info.log")
            .clock(Clock::ManualClock(ManualClock::new(start())))
            .trap(trap.clone())
            .build()
            .unwrap();

        writer.write(b"before\n").unwrap();
        writer.close().unwrap();
        assert!(writer.is_closed());
        writer.close().unwrap();

        let err = writer.write(b"after\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
        assert_eq!(err.written(), Some(0));
        assert_eq!(trap.spilled(), b"after\n");
        assert_eq!(read(&temp_dir, "info.log.2024-08-10.000"), b"before\n");

        let err = Write::write(&mut &writer, b"io\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_full_queue_discards_without_blocking() {
        let temp_dir = TempDir::new().unwrap();
        let (writer, release) = stalled_writer(&temp_dir, Duration::ZERO);

        // two free slots: the first two chunks get in, the third is discarded
        let payload = vec![b'x'; MAX_CHUNK_SIZE * 3];
        let err = writer.write(&payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Discarded);
        assert_eq!(err.written(), Some(MAX_CHUNK_SIZE * 2));

        let err = writer.write(b"e").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Discarded);
        assert_eq!(err.written(), Some(0));

        // io::Write reports the short write
        let err = Write::write(&mut &writer, b"e").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);

        drop(release);
        writer.close().unwrap();
        assert!(writer.is_degraded());

        let mut expected = b"ab".to_vec();
        expected.extend_from_slice(&payload[..MAX_CHUNK_SIZE * 2]);
        assert_eq!(read(&temp_dir, "info.log.2024-08-10.000"), expected);
    }

    #[test]
    fn test_write_timeout_reports_queued_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let timeout = Duration::from_millis(50);
        let (writer, release) = stalled_writer(&temp_dir, timeout);

        let payload = vec![b'y'; MAX_CHUNK_SIZE * 3];
        let begin = Instant::now();
        let err = writer.write(&payload).unwrap_err();
        let elapsed = begin.elapsed();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.written(), Some(MAX_CHUNK_SIZE * 2));
        assert!(elapsed >= timeout, "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");

        drop(release);
        writer.close().unwrap();

        // the chunk that timed out is never written later
        let written = read(&temp_dir, "info.log.2024-08-10.000");
        assert_eq!(written.len(), 2 + MAX_CHUNK_SIZE * 2);
    }

    #[test]
    fn test_concurrent_writers_interleave_whole_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let writer = Arc::new(
            FileWriter::builder(temp_dir.path(), "info.log")
                .max_size(0)
                .queue_capacity(16)
                .write_timeout(Duration::from_secs(30))
                .clock(Clock::ManualClock(ManualClock::new(start())))
                .build()
                .unwrap(),
        );

        let handles = (0..8)
            .map(|t| {
                let writer = writer.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let line = format!("thread-{t} line-{i}\n");
                        writer.write(line.as_bytes()).unwrap();
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }
        writer.close().unwrap();

        let content = String::from_utf8(read(&temp_dir, "info.log.2024-08-10.000")).unwrap();
        let mut next = HashMap::new();
        for line in content.lines() {
            let (thread, index) = line.split_once(' ').unwrap();
            let index = index.strip_prefix("line-").unwrap().parse::<usize>().unwrap();
            let expected = next.entry(thread.to_string()).or_insert(0);
            assert_eq!(*expected, index, "{thread} out of order");
            *expected += 1;
        }
        assert_eq!(next.len(), 8);
        assert!(next.values().all(|&n| n == 200));
    }

    #[test]
    fn test_concurrent_close_waits_for_drain() {
        let temp_dir = TempDir::new().unwrap();
        let writer = Arc::new(
            FileWriter::builder(temp_dir.path(), "info.log")
                .max_size(0)
                .write_timeout(Duration::from_secs(30))
                .clock(Clock::ManualClock(ManualClock::new(start())))
                .build()
                .unwrap(),
        );

        let mut total = 0;
        for i in 0..1000 {
            total += writer.write(format!("record {i}\n").as_bytes()).unwrap();
        }

        let closers = (0..4)
            .map(|_| {
                let writer = writer.clone();
                thread::spawn(move || writer.close())
            })
            .collect::<Vec<_>>();
        for closer in closers {
            closer.join().unwrap().unwrap();
            // every closer observes the fully drained file
            assert_eq!(read(&temp_dir, "info.log.2024-08-10.000").len(), total);
        }
    }

    #[test]
    fn test_build_rejects_bad_setup() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let err = FileWriter::builder(&file, "info.log").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = FileWriter::builder(temp_dir.path(), "").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = FileWriter::builder(temp_dir.path(), "a/b")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = FileWriter::builder(temp_dir.path(), "info.log")
            .queue_capacity(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[cfg(unix)]
    #[test]
    fn test_build_creates_nested_dir() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("var").join("log");
        let writer = FileWriter::builder(&dir, "info.log").build().unwrap();
        writer.close().unwrap();

        let metadata = fs::metadata(&dir).unwrap();
        assert!(metadata.is_dir());
        // the process umask may only clear bits
        assert_eq!(metadata.permissions().mode() & 0o7777 & !0o755, 0);
        assert_eq!(count_files(&dir), 1);
    }
}
