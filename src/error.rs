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

use std::fmt;
use std::io;

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Anything that does not fit another kind, mostly I/O failures.
    Unexpected,
    /// A writer or logger was configured with invalid options.
    ConfigInvalid,
    /// The write queue was full and the write was not allowed to wait.
    Discarded,
    /// The write timeout elapsed before the whole payload was queued.
    Timeout,
    /// The writer has been closed.
    Closed,
}

impl ErrorKind {
    /// Return the static name of this kind.
    pub fn into_static(self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::Discarded => "Discarded",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Closed => "Closed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// The error struct of flog.
pub struct Error {
    kind: ErrorKind,
    message: String,
    written: Option<usize>,
    sources: Vec<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.sources.is_empty() {
            write!(f, ", sources: [")?;
            for (i, source) in self.sources.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("written", &self.written);
            de.field("context", &self.context);
            de.field("sources", &self.sources);
            return de.finish();
        }

        write!(f, "{} ({})", self.message, self.kind)?;
        writeln!(f)?;

        if let Some(written) = self.written {
            writeln!(f)?;
            writeln!(f, "Written: {written} bytes")?;
        }
        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in self.sources.iter() {
                writeln!(f, "   {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new [`ErrorKind::Unexpected`] error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            message: message.into(),
            written: None,
            sources: vec![],
            context: vec![],
        }
    }

    /// Set the kind of this error.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Record how many bytes of the payload were accepted before the error occurred.
    pub fn with_written(mut self, written: usize) -> Self {
        self.written = Some(written);
        self
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Add one more source in error.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return the number of bytes accepted before a write failed, if this error came from a
    /// write.
    pub fn written(&self) -> Option<usize> {
        self.written
    }

    /// Return an iterator over all sources of this error.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|v| v.as_ref())
    }

    /// Default constructor for [`Error`] from [`io::Error`].
    pub fn from_io_error(err: io::Error) -> Error {
        Error::new("failed to perform io").with_source(err)
    }

    /// Convert this error into an [`io::Error`], mapping the kind to the closest
    /// [`io::ErrorKind`].
    pub fn into_io_error(self) -> io::Error {
        let kind = match self.kind {
            ErrorKind::Unexpected => io::ErrorKind::Other,
            ErrorKind::ConfigInvalid => io::ErrorKind::InvalidInput,
            ErrorKind::Discarded => io::ErrorKind::WouldBlock,
            ErrorKind::Timeout => io::ErrorKind::TimedOut,
            ErrorKind::Closed => io::ErrorKind::BrokenPipe,
        };
        io::Error::new(kind, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_context_and_source() {
        let err = Error::new("failed to open log file")
            .with_context("path", "/var/log/info.log.2024-01-01.000")
            .with_source(io::Error::new(io::ErrorKind::NotFound, "no such file"));

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(
            err.to_string(),
            "failed to open log file (Unexpected), context: { path: /var/log/info.log.2024-01-01.000 }, sources: [no such file]"
        );
    }

    #[test]
    fn test_into_io_error_maps_kind() {
        let err = Error::new("write timeout, discard log")
            .with_kind(ErrorKind::Timeout)
            .with_written(3072);
        assert_eq!(err.written(), Some(3072));

        let err = err.into_io_error();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);

        let err = Error::new("queue full").with_kind(ErrorKind::Discarded);
        assert_eq!(err.into_io_error().kind(), io::ErrorKind::WouldBlock);
    }
}
