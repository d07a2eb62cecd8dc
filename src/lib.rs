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

//! Flog is a small leveled logger whose main piece is an asynchronous, rotating file writer.
//!
//! # Overview
//!
//! A [`Logger`] renders every message with a [`PatternLayout`](layout::PatternLayout) per
//! [`Driver`] and hands the text over to the drivers in the order they were registered. The
//! [`FileDriver`](driver::FileDriver) is backed by [`FileWriter`](file::FileWriter)s, which
//! queue the bytes for a background thread that rotates files by date and size, deletes old
//! files and picks up where a previous process left off.
//!
//! Errors that cannot be returned to a caller are sent to a [`Trap`], by default standard
//! error.
//!
//! # Examples
//!
//! Log to stdout:
//!
//! ```
//! use flog::Logger;
//! use flog::driver::Stdout;
//!
//! let logger = Logger::builder().driver(Stdout::default()).build();
//! logger.info(format_args!("This is an info message."));
//! ```
//!
//! Write a rolling file directly:
//!
//! ```
//! use std::time::Duration;
//!
//! use flog::file::FileWriter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let writer = FileWriter::builder(dir.path(), "access.log")
//!     .rotate_format("%Y-%m-%d-%H")
//!     .max_size(64 * 1024 * 1024)
//!     .max_files(48)
//!     .write_timeout(Duration::ZERO)
//!     .build()
//!     .unwrap();
//!
//! writer.write(b"GET / 200\n").unwrap();
//! writer.close().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod driver;
pub mod file;
pub mod layout;
pub mod trap;

mod error;
pub use error::Error;
pub use error::ErrorKind;

mod level;
pub use level::Level;

mod logger;
pub use logger::Logger;
pub use logger::LoggerBuilder;
pub use logger::default_logger;
pub use logger::shutdown;

pub use driver::Driver;
pub use trap::Trap;
