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

//! An asynchronous writer for rolling log files.
//!
//! [`FileWriter`] copies every payload into pooled buffers and queues them for a background
//! thread. The thread starts a new file whenever the date label of the current time changes
//! or the active file outgrows its size limit, and deletes the oldest files beyond the
//! configured count. On startup, files left behind by an earlier writer are recovered and the
//! newest one is appended to.

mod clock;
mod handle;
mod options;
mod pool;
mod rotate;
mod snapshot;
mod worker;
mod writer;

pub use self::options::Options;
pub use self::snapshot::Snapshot;
pub use self::snapshot::scan_snapshots;
pub use self::writer::FileWriter;
pub use self::writer::FileWriterBuilder;
