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

//! Traps receive the errors that happen away from the caller, such as I/O failures on the
//! background writer thread, and the payloads that could not be delivered.

use std::fmt;

use crate::Error;

mod default;
pub use self::default::DefaultTrap;

/// A sink for errors that cannot be returned to the caller.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);

    /// Handle a payload that could not be written to its destination.
    ///
    /// The default implementation wraps the payload in an error and passes it to
    /// [`Trap::trap`].
    fn spill(&self, payload: &[u8]) {
        let err = Error::new("undelivered log payload")
            .with_context("payload", String::from_utf8_lossy(payload));
        self.trap(&err);
    }
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
