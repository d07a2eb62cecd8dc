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

use crossbeam_channel::Receiver;

use crate::file::clock::Clock;
use crate::file::pool::PooledBuffer;
use crate::file::rotate::Rotator;

/// The single consumer of a writer's queue.
pub(crate) struct Worker {
    receiver: Receiver<PooledBuffer>,
    rotator: Rotator,
    clock: Clock,
}

impl Worker {
    pub(crate) fn new(receiver: Receiver<PooledBuffer>, rotator: Rotator, clock: Clock) -> Self {
        Self {
            receiver,
            rotator,
            clock,
        }
    }

    /// Drain the queue until every sender is gone.
    ///
    /// `recv` keeps returning queued buffers after the last sender disconnects, so everything
    /// enqueued before shutdown is written, in order, before this returns.
    pub(crate) fn run(self) {
        let Self {
            receiver,
            mut rotator,
            clock,
        } = self;

        while let Ok(buf) = receiver.recv() {
            rotator.rotate(&clock.now());
            rotator.write(&buf);
            // dropping the buffer hands it back to the pool
        }

        rotator.close();
    }
}
