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
use std::mem;
use std::ops::Deref;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;

/// The largest chunk a single queued buffer carries.
pub(crate) const MAX_CHUNK_SIZE: usize = 3 * 1024;

/// A shared free list of byte buffers.
///
/// Buffers are handed out as [`PooledBuffer`]s, which clear themselves and return to the pool
/// when dropped. When the free list is empty a new buffer is allocated; when it is full a
/// returned buffer is simply freed.
#[derive(Clone)]
pub(crate) struct BufferPool {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle())
            .field("capacity", &self.receiver.capacity())
            .finish()
    }
}

impl BufferPool {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    pub(crate) fn acquire(&self) -> PooledBuffer {
        let buf = self
            .receiver
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(MAX_CHUNK_SIZE));
        PooledBuffer {
            buf,
            pool: self.sender.clone(),
        }
    }

    /// Number of buffers waiting to be reused.
    pub(crate) fn idle(&self) -> usize {
        self.receiver.len()
    }
}

/// A buffer borrowed from a [`BufferPool`].
pub(crate) struct PooledBuffer {
    buf: Vec<u8>,
    pool: Sender<Vec<u8>>,
}

impl PooledBuffer {
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buf.len())
            .finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let mut buf = mem::take(&mut self.buf);
        buf.clear();
        // a full pool frees the buffer
        let _ = self.pool.try_send(buf);
    }
}
