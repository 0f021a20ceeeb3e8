// Copyright 2023 Turing Machines
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
//! Cyclic byte buffer with a movable window inside its allocation.
mod drain;

use crate::error::{BufferError, Status};
pub use drain::Drain;
use std::io;

/// Interpretation of the index handed to [`RingBuffer::get_at`] and
/// [`RingBuffer::set_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Index `0` refers to the lower border instead of the start of the
    /// allocation.
    pub use_offset: bool,
    /// Bytes of the allocation that lie outside the window are reachable.
    pub allow_outside_borders: bool,
}

impl Access {
    /// Offset from the lower border, confined to the window.
    pub const WINDOW: Access = Access {
        use_offset: true,
        allow_outside_borders: false,
    };

    /// Absolute index into the whole allocation.
    pub const ABSOLUTE: Access = Access {
        use_offset: false,
        allow_outside_borders: true,
    };

    pub const fn new(use_offset: bool, allow_outside_borders: bool) -> Self {
        Access {
            use_offset,
            allow_outside_borders,
        }
    }
}

impl Default for Access {
    fn default() -> Self {
        Access::WINDOW
    }
}

/// Fixed allocation of bytes that is written and read cyclically inside the
/// window `[lower_border, upper_border]`.
///
/// Both cursors wrap from the upper border back to the lower border. The
/// write cursor always points at the next byte to be overwritten, so when
/// the cursors are equal there is nothing new to read. Writing a full window
/// without reading in between therefore makes the buffer look empty again;
/// writes never block and silently overwrite unread data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer {
    buf: Vec<u8>,
    lower: usize,
    upper: usize,
    write_idx: usize,
    read_idx: usize,
    last_status: Status,
}

fn allocate(size: usize) -> Result<Vec<u8>, BufferError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| BufferError::AllocationError(size))?;
    buf.resize(size, 0);
    Ok(buf)
}

impl RingBuffer {
    /// Allocates `capacity` zeroed bytes and opens the window over all of
    /// them.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidSize);
        }

        let buf = allocate(capacity)?;
        Ok(Self {
            buf,
            lower: 0,
            upper: capacity - 1,
            write_idx: 0,
            read_idx: 0,
            last_status: Status::default(),
        })
    }

    /// Stores `byte` at the write cursor and advances it.
    pub fn push(&mut self, byte: u8) {
        self.buf[self.write_idx] = byte;
        self.write_idx = self.next_index(self.write_idx);
    }

    pub fn push_slice(&mut self, data: &[u8]) {
        data.iter().for_each(|b| self.push(*b));
    }

    /// Returns the byte at the read cursor and advances it, or `None` when the
    /// read cursor has caught up with the write cursor.
    pub fn pop(&mut self) -> Option<u8> {
        if self.read_idx == self.write_idx {
            return None;
        }

        let byte = self.buf[self.read_idx];
        self.read_idx = self.next_index(self.read_idx);
        Some(byte)
    }

    /// Iterator that pops until there is nothing new to read.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain::new(self)
    }

    pub fn set_read_cursor(&mut self, index: usize) -> Result<(), BufferError> {
        let result = self.check_cursor(index);
        if result.is_ok() {
            self.read_idx = index;
        }
        self.record(result)
    }

    pub fn set_write_cursor(&mut self, index: usize) -> Result<(), BufferError> {
        let result = self.check_cursor(index);
        if result.is_ok() {
            self.write_idx = index;
        }
        self.record(result)
    }

    /// Moves the upper border to `index`.
    ///
    /// Bytes that enter the window are zeroed, bytes that leave it keep their
    /// value. Cursors beyond the new border restart at the lower border.
    pub fn set_upper_border(&mut self, index: usize) -> Result<(), BufferError> {
        let result = self.move_upper_border(index);
        self.record(result)
    }

    /// Moves the lower border to `index`.
    ///
    /// Bytes that enter the window are zeroed, bytes that leave it keep their
    /// value. Cursors below the new border are moved onto it.
    pub fn set_lower_border(&mut self, index: usize) -> Result<(), BufferError> {
        let result = self.move_lower_border(index);
        self.record(result)
    }

    /// Moves both borders at once. Unlike two separate border moves this
    /// never fails because of the position of the current window.
    ///
    /// Only bytes of the new window that lay outside the old one are zeroed,
    /// everything else keeps its value. Cursors outside the new window
    /// restart at its lower border.
    pub fn set_window(&mut self, lower: usize, upper: usize) -> Result<(), BufferError> {
        let result = self.move_window(lower, upper);
        self.record(result)
    }

    /// Grows or shrinks the allocation.
    ///
    /// Data is kept up to the smaller of the two sizes and added bytes are
    /// zeroed. Borders beyond the new allocation are clamped to its last
    /// index and cursors beyond it restart at the lower border. On failure
    /// nothing changes.
    pub fn resize(&mut self, capacity: usize) -> Result<(), BufferError> {
        let result = self.reallocate(capacity);
        self.record(result)
    }

    /// Restores the layout right after construction and zeroes the whole
    /// allocation.
    pub fn reset(&mut self) {
        self.lower = 0;
        self.upper = self.capacity() - 1;
        self.read_idx = 0;
        self.write_idx = 0;
        self.buf.fill(0);
    }

    /// Zeroes every byte of the window, `upper_border` included. Borders and
    /// cursors stay where they are.
    pub fn clear(&mut self) {
        self.buf[self.lower..=self.upper].fill(0);
    }

    pub fn get_at(&self, index: usize, access: Access) -> Option<u8> {
        self.translate(index, access).map(|idx| self.buf[idx])
    }

    pub fn set_at(
        &mut self,
        index: usize,
        value: u8,
        access: Access,
    ) -> Result<(), BufferError> {
        let result = match self.translate(index, access) {
            Some(idx) => {
                self.buf[idx] = value;
                Ok(())
            }
            None => Err(BufferError::IndexOutOfRange(index)),
        };
        self.record(result)
    }

    /// Total number of allocated bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes inside the window.
    pub fn window_size(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Number of bytes [`RingBuffer::pop`] yields before it runs dry.
    pub fn pending(&self) -> usize {
        let size = self.window_size();
        (self.write_idx + size - self.read_idx) % size
    }

    pub fn read_cursor(&self) -> usize {
        self.read_idx
    }

    pub fn write_cursor(&self) -> usize {
        self.write_idx
    }

    pub fn lower_border(&self) -> usize {
        self.lower
    }

    pub fn upper_border(&self) -> usize {
        self.upper
    }

    /// Outcome of the latest call that returns a `Result`, or
    /// [`Status::UndefinedError`] if there has been none yet.
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    pub fn window(&self) -> &[u8] {
        &self.buf[self.lower..=self.upper]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn next_index(&self, idx: usize) -> usize {
        if idx >= self.upper {
            self.lower
        } else {
            idx + 1
        }
    }

    fn record(&mut self, result: Result<(), BufferError>) -> Result<(), BufferError> {
        self.last_status = Status::from(&result);
        if let Err(e) = &result {
            tracing::debug!("ring buffer: {}", e);
        }
        result
    }

    fn check_cursor(&self, index: usize) -> Result<(), BufferError> {
        if index > self.upper {
            Err(BufferError::IndexTooHigh {
                index,
                max: self.upper,
            })
        } else if index < self.lower {
            Err(BufferError::IndexTooLow {
                index,
                min: self.lower,
            })
        } else {
            Ok(())
        }
    }

    fn translate(&self, index: usize, access: Access) -> Option<usize> {
        let idx = if access.use_offset {
            index.checked_add(self.lower)?
        } else {
            index
        };

        if idx >= self.capacity() {
            return None;
        }

        if !access.allow_outside_borders && !(self.lower..=self.upper).contains(&idx) {
            return None;
        }

        Some(idx)
    }

    fn move_upper_border(&mut self, index: usize) -> Result<(), BufferError> {
        let max = self.capacity() - 1;
        if index > max {
            return Err(BufferError::IndexTooHigh { index, max });
        }

        if index < self.lower {
            return Err(BufferError::BorderCollisionTooLow {
                index,
                lower: self.lower,
            });
        }

        if index > self.upper {
            self.buf[self.upper + 1..=index].fill(0);
        }
        self.upper = index;

        // restart at the bottom so the new last byte is not visited twice
        if self.write_idx > index {
            self.write_idx = self.lower;
        }
        if self.read_idx > index {
            self.read_idx = self.lower;
        }

        tracing::debug!("window moved to [{}, {}]", self.lower, self.upper);
        Ok(())
    }

    fn move_lower_border(&mut self, index: usize) -> Result<(), BufferError> {
        let max = self.capacity() - 1;
        if index > max {
            return Err(BufferError::IndexTooHigh { index, max });
        }

        if index > self.upper {
            return Err(BufferError::BorderCollisionTooHigh {
                index,
                upper: self.upper,
            });
        }

        if index < self.lower {
            self.buf[index..self.lower].fill(0);
        }
        self.lower = index;

        self.write_idx = self.write_idx.max(index);
        self.read_idx = self.read_idx.max(index);

        tracing::debug!("window moved to [{}, {}]", self.lower, self.upper);
        Ok(())
    }

    fn move_window(&mut self, lower: usize, upper: usize) -> Result<(), BufferError> {
        if lower > upper {
            return Err(BufferError::IncorrectSize { lower, upper });
        }

        let max = self.capacity() - 1;
        if upper > max {
            return Err(BufferError::IndexTooHigh { index: upper, max });
        }

        // zero only what the old window did not cover
        if lower < self.lower {
            let end = upper.min(self.lower - 1);
            self.buf[lower..=end].fill(0);
        }
        if upper > self.upper {
            let start = lower.max(self.upper + 1);
            self.buf[start..=upper].fill(0);
        }

        self.lower = lower;
        self.upper = upper;

        for cursor in [&mut self.read_idx, &mut self.write_idx] {
            if !(lower..=upper).contains(&*cursor) {
                *cursor = lower;
            }
        }

        tracing::debug!("window moved to [{}, {}]", self.lower, self.upper);
        Ok(())
    }

    fn reallocate(&mut self, capacity: usize) -> Result<(), BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidSize);
        }

        let current = self.capacity();
        if capacity == current {
            return Ok(());
        }

        if capacity > current {
            self.buf
                .try_reserve_exact(capacity - current)
                .map_err(|_| BufferError::AllocationError(capacity))?;
            self.buf.resize(capacity, 0);
        } else {
            self.buf.truncate(capacity);
            self.buf.shrink_to_fit();
        }

        let max = capacity - 1;
        self.upper = self.upper.min(max);
        self.lower = self.lower.min(max);

        if self.read_idx > max {
            self.read_idx = self.lower;
        }
        if self.write_idx > max {
            self.write_idx = self.lower;
        }

        tracing::debug!(
            "reallocated {} -> {} bytes, window [{}, {}]",
            current,
            capacity,
            self.lower,
            self.upper
        );
        Ok(())
    }
}

impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.push_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // `zip` polls `buf` first, so no byte is popped without a slot for it
        let read = buf
            .iter_mut()
            .zip(self.drain())
            .map(|(slot, byte)| *slot = byte)
            .count();
        Ok(read)
    }
}

impl Extend<u8> for RingBuffer {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        iter.into_iter().for_each(|b| self.push(b));
    }
}

impl<'a> Extend<&'a u8> for RingBuffer {
    fn extend<T: IntoIterator<Item = &'a u8>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}
