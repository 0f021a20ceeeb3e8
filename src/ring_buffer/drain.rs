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
use super::RingBuffer;
use std::iter::FusedIterator;

/// Pops bytes from a [`RingBuffer`] until the read cursor reaches the write
/// cursor. Bytes that are not iterated stay unread.
#[derive(Debug)]
pub struct Drain<'a> {
    buffer: &'a mut RingBuffer,
}

impl<'a> Drain<'a> {
    pub(super) fn new(buffer: &'a mut RingBuffer) -> Self {
        Self { buffer }
    }
}

impl Iterator for Drain<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.buffer.pending();
        (pending, Some(pending))
    }
}

impl ExactSizeIterator for Drain<'_> {}

impl FusedIterator for Drain<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_drain() {
        let mut b = RingBuffer::new(8).unwrap();
        b.push_slice(b"hello");

        let head: Vec<u8> = b.drain().take(2).collect();
        assert_eq!(head, b"he");
        assert_eq!(b.read_cursor(), 2);
        assert_eq!(b.drain().len(), 3);
        assert_eq!(b.drain().collect::<Vec<u8>>(), b"llo");
        assert_eq!(b.drain().next(), None);
    }

    #[test]
    fn test_drain_across_wrap() {
        let mut b = RingBuffer::new(4).unwrap();
        b.push_slice(&[1, 2, 3]);
        b.set_read_cursor(3).unwrap();
        b.push_slice(&[4, 5]);

        let mut drain = b.drain();
        assert_eq!(drain.size_hint(), (2, Some(2)));
        assert_eq!(drain.next(), Some(4));
        assert_eq!(drain.len(), 1);
        assert_eq!(drain.next(), Some(5));
        assert_eq!(drain.next(), None);
        assert_eq!(drain.next(), None);
    }
}
