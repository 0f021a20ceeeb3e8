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
//! Cyclic byte buffer for decoupling producers and consumers of a byte
//! stream, for example data arriving over a serial link faster or slower than
//! it is processed.
//!
//! The buffer owns one allocation. Reading and writing wrap around inside a
//! window `[lower_border, upper_border]` of that allocation, and the window
//! can be moved or resized without reallocating.
//!
//! ```
//! use cyclic_buffer::{Access, RingBuffer};
//!
//! let mut buffer = RingBuffer::new(16)?;
//! buffer.push_slice(b"ABCD");
//! assert_eq!(buffer.pop(), Some(b'A'));
//! assert_eq!(buffer.drain().collect::<Vec<u8>>(), b"BCD");
//! assert_eq!(buffer.pop(), None);
//!
//! buffer.set_window(4, 11)?;
//! buffer.set_at(0, b'X', Access::WINDOW)?;
//! assert_eq!(buffer.get_at(4, Access::ABSOLUTE), Some(b'X'));
//! # Ok::<(), cyclic_buffer::BufferError>(())
//! ```
#![deny(clippy::mod_module_files)]
pub mod error;
pub mod ring_buffer;

#[doc(inline)]
pub use error::{BufferError, Status};
pub use ring_buffer::{Access, Drain, RingBuffer};
