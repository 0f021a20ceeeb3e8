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
//! Walk through the [`RingBuffer`] API and report every step.
use crate::config::BufferSettings;
use anyhow::Context;
use cyclic_buffer::{Access, BufferError, RingBuffer, Status};
use humansize::{format_size, DECIMAL};
use tracing::{info, warn};

pub fn run(settings: &BufferSettings) -> anyhow::Result<RingBuffer> {
    let mut buffer = RingBuffer::new(settings.capacity)
        .with_context(|| format!("could not create a buffer of {} bytes", settings.capacity))?;

    info!(
        "buffer allocated with {}",
        format_size(buffer.capacity(), DECIMAL)
    );
    info!(
        "borders are set to {} and {}",
        buffer.lower_border(),
        buffer.upper_border()
    );

    info!("pushing A, B, C, D");
    buffer.push_slice(b"ABCD");
    log_cursors(&buffer);

    info!("first pushed byte: {}", printable(buffer.pop()));
    info!("read cursor is now {}", buffer.read_cursor());

    for cycle in 0..5 {
        match buffer.pop() {
            Some(byte) => info!("cycle {}: {}", cycle, byte as char),
            None => info!("cycle {}: nothing to read", cycle),
        }
    }

    info!("setting byte at offset 1 to X");
    if report("set byte", buffer.set_at(1, b'X', Access::WINDOW)) {
        info!(
            "byte at offset 1 is {}",
            printable(buffer.get_at(1, Access::WINDOW))
        );
    }

    info!("rewinding read cursor to 1");
    if report("rewind", buffer.set_read_cursor(1)) {
        info!("read cursor is now {}", buffer.read_cursor());
    }

    push_and_drain(&mut buffer, "Hi world");
    info!("write cursor is now {}", buffer.write_cursor());

    push_and_drain(&mut buffer, "Hi buffer");
    log_cursors(&buffer);

    info!("moving upper border to {}", settings.upper_border);
    report(
        "move upper border",
        buffer.set_upper_border(settings.upper_border),
    );
    log_sizes(&buffer);

    info!(
        "reallocating memory to {}",
        format_size(settings.grow_to, DECIMAL)
    );
    report("reallocate", buffer.resize(settings.grow_to));
    log_sizes(&buffer);

    info!("resetting buffer");
    buffer.reset();
    log_cursors(&buffer);
    info!(
        "borders are set to {} and {}",
        buffer.lower_border(),
        buffer.upper_border()
    );

    info!("moving lower border to {}", settings.lower_border);
    report(
        "move lower border",
        buffer.set_lower_border(settings.lower_border),
    );
    log_cursors(&buffer);
    log_sizes(&buffer);
    info!("window: {}", hex::encode(buffer.window()));

    Ok(buffer)
}

fn push_and_drain(buffer: &mut RingBuffer, text: &str) {
    info!("pushing '{}'", text);
    buffer.push_slice(text.as_bytes());

    let drained: String = buffer.drain().map(char::from).collect();
    info!("read back '{}'", drained);
}

fn report(step: &str, result: Result<(), BufferError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("{} failed with {}: {}", step, Status::from(&e), e);
            false
        }
    }
}

fn printable(byte: Option<u8>) -> String {
    byte.map_or_else(|| "nothing".to_string(), |b| (b as char).to_string())
}

fn log_cursors(buffer: &RingBuffer) {
    info!(
        "write cursor: {}, read cursor: {}",
        buffer.write_cursor(),
        buffer.read_cursor()
    );
}

fn log_sizes(buffer: &RingBuffer) {
    info!(
        "window size is {} while total memory is {}",
        format_size(buffer.window_size(), DECIMAL),
        format_size(buffer.capacity(), DECIMAL)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BufferSettings {
        BufferSettings {
            capacity: 16,
            upper_border: 10,
            grow_to: 32,
            lower_border: 5,
        }
    }

    #[test]
    fn run_default_scenario() {
        let buffer = run(&settings()).unwrap();
        assert_eq!(buffer.capacity(), 32);
        assert_eq!(buffer.lower_border(), 5);
        assert_eq!(buffer.upper_border(), 31);
        assert_eq!(buffer.read_cursor(), 5);
        assert_eq!(buffer.write_cursor(), 5);
        assert_eq!(buffer.last_status(), Status::Ok);
        assert!(buffer.window().iter().all(|b| *b == 0));
    }

    #[test]
    fn run_reports_failed_steps() {
        let settings = BufferSettings {
            lower_border: 40,
            ..settings()
        };

        let buffer = run(&settings).unwrap();
        assert_eq!(buffer.lower_border(), 0);
        assert_eq!(buffer.last_status(), Status::IndexTooHigh);
    }

    #[test]
    fn run_rejects_empty_buffer() {
        let settings = BufferSettings {
            capacity: 0,
            ..settings()
        };

        let err = run(&settings).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BufferError>(),
            Some(&BufferError::InvalidSize)
        );
    }
}
