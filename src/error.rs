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
use std::fmt::Display;
use thiserror::Error;

/// Failures reported by [`crate::RingBuffer`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer size must be greater than zero")]
    InvalidSize,
    #[error("could not allocate {0} bytes")]
    AllocationError(usize),
    #[error("index {index} is greater than the highest allowed index {max}")]
    IndexTooHigh { index: usize, max: usize },
    #[error("index {index} is less than the lowest allowed index {min}")]
    IndexTooLow { index: usize, min: usize },
    #[error("upper border {index} would fall below the lower border {lower}")]
    BorderCollisionTooLow { index: usize, lower: usize },
    #[error("lower border {index} would rise above the upper border {upper}")]
    BorderCollisionTooHigh { index: usize, upper: usize },
    #[error("window [{lower}, {upper}] has a negative size")]
    IncorrectSize { lower: usize, upper: usize },
    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),
}

/// Closed set of outcome codes. The numeric values are stable and can be
/// used when the outcome has to cross a non-Rust boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    InvalidSize,
    AllocationError,
    IndexTooHigh,
    IndexTooLow,
    BorderCollisionTooLow,
    BorderCollisionTooHigh,
    IncorrectSize,
    IndexOutOfRange,
    /// No status-returning operation has run yet.
    #[default]
    UndefinedError,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 0,
            Status::InvalidSize => 1,
            Status::AllocationError => 2,
            Status::IndexTooHigh => 3,
            Status::IndexTooLow => 4,
            Status::BorderCollisionTooLow => 5,
            Status::BorderCollisionTooHigh => 6,
            Status::IncorrectSize => 7,
            Status::IndexOutOfRange => 8,
            Status::UndefinedError => 999,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl From<&BufferError> for Status {
    fn from(value: &BufferError) -> Self {
        match value {
            BufferError::InvalidSize => Status::InvalidSize,
            BufferError::AllocationError(_) => Status::AllocationError,
            BufferError::IndexTooHigh { .. } => Status::IndexTooHigh,
            BufferError::IndexTooLow { .. } => Status::IndexTooLow,
            BufferError::BorderCollisionTooLow { .. } => Status::BorderCollisionTooLow,
            BufferError::BorderCollisionTooHigh { .. } => Status::BorderCollisionTooHigh,
            BufferError::IncorrectSize { .. } => Status::IncorrectSize,
            BufferError::IndexOutOfRange(_) => Status::IndexOutOfRange,
        }
    }
}

impl From<BufferError> for Status {
    fn from(value: BufferError) -> Self {
        Status::from(&value)
    }
}

impl<T> From<&Result<T, BufferError>> for Status {
    fn from(value: &Result<T, BufferError>) -> Self {
        value.as_ref().map_or_else(Status::from, |_| Status::Ok)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_stable() {
        let expected = [
            (Status::Ok, 0),
            (Status::InvalidSize, 1),
            (Status::AllocationError, 2),
            (Status::IndexTooHigh, 3),
            (Status::IndexTooLow, 4),
            (Status::BorderCollisionTooLow, 5),
            (Status::BorderCollisionTooHigh, 6),
            (Status::IncorrectSize, 7),
            (Status::IndexOutOfRange, 8),
            (Status::UndefinedError, 999),
        ];
        for (status, code) in expected {
            assert_eq!(status.code(), code);
        }
        assert_eq!(Status::default(), Status::UndefinedError);
    }

    #[test]
    fn status_from_result() {
        let ok: Result<(), BufferError> = Ok(());
        assert_eq!(Status::from(&ok), Status::Ok);

        let err: Result<(), BufferError> = Err(BufferError::IndexTooLow { index: 1, min: 4 });
        assert_eq!(Status::from(&err), Status::IndexTooLow);
        assert_eq!(
            Status::from(BufferError::AllocationError(usize::MAX)),
            Status::AllocationError
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            BufferError::IndexTooHigh { index: 20, max: 15 }.to_string(),
            "index 20 is greater than the highest allowed index 15"
        );
        assert_eq!(Status::IndexOutOfRange.to_string(), "IndexOutOfRange(8)");
    }
}
