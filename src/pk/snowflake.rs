//! Distributed snowflake id generator.
//!
//! Layout of the 64-bit id, high to low:
//!
//! ```text
//! 0 | 41-bit millisecond timestamp offset | 5-bit datacenter | 5-bit worker | 12-bit sequence
//! ```
//!
//! One generator instance guarantees unique, roughly time-ordered ids across
//! concurrent callers via a single mutex over the clock+sequence state.
//! Uniqueness across instances relies on distinct (datacenter, worker) pairs.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DbError;

const DATACENTER_ID_BITS: u8 = 5;
const WORKER_ID_BITS: u8 = 5;
const SEQUENCE_BITS: u8 = 12;

const WORKER_ID_SHIFT: u8 = SEQUENCE_BITS;
const DATACENTER_ID_SHIFT: u8 = SEQUENCE_BITS + WORKER_ID_BITS;
const TIMESTAMP_SHIFT: u8 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// Snowflake id generator with per-instance locked state.
pub struct SnowflakeGenerator {
    datacenter_id: u64,
    worker_id: u64,
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    last_millis: u64,
    sequence: u64,
}

impl SnowflakeGenerator {
    /// Fixed epoch: 2024-01-01 00:00:00 UTC.
    pub const EPOCH_MILLIS: u64 = 1_704_067_200_000;

    /// Maximum datacenter id (5 bits).
    pub const MAX_DATACENTER_ID: u64 = (1 << DATACENTER_ID_BITS) - 1;

    /// Maximum worker id (5 bits).
    pub const MAX_WORKER_ID: u64 = (1 << WORKER_ID_BITS) - 1;

    /// Maximum per-millisecond sequence (12 bits).
    pub const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

    /// Create a generator for the given (datacenter, worker) pair.
    pub fn new(datacenter_id: u64, worker_id: u64) -> Result<Self, DbError> {
        Self::with_clock(datacenter_id, worker_id, Box::new(system_millis))
    }

    /// Create a generator over an explicit clock source. Tests use this to
    /// simulate same-millisecond bursts and backward clock jumps.
    pub(crate) fn with_clock(
        datacenter_id: u64,
        worker_id: u64,
        clock: Box<dyn Fn() -> u64 + Send + Sync>,
    ) -> Result<Self, DbError> {
        if datacenter_id > Self::MAX_DATACENTER_ID {
            return Err(DbError::execution(format!(
                "datacenter id {datacenter_id} out of range (max {})",
                Self::MAX_DATACENTER_ID
            )));
        }
        if worker_id > Self::MAX_WORKER_ID {
            return Err(DbError::execution(format!(
                "worker id {worker_id} out of range (max {})",
                Self::MAX_WORKER_ID
            )));
        }
        Ok(Self {
            datacenter_id,
            worker_id,
            clock,
            state: Mutex::new(GeneratorState {
                last_millis: 0,
                sequence: 0,
            }),
        })
    }

    /// Generate the next id.
    ///
    /// Same-millisecond calls increment the 12-bit sequence; on overflow the
    /// generator spin-waits for the next millisecond. A clock observed behind
    /// the last-used millisecond fails with [`DbError::ClockMovedBackward`].
    pub fn next_id(&self) -> Result<i64, DbError> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut now = (self.clock)();

        if now < state.last_millis {
            return Err(DbError::ClockMovedBackward {
                last_millis: state.last_millis,
                now_millis: now,
            });
        }

        if now == state.last_millis {
            state.sequence = (state.sequence + 1) & Self::MAX_SEQUENCE;
            if state.sequence == 0 {
                now = self.wait_next_millis(state.last_millis);
            }
        } else {
            state.sequence = 0;
        }

        state.last_millis = now;

        let id = ((now - Self::EPOCH_MILLIS) << TIMESTAMP_SHIFT)
            | (self.datacenter_id << DATACENTER_ID_SHIFT)
            | (self.worker_id << WORKER_ID_SHIFT)
            | state.sequence;

        Ok(id as i64)
    }

    /// Extract the millisecond timestamp from an id.
    pub fn extract_timestamp(id: i64) -> u64 {
        ((id as u64) >> TIMESTAMP_SHIFT) + Self::EPOCH_MILLIS
    }

    /// Extract the datacenter id from an id.
    pub fn extract_datacenter_id(id: i64) -> u64 {
        ((id as u64) >> DATACENTER_ID_SHIFT) & Self::MAX_DATACENTER_ID
    }

    /// Extract the worker id from an id.
    pub fn extract_worker_id(id: i64) -> u64 {
        ((id as u64) >> WORKER_ID_SHIFT) & Self::MAX_WORKER_ID
    }

    /// Extract the sequence from an id.
    pub fn extract_sequence(id: i64) -> u64 {
        (id as u64) & Self::MAX_SEQUENCE
    }

    fn wait_next_millis(&self, last_millis: u64) -> u64 {
        let mut now = (self.clock)();
        while now <= last_millis {
            std::hint::spin_loop();
            now = (self.clock)();
        }
        now
    }
}

fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
