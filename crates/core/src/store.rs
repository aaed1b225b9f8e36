//! Store module - external persistence and clock interfaces
//!
//! The session persists exactly one record: the high score as a 4-byte
//! little-endian unsigned integer under [`HIGH_SCORE_KEY`]. A missing key or a
//! record shorter than 4 bytes reads as "no record".
//!
//! [`HIGH_SCORE_KEY`]: crate::types::HIGH_SCORE_KEY

use std::collections::HashMap;
use std::fmt;
use std::io;

/// Byte-keyed persistence implemented by hosts.
pub trait ScoreStore {
    /// Store `bytes` under `key`, replacing any previous record.
    fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Load the record under `key`, `None` if absent.
    fn load(&mut self, key: &str) -> io::Result<Option<Vec<u8>>>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).save(key, bytes)
    }

    fn load(&mut self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).load(key)
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).save(key, bytes)
    }

    fn load(&mut self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).load(key)
    }
}

/// Monotonic millisecond clock, read to seed new games.
pub trait Clock: fmt::Debug {
    fn millis(&self) -> u64;
}

/// Clock frozen at a fixed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn millis(&self) -> u64 {
        self.0
    }
}

/// Pack a high score as 4 little-endian bytes.
pub fn encode_high_score(score: u32) -> [u8; 4] {
    score.to_le_bytes()
}

/// Read a high score record. Anything shorter than 4 bytes is no record;
/// extra trailing bytes are ignored.
pub fn decode_high_score(bytes: &[u8]) -> Option<u32> {
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(head))
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail with `io::ErrorKind::Other`.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn with_record(mut self, key: &str, bytes: &[u8]) -> Self {
        self.records.insert(key.to_owned(), bytes.to_vec());
        self
    }

    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::Other, "store is read-only"));
        }
        self.records.insert(key.to_owned(), bytes.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.records.get(key).cloned())
    }
}
