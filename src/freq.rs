use crate::error::{HeaderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

pub const NUM_SYMBOLS: usize = 256;

/// Occurrence count of every byte value in a source.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; NUM_SYMBOLS],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SYMBOLS],
        }
    }

    /// Counts every byte of `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in bytes {
            table.increment(b);
        }
        table
    }

    /// Counts every byte the reader yields until EOF.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            for &b in &buf[..n] {
                table.increment(b);
            }
        }
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub fn increment(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Sum of all counts, i.e. the length of the source.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Like [`total`](Self::total), but `None` when the sum exceeds `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// The textual header, e.g. `"97 2 98 4"`.
    pub fn header(&self) -> String {
        self.to_string()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", symbol, count)?;
        }
        Ok(())
    }
}

impl FromStr for FrequencyTable {
    type Err = HeaderError;

    /// Parses a header line. Absent symbols stay zero; a repeated symbol keeps
    /// its last count. The counts must sum to at most `u64::MAX`, which is what
    /// the root of the tree holds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        fn number(token: &str) -> std::result::Result<u64, HeaderError> {
            token.parse().map_err(|_| HeaderError::InvalidNumber {
                token: token.to_owned(),
            })
        }

        let mut table = Self::new();
        let mut tokens = s.split_whitespace();
        while let Some(token) = tokens.next() {
            let value = number(token)?;
            let symbol =
                u8::try_from(value).map_err(|_| HeaderError::SymbolOutOfRange { value })?;
            let count = match tokens.next() {
                Some(token) => number(token)?,
                None => return Err(HeaderError::MissingCount { symbol }),
            };
            table.set(symbol, count);
        }

        if table.checked_total().is_none() {
            return Err(HeaderError::CountOverflow);
        }
        Ok(table)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableFrequencyTable {
    entries: Vec<(u8, u64)>,
}

impl<'a> From<&'a FrequencyTable> for SerializableFrequencyTable {
    fn from(other: &'a FrequencyTable) -> Self {
        Self {
            entries: other.iter().collect(),
        }
    }
}

impl From<SerializableFrequencyTable> for FrequencyTable {
    fn from(other: SerializableFrequencyTable) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, count) in other.entries {
            table.set(symbol, count);
        }
        table
    }
}
