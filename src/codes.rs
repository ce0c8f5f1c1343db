use crate::freq::{FrequencyTable, NUM_SYMBOLS};
use crate::tree::Node;
use bitvec::prelude::*;
use std::fmt;

/// Per-symbol codes read off a Huffman tree: `0` for a step left, `1` for a
/// step right.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<BitBox>; NUM_SYMBOLS],
}

impl CodeTable {
    pub fn empty() -> Self {
        Self {
            codes: std::array::from_fn(|_| None),
        }
    }

    /// Derives the code of every leaf under `root`.
    ///
    /// An absent tree and a lone-leaf tree both give an empty table; a
    /// single-symbol source is rebuilt from its count, not from codes.
    pub fn from_tree(root: Option<&Node>) -> Self {
        fn traverse(node: &Node, v: &mut BitVec, table: &mut CodeTable) {
            let (left, right) = match node.children() {
                Some(pair) => pair,
                None => {
                    // only leaves carry a symbol
                    if let Some(sym) = node.symbol() {
                        table.codes[sym as usize] = Some(v.clone().into_boxed_bitslice());
                    }
                    return;
                }
            };

            v.push(false);
            traverse(left, v, table);
            v.pop();

            v.push(true);
            traverse(right, v, table);
            v.pop();
        }

        let mut table = Self::empty();
        match root {
            Some(root) if !root.is_leaf() => {
                let mut bv = BitVec::new();
                traverse(root, &mut bv, &mut table);
            }
            _ => {}
        }
        table
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice> {
        self.codes[symbol as usize].as_deref()
    }

    /// The code of `symbol` as a string of `'0'` and `'1'`.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.get(symbol).map(bits_to_string)
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|c| (s as u8, c)))
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bits needed to encode a source with these frequencies, or `None` if a
    /// counted symbol has no code or the total does not fit in `u64`.
    pub fn encoded_len(&self, freqs: &FrequencyTable) -> Option<u64> {
        freqs.iter().try_fold(0u64, |acc, (s, count)| {
            let bits = (self.get(s)?.len() as u64).checked_mul(count)?;
            acc.checked_add(bits)
        })
    }
}

/// Derives the code table of a tree.
pub fn derive_codes(root: Option<&Node>) -> CodeTable {
    CodeTable::from_tree(root)
}

pub(crate) fn bits_to_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(s, c)| (s, bits_to_string(c))))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn codes_for(bytes: &[u8]) -> CodeTable {
        derive_codes(build_tree(&FrequencyTable::of(bytes)).as_ref())
    }

    #[test]
    fn scenario_codes() {
        let codes = codes_for(b"aabbbbccccccccddddddddddddddddff");
        assert_eq!(codes.code_string(b'd').as_deref(), Some("1"));
        assert_eq!(codes.code_string(b'a').as_deref(), Some("0000"));
        assert_eq!(codes.code_string(b'f').as_deref(), Some("0001"));
        assert_eq!(codes.code_string(b'b').as_deref(), Some("001"));
        assert_eq!(codes.code_string(b'c').as_deref(), Some("01"));
        assert_eq!(codes.code_string(b'e'), None);
        assert_eq!(codes.len(), 5);

        let freqs = FrequencyTable::of(b"aabbbbccccccccddddddddddddddddff");
        assert_eq!(codes.encoded_len(&freqs), Some(2 * 4 + 2 * 4 + 4 * 3 + 8 * 2 + 16));
    }

    #[test]
    fn degenerate_tables_are_empty() {
        assert!(derive_codes(None).is_empty());
        assert!(codes_for(b"xxxxx").is_empty());
    }

    #[test]
    fn encoded_len_of_foreign_table() {
        let codes = codes_for(b"ab");
        assert_eq!(codes.encoded_len(&FrequencyTable::of(b"abc")), None);
        assert_eq!(codes.encoded_len(&FrequencyTable::of(b"abba")), Some(4));
    }

    #[test]
    fn encoded_len_overflow() {
        // a = "00", b = "01", c = "1"
        let codes = codes_for(b"abcc");
        assert_eq!(codes.code_string(b'a').as_deref(), Some("00"));

        let huge: FrequencyTable = "97 10 99 18446744073709551000".parse().unwrap();
        assert_eq!(codes.encoded_len(&huge), Some(18446744073709551020));

        let product: FrequencyTable = "97 9223372036854775808 99 1".parse().unwrap();
        assert_eq!(codes.encoded_len(&product), None);

        let sum: FrequencyTable = "97 9223372036854775807 99 2".parse().unwrap();
        assert_eq!(codes.encoded_len(&sum), None);

        let max: FrequencyTable = "97 9223372036854775807 99 1".parse().unwrap();
        assert_eq!(codes.encoded_len(&max), Some(u64::MAX));
    }

    #[test]
    fn codes_are_prefix_free() {
        let text = b"It was the best of times, it was the worst of times, \
                     it was the age of wisdom, it was the age of foolishness\n";
        let codes = codes_for(text);
        let all: Vec<_> = codes.iter().collect();
        assert_eq!(all.len(), FrequencyTable::of(text).distinct());

        for (i, (_, a)) in all.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, (_, b)) in all.iter().enumerate() {
                if i != j {
                    assert!(
                        !b.starts_with(*a),
                        "{} prefixes {}",
                        bits_to_string(a),
                        bits_to_string(b)
                    );
                }
            }
        }
    }

    #[test]
    fn every_byte_value() {
        let data: Vec<u8> = (0..=255u8).collect();
        let codes = codes_for(&data);
        assert_eq!(codes.len(), 256);
        // 256 equal weights give a perfectly balanced tree
        assert!(codes.iter().all(|(_, c)| c.len() == 8));
        assert_eq!(codes.code_string(0).as_deref(), Some("00000000"));
        assert_eq!(codes.code_string(255).as_deref(), Some("11111111"));
    }
}
