//! Canonical Huffman coding over bytes.
//!
//! Bytes are counted into a [`FrequencyTable`], merged into a tree with a
//! fixed tie-break order ([`build_tree`]), and each leaf's root path becomes
//! its code. Codes are written as `'0'`/`'1'` text behind a header line that
//! lists the frequencies, which is enough to rebuild the same tree when
//! decoding.

pub mod codes;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod freq;
pub mod options;
pub mod tree;

pub use codes::{derive_codes, CodeTable};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{HeaderError, HuffmanError, Result};
pub use freq::{FrequencyTable, SerializableFrequencyTable};
pub use options::{EncodeOptions, LineLayout};
pub use tree::{build_tree, comes_before, Node};

/// Builds the tree for a byte source. `None` if the source is empty.
pub fn huffman(symbols: &[u8]) -> Option<Node> {
    build_tree(&FrequencyTable::of(symbols))
}
