use crate::error::{HuffmanError, Result};
use crate::tree::Node;
use bitvec::prelude::*;
use std::ptr;

/// Walks a Huffman tree one bit at a time, emitting a symbol at every leaf.
#[derive(Debug, Clone)]
pub struct Decoder {
    root: Option<Node>,
}

/// Position of the walk inside a tree with at least two leaves.
struct Walk<'a> {
    root: &'a Node,
    at: &'a Node,
    out: Vec<u8>,
}

impl<'a> Walk<'a> {
    fn new(root: &'a Node) -> Self {
        Self {
            root,
            at: root,
            out: Vec::new(),
        }
    }

    fn step(&mut self, bit: bool) {
        // `at` is internal here: the walk restarts at the root after each leaf
        if let Some((left, right)) = self.at.children() {
            self.at = if bit { right } else { left };
        }
        if let Some(sym) = self.at.symbol() {
            self.out.push(sym);
            self.at = self.root;
        }
    }

    fn on_boundary(&self) -> bool {
        ptr::eq(self.at, self.root)
    }

    fn line_break(&self, position: usize) -> Result<()> {
        if self.on_boundary() {
            Ok(())
        } else {
            Err(HuffmanError::TruncatedCode { position })
        }
    }

    fn finish(self, position: usize) -> Result<Vec<u8>> {
        if !self.on_boundary() {
            return Err(HuffmanError::TruncatedCode { position });
        }

        log::debug!("decoded {} symbols", self.out.len());
        Ok(self.out)
    }
}

impl Decoder {
    pub fn new(root: Option<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// The tree to walk, or the whole output when there are fewer than two
    /// leaves and the input carries no information.
    fn walk_root(&self) -> Result<std::result::Result<&Node, Vec<u8>>> {
        let root = match &self.root {
            None => return Ok(Err(Vec::new())),
            Some(root) => root,
        };
        let sym = match root.symbol() {
            None => return Ok(Ok(root)),
            Some(sym) => sym,
        };

        let count = root.freq();
        let too_large = || HuffmanError::OutputTooLarge { count };
        let n = usize::try_from(count).map_err(|_| too_large())?;
        let mut out = Vec::new();
        out.try_reserve_exact(n).map_err(|_| too_large())?;
        out.resize(n, sym);
        Ok(Err(out))
    }

    pub fn decode_bits(&self, input: &BitSlice) -> Result<Vec<u8>> {
        let root = match self.walk_root()? {
            Ok(root) => root,
            Err(out) => return Ok(out),
        };

        let mut walk = Walk::new(root);
        for b in input.iter().by_vals() {
            walk.step(b);
        }
        walk.finish(input.len())
    }

    /// Decodes a body of `'0'` and `'1'` characters.
    ///
    /// Line breaks (`\n` or `\r\n`) are skipped when they fall between codes.
    pub fn decode_str(&self, input: &str) -> Result<Vec<u8>> {
        let root = match self.walk_root()? {
            Ok(root) => root,
            Err(out) => return Ok(out),
        };

        let mut walk = Walk::new(root);
        let mut chars = input.char_indices().peekable();
        while let Some((position, c)) = chars.next() {
            match c {
                '0' => walk.step(false),
                '1' => walk.step(true),
                '\n' => walk.line_break(position)?,
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                    walk.line_break(position)?;
                    chars.next();
                }
                found => return Err(HuffmanError::MalformedBit { found, position }),
            }
        }
        walk.finish(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::freq::FrequencyTable;
    use crate::options::LineLayout;
    use crate::tree::build_tree;

    const SCENARIO: &[u8] = b"aabbbbccccccccddddddddddddddddff";

    fn decoder_for(bytes: &[u8]) -> Decoder {
        Decoder::new(build_tree(&FrequencyTable::of(bytes)))
    }

    #[test]
    fn decode_text() {
        let d = decoder_for(SCENARIO);
        assert_eq!(d.decode_str("00001000101001").unwrap(), b"adfcb");
        assert_eq!(d.decode_str("").unwrap(), b"");
    }

    #[test]
    fn decode_skips_line_breaks_between_codes() {
        let d = decoder_for(SCENARIO);
        assert_eq!(d.decode_str("0000\n1\r\n0001\n").unwrap(), b"adf");
    }

    #[test]
    fn line_break_inside_code() {
        let d = decoder_for(SCENARIO);
        match d.decode_str("00\n00") {
            Err(HuffmanError::TruncatedCode { position }) => assert_eq!(position, 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            d.decode_str("1\r1"),
            Err(HuffmanError::MalformedBit { found: '\r', position: 1 })
        ));
    }

    #[test]
    fn malformed_bit() {
        let d = decoder_for(SCENARIO);
        match d.decode_str("0102") {
            Err(HuffmanError::MalformedBit { found, position }) => {
                assert_eq!(found, '2');
                assert_eq!(position, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            d.decode_str("1 1"),
            Err(HuffmanError::MalformedBit { found: ' ', .. })
        ));
    }

    #[test]
    fn truncated_trailing_code() {
        let d = decoder_for(SCENARIO);
        assert!(matches!(
            d.decode_str("1000"),
            Err(HuffmanError::TruncatedCode { position: 4 })
        ));
        assert!(matches!(
            d.decode_bits(bits![0, 0, 0]),
            Err(HuffmanError::TruncatedCode { position: 3 })
        ));
    }

    #[test]
    fn degenerate_trees_ignore_input() {
        let none = Decoder::new(None);
        assert_eq!(none.decode_str("").unwrap(), b"");
        assert_eq!(none.decode_bits(bits![1, 0]).unwrap(), b"");

        let lone = decoder_for(b"xxxxx");
        assert_eq!(lone.decode_str("").unwrap(), b"xxxxx");
        assert_eq!(lone.decode_bits(BitSlice::empty()).unwrap(), b"xxxxx");
    }

    #[test]
    fn oversized_repeat_is_an_error() {
        let d = Decoder::new(Some(Node::leaf(b'x', u64::MAX)));
        assert!(matches!(
            d.decode_str(""),
            Err(HuffmanError::OutputTooLarge { count: u64::MAX })
        ));
        assert!(matches!(
            d.decode_bits(BitSlice::empty()),
            Err(HuffmanError::OutputTooLarge { .. })
        ));
    }

    #[test]
    fn test_encode_decode() {
        let s = String::from(
            "This is a really long message, I sure do hope it encodes and decodes properly.",
        );
        let tree = crate::huffman(s.as_bytes()).unwrap();
        let (e, d) = tree.into_encoder_decoder_pair();

        let out = e.encode(s.bytes()).unwrap();
        let dec = String::from_utf8(d.decode_bits(&out).unwrap()).unwrap();

        assert_eq!(dec, s);
    }

    #[test]
    fn roundtrip_random_sources() {
        let mut state = 0x9e37_79b9_7f4a_7c15u64;
        for len in 1..300usize {
            let alphabet = (len % 40 + 1) as u64;
            let src: Vec<u8> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    (state % alphabet) as u8 * 3
                })
                .collect();

            let tree = build_tree(&FrequencyTable::of(&src));
            let e = Encoder::from_tree(tree.as_ref());
            let d = Decoder::new(tree);

            let bits = e.encode(src.iter().copied()).unwrap();
            assert_eq!(d.decode_bits(&bits).unwrap(), src);

            let text = e.encode_to_string(&src, LineLayout::PreserveLines).unwrap();
            assert_eq!(d.decode_str(&text).unwrap(), src);
        }
    }
}
