use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::options::LineLayout;
use crate::tree::Node;
use bitvec::prelude::*;
use std::io::{Read, Write};

/// Maps bytes to their codes.
#[derive(Debug, Clone)]
pub struct Encoder {
    encode_table: CodeTable,
    // symbol of a one-leaf tree; it encodes to the empty code
    lone: Option<u8>,
}

impl Encoder {
    /// Encoder over a table of codes.
    ///
    /// A one-leaf tree derives an empty table, so an encoder built this way
    /// rejects that tree's symbol; use [`Encoder::from_tree`], which encodes
    /// it to the empty code.
    pub fn new(encode_table: CodeTable) -> Self {
        Self {
            encode_table,
            lone: None,
        }
    }

    pub fn from_tree(root: Option<&Node>) -> Self {
        Self {
            encode_table: CodeTable::from_tree(root),
            lone: root.and_then(Node::symbol),
        }
    }

    pub fn table(&self) -> &CodeTable {
        &self.encode_table
    }

    fn code(&self, symbol: u8, position: usize) -> Result<&BitSlice> {
        if self.lone == Some(symbol) {
            return Ok(BitSlice::empty());
        }
        self.encode_table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })
    }

    pub fn encode(&self, stream: impl IntoIterator<Item = u8>) -> Result<BitVec> {
        let mut out = BitVec::new();
        for (position, s) in stream.into_iter().enumerate() {
            out.extend_from_bitslice(self.code(s, position)?);
        }

        log::debug!("encoded {} bits", out.len());
        Ok(out)
    }

    fn push_text(
        &self,
        symbol: u8,
        position: usize,
        layout: LineLayout,
        out: &mut String,
    ) -> Result<()> {
        let code = self.code(symbol, position)?;
        if code.is_empty() {
            return Ok(());
        }

        out.extend(code.iter().by_vals().map(|b| if b { '1' } else { '0' }));
        if layout == LineLayout::PreserveLines && symbol == b'\n' {
            out.push('\n');
        }
        Ok(())
    }

    /// Encodes `bytes` as a string of `'0'` and `'1'`.
    pub fn encode_to_string(&self, bytes: &[u8], layout: LineLayout) -> Result<String> {
        let mut out = String::new();
        for (position, &b) in bytes.iter().enumerate() {
            self.push_text(b, position, layout, &mut out)?;
        }

        log::debug!("encoded {} symbols into {} characters", bytes.len(), out.len());
        Ok(out)
    }

    /// Streams the textual encoding of everything `reader` yields into
    /// `writer`.
    pub fn write_text<R: Read, W: Write>(
        &self,
        mut reader: R,
        layout: LineLayout,
        writer: &mut W,
    ) -> Result<()> {
        let mut input = [0u8; 8192];
        let mut buf = String::new();
        let mut position = 0;
        loop {
            let n = reader.read(&mut input)?;
            if n == 0 {
                break;
            }
            for &b in &input[..n] {
                self.push_text(b, position, layout, &mut buf)?;
                position += 1;
            }
            writer.write_all(buf.as_bytes())?;
            buf.clear();
        }

        log::debug!("streamed {} encoded symbols", position);
        Ok(())
    }
}
