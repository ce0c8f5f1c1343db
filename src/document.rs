//! The encoded document: a frequency header line followed by the body of
//! `'0'`/`'1'` characters.
//!
//! An empty source encodes to an empty document. A source with a single
//! distinct byte encodes to the header line alone; its count is all the
//! decoder needs.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::freq::FrequencyTable;
use crate::options::EncodeOptions;
use crate::tree::build_tree;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Encodes `source` into a complete document.
pub fn encode(source: &[u8], options: &EncodeOptions) -> Result<String> {
    let freqs = FrequencyTable::of(source);
    log::trace!("byte frequency: {:?}", freqs);

    let tree = build_tree(&freqs);
    if tree.is_none() {
        return Ok(String::new());
    }

    let mut out = freqs.header();
    out.push('\n');
    let encoder = Encoder::from_tree(tree.as_ref());
    out.push_str(&encoder.encode_to_string(source, options.layout)?);
    Ok(out)
}

/// Splits a document into its header line and body.
fn split(document: &str) -> (&str, &str) {
    document.split_once('\n').unwrap_or((document, ""))
}

/// Decodes a complete document back into the source bytes.
pub fn decode(document: &str) -> Result<Vec<u8>> {
    let (header, body) = split(document);
    let freqs: FrequencyTable = header.parse()?;
    log::trace!("byte frequency: {:?}", freqs);

    Decoder::new(build_tree(&freqs)).decode_str(body)
}

pub fn encode_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    options: &EncodeOptions,
) -> Result<()> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    writer.write_all(encode(&source, options)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Decodes a document from `reader` into `writer`.
///
/// A single-symbol document is written out in chunks, so its count is not
/// bounded by memory.
pub fn decode_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<()> {
    let mut document = String::new();
    reader.read_to_string(&mut document)?;

    let (header, body) = split(&document);
    let freqs: FrequencyTable = header.parse()?;
    log::trace!("byte frequency: {:?}", freqs);

    match build_tree(&freqs) {
        Some(root) if root.is_leaf() => {
            let chunk = [root.rep_symbol(); 8192];
            let mut left = root.freq();
            while left > 0 {
                let n = left.min(chunk.len() as u64) as usize;
                writer.write_all(&chunk[..n])?;
                left -= n as u64;
            }
        }
        tree => writer.write_all(&Decoder::new(tree).decode_str(body)?)?,
    }

    writer.flush()?;
    Ok(())
}

/// Encodes the file at `input` into `output`.
///
/// The input is read twice: once to count bytes, once to encode them.
pub fn encode_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &EncodeOptions,
) -> Result<()> {
    let input = input.as_ref();
    let freqs = FrequencyTable::from_reader(BufReader::new(File::open(input)?))?;
    log::trace!("byte frequency: {:?}", freqs);

    let mut writer = BufWriter::new(File::create(output)?);
    let tree = build_tree(&freqs);
    if tree.is_some() {
        writeln!(writer, "{}", freqs)?;

        let encoder = Encoder::from_tree(tree.as_ref());
        encoder.write_text(File::open(input)?, options.layout, &mut writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Decodes the document at `input` into `output`.
pub fn decode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    decode_stream(reader, writer)
}
