use huffman_codec::{document, EncodeOptions, FrequencyTable, SerializableFrequencyTable};
use std::env;
use std::fs;

fn main() {
    let fp = env::args()
        .nth(1)
        .expect("Please provide path to input file as first argument.");
    let options = match env::args().nth(2).as_deref() {
        Some("--single-line") => EncodeOptions::single_line(),
        _ => EncodeOptions::default(),
    };

    // encode scope - save to file
    {
        document::encode_file(&fp, "encoded.txt", &options).expect("encoding failed");

        // the table alone, for inspection with any msgpack tool
        let freqs = FrequencyTable::from_reader(fs::File::open(&fp).unwrap()).unwrap();
        let data = rmp_serde::to_vec(&SerializableFrequencyTable::from(&freqs)).unwrap();
        fs::write("frequencies.mp", data).unwrap();
    }

    // decode scope - read from file
    {
        document::decode_file("encoded.txt", "decoded.txt").expect("decoding failed");

        let original = fs::read(&fp).unwrap();
        let decoded = fs::read("decoded.txt").unwrap();
        let encoded_len = fs::metadata("encoded.txt").unwrap().len();
        println!(
            "{} bytes -> {} encoded characters, round trip {}",
            original.len(),
            encoded_len,
            if original == decoded { "ok" } else { "FAILED" }
        );
    }
}
