use huffman_codec::{huffman, LineLayout};

fn main() {
    let s = String::from("Hello my name is Sam!");
    let tree = huffman(s.as_bytes()).expect("source is not empty");
    let (e, d) = tree.into_encoder_decoder_pair();

    for (symbol, _) in e.table().iter() {
        println!(
            "{:?} {}",
            symbol as char,
            e.table().code_string(symbol).unwrap_or_default()
        );
    }

    let out = e
        .encode_to_string(s.as_bytes(), LineLayout::SingleLine)
        .expect("every byte has a code");
    println!("{}", out);

    let dec = d.decode_str(&out).map(String::from_utf8);
    println!("{:?}", dec);
}
