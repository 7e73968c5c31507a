//! Customizing delimiters and indentation.
//!
//! Run with: `cargo run --example custom_options`

use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};

fn main() {
    let value = toon!({
        "rows": [
            { "city": "Oslo", "pop": 709037 },
            { "city": "Bergen", "pop": 291940 }
        ]
    });

    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        let options = EncodeOptions::new().with_delimiter(delimiter);
        println!("--- {:?} ---", delimiter);
        println!("{}\n", encode_with_options(&value, &options));
    }

    let wide = EncodeOptions::new().with_indent(4);
    println!("--- 4-space indent ---");
    println!(
        "{}",
        encode_with_options(&toon!({ "a": { "b": { "c": 1 } } }), &wide)
    );
}
