//! Your first TOON round trip: encode a value, decode it back.
//!
//! Run with: `cargo run --example simple`

use toon_codec::{decode, encode, toon};

fn main() {
    let user = toon!({
        "id": 123,
        "name": "Alice",
        "active": true,
        "tags": ["admin", "ops"]
    });

    let text = encode(&user);
    println!("TOON output:\n{}\n", text);

    let back = decode(&text).expect("canonical output always decodes");
    assert_eq!(back, user);
    println!("Round trip OK");
}
