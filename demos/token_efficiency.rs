//! Comparing TOON output size against JSON for typical structured data.
//!
//! Run with: `cargo run --example token_efficiency`

use toon_codec::{encode, toon, Value};

fn main() {
    let users: Vec<Value> = (0..20)
        .map(|i| {
            toon!({
                "id": i,
                "name": format!("user{}", i),
                "email": format!("user{}@example.com", i),
                "active": i % 3 != 0
            })
        })
        .collect();
    let value = Value::from(users);

    let toon_text = encode(&value);
    let json_text = serde_json::to_string(&value).expect("serialize");

    println!("TOON ({} bytes):\n{}\n", toon_text.len(), toon_text);
    println!("JSON ({} bytes):\n{}\n", json_text.len(), json_text);
    println!(
        "TOON is {:.0}% the size of JSON",
        100.0 * toon_text.len() as f64 / json_text.len() as f64
    );
}
