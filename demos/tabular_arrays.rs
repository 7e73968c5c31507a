//! TOON's signature feature: arrays of homogeneous objects collapse into
//! a header plus one row per element.
//!
//! Run with: `cargo run --example tabular_arrays`

use toon_codec::{encode, toon};

fn main() {
    let inventory = toon!({
        "items": [
            { "sku": "A1", "qty": 2, "price": 9.99 },
            { "sku": "B2", "qty": 1, "price": 14.5 },
            { "sku": "C3", "qty": 7, "price": 3.25 }
        ]
    });

    println!("{}", encode(&inventory));
    // items[3]{sku,qty,price}:
    //   A1,2,9.99
    //   B2,1,14.5
    //   C3,7,3.25
}
