//! Key folding collapses single-key object chains into dotted paths, and
//! path expansion restores them on decode.
//!
//! Run with: `cargo run --example key_folding`

use toon_codec::{
    decode_with_options, encode_with_options, toon, DecodeOptions, EncodeOptions, KeyFolding,
    PathExpansion,
};

fn main() {
    let value = toon!({
        "data": {
            "metadata": {
                "items": ["a", "b"]
            }
        }
    });

    let folded = encode_with_options(
        &value,
        &EncodeOptions::new().with_key_folding(KeyFolding::Safe),
    );
    println!("Folded:   {}", folded);

    let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let restored = decode_with_options(&folded, &options).expect("decode");
    assert_eq!(restored, value);
    println!("Restored: {:?}", restored);
}
