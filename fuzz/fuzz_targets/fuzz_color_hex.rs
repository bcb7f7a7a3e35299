//! Fuzz target for color hex parsing.
//!
//! Rgba::from_hex must handle arbitrary strings without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textrun::Rgba;

fuzz_target!(|data: &str| {
    let _ = Rgba::from_hex(data);

    if !data.starts_with('#') {
        let with_hash = format!("#{data}");
        let _ = Rgba::from_hex(&with_hash);
    }
});
