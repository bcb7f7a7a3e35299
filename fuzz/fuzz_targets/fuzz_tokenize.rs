//! Fuzz target for run tokenization.
//!
//! Arbitrary strings must tokenize without panicking, cover the input
//! exactly once (modulo \r\n collapsing), and never produce an atom that
//! mixes whitespace with non-whitespace.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textrun::{MonoMetrics, Style, StyledRun};

fuzz_target!(|data: &str| {
    let style = Style::with_size(12.0);
    let run = StyledRun::new(data, style, None, &MonoMetrics);

    let joined: String = run.atoms().iter().map(|a| a.text()).collect();
    assert_eq!(joined, data.replace("\r\n", "\n"));

    let total: usize = run.atoms().iter().map(|a| a.char_count()).sum();
    assert_eq!(run.total_len(), total);

    // Masked runs must keep char counts while concealing content.
    let masked = StyledRun::new(data, style, Some('*'), &MonoMetrics);
    assert_eq!(masked.total_len(), total);
});
