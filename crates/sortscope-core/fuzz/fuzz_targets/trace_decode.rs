#![no_main]
use libfuzzer_sys::fuzz_target;
use sortscope_core::{check_trace, from_cbor, to_cbor, Trace};

// Decoding arbitrary bytes must never panic, and neither may checking
// whatever happens to decode. A decoded trace re-encodes to stable bytes.
fuzz_target!(|data: &[u8]| {
    let Ok(trace) = from_cbor::<Trace>(data) else {
        return;
    };
    if let Some(first) = trace.first() {
        let input = first.values.clone();
        let _ = check_trace(&input, &trace);
    }
    if let Ok(bytes) = to_cbor(&trace) {
        let again: Trace = match from_cbor(&bytes) {
            Ok(t) => t,
            Err(e) => panic!("re-decode of encoded trace failed: {e}"),
        };
        assert_eq!(to_cbor(&again).ok(), Some(bytes));
    }
});
