#![no_main]

use libfuzzer_sys::fuzz_target;

use picalc_core::pi;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Cap both inputs for speed
    let n = u64::from(u16::from_le_bytes([data[0], data[1]]) % 200) + 1;
    let digits = u64::from(u16::from_le_bytes([data[2], data[3]]) % 2_000) + 1;

    let value = pi(n, digits).unwrap();
    let (significand, exponent) = value.to_decimal_parts(digits as usize);
    assert_eq!(exponent, 1);
    assert!(significand.starts_with('3'));
});
