#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use num_rational::BigRational;

use picalc_core::fixed::FixedPoint;
use picalc_core::precision::Precision;

fuzz_target!(|data: &[u8]| {
    if data.len() < 19 {
        return;
    }
    let numer = i64::from_le_bytes(data[0..8].try_into().unwrap());
    let denom = i64::from_le_bytes(data[8..16].try_into().unwrap());
    if denom == 0 {
        return;
    }
    let digits = u64::from(u16::from_le_bytes([data[16], data[17]]) % 512) + 1;
    let shown = usize::from(data[18]) + 1;

    let precision = Precision::from_digits(digits).unwrap();
    let value = BigRational::new(BigInt::from(numer), BigInt::from(denom));
    let fixed = FixedPoint::from_rational(&value, precision);

    let (significand, _) = fixed.to_decimal_parts(shown);
    let body = significand.trim_start_matches('-');
    assert!(body.len() <= shown);
    assert!(!body.ends_with('0'));
    assert!(body.bytes().all(|b| b.is_ascii_digit()));
    let _ = fixed.to_decimal_string(shown);
});
