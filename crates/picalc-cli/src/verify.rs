//! Comparison of computed digits against a reference expansion of π.

use std::io;
use std::path::Path;

use serde::Serialize;

use picalc_core::constants::ACCURACY_SLACK_DIGITS;

/// How far a computed significand agrees with the reference.
///
/// Places count decimal places after the leading `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accuracy {
    /// Every computed digit matched; `digits` were compared.
    AllCorrect { digits: usize },
    /// The first mismatch follows `places` correct decimal places.
    CorrectTo { places: usize },
    /// The reference ran out after `places` matching decimal places.
    ReferenceExhausted { places: usize },
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllCorrect { digits } => write!(f, "all {digits} digits correct"),
            Self::CorrectTo { places } => write!(f, "correct to {places} decimal places"),
            Self::ReferenceExhausted { places } => write!(
                f,
                "reference exhausted after {places} matching decimal places"
            ),
        }
    }
}

impl Accuracy {
    /// Whether the comparison found a wrong digit.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::CorrectTo { .. })
    }

    /// Whether at least `expected` significant digits (the leading `3`
    /// included) agree, allowing `ACCURACY_SLACK_DIGITS` of shortfall.
    ///
    /// A mismatch past the digits the series can deliver is expected and
    /// still meets the expectation.
    #[must_use]
    pub fn meets(&self, expected: u64) -> bool {
        match self {
            Self::CorrectTo { places } => {
                places + 1 + ACCURACY_SLACK_DIGITS as usize >= expected as usize
            }
            Self::AllCorrect { .. } | Self::ReferenceExhausted { .. } => true,
        }
    }
}

/// Keep only the ASCII digits of a reference text (drops `.`, whitespace, newlines).
#[must_use]
pub fn normalize_reference(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Compare a significand (digits only, leading `3` first) with reference digits.
#[must_use]
pub fn compare_digits(significand: &str, reference: &str) -> Accuracy {
    let reference = reference.as_bytes();
    for (i, digit) in significand.bytes().enumerate() {
        match reference.get(i) {
            None => {
                return Accuracy::ReferenceExhausted {
                    places: i.saturating_sub(1),
                }
            }
            Some(&expected) if expected != digit => {
                return Accuracy::CorrectTo {
                    places: i.saturating_sub(1),
                }
            }
            Some(_) => {}
        }
    }
    Accuracy::AllCorrect {
        digits: significand.len(),
    }
}

/// Read and normalize a reference digit file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or `InvalidData` if it
/// holds no digits.
pub fn load_reference(path: &Path) -> io::Result<String> {
    let digits = normalize_reference(&std::fs::read_to_string(path)?);
    if digits.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} contains no digits", path.display()),
        ));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_50: &str = "31415926535897932384626433832795028841971693993751";

    #[test]
    fn all_correct() {
        assert_eq!(
            compare_digits("3141592653", PI_50),
            Accuracy::AllCorrect { digits: 10 }
        );
    }

    #[test]
    fn single_term_agrees_to_thirteen_places() {
        let accuracy = compare_digits("31415926535897342076", PI_50);
        assert_eq!(accuracy, Accuracy::CorrectTo { places: 13 });
        assert!(accuracy.is_mismatch());
    }

    #[test]
    fn mismatch_past_estimate_meets_expectation() {
        // one term: 14 significant digits expected, 14 agree
        let accuracy = compare_digits("31415926535897342076", PI_50);
        assert!(accuracy.meets(14));
        assert!(accuracy.meets(16));
        assert!(!accuracy.meets(17));

        let early = compare_digits("31416", PI_50);
        assert_eq!(early, Accuracy::CorrectTo { places: 3 });
        assert!(!early.meets(14));

        assert!(Accuracy::AllCorrect { digits: 5 }.meets(1_000));
        assert!(Accuracy::ReferenceExhausted { places: 3 }.meets(1_000));
    }

    #[test]
    fn reference_exhausted() {
        assert_eq!(
            compare_digits("314159", "3141"),
            Accuracy::ReferenceExhausted { places: 3 }
        );
    }

    #[test]
    fn leading_digit_mismatch_saturates() {
        assert_eq!(
            compare_digits("4", PI_50),
            Accuracy::CorrectTo { places: 0 }
        );
    }

    #[test]
    fn normalize_strips_point_and_whitespace() {
        assert_eq!(normalize_reference("3.14159\n26535 89\r\n"), "3141592653589");
    }

    #[test]
    fn load_reference_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pi.txt");
        std::fs::write(&path, "3.1415926535\n").unwrap();
        assert_eq!(load_reference(&path).unwrap(), "31415926535");

        std::fs::write(&path, "no digits here\n").unwrap();
        let err = load_reference(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            Accuracy::CorrectTo { places: 13 }.to_string(),
            "correct to 13 decimal places"
        );
        assert_eq!(
            Accuracy::AllCorrect { digits: 5 }.to_string(),
            "all 5 digits correct"
        );
    }
}
