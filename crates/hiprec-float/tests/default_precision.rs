//! The process-wide default precision.
//!
//! Kept in its own test binary because it mutates global state.

use hiprec_float::{
    default_precision, digit_count, epsilon, set_default_precision, FloatError, PrecFloat,
    Precision, INITIAL_PRECISION_BITS,
};

#[test]
fn test_default_precision_lifecycle() {
    assert_eq!(default_precision(), INITIAL_PRECISION_BITS);
    assert_eq!(digit_count(), 15);

    assert_eq!(
        set_default_precision(0),
        Err(FloatError::InvalidPrecision { bits: 0 })
    );
    assert_eq!(default_precision(), INITIAL_PRECISION_BITS);

    let before = PrecFloat::from(1_i64) / 3;
    set_default_precision(200).unwrap();
    assert_eq!(default_precision(), 200);
    assert_eq!(digit_count(), 60);
    assert_eq!(epsilon().precision().bits(), 200);

    // Existing values keep what they captured.
    assert_eq!(before.precision(), Precision::DOUBLE);
    let after = PrecFloat::from(1_i64) / 3;
    assert_eq!(after.precision().bits(), 200);
    assert!(after > before);

    let copy = before.clone();
    assert_eq!(copy.precision(), Precision::DOUBLE);
    let widened = before.round_to_default();
    assert_eq!(widened.precision().bits(), 200);
    assert_eq!(widened, before);

    // Parsing happens at the default too.
    let tenth: PrecFloat = "0.1".parse().unwrap();
    assert_eq!(tenth.precision().bits(), 200);
    assert!(tenth < 0.1);

    set_default_precision(INITIAL_PRECISION_BITS).unwrap();
    let narrowed = after.round_to_default();
    assert_eq!(narrowed, before);
}
