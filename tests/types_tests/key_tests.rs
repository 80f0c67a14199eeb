//! Tests for Key
//!
//! These tests verify:
//! - Equality and ordering across the two key kinds
//! - Text rendering for persistence
//! - Digit sniffing on restore, including its lossy cases

use memdb::Key;

// =============================================================================
// Equality / Ordering Tests
// =============================================================================

#[test]
fn test_text_and_int_never_equal() {
    assert_ne!(Key::from("1"), Key::Int(1));
}

#[test]
fn test_int_keys_order_before_text_keys() {
    let mut keys = vec![Key::from("a"), Key::Int(10), Key::from("B"), Key::Int(-3)];
    keys.sort();

    assert_eq!(
        keys,
        vec![Key::Int(-3), Key::Int(10), Key::from("B"), Key::from("a")]
    );
}

#[test]
fn test_conversions() {
    assert_eq!(Key::from(5i32), Key::Int(5));
    assert_eq!(Key::from(5i64), Key::Int(5));
    assert_eq!(Key::from(String::from("x")), Key::Text("x".to_string()));
}

#[test]
fn test_accessors() {
    assert_eq!(Key::Int(4).as_int(), Some(4));
    assert_eq!(Key::Int(4).as_str(), None);
    assert_eq!(Key::from("s").as_str(), Some("s"));
    assert!(Key::from("s").is_text());
    assert!(Key::Int(0).is_int());
}

#[test]
fn test_display() {
    assert_eq!(Key::Int(42).to_string(), "42");
    assert_eq!(Key::from("a1").to_string(), "\"a1\"");
}

// =============================================================================
// to_text Tests
// =============================================================================

#[test]
fn test_to_text_int() {
    assert_eq!(Key::Int(1).to_text(), "1");
    assert_eq!(Key::Int(-5).to_text(), "-5");
    assert_eq!(Key::Int(i64::MAX).to_text(), i64::MAX.to_string());
}

#[test]
fn test_to_text_text_passes_through() {
    assert_eq!(Key::from("a1").to_text(), "a1");
    assert_eq!(Key::from("").to_text(), "");
}

// =============================================================================
// from_text Tests
// =============================================================================

#[test]
fn test_from_text_digits_become_int() {
    assert_eq!(Key::from_text("42"), Key::Int(42));
    assert_eq!(Key::from_text("0"), Key::Int(0));
}

#[test]
fn test_from_text_non_digits_stay_text() {
    assert_eq!(Key::from_text("a1"), Key::from("a1"));
    assert_eq!(Key::from_text("1a"), Key::from("1a"));
    assert_eq!(Key::from_text(" 1"), Key::from(" 1"));
    assert_eq!(Key::from_text("1.5"), Key::from("1.5"));
}

#[test]
fn test_from_text_empty_stays_text() {
    assert_eq!(Key::from_text(""), Key::from(""));
}

#[test]
fn test_from_text_negative_stays_text() {
    // Lossy: Key::Int(-5) renders as "-5" but comes back as text
    assert_eq!(Key::from_text(&Key::Int(-5).to_text()), Key::from("-5"));
}

#[test]
fn test_from_text_leading_zeros_collapse() {
    assert_eq!(Key::from_text("007"), Key::Int(7));
}

#[test]
fn test_from_text_overflow_stays_text() {
    let huge = "99999999999999999999";
    assert_eq!(Key::from_text(huge), Key::from(huge));
}

#[test]
fn test_from_text_non_ascii_digits_stay_text() {
    assert_eq!(Key::from_text("١٢"), Key::from("١٢"));
}

#[test]
fn test_digit_text_key_round_trip_is_lossy() {
    let original = Key::from("42");

    let restored = Key::from_text(&original.to_text());

    assert_eq!(restored, Key::Int(42));
    assert_ne!(restored, original);
}

#[test]
fn test_non_negative_int_round_trip() {
    for n in [0i64, 1, 99, i64::MAX] {
        assert_eq!(Key::from_text(&Key::Int(n).to_text()), Key::Int(n));
    }
}
