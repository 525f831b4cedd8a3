#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_flag_value() {
    let a = args(&["12", "Phone", "--desc", "Top-up", "--date", "2024-03-15"]);
    assert_eq!(flag_value(&a, "--desc"), Some("Top-up"));
    assert_eq!(flag_value(&a, "--date"), Some("2024-03-15"));
    assert_eq!(flag_value(&a, "--month"), None);
}

#[test]
fn test_flag_without_value() {
    let a = args(&["list", "--month"]);
    assert_eq!(flag_value(&a, "--month"), None);
    assert!(has_flag(&a, "--month"));
}

#[test]
fn test_positionals_skip_flags() {
    let a = args(&["12", "--desc", "Top up", "Phone", "--clear"]);
    assert_eq!(positionals(&a, &["--desc"]), vec!["12", "Phone"]);
}

#[test]
fn test_positionals_keep_negative_numbers() {
    let a = args(&["-5", "Phone"]);
    assert_eq!(positionals(&a, &["--desc"]), vec!["-5", "Phone"]);
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
    assert_eq!(parse_amount("$1,200").unwrap(), dec!(1200));
    assert_eq!(parse_amount(" -3 ").unwrap(), dec!(-3));
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("NaN").is_err());
    assert!(parse_amount("").is_err());
}

#[test]
fn test_parse_input_date() {
    assert_eq!(parse_input_date("2024-03-15").unwrap(), "15/03/2024");
    assert!(parse_input_date("15/03/2024").is_err());
    assert!(parse_input_date("2024-02-30").is_err());
}

#[test]
fn test_parse_id() {
    assert_eq!(parse_id("42").unwrap(), 42);
    assert!(parse_id("-1").is_err());
    assert!(parse_id("x").is_err());
}

#[test]
fn test_shellexpand_plain_path() {
    assert_eq!(shellexpand("out.csv"), "out.csv");
    assert!(!shellexpand("~/out.csv").starts_with('~'));
}
