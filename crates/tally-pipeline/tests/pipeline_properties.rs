//! End-to-end checks of the duration pipeline through its public API.

use tally_core::advisory::Advisory;
use tally_core::error::TallyError;
use tally_core::formatting::format_duration;
use tally_core::limits::{MAX_INPUT_LENGTH, MAX_LINES};
use tally_pipeline::aggregator::aggregate;
use tally_pipeline::analysis::calculate;
use tally_pipeline::parser::parse_seconds;
use tally_pipeline::validator::is_valid_time_format;

#[test]
fn format_after_parse_is_canonical() {
    let cases = [
        ("1:2:3", "01:02:03"),
        ("01:30:00", "01:30:00"),
        ("0:45:00", "00:45:00"),
        ("45:00", "00:45:00"),
        ("5:07", "00:05:07"),
    ];
    for (input, expected) in cases {
        let seconds = parse_seconds(input);
        assert_eq!(format_duration(u64::from(seconds), true), expected, "{input}");
        assert_eq!(parse_seconds(expected), seconds, "{input}");
    }
}

#[test]
fn mixed_input_scenario_end_to_end() {
    let calc = calculate("01:30:00\n45:00\ngarbage\n25:00:00").expect("calculation");
    let f = calc.summary.formatted();

    assert_eq!(f.total, "02:15:00");
    assert_eq!(f.count, 2);
    assert_eq!(f.average, "01:07:30");
    assert_eq!(f.max, "01:30:00");
    assert_eq!(calc.advisories, vec![Advisory::InvalidLines { count: 2 }]);
}

#[test]
fn one_hour_speed_totals() {
    let f = aggregate(&[3600]).expect("summary").formatted();
    let speeds: Vec<&str> = f.speeds.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(speeds, vec!["00:40:00", "00:30:00"]);
}

#[test]
fn boundaries() {
    assert!(matches!(calculate("00:00"), Err(TallyError::NoValidData)));
    assert!(!is_valid_time_format("24:00:00"));
    assert!(matches!(calculate("24:00:00"), Err(TallyError::NoValidData)));
    assert_eq!(calculate("23:59:59").expect("max").summary.total_seconds, 86_399);
}

#[test]
fn oversized_input_is_truncated_then_processed() {
    // 10_000 lines of "01:00\n" (6 chars) = 60_000 chars → truncated.
    let raw = "01:00\n".repeat(10_000);
    assert!(raw.chars().count() > MAX_INPUT_LENGTH);

    let calc = calculate(&raw).expect("calculation");
    assert_eq!(
        calc.advisories,
        vec![
            Advisory::InputTruncated {
                limit: MAX_INPUT_LENGTH
            },
            Advisory::LineCapExceeded { limit: MAX_LINES },
        ]
    );
    assert_eq!(calc.summary.count, MAX_LINES);
    assert_eq!(calc.summary.total_seconds, 60 * MAX_LINES as u64);
}

#[test]
fn calculation_serializes_to_json() {
    let calc = calculate("10:00\nnope").expect("calculation");
    let json = serde_json::to_value(&calc).expect("json");
    assert_eq!(json["summary"]["count"], 1);
    assert_eq!(json["advisories"][0]["kind"], "invalid_lines");
    assert_eq!(json["invalid_lines"][0]["line_number"], 2);
    assert_eq!(json["invalid_lines"][0]["reason"], "bad_shape");
}
