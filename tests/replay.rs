//! End-to-end replays of a recorded feed.

use orderbook::OrderBook;
use pricer::{replay, Format, ReplayStats};

const FEED: &str = "\
28800538 A b S 44.26 100
28800562 A c B 44.10 100
28800744 R b 100
28800758 A d B 44.18 157
28800773 A e S 44.38 100
28800796 R d 157
28800812 A f B 44.18 157
28800974 A g S 44.27 100
28800975 R e 100
28812071 R f 100
28813129 A h B 43.68 50
28813300 R f 57
28813830 A i S 44.18 100
28814087 A j S 44.18 1000
28814834 R c 100
28814864 A k B 44.09 100
28815774 R k 100
28815804 A l B 44.07 175
28815937 R j 1000
28816245 A m S 44.22 100
";

fn run(target: i64, feed: &str, format: Format) -> (String, ReplayStats) {
    let mut book = OrderBook::new(target);
    let mut out = Vec::new();
    let stats = replay(&mut book, feed.as_bytes(), &mut out, format).expect("replay");
    (String::from_utf8(out).expect("utf8 output"), stats)
}

#[test]
fn target_one_quotes_top_of_book() {
    let expected = "\
28800538 B 44.26
28800562 S 44.10
28800744 B NA
28800758 S 44.18
28800773 B 44.38
28800796 S 44.10
28800812 S 44.18
28800974 B 44.27
28800975 B 44.27
28812071 S 44.18
28813129 S 44.18
28813300 S 44.10
28813830 B 44.18
28814087 B 44.18
28814834 S 43.68
28814864 S 44.09
28815774 S 43.68
28815804 S 44.07
28815937 B 44.18
28816245 B 44.18
";
    let (out, stats) = run(1, FEED, Format::Text);
    assert_eq!(out, expected);
    assert_eq!(stats.quotes, 20);
    assert_eq!(stats.adds, 12);
    assert_eq!(stats.reduces, 8);
    assert_eq!(stats.ignored, 0);
}

#[test]
fn target_two_hundred() {
    let expected = "\
28800758 S 8832.56
28800796 S NA
28800812 S 8832.56
28800974 B 8865.00
28800975 B NA
28812071 S NA
28813129 S 8806.50
28813300 S NA
28813830 B 8845.00
28814087 B 8836.00
28815804 S 8804.25
28815937 B 8845.00
28816245 B 8840.00
";
    let (out, _) = run(200, FEED, Format::Text);
    assert_eq!(out, expected);
}

#[test]
fn unreachable_target_is_silent() {
    let (out, stats) = run(10_000, FEED, Format::Text);
    assert!(out.is_empty());
    assert_eq!(stats.quotes, 0);
    assert_eq!(stats.lines, 20);
}

#[test]
fn same_size_level_scenario() {
    let feed = "\
1 A B1 B 10.00 50
2 A B2 B 10.00 60
3 R B1 50
4 R B2 10
";
    let (out, _) = run(100, feed, Format::Text);
    assert_eq!(out, "2 S 1000.00\n3 S NA\n");
}

#[test]
fn unknown_reduce_and_garbage_are_skipped() {
    let feed = "\
1 A a S 5.00 10
2 R nobody 10
3 Z a 1
4 A a X 5.00 10
5 A
6 A q S 5.001 10

7 R a 10
";
    let (out, stats) = run(10, feed, Format::Text);
    assert_eq!(out, "1 B 50.00\n7 B NA\n");
    assert_eq!(stats.adds, 1);
    assert_eq!(stats.reduces, 2);
    assert_eq!(stats.ignored, 5);
}

#[test]
fn over_reduce_takes_requested_size_off_total() {
    let feed = "\
1 A a B 10.00 50
2 A b B 10.00 60
3 R a 100
";
    let (out, _) = run(50, feed, Format::Text);
    assert_eq!(out, "1 S 500.00\n2 S 500.00\n3 S NA\n");
}

#[test]
fn repeated_order_id_rests() {
    let feed = "\
1 A x B 10.00 10
2 A x B 11.00 10
";
    let (out, _) = run(15, feed, Format::Text);
    assert_eq!(out, "2 S 160.00\n");
}

#[test]
fn max_size_does_not_overflow() {
    let feed = "\
1 A x B 100.00 9223372036854775807
2 A y B 100.00 5
";
    let (out, stats) = run(5, feed, Format::Text);
    assert_eq!(out, "1 S 500.00\n2 S 500.00\n");
    assert_eq!(stats.adds, 2);
}

#[test]
fn zero_price_book_quotes_na() {
    let (out, _) = run(10, "1 A z B 0.00 10\n2 R z 5\n", Format::Text);
    assert_eq!(out, "1 S NA\n");
}

#[test]
fn replay_is_deterministic() {
    let first = run(200, FEED, Format::Text);
    let second = run(200, FEED, Format::Text);
    assert_eq!(first, second);
}

#[test]
fn json_output_matches_text() {
    let (text, _) = run(200, FEED, Format::Text);
    let (json, _) = run(200, FEED, Format::Json);

    let from_json: Vec<String> = json
        .lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).expect("json line");
            let amount = v["amount"].as_str().unwrap_or("NA").to_string();
            format!(
                "{} {} {}",
                v["timestamp"].as_str().unwrap(),
                v["direction"].as_str().unwrap(),
                amount
            )
        })
        .collect();
    let from_text: Vec<&str> = text.lines().collect();
    assert_eq!(from_json, from_text);
}
