mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process::Command;

const PURCHASES: [(&str, &str, &str, u32); 6] = [
    ("mobile", "ais", "m1", 100),
    ("mobile", "ais", "m2", 199),
    ("mobile", "true", "m3", 50),
    ("utility", "mea", "u1", 0),
    ("gaming", "rov", "g1", 35),
    ("gaming", "rov", "g2", 700),
];

#[test]
fn test_random_carts_are_charged_subtotal_plus_tax() {
    let mut rng = rand::thread_rng();

    for _ in 0..5 {
        let count = rng.gen_range(1..=6);
        let mut rows = Vec::new();
        let mut subtotal = Decimal::ZERO;
        for _ in 0..count {
            let (category, provider, plan, price) = *PURCHASES.choose(&mut rng).unwrap();
            rows.extend(common::purchase(category, provider, "ACC-42", plan));
            subtotal += Decimal::from(price);
        }
        rows.push(("pay", ""));
        let script = common::write_script(&rows);

        let output = Command::new(cargo_bin!("seacharge"))
            .env_remove("GEMINI_API_KEY")
            .env_remove("API_KEY")
            .args(["--payment-delay-ms", "0", "run"])
            .arg(script.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let mut reader = csv::Reader::from_reader(output.stdout.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);

        let expected = (subtotal * dec!(1.07)).round_dp(2);
        assert_eq!(records[0][2].parse::<usize>().unwrap(), count);
        assert_eq!(records[0][3].parse::<Decimal>().unwrap(), expected);
    }
}
