use std::io::Write;
use tempfile::NamedTempFile;

/// Writes a session script with the `action,value` header.
pub fn write_script(rows: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "action,value").unwrap();
    for (action, value) in rows {
        writeln!(file, "{action},{value}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Rows that put one plan of `provider` into the cart.
pub fn purchase<'a>(
    category: &'a str,
    provider: &'a str,
    account: &'a str,
    plan: &'a str,
) -> Vec<(&'a str, &'a str)> {
    vec![
        ("category", category),
        ("provider", provider),
        ("account", account),
        ("next", ""),
        ("plan", plan),
        ("add", ""),
    ]
}
