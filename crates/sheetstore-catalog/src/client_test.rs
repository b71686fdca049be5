use super::*;

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(
        extract_domain("https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv"),
        "docs.google.com"
    );
    assert_eq!(extract_domain("http://localhost:8080/sheet.csv"), "localhost:8080");
}

#[test]
fn extract_domain_stops_at_query() {
    assert_eq!(extract_domain("https://sheets.example.com?gid=0"), "sheets.example.com");
}

#[test]
fn extract_domain_without_scheme_returns_host_part() {
    assert_eq!(extract_domain("sheets.example.com/x.csv"), "sheets.example.com");
}

#[test]
fn client_builds_with_zero_retries() {
    assert!(SheetClient::new(5, "sheetstore-test/0.1", 0, 0).is_ok());
}
