mod common;

use catalog_server::catalog::{RedirectEntry, RedirectTable};
use common::TestDir;

fn table(contents: &str) -> (TestDir, RedirectTable) {
    let dir = TestDir::new("redirect");
    let path = dir.write("redirects.txt", contents.as_bytes());
    (dir, RedirectTable::new(path))
}

#[tokio::test]
async fn test_lookup_builds_location() {
    let (_dir, table) = table("/old.txt host.example 9090\n");

    let location = table.lookup(b"/old.txt").await.unwrap();
    assert_eq!(location.as_deref(), Some("http://host.example:9090/old.txt"));
}

#[tokio::test]
async fn test_lookup_first_match_wins() {
    let (_dir, table) = table(
        "/a.txt first.example 1\n\
         /b.txt other.example 2\n\
         /a.txt second.example 3\n",
    );

    let location = table.lookup(b"/a.txt").await.unwrap();
    assert_eq!(location.as_deref(), Some("http://first.example:1/a.txt"));
}

#[tokio::test]
async fn test_lookup_exact_match_only() {
    let (_dir, table) = table("/a.txt host 80\n/dir/a.txt host 81\n");

    assert_eq!(table.lookup(b"/a.tx").await.unwrap(), None);
    assert_eq!(table.lookup(b"/a.txt.bak").await.unwrap(), None);
    assert_eq!(table.lookup(b"/A.txt").await.unwrap(), None);
    assert_eq!(
        table.lookup(b"/dir/a.txt").await.unwrap().as_deref(),
        Some("http://host:81/dir/a.txt")
    );
}

#[tokio::test]
async fn test_lookup_tabs_and_crlf() {
    let (_dir, table) = table("\t/tab.txt\t\tmirror.example\t8080\t\r\n");

    let location = table.lookup(b"/tab.txt").await.unwrap();
    assert_eq!(location.as_deref(), Some("http://mirror.example:8080/tab.txt"));
}

#[tokio::test]
async fn test_lookup_last_line_without_newline() {
    let (_dir, table) = table("/x host 1\n/last.txt host 2");

    let location = table.lookup(b"/last.txt").await.unwrap();
    assert_eq!(location.as_deref(), Some("http://host:2/last.txt"));
}

#[tokio::test]
async fn test_lookup_skips_malformed_lines() {
    let (_dir, table) = table(
        "/a.txt\n\
         /a.txt only-host\n\
         \n\
         /a.txt host notaport\n\
         /a.txt host.example 7000\n",
    );

    let location = table.lookup(b"/a.txt").await.unwrap();
    assert_eq!(location.as_deref(), Some("http://host.example:7000/a.txt"));
}

#[tokio::test]
async fn test_lookup_no_match() {
    let (_dir, table) = table("/a.txt host 80\n");
    assert_eq!(table.lookup(b"/b.txt").await.unwrap(), None);
}

#[tokio::test]
async fn test_lookup_sees_updates_without_reload() {
    let (dir, table) = table("");
    assert_eq!(table.lookup(b"/new.txt").await.unwrap(), None);

    dir.write("redirects.txt", b"/new.txt fresh.example 81\n");
    assert_eq!(
        table.lookup(b"/new.txt").await.unwrap().as_deref(),
        Some("http://fresh.example:81/new.txt")
    );
}

#[tokio::test]
async fn test_lookup_missing_table_is_internal_error() {
    let dir = TestDir::new("redirect-missing");
    let table = RedirectTable::new(dir.path().join("gone.txt"));

    assert!(table.lookup(b"/a.txt").await.is_err());
}

#[test]
fn test_entry_parse() {
    let entry = RedirectEntry::parse(b"/r.bin   cdn.example 443\n").unwrap();

    assert_eq!(entry.resource, "/r.bin");
    assert_eq!(entry.host, "cdn.example");
    assert_eq!(entry.port, "443");
    assert_eq!(entry.location(), "http://cdn.example:443/r.bin");
}

#[tokio::test]
async fn test_lookup_requires_exactly_three_fields_and_valid_port() {
    let (_dir, table) = table(
        "/a.txt host.example 70000\n\
         /a.txt host.example 80 extra\n\
         /b.txt host.example 65535\n",
    );

    assert_eq!(table.lookup(b"/a.txt").await.unwrap(), None);
    assert_eq!(
        table.lookup(b"/b.txt").await.unwrap().as_deref(),
        Some("http://host.example:65535/b.txt")
    );
}
