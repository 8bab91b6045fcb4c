//! Flat-file table of resources hosted on other servers.
//!
//! Each line maps a resource path to the server holding it:
//!
//! ```text
//! /old.txt    mirror.example    9090
//! ```
//!
//! Fields are separated by runs of spaces or tabs; a trailing `\r` is ignored.
//! A line matches only if it has exactly three fields and the port is a
//! number in `0..=65535`. Any other line is skipped without an error, so a
//! typo in the port makes that entry silently unreachable.
//!
//! The file is re-read from the start on every lookup, so edits take effect
//! without a restart, and lookups share nothing mutable.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::Error;

const SCHEME: &str = "http://";

/// One parsed table line. Borrows from the line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectEntry<'a> {
    pub resource: &'a str,
    pub host: &'a str,
    pub port: &'a str,
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

impl<'a> RedirectEntry<'a> {
    /// Parses `<resource> <host> <port>`.
    ///
    /// Lines with fewer or more than three fields, non-UTF-8 fields, or a port
    /// that is not a number in `0..=65535` do not parse.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let mut fields = line
            .split(|b| is_separator(*b))
            .filter(|field| !field.is_empty());

        let resource = std::str::from_utf8(fields.next()?).ok()?;
        let host = std::str::from_utf8(fields.next()?).ok()?;
        let port = std::str::from_utf8(fields.next()?).ok()?;
        if fields.next().is_some() {
            return None;
        }
        port.parse::<u16>().ok()?;

        Some(Self {
            resource,
            host,
            port,
        })
    }

    /// `http://<host>:<port><resource>`
    pub fn location(&self) -> String {
        let len = SCHEME
            .len()
            .saturating_add(self.host.len())
            .saturating_add(1)
            .saturating_add(self.port.len())
            .saturating_add(self.resource.len());

        let mut location = String::with_capacity(len);
        location.push_str(SCHEME);
        location.push_str(self.host);
        location.push(':');
        location.push_str(self.port);
        location.push_str(self.resource);
        location
    }
}

#[derive(Debug, Clone)]
pub struct RedirectTable {
    path: PathBuf,
}

impl RedirectTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scans the table for `target`, returning the redirect location of the
    /// first matching line.
    ///
    /// `Ok(None)` when no line matches. Failing to open or read the table is
    /// an internal error.
    pub async fn lookup(&self, target: &[u8]) -> Result<Option<String>, Error> {
        let file = File::open(&self.path).await.map_err(Error::Internal)?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();

        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(Error::Internal)?;
            if n == 0 {
                return Ok(None);
            }

            let Some(entry) = RedirectEntry::parse(&line) else {
                continue;
            };
            if entry.resource.as_bytes() == target {
                return Ok(Some(entry.location()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        let entry = RedirectEntry::parse(b"  /a.txt \t\thost.example   80\r\n").unwrap();

        assert_eq!(entry.resource, "/a.txt");
        assert_eq!(entry.host, "host.example");
        assert_eq!(entry.port, "80");
        assert_eq!(entry.location(), "http://host.example:80/a.txt");
    }

    #[test]
    fn parse_rejects_short_and_long_lines() {
        assert_eq!(RedirectEntry::parse(b"/a.txt host.example\n"), None);
        assert_eq!(RedirectEntry::parse(b"/a.txt host 80 extra\n"), None);
        assert_eq!(RedirectEntry::parse(b"/a.txt host http\n"), None);
        assert_eq!(RedirectEntry::parse(b"\n"), None);
    }
}
