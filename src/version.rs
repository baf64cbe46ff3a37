//! Ready-made version printers
//!
//! Any `Fn(&mut dyn Write) -> io::Result<()>` can be passed to
//! [`crate::Loader::load`]; these cover the common cases.

use serde::Serialize;
use std::io::{self, Write};

/// Print the version as a single plain-text line.
pub fn plain_version_printer(
    version: impl Into<String>,
) -> impl Fn(&mut dyn Write) -> io::Result<()> {
    let version = version.into();
    move |w: &mut dyn Write| writeln!(w, "{version}")
}

#[derive(Debug, Clone, Serialize)]
struct VersionInfo {
    version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    commit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    date: String,
}

/// Print version, commit and build date as one JSON object line.
///
/// Empty `commit` or `date` are left out of the output.
pub fn json_version_printer(
    version: impl Into<String>,
    commit: impl Into<String>,
    date: impl Into<String>,
) -> impl Fn(&mut dyn Write) -> io::Result<()> {
    let info = VersionInfo { version: version.into(), commit: commit.into(), date: date.into() };
    move |w: &mut dyn Write| {
        serde_json::to_writer(&mut *w, &info)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render(printer: impl Fn(&mut dyn Write) -> io::Result<()>) -> String {
        let mut out = Vec::<u8>::new();
        printer(&mut out).expect("print");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_plain_printer() {
        assert_eq!(render(plain_version_printer("v1.0.0")), "v1.0.0\n");
    }

    #[test]
    fn test_json_printer_full() {
        let out = render(json_version_printer("v1.0.0", "abc123", "2024-05-01"));
        assert!(out.ends_with('\n'));
        insta::assert_snapshot!(
            out.trim_end(),
            @r#"{"version":"v1.0.0","commit":"abc123","date":"2024-05-01"}"#
        );
    }

    #[test]
    fn test_json_printer_omits_empty_fields() {
        let out = render(json_version_printer("v1.0.0", "", ""));
        insta::assert_snapshot!(out.trim_end(), @r#"{"version":"v1.0.0"}"#);

        let out = render(json_version_printer("v2", "", "today"));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(parsed, serde_json::json!({ "version": "v2", "date": "today" }));
    }

    #[test]
    fn test_printers_surface_write_errors() {
        let err = plain_version_printer("v1")(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let err = json_version_printer("v1", "c", "d")(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
