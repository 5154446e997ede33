//! Redaction of patient identifiers from formatted log lines.
//!
//! The services never put clinical values or identifiers into log fields, but
//! request files and CLI arguments can still end up in error messages. Every
//! line the subscriber writes passes through [`SanitizingMakeWriter`], which
//! masks:
//! - UUIDs (record and request IDs)
//! - medical record numbers (`MRN: 1234567`)
//! - 13-digit national personal codes (IDNP)
//! - email addresses
//! - phone numbers (local `0xx xxx xxx` and international `+...`)
//! - calendar dates (`1961-04-12`, `12.04.1961`, `12/04/1961`)
//!
//! Log timestamps (`2026-01-05T10:00:00Z`) are left alone: the date pattern
//! needs a word boundary after the day.
//!
//! Input is capped at `VITALSCORE_SANITIZE_MAX_BYTES` (default 16 KiB) per call.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

static RULES: OnceLock<RedactionRules> = OnceLock::new();

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct RedactionRules {
    any: RegexSet,
    rules: Vec<Rule>,
}

/// Patterns in application order. National codes run before phone numbers so a
/// 13-digit code is never half-masked as a phone.
const PATTERNS: [(&str, &str); 7] = [
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (r"(?i)\bMRN\s?[:#]?\s?\d{4,12}\b", "[REDACTED-MRN]"),
    (r"\b\d{13}\b", "[REDACTED-IDNP]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\+\d{1,3}[-.\s]?\(?\d{2,4}\)?[-.\s]?\d{3}[-.\s]?\d{3,4}\b",
        "[REDACTED-PHONE]",
    ),
    (r"\b0\d{2}[-.\s]?\d{3}[-.\s]?\d{3}\b", "[REDACTED-PHONE]"),
    (
        r"\b(?:\d{4}-\d{2}-\d{2}|\d{2}[./]\d{2}[./]\d{4})\b",
        "[REDACTED-DATE]",
    ),
];

fn rules() -> &'static RedactionRules {
    RULES.get_or_init(|| RedactionRules {
        any: RegexSet::new(PATTERNS.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        rules: PATTERNS
            .iter()
            .map(|&(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect(),
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("VITALSCORE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Longest prefix of `input` within `max_bytes` that ends on a char boundary.
fn clip(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Mask patient identifiers in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (prefix, truncated) = clip(input, max_bytes);

    let mut out = prefix.to_string();
    for idx in rules.any.matches(prefix).iter() {
        let rule = &rules.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether `input` holds anything [`sanitize`] would mask.
#[must_use]
pub fn contains_identifier(input: &str) -> bool {
    let (prefix, _) = clip(input, max_sanitize_bytes());
    rules().any.is_match(prefix)
}

/// `MakeWriter` wrapper that sanitizes each formatted line before it reaches
/// the inner writer.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn emit_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A line with no newline in sight is flushed early rather than buffered forever.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let overlong = std::mem::take(&mut self.pending);
            self.write_sanitized(&overlong)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.emit_complete_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.emit_complete_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.write_sanitized(&rest)?;
        }
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_uuid() {
        let out = sanitize("request 550e8400-e29b-41d4-a716-446655440000 failed");
        assert_eq!(out, "request [REDACTED-UUID] failed");
    }

    #[test]
    fn test_mrn() {
        assert!(sanitize("MRN:12345678 rejected").contains("[REDACTED-MRN]"));
        assert!(sanitize("mrn 445566").contains("[REDACTED-MRN]"));
    }

    #[test]
    fn test_national_code() {
        let out = sanitize("patient 2001234567890 missing age");
        assert_eq!(out, "patient [REDACTED-IDNP] missing age");
    }

    #[test]
    fn test_email_and_phones() {
        let out = sanitize("contact ion.popescu@clinic.md or +373 69 123 456 or 069 123 456");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(!out.contains("clinic.md"));
        assert!(!out.contains("123 456"), "{out}");
    }

    #[test]
    fn test_dates() {
        assert!(sanitize("born 1961-04-12").contains("[REDACTED-DATE]"));
        assert!(sanitize("born 12.04.1961").contains("[REDACTED-DATE]"));
        assert!(sanitize("born 12/04/1961").contains("[REDACTED-DATE]"));
    }

    #[test]
    fn test_log_timestamps_and_labels_survive() {
        let line = "2026-01-05T10:00:00.123456Z  INFO vitalscore: Risk assessed method=official category=high band=55-59";
        assert_eq!(sanitize(line), line);
        assert!(!contains_identifier(line));
    }

    #[test]
    fn test_contains_identifier() {
        assert!(contains_identifier("id 550e8400-e29b-41d4-a716-446655440000"));
        assert!(!contains_identifier("gfr stage G3b"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let out = sanitize_with_limit("ăăăăă", 3);
        assert_eq!(out, "ă [TRUNCATED]");
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| std::io::Error::other("poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Sink {
        type Writer = Sink;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_writer_sanitizes_split_lines() {
        let sink = Sink::default();
        let make = SanitizingMakeWriter::new(sink.clone());
        let mut writer = make.make_writer();
        writer.write_all(b"loading MRN:1234").expect("write");
        writer.write_all(b"5678 done\ntail 1961-04-12").expect("write");
        writer.flush().expect("flush");

        let written = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(written, "loading [REDACTED-MRN] done\ntail [REDACTED-DATE]");
    }
}
