//! Turkish-aware normalization of raw OCR text.

use serde::Serialize;

/// OCR text after Turkish case folding and whitespace cleanup.
///
/// All field rules run against this form: lower case, no pipes, single
/// spaces, no newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw OCR text.
///
/// `İ` becomes `i` and ASCII `I` becomes `ı` before generic lower-casing,
/// otherwise `to_lowercase` would yield `i̇` (with a combining dot) and `i`.
pub fn normalize(raw: &str) -> NormalizedText {
    let folded: String = raw
        .chars()
        .map(|c| match c {
            '\u{0130}' => 'i',
            'I' => '\u{0131}',
            other => other,
        })
        .collect();

    let lowered = folded.to_lowercase().replace('|', "");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    NormalizedText(collapsed)
}

/// Upper-case an identifier (policy number, plate) captured from
/// normalized text. Dotless `ı` maps back to ASCII `I`.
pub fn restore_identifier(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '\u{0131}' => 'I',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Upper-case a person or company name with Turkish casing rules.
pub fn restore_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        for c in word.chars() {
            match c {
                'i' => out.push('\u{0130}'),
                '\u{0131}' => out.push('I'),
                other => out.extend(other.to_uppercase()),
            }
        }
    }
    out
}
