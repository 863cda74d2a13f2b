//! Regex patterns for Turkish insurance document extraction.
//!
//! Patterns are written against normalized text (see
//! [`crate::extraction::normalize`]): lower case, dotless `ı` wherever the
//! source had an ASCII `I`, single spaces. Labels accept both `i` and `ı`
//! so documents typed without Turkish capitals still match.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount labels in priority order: specific phrases before generic ones.
pub const AMOUNT_LABELS: [(&str, &str); 7] = [
    ("net prim", r"net\s*pr[iı]m"),
    ("brüt prim", r"br[üu]t\s*pr[iı]m"),
    ("toplam tutar", r"toplam\s*tutar"),
    ("ödenecek tutar", r"[öo]denecek\s*tutar"),
    ("genel toplam", r"genel\s*toplam"),
    ("tutar", r"tutar"),
    ("bedel", r"bedel"),
];

lazy_static! {
    // Policy / reference number
    pub static ref POLICY_NUMBER: Regex = Regex::new(
        r"(?i)(?:pol[iı][çc]e|ref)\s*no\s*[:.]?\s*([0-9a-zı/\-]{5,25})"
    ).unwrap();

    // Customer number, only used as a policy number substitute
    pub static ref CUSTOMER_NUMBER: Regex = Regex::new(
        r"(?i)m[üu][şs]ter[iı]\s*no\s*[:.]?\s*([0-9a-zı/\-]{5,25})"
    ).unwrap();

    // Labeled amounts with a mandatory currency marker, one per label
    pub static ref AMOUNT_PATTERNS: Vec<(&'static str, Regex)> = AMOUNT_LABELS
        .iter()
        .map(|(name, label)| {
            let pattern = format!(r"(?i){label}[\s:]*(\d[\d.,]*)\s*(?:tl|try|₺)");
            (*name, Regex::new(&pattern).unwrap())
        })
        .collect();

    // Insured party / customer / company title
    pub static ref CUSTOMER_NAME: Regex = Regex::new(
        r"(?i)(?:s[iı]gortal[ıi]|m[üu][şs]ter[iı]|unvan[ıi]?)\s*(?:ad[ıi]|[üu]nvan[ıi])?\s*[:\-]?\s*([a-zçğıöşüâîû ]{3,40}?)(?:\s+(?:t\.\s?c\.|verg[iı])|\n|$)"
    ).unwrap();

    // Turkish vehicle plate: province code, 1-3 letters, 2-4 digits
    pub static ref PLATE_NUMBER: Regex = Regex::new(
        r"(?i)plaka\s*(?:no)?\s*[:.]?\s*(\d{2})\s*([a-zı]{1,3})\s*(\d{2,4})\b"
    ).unwrap();
}
