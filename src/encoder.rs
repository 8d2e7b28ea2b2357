//! Escaping of free text into memegen path segments.
//!
//! See <https://memegen.link/#special-characters>. The substitutions run in
//! order: `_` and `-` are doubled before spaces become `_`, so a later rule
//! never re-matches what an earlier rule produced.

const REPLACEMENTS: [(&str, &str); 12] = [
    ("_", "__"),
    ("-", "--"),
    (" ", "_"),
    ("?", "~q"),
    ("&", "~a"),
    ("%", "~p"),
    ("#", "~h"),
    ("/", "~s"),
    ("\\", "~b"),
    ("<", "~l"),
    (">", "~g"),
    ("\"", "''"),
];

/// Encodes raw user text. Apply exactly once: encoding is not idempotent.
pub fn encode(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |out, (from, to)| out.replace(from, to))
}
