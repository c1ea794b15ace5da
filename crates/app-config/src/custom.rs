// In crates/app-config/src/custom.rs

use core_types::Symbol;

/// Characters a ticker may contain besides ASCII letters and digits.
const SYMBOL_PUNCTUATION: &[char] = &['.', '-', '=', '^', '_'];

/// Parses free-form user input such as `"SISB.BK, NETBAY.BK SAPPE.BK"`.
///
/// Entries are separated by commas or whitespace. Malformed entries are
/// dropped with a warning; duplicates keep their first position.
pub fn parse_custom_symbols(text: &str) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = Vec::new();

    for raw in text.split(|c: char| c == ',' || c.is_whitespace()) {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        if !entry
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOL_PUNCTUATION.contains(&c))
        {
            tracing::warn!(entry, "Ignoring malformed custom symbol.");
            continue;
        }
        let Ok(symbol) = Symbol::new(entry.to_ascii_uppercase()) else {
            continue;
        };
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    symbols
}
