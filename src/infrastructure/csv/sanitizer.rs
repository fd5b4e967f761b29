// ============================================================
// CELL SANITIZER
// ============================================================
// Neutralize spreadsheet-formula payloads before validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that make spreadsheet software evaluate a cell as a formula
/// when the file is re-exported and opened.
const FORMULA_PREFIXES: [char; 4] = ['=', '+', '-', '@'];

/// Command and script tokens that survive even without a formula prefix,
/// e.g. DDE payloads or pasted HTML.
static COMMAND_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(cmd\s*\||=cmd|powershell|mshta|rundll32|javascript:|vbscript:|data:text/html|<script)")
        .expect("command token pattern is valid")
});

/// Neutralize a raw cell value.
///
/// If the trimmed value starts with a formula prefix or contains a command
/// token, the original untrimmed value is returned prefixed with a single
/// quote, which spreadsheet software treats as literal text. Otherwise the
/// trimmed value is returned unchanged. Validation (length, enum membership)
/// always sees the output of this function.
pub fn sanitize_cell(raw: &str) -> String {
    let trimmed = raw.trim();

    let has_formula_prefix = trimmed
        .chars()
        .next()
        .map(|c| FORMULA_PREFIXES.contains(&c))
        .unwrap_or(false);

    if has_formula_prefix || COMMAND_TOKENS.is_match(trimmed) {
        format!("'{}", raw)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_prefixes_are_escaped() {
        assert_eq!(sanitize_cell("=SUM(A1:A9)"), "'=SUM(A1:A9)");
        assert_eq!(sanitize_cell("+1234"), "'+1234");
        assert_eq!(sanitize_cell("-2+3"), "'-2+3");
        assert_eq!(sanitize_cell("@SUM(1,2)"), "'@SUM(1,2)");
    }

    #[test]
    fn test_original_untrimmed_value_is_preserved() {
        // Leading whitespace hides the prefix from a naive check but not
        // from spreadsheet software.
        assert_eq!(sanitize_cell("  =1+1"), "'  =1+1");
        assert_eq!(sanitize_cell("\t@cell "), "'\t@cell ");
    }

    #[test]
    fn test_command_tokens_are_escaped() {
        assert_eq!(
            sanitize_cell("call cmd|'/C calc'!A0"),
            "'call cmd|'/C calc'!A0"
        );
        assert_eq!(sanitize_cell("javascript:alert(1)"), "'javascript:alert(1)");
        assert_eq!(sanitize_cell("<script>x</script>"), "'<script>x</script>");
        assert_eq!(sanitize_cell("run POWERSHELL now"), "'run POWERSHELL now");
    }

    #[test]
    fn test_clean_values_are_trimmed_only() {
        assert_eq!(sanitize_cell("  Call 10 customers  "), "Call 10 customers");
        assert_eq!(sanitize_cell("todo"), "todo");
        assert_eq!(sanitize_cell(""), "");
        assert_eq!(sanitize_cell("   "), "");
    }

    #[test]
    fn test_quote_prefix_is_not_doubled() {
        // An already-quoted value has no formula prefix, so it passes through.
        assert_eq!(sanitize_cell("'=1+1"), "'=1+1");
    }
}
