/// Normalizes a raw formula string to the canonical character set.
///
/// Whitespace is dropped, the bracket variants `[` `{` / `]` `}` collapse to
/// parentheses, and the adduct dots `·` `•` collapse to `*`. Everything else
/// passes through unchanged; rejecting what remains is the validator's job.
pub fn sanitize(formula: &str) -> String {
    let mut sanitized = String::with_capacity(formula.len());
    for char in formula.chars() {
        match char {
            c if c.is_whitespace() => continue,
            '[' | '{' => sanitized.push('('),
            ']' | '}' => sanitized.push(')'),
            '·' | '•' => sanitized.push('*'),
            c => sanitized.push(c),
        }
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(sanitize(" Na Cl \t"), "NaCl");
    }

    #[test]
    fn bracket_variants_collapse_to_parentheses() {
        assert_eq!(sanitize("{K2}2Mg2[(SO4)3Ho]2"), "(K2)2Mg2((SO4)3Ho)2");
    }

    #[test]
    fn adduct_dots_collapse_to_asterisk() {
        assert_eq!(sanitize("CuSO4·5H2O"), "CuSO4*5H2O");
        assert_eq!(sanitize("CaCl2•6H2O"), "CaCl2*6H2O");
    }

    #[test]
    fn canonical_input_is_unchanged() {
        assert_eq!(sanitize("(NH4)2SO4*H2O"), "(NH4)2SO4*H2O");
    }
}
