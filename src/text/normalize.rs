//! Rewrites free text typed into an editor so that the algebra engine can read it.

/// Prepares `input` for the engine, in three steps:
///
/// 1. A non-ASCII character directly followed by a letter, a digit or another non-ASCII character
///    gets an explicit `*` after it, so `πr` reads as `π*r`.
/// 2. A lone `=` becomes `==`, unless it is the first or last character or is already part of
///    `==`, `<=`, `>=` or `!=`.
/// 3. `∞` becomes `Infinity`.
pub fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();

    let mut multiplied = Vec::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        multiplied.push(c);
        if let Some(&next) = chars.get(i + 1) {
            if !c.is_ascii() && (next.is_alphanumeric() || !next.is_ascii()) {
                multiplied.push('*');
            }
        }
    }

    let mut out = String::with_capacity(multiplied.len() + 8);
    let last = multiplied.len().saturating_sub(1);
    for (i, &c) in multiplied.iter().enumerate() {
        match c {
            '=' if i > 0 && i < last => {
                let before = multiplied[i - 1];
                let after = multiplied[i + 1];
                out.push('=');
                if !matches!(before, '=' | '<' | '>' | '!') && after != '=' {
                    out.push('=');
                }
            }
            '∞' => out.push_str("Infinity"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_multiplication_after_symbols() {
        assert_eq!(normalize("2πx"), "2π*x");
        assert_eq!(normalize("πr"), "π*r");
        assert_eq!(normalize("αβ"), "α*β");
        assert_eq!(normalize("π2"), "π*2");
        assert_eq!(normalize("π+2"), "π+2");
        assert_eq!(normalize("xπ"), "xπ");
        assert_eq!(normalize("π"), "π");
    }

    #[test]
    fn test_equals() {
        assert_eq!(normalize("a=b"), "a==b");
        assert_eq!(normalize("a==b"), "a==b");
        assert_eq!(normalize("a<=b"), "a<=b");
        assert_eq!(normalize("a>=b"), "a>=b");
        assert_eq!(normalize("a!=b"), "a!=b");
        assert_eq!(normalize("=b"), "=b");
        assert_eq!(normalize("a="), "a=");
    }

    #[test]
    fn test_infinity() {
        assert_eq!(normalize("∞"), "Infinity");
        assert_eq!(normalize("-∞"), "-Infinity");
        assert_eq!(normalize("2∞"), "2Infinity");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("sin(x) + 2*y"), "sin(x) + 2*y");
    }
}
