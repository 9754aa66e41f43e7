//! URL-safe identifiers derived from taxonomy names.

/// Derive a URL-safe slug from a human-readable name.
///
/// The name is lowercased and alphanumeric characters are kept, except letters
/// that stay uppercase because they have no lowercase form (`ℝ`, `ℌ`). Runs of
/// whitespace and hyphens collapse into a single hyphen and every other
/// character is dropped. The result never starts or ends with a hyphen.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() && !ch.is_uppercase() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_char(ch: char) -> bool {
        ch == '-' || (ch.is_alphanumeric() && !ch.is_uppercase())
    }

    #[test]
    fn slugify_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(slugify("  Hello, World!! "), "hello-world");
        assert_eq!(slugify("Fresh   Produce"), "fresh-produce");
        assert_eq!(slugify("Coffee & Tea"), "coffee-tea");
    }

    #[test]
    fn slugify_collapses_hyphen_runs_and_trims_edges() {
        assert_eq!(slugify("--Limited -- Edition--"), "limited-edition");
        assert_eq!(slugify("a-b"), "a-b");
    }

    #[test]
    fn slugify_keeps_unicode_letters_lowercased() {
        assert_eq!(slugify("Горячие Напитки"), "горячие-напитки");
    }

    #[test]
    fn slugify_drops_letters_without_lowercase_form() {
        assert_eq!(slugify("ℌello ℝeal"), "ello-eal");
        assert_eq!(slugify("ℕ ℤ"), "");
    }

    #[test]
    fn slugify_returns_empty_for_symbol_only_input() {
        assert_eq!(slugify("!!! ---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_is_idempotent_and_well_formed() {
        let samples = [
            "  Hello, World!! ",
            "Drinks",
            "Café Crème",
            "Tab\tSeparated\nLines",
            "-leading and trailing-",
            "İstanbul Ürünleri",
            "100% Organic (EU)",
            "Σίσυφος",
            "snake_case_name",
            "  ",
            "ℌello ℝeal",
            "ℝeal ℕumbers",
        ];

        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
            assert!(once.chars().all(is_slug_char), "bad chars in {once:?}");
            assert!(!once.starts_with('-'), "leading hyphen in {once:?}");
            assert!(!once.ends_with('-'), "trailing hyphen in {once:?}");
            assert!(!once.contains("--"), "double hyphen in {once:?}");
        }
    }
}
