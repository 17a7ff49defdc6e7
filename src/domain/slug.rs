//! URL slug normalization.

/// Normalizes free text into a slug: lowercase ASCII letters, digits and
/// single hyphens, with no leading or trailing hyphen.
///
/// Whitespace and hyphens become a separator; every other character is
/// dropped. The result may be empty when the input has no usable characters.
///
/// ```rust
/// use drakor::domain::slugify;
///
/// assert_eq!(slugify("  Sci-Fi & Fantasy "), "sci-fi-fantasy");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());

    for c in input.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if (c == '-' || c.is_whitespace()) && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Romance"), "romance");
        assert_eq!(slugify("Slice of Life"), "slice-of-life");
        assert_eq!(slugify("fantasy"), "fantasy");
    }

    #[test]
    fn test_slugify_collapses_and_trims_hyphens() {
        assert_eq!(slugify("--Thriller--"), "thriller");
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("Sci-Fi & Fantasy"), "sci-fi-fantasy");
    }

    #[test]
    fn test_slugify_drops_other_characters() {
        assert_eq!(slugify("K-Drama (2024)!"), "k-drama-2024");
        assert_eq!(slugify("Café"), "caf");
        assert_eq!(slugify("under_score"), "underscore");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["Historical Romance", "  Mystery / Crime ", "Action-Comedy"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }
}
