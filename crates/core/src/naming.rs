//! Participant name canonicalization.
//!
//! Display names are stored as entered; a normalized form enforces
//! case-insensitive uniqueness within one event.

/// Canonicalize a participant name for uniqueness checks.
///
/// Lowercases and trims surrounding whitespace. Interior whitespace is
/// preserved so "Anna Lena" and "Annalena" stay distinct.
///
/// # Examples
///
/// ```
/// use giftwheel_core::naming::normalize_name;
///
/// assert_eq!(normalize_name("  Alice "), "alice");
/// assert_eq!(normalize_name("Büşra"), "büşra");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_name("  Alice "), "alice");
    }

    #[test]
    fn preserves_interior_whitespace() {
        assert_eq!(normalize_name("Anna Lena"), "anna lena");
    }

    #[test]
    fn non_ascii_lowercase() {
        assert_eq!(normalize_name("ÖMER"), "ömer");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_name("   "), "");
    }
}
