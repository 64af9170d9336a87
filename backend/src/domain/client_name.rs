//! Client-name normalisation used when a guest confirms their identity.
//!
//! Normalisation lower-cases the input (simple Unicode lower-casing, no
//! locale rules) and removes every whitespace character and every comma.
//! All other punctuation is significant.

/// Return the comparison form of a client name.
///
/// # Examples
/// ```
/// use intake::domain::normalize_client_name;
///
/// assert_eq!(normalize_client_name("  ACME, Corp "), "acmecorp");
/// assert_ne!(normalize_client_name("Smith-John"), normalize_client_name("SmithJohn"));
/// ```
#[must_use]
pub fn normalize_client_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != ',')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two client names after normalisation.
#[must_use]
pub fn client_names_match(stored: &str, supplied: &str) -> bool {
    normalize_client_name(stored) == normalize_client_name(supplied)
}
