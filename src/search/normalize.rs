use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text into a lowercase, diacritic-free form for substring comparison.
///
/// Canonical decomposition (NFD), drop combining marks, recompose (NFC),
/// then locale-invariant lowercase. Whitespace-only input yields an empty
/// string. Pure and infallible, so "Electrónica" and "electronica" compare
/// equal.
pub fn normalize_for_search(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize_for_search("Electrónica"), "electronica");
        assert_eq!(normalize_for_search("electronica"), "electronica");
        assert_eq!(normalize_for_search("CAFÉ"), "cafe");
        assert_eq!(normalize_for_search("niño"), "nino");
    }

    #[test]
    fn blank_input_yields_empty() {
        assert_eq!(normalize_for_search(""), "");
        assert_eq!(normalize_for_search("   "), "");
        assert_eq!(normalize_for_search("\t\n"), "");
    }

    #[test]
    fn idempotent() {
        for s in ["Electrónica", "Ñandú", "déjà vu", "plain"] {
            let once = normalize_for_search(s);
            assert_eq!(normalize_for_search(&once), once);
        }
    }

    #[test]
    fn preserves_interior_whitespace() {
        assert_eq!(normalize_for_search("Música Clásica"), "musica clasica");
    }
}
