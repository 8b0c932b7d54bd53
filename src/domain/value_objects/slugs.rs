use rand::Rng;

pub const SLUG_SUFFIX_LEN: usize = 4;
pub const SLUG_MIN_LEN: usize = 3;
pub const SLUG_MAX_LEN: usize = 100;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Builds a URL slug from the page names plus a random 4-char suffix, e.g.
/// `ana-e-joao-x7k2`. Two-name page types join the names with `-e-`.
pub fn generate_slug(name1: &str, name2: Option<&str>) -> String {
    let mut slug = normalize_name(name1);

    if let Some(name2) = name2 {
        let normalized = normalize_name(name2);
        if !normalized.is_empty() {
            slug.push_str("-e-");
            slug.push_str(&normalized);
        }
    }

    slug.push('-');
    slug.push_str(&random_suffix());
    slug
}

/// Charset check applied to externally supplied slugs before any lookup.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Lowercases, folds the accents common in Portuguese names, and drops
/// everything outside `[a-z0-9]`.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(fold_accent)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SLUG_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_ALPHABET.len());
            SUFFIX_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn couple_slug_joins_names_with_connector() {
        let slug = generate_slug("Ana", Some("João"));

        assert!(slug.starts_with("ana-e-joao-"), "got {}", slug);
        assert_eq!(slug.len(), "ana-e-joao-".len() + SLUG_SUFFIX_LEN);
        assert!(is_valid_slug(&slug));
    }

    #[test]
    fn single_name_slug_has_no_connector() {
        let slug = generate_slug("Totó", None);

        assert!(slug.starts_with("toto-"), "got {}", slug);
        assert!(!slug.contains("-e-"));
    }

    #[test]
    fn normalization_strips_accents_spaces_and_punctuation() {
        let slug = generate_slug("María José", Some("Luiz & Cia."));
        assert!(slug.starts_with("mariajose-e-luizcia-"), "got {}", slug);
    }

    #[test]
    fn identical_names_yield_distinct_slugs() {
        let first = generate_slug("Ana", Some("João"));
        let second = generate_slug("Ana", Some("João"));

        assert_ne!(first, second);
    }

    #[test]
    fn suffix_uses_only_the_slug_alphabet() {
        for _ in 0..50 {
            let slug = generate_slug("a", None);
            let suffix = &slug[slug.rfind('-').unwrap() + 1..];
            assert_eq!(suffix.len(), SLUG_SUFFIX_LEN);
            assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn slug_charset_validation() {
        assert!(is_valid_slug("ana-e-joao-x7k2"));
        assert!(is_valid_slug("toto-1234"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Ana-e-Joao"));
        assert!(!is_valid_slug("ana joao"));
        assert!(!is_valid_slug("ana_joao"));
        assert!(!is_valid_slug("ana/../joao"));
    }
}
