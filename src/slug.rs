//! Slug derivation for public form URLs.

use rand::Rng;

const SUFFIX_LEN: usize = 6;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Derive a fresh slug for a form title, e.g. `customer-survey-x1k9q2`.
///
/// The random suffix keeps slugs for identical titles distinct; callers
/// still treat the slug column as unique and surface a conflict if the
/// same suffix is ever drawn twice for one base.
pub fn for_title(title: &str) -> String {
    let base = slugify(title);
    let base = if base.is_empty() { "form" } else { base.as_str() };
    format!("{base}-{}", random_suffix())
}

/// Lowercase a title and collapse every run of non-alphanumeric
/// characters into a single dash. Leading and trailing dashes are
/// dropped, as are characters outside ASCII.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect()
}
