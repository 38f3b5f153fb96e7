use sha2::{Digest, Sha256};

const MAX_SLUG_LEN: usize = 100;
const EMPTY_SLUG: &str = "untitled";

/// Title-derived slug: lowercase ASCII alphanumerics joined by single hyphens,
/// at most 100 characters, `untitled` when nothing is left.
pub fn sanitize_filename(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// `{slug}.md`
pub fn slug_filename(title: &str) -> String {
    format!("{}.md", sanitize_filename(title))
}

/// `{slug}-{short_hash(url)}.md`, used when `{slug}.md` is already taken.
pub fn disambiguated_filename(title: &str, url: &str) -> String {
    format!("{}-{}.md", sanitize_filename(title), short_hash(url))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
