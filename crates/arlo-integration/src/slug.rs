//! Device name to object_id conversion

/// Turn a device name into a valid entity object_id.
///
/// Lowercases, maps every non-alphanumeric run to a single underscore and
/// trims underscores at the ends. Falls back to "device" for names with no
/// usable characters.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("device");
    }
    slug
}
