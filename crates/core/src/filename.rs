//! Output file naming.

/// Maximum number of slug characters taken from the title.
const SLUG_MAX_CHARS: usize = 20;

/// Derive the deck file name from its title.
///
/// Spaces become underscores and the result is cut to its first 20 characters,
/// giving `slides_<slug>.pptx`. Path separators are replaced too, so the name
/// always stays inside the output directory.
pub fn output_filename(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | '\0' => '_',
            other => other,
        })
        .take(SLUG_MAX_CHARS)
        .collect();

    format!("slides_{}.pptx", slug)
}
