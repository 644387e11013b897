//! Scene identifier validation.

use std::sync::LazyLock;

static IDENTIFIER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Valid identifier regex")
});

/// Hard keywords; none of them can name a class.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Whether `identifier` can serve as both a Python class name and a file stem.
///
/// Anything else is refused before touching the filesystem, which also keeps
/// path separators and `..` out of script and artifact paths. Reserved words
/// match the pattern but would make `class <identifier>(Scene)` a syntax error.
///
/// # Examples
///
/// ```
/// use explainer_render::is_valid_identifier;
///
/// assert!(is_valid_identifier("WhyIsTheSkyBlue"));
/// assert!(is_valid_identifier("run_3_Gradient"));
/// assert!(is_valid_identifier("Classy"));
/// assert!(!is_valid_identifier("3Body"));
/// assert!(!is_valid_identifier("../Escape"));
/// assert!(!is_valid_identifier(""));
/// assert!(!is_valid_identifier("class"));
/// assert!(!is_valid_identifier("None"));
/// ```
pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER.is_match(identifier) && !PYTHON_KEYWORDS.contains(&identifier)
}
