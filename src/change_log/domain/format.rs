//! Rendering of change fragments into one log sentence.

/// Joins change fragments into a readable sentence.
///
/// No fragments yield an empty string, one is returned as-is, two are
/// joined with `and`, and longer lists are comma-separated with an Oxford
/// comma before the final `and`.
///
/// # Examples
///
/// ```rust
/// use taskboard::change_log::domain::format_change_details;
///
/// let details = format_change_details(&["A", "B", "C"]);
/// assert_eq!(details, "A, B, and C");
/// ```
#[must_use]
pub fn format_change_details<S: AsRef<str>>(changes: &[S]) -> String {
    match changes {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::<str>::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}
