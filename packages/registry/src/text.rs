//! Quoting helpers for human-readable diagnostics.

use std::borrow::Cow;

/// Wrap `string` in double quotes when it contains a space.
#[must_use]
pub fn quote_if_needed(string: &str) -> Cow<'_, str> {
    if string.contains(' ') {
        Cow::Owned(format!("\"{string}\""))
    } else {
        Cow::Borrowed(string)
    }
}

/// Join `items` with `joint`, quoting each item as needed.
#[must_use]
pub fn quoted_join<S: AsRef<str>>(items: &[S], joint: &str) -> String {
    items
        .iter()
        .map(|item| quote_if_needed(item.as_ref()))
        .collect::<Vec<_>>()
        .join(joint)
}

/// Render `items` as a prose list, e.g. `a, b and c`.
#[must_use]
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => quote_if_needed(only.as_ref()).into_owned(),
        [init @ .., last] => format!(
            "{} and {}",
            quoted_join(init, ", "),
            quote_if_needed(last.as_ref())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("plain"), "plain");
        assert_eq!(quote_if_needed("has space"), "\"has space\"");
        assert_eq!(quote_if_needed(""), "");
    }

    #[test]
    fn test_quoted_join() {
        assert_eq!(quoted_join(&["a", "b c", "d"], " "), "a \"b c\" d");
        assert_eq!(quoted_join::<&str>(&[], " "), "");
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list::<&str>(&[]), "");
        assert_eq!(quoted_list(&["solo"]), "solo");
        assert_eq!(quoted_list(&["one two"]), "\"one two\"");
        assert_eq!(quoted_list(&["a", "b"]), "a and b");
        assert_eq!(quoted_list(&["a", "b", "c d"]), "a, b and \"c d\"");
    }
}
