//! Text rendering for resolution diagnostics.
//!
//! Rust type names from [`std::any::type_name`] are fully qualified and
//! get noisy fast (`alloc::sync::Arc<dyn my_app::ports::Clock>`). These
//! helpers keep error messages readable.

/// Renders a resolution path, outermost type first.
///
/// # Examples
/// ```
/// use autowire_support::rendering::render_path;
///
/// let path = ["app::Server", "app::Router", "app::Handlers"];
/// assert_eq!(render_path(&path), "Server → Router → Handlers");
/// ```
pub fn render_path(path: &[impl AsRef<str>]) -> String {
    path.iter()
        .map(|name| shorten_type_name(name.as_ref()))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Drops module prefixes from every path segment of a type name.
///
/// ```
/// use autowire_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::Mailer"), "Mailer");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn my_app::ports::Clock>"),
///     "Arc<dyn Clock>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                result.push_str(&segment);
                result.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    result.push_str(&segment);
    result
}

/// Picks registered type names that look like the one requested.
///
/// Full-name containment ranks highest, then short-name containment, then
/// a shared prefix of at least three characters. At most `limit` names are
/// returned, best first.
pub fn suggest_similar(requested: &str, available: &[&str], limit: usize) -> Vec<String> {
    let requested_full = requested.to_lowercase();
    let requested_short = shorten_type_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter(|&&name| name != requested)
        .filter_map(|&name| {
            let full = name.to_lowercase();
            let short = shorten_type_name(name).to_lowercase();

            if full.contains(&requested_full) || requested_full.contains(&full) {
                return Some((name, 100));
            }

            if short.contains(&requested_short) || requested_short.contains(&short) {
                return Some((name, 80));
            }

            let common = short
                .chars()
                .zip(requested_short.chars())
                .take_while(|(a, b)| a == b)
                .count();

            (common >= 3).then_some((name, common * 10))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_shortened_and_joined() {
        let path = vec!["a::Outer", "b::c::Inner"];
        assert_eq!(render_path(&path), "Outer → Inner");
    }

    #[test]
    fn single_entry_path() {
        assert_eq!(render_path(&["Lonely"]), "Lonely");
    }

    #[test]
    fn empty_path() {
        let path: Vec<&str> = vec![];
        assert_eq!(render_path(&path), "");
    }

    #[test]
    fn shorten_plain_name() {
        assert_eq!(shorten_type_name("String"), "String");
    }

    #[test]
    fn shorten_nested_generics() {
        assert_eq!(
            shorten_type_name("core::option::Option<alloc::sync::Arc<app::Db>>"),
            "Option<Arc<Db>>"
        );
    }

    #[test]
    fn shorten_references_and_tuples() {
        assert_eq!(shorten_type_name("(&str, app::Id)"), "(&str, Id)");
    }

    #[test]
    fn suggestions_prefer_close_names() {
        let available = vec![
            "app::mail::Mailer",
            "app::mail::MailerConfig",
            "app::clock::Clock",
        ];

        let suggestions = suggest_similar("app::Mailr", &available, 2);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.contains("Mailer")));
    }

    #[test]
    fn suggestions_skip_the_requested_name() {
        let available = vec!["app::Clock"];
        assert!(suggest_similar("app::Clock", &available, 3).is_empty());
    }

    #[test]
    fn no_suggestions_for_unrelated_names() {
        let available = vec!["app::Database"];
        assert!(suggest_similar("Xyz", &available, 3).is_empty());
    }
}
