/// Prepares an employee link for the platform URL opener.
///
/// Blank input yields `None`. Anything not already starting with `http`
/// gets an `https://` prefix; the rest is passed through unvalidated.
pub fn normalize_link(raw: &str) -> Option<String> {
    let link = raw.trim();
    if link.is_empty() {
        return None;
    }
    if link.starts_with("http") {
        Some(link.to_string())
    } else {
        Some(format!("https://{link}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_secure_scheme_when_missing() {
        assert_eq!(
            normalize_link("www.linkedin.com/company/gmv/people").as_deref(),
            Some("https://www.linkedin.com/company/gmv/people")
        );
        assert_eq!(normalize_link("http://example.es").as_deref(), Some("http://example.es"));
        assert_eq!(normalize_link("  https://example.es ").as_deref(), Some("https://example.es"));
        assert_eq!(normalize_link("   "), None);
    }
}
