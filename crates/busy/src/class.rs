pub const BUSY_FORM_CLASS: &str = "busy-form";
pub const BUSY_LINK_CLASS: &str = "busy-link";

/// Joins the component class with the author's class list.
pub fn class_list(base: &str, author: Option<&str>) -> String {
    match author.map(str::trim).filter(|s| !s.is_empty()) {
        Some(author) => format!("{base} {author}"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_class_is_appended() {
        assert_eq!(class_list(BUSY_FORM_CLASS, Some("wide")), "busy-form wide");
        assert_eq!(class_list(BUSY_LINK_CLASS, Some("  ")), "busy-link");
        assert_eq!(class_list(BUSY_LINK_CLASS, None), "busy-link");
    }
}
