use dom::{Node, attr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    TextLike,
    Select,
    SubmitButton,
    Other,
}

/// Classifies a listed form element. Returns `None` for nodes that are not
/// form controls at all.
pub fn control_kind(node: &Node) -> Option<ControlKind> {
    let name = node.name()?;

    if name.eq_ignore_ascii_case("textarea") {
        return Some(ControlKind::TextLike);
    }
    if name.eq_ignore_ascii_case("select") {
        return Some(ControlKind::Select);
    }
    if name.eq_ignore_ascii_case("button") {
        // missing type defaults to submit
        return Some(match type_attr(node) {
            None => ControlKind::SubmitButton,
            Some(t) if t.eq_ignore_ascii_case("submit") => ControlKind::SubmitButton,
            Some(_) => ControlKind::Other,
        });
    }
    if name.eq_ignore_ascii_case("input") {
        return Some(input_kind(type_attr(node)));
    }
    if name.eq_ignore_ascii_case("fieldset")
        || name.eq_ignore_ascii_case("output")
        || name.eq_ignore_ascii_case("object")
    {
        return Some(ControlKind::Other);
    }
    None
}

fn input_kind(ty: Option<&str>) -> ControlKind {
    const TEXT_LIKE: [&str; 12] = [
        "text",
        "search",
        "email",
        "url",
        "tel",
        "password",
        "number",
        "date",
        "datetime-local",
        "month",
        "week",
        "time",
    ];

    let Some(ty) = ty else {
        return ControlKind::TextLike; // missing type defaults to text
    };
    if ty.eq_ignore_ascii_case("submit") || ty.eq_ignore_ascii_case("image") {
        return ControlKind::SubmitButton;
    }
    if TEXT_LIKE.iter().any(|t| ty.eq_ignore_ascii_case(t)) {
        return ControlKind::TextLike;
    }
    ControlKind::Other
}

fn type_attr(node: &Node) -> Option<&str> {
    attr(node, "type").map(str::trim).filter(|s| !s.is_empty())
}
