/// Shorten a text to the given `length` by replacing any additional characters with an ellipsis
/// character ("…").
#[askama::filter_fn]
pub fn ellipsis(value: &str, _: &dyn askama::Values, length: usize) -> askama::Result<String> {
    Ok(shorten_with_ellipsis(value, length))
}

fn shorten_with_ellipsis(value: &str, length: usize) -> String {
    if length > 0 && value.chars().count() > length {
        format!("{}…", value.chars().take(length - 1).collect::<String>())
    } else {
        value.to_owned()
    }
}
