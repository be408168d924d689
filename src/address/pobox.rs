/// Recognize `PO BOX n` and `P O BOX n` and return the box number.
///
/// Punctuated spellings such as `P.O. Box` are not recognized.
pub fn detect(raw: &str) -> Option<String> {
    let mut tokens = raw.split(' ');
    let first = tokens.next()?;
    let second = tokens.next()?;

    let skip_spaces = if first.eq_ignore_ascii_case("PO") && second.eq_ignore_ascii_case("BOX") {
        2
    } else if first.eq_ignore_ascii_case("P") && second.eq_ignore_ascii_case("O") {
        3
    } else {
        return None;
    };

    let box_number = after_nth_space(raw, skip_spaces)?;
    if box_number.is_empty() {
        None
    } else {
        Some(box_number.to_string())
    }
}

/// the text following the `n`th space, if there are that many
fn after_nth_space(raw: &str, n: usize) -> Option<&str> {
    raw.match_indices(' ')
        .nth(n - 1)
        .map(|(idx, _)| &raw[idx + 1..])
}
