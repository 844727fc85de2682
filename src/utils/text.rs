/// Trimmed value, or `None` when nothing but whitespace was entered.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
