/// Drop every character outside Latin-1 (above U+00FF).
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) <= 0xFF).collect()
}

/// `report_<name>_<id>.txt`, with whitespace in the name replaced by `_`.
///
/// Path separators are replaced too, so the result is always a bare file name.
pub fn report_file_name(patient_name: &str, patient_id: &str) -> String {
    let safe = |value: &str| -> String {
        value
            .trim()
            .chars()
            .map(|c| {
                if c.is_whitespace() || matches!(c, '/' | '\\') {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    };
    format!(
        "report_{}_{}.txt",
        clean_text(&safe(patient_name)),
        clean_text(&safe(patient_id))
    )
}
