//! Contact masking

const MASK_CHAR: char = '*';
const KEEP_EDGE: usize = 2;

/// Mask a contact string for viewers without a premium plan
///
/// Up to 4 characters become all `*`. Longer strings keep the first two and
/// last two characters and star everything between, so the output always
/// has the same character count as the input.
pub fn mask_contact(value: &str) -> String {
    let len = value.chars().count();
    if len <= KEEP_EDGE * 2 {
        return MASK_CHAR.to_string().repeat(len);
    }

    value
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < KEEP_EDGE || i >= len - KEEP_EDGE {
                c
            } else {
                MASK_CHAR
            }
        })
        .collect()
}
