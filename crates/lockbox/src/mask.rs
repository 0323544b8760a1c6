const VISIBLE_PREFIX: usize = 4;
const MASK_LEN: usize = 8;

/// Masks a token for display, keeping only its first few characters.
///
/// Tokens too short to reveal anything safely are fully masked.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(VISIBLE_PREFIX).collect();
    if token.chars().count() <= VISIBLE_PREFIX * 2 {
        "*".repeat(MASK_LEN)
    } else {
        format!("{visible}{}", "*".repeat(MASK_LEN))
    }
}
