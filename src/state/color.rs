/// Directory color when it holds no contests at all.
pub const NEUTRAL_GRAY: &str = "#6e7681";

const LIGHTNESS_HIDDEN: f64 = 70.0;
const LIGHTNESS_SPAN: f64 = 40.0;
const LIGHTNESS_FLOOR: u8 = 30;

/// HSL lightness for a directory with `visible` of `total` contests shown.
/// Fully hidden is light gray (70%), fully visible darker gray, never below 30%.
pub fn visibility_lightness(visible: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let ratio = (visible as f64 / total as f64).min(1.0);
    let lightness = (LIGHTNESS_HIDDEN - (ratio * LIGHTNESS_SPAN).round()) as u8;
    Some(lightness.max(LIGHTNESS_FLOOR))
}

pub fn visibility_color(visible: usize, total: usize) -> String {
    match visibility_lightness(visible, total) {
        Some(l) => format!("hsl(0, 0%, {}%)", l),
        None => NEUTRAL_GRAY.to_string(),
    }
}
