/// Rounds to 2 decimal places with ties away from zero, matching the
/// half-up convention the stored averages use.
pub(crate) fn round2_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
