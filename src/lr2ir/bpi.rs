use crate::lr2ir::models::ChartReference;

/// Lower bound of the BPI scale. Below-average results are clamped here, and
/// any computation that leaves the real line (log of a non-positive ratio,
/// fractional power of a negative number) is substituted with it.
pub const BPI_FLOOR: f64 = -15.0;

/// Minimum curve exponent. Callers clamp before invoking [`compute_bpi`];
/// the calculator itself passes the exponent through untouched.
pub const MIN_POW_COEF: f64 = 0.8;

/// Piecewise growth function used inside the BPI log-ratio formula.
///
/// Maps a score ratio `x` to a stretched scale value. The singularity at
/// `x == 1` (a perfect score) maps to the scale constant `m` instead of
/// dividing by zero.
pub fn pgf(x: f64, m: f64) -> f64 {
    if x == 1.0 {
        m
    } else {
        0.5 / (1.0 - x)
    }
}

/// Compute the BPI for one score against a chart's reference scores.
///
/// Formula source: https://bpi.poyashi.me (Bunkai Performance Index).
/// `average` and `top` are the chart's calibration anchors, `theoretical_max`
/// its scale constant. `pow_coef` must already be clamped to
/// [`MIN_POW_COEF`] by the caller; see [`ChartReference::pow_coef`].
///
/// The result is rounded to 2 decimal places. Below-average scores map to
/// the negative range and are clamped at [`BPI_FLOOR`]; degenerate inputs
/// that produce a non-finite value also map to [`BPI_FLOOR`].
pub fn compute_bpi(score: f64, average: f64, top: f64, theoretical_max: f64, pow_coef: f64) -> f64 {
    let m = theoretical_max;
    let s = pgf(score / m, m);
    let k = pgf(average / m, m);
    let z = pgf(top / m, m);
    let s_norm = s / k;
    let z_norm = z / k;

    let raw = if score >= average {
        100.0 * s_norm.ln().powf(pow_coef) / z_norm.ln().powf(pow_coef)
    } else {
        (-100.0 * s_norm.ln().abs().powf(pow_coef) / z_norm.ln().powf(pow_coef)).max(BPI_FLOOR)
    };

    if !raw.is_finite() {
        return BPI_FLOOR;
    }
    round2(raw)
}

/// BPI for an EX score against a course's reference, exponent clamped.
pub fn course_bpi(reference: &ChartReference, ex_score: u32) -> f64 {
    compute_bpi(
        ex_score as f64,
        reference.average_score,
        reference.top_score,
        reference.theoretical_score,
        reference.pow_coef(),
    )
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
