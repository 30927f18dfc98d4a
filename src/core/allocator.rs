use crate::utils::error::{FarmError, Result};

/// Minimum viable plot size in hectares.
pub const MIN_PLOT_AREA: f64 = 0.1;

/// Policy cap on plots per farm, to keep plots meaningfully sized.
pub const MAX_PLOT_COUNT: usize = 50;

/// Tolerance for one-decimal float arithmetic. Keeps sums like
/// 3.3 + 3.3 + 3.4 from flagging a false overage against 10.0.
const EPSILON: f64 = 1e-9;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn floor1(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}

/// Splits `total_area` hectares evenly across `plot_count` plots.
///
/// Every plot except the last gets the per-plot average rounded DOWN to one
/// decimal; the last plot absorbs the exact remainder (rounded to one
/// decimal), so the returned areas always sum back to the total. For 10 ha
/// over 3 plots this yields `[3.3, 3.3, 3.4]`.
///
/// The last plot is not exempt from the minimum size. Since the remainder is
/// always at least the per-plot average, the precondition
/// `total_area / plot_count >= 0.1` already rules out a sub-minimum last
/// plot; the explicit check below keeps that guarantee visible.
pub fn allocate_equal_areas(total_area: f64, plot_count: usize) -> Result<Vec<f64>> {
    if !total_area.is_finite() || total_area <= 0.0 {
        return Err(FarmError::InvalidAllocation {
            total_area,
            plot_count,
            reason: "Total area must be a positive number of hectares".to_string(),
        });
    }

    if plot_count == 0 || plot_count > MAX_PLOT_COUNT {
        return Err(FarmError::InvalidAllocation {
            total_area,
            plot_count,
            reason: format!("Plot count must be between 1 and {}", MAX_PLOT_COUNT),
        });
    }

    if total_area / plot_count as f64 + EPSILON < MIN_PLOT_AREA {
        return Err(FarmError::InvalidAllocation {
            total_area,
            plot_count,
            reason: format!(
                "Each plot would be below the minimum viable size of {} ha",
                MIN_PLOT_AREA
            ),
        });
    }

    // Single plot keeps the exact total, no rounding.
    if plot_count == 1 {
        return Ok(vec![total_area]);
    }

    let standard = floor1(total_area / plot_count as f64);
    let last = round1(total_area - standard * (plot_count - 1) as f64);

    if last + EPSILON < MIN_PLOT_AREA {
        return Err(FarmError::InvalidAllocation {
            total_area,
            plot_count,
            reason: format!("Remainder plot would fall below {} ha", MIN_PLOT_AREA),
        });
    }

    let mut areas = vec![standard; plot_count - 1];
    areas.push(last);
    Ok(areas)
}

/// Re-derives an equal split from scratch, discarding whatever custom areas
/// the caller had before. Same contract as [`allocate_equal_areas`]; pure,
/// so calling it twice with the same inputs gives the same answer.
pub fn redistribute_equally(total_area: f64, plot_count: usize) -> Result<Vec<f64>> {
    allocate_equal_areas(total_area, plot_count)
}

/// One proposed area that failed its bounds check.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaViolation {
    pub index: usize,
    pub value: f64,
}

/// Outcome of checking user-proposed areas against a farm total.
///
/// Collects every problem instead of stopping at the first, so a form can
/// highlight all offending entries at once. There is no partial success: the
/// plan is persistable only when `is_valid()` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub total_area: f64,
    pub allocated: f64,
    /// Indices whose areas are non-finite, below the minimum, or above the
    /// farm total.
    pub out_of_range: Vec<AreaViolation>,
    /// How far the sum exceeds the farm total, when it does.
    pub overage: Option<f64>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.out_of_range.is_empty() && self.overage.is_none()
    }

    /// Unassigned hectares. Only meaningful for a valid report;
    /// under-allocation is legal and surfaced to the user as this value.
    pub fn remaining(&self) -> f64 {
        round1(self.total_area - self.allocated)
    }

    /// Collapses the report into a fail-fast result for callers that cannot
    /// render a multi-issue form, keeping the error taxonomy typed.
    pub fn into_result(self) -> Result<f64> {
        if let Some(violation) = self.out_of_range.first() {
            return Err(FarmError::OutOfRangeArea {
                index: violation.index,
                value: violation.value,
                min: MIN_PLOT_AREA,
                max: self.total_area,
            });
        }
        if let Some(overage) = self.overage {
            return Err(FarmError::OverAllocation {
                total_area: self.total_area,
                allocated: self.allocated,
                overage,
            });
        }
        Ok(self.remaining())
    }
}

/// Checks user-proposed per-plot areas against the farm total.
///
/// Each area must be finite, at least [`MIN_PLOT_AREA`], and no larger than
/// the total; the sum must not exceed the total. Under-allocation passes and
/// shows up in `remaining()`. Pure, no I/O, never retries.
pub fn validate_allocation(proposed: &[f64], total_area: f64) -> ValidationReport {
    let mut out_of_range = Vec::new();
    for (index, &value) in proposed.iter().enumerate() {
        let in_range = value.is_finite()
            && value + EPSILON >= MIN_PLOT_AREA
            && value <= total_area + EPSILON;
        if !in_range {
            out_of_range.push(AreaViolation { index, value });
        }
    }

    let allocated: f64 = proposed.iter().filter(|v| v.is_finite()).sum();
    let overage = if allocated > total_area + EPSILON {
        Some(round1(allocated - total_area))
    } else {
        None
    };

    ValidationReport {
        total_area,
        allocated,
        out_of_range,
        overage,
    }
}
