//! Chart Geometry Module
//! Axis ranges, categorical tick labels and pie slice outlines, independent of any backend.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Angular resolution of pie slice outlines, in radians.
const ARC_STEP: f64 = 0.05;

/// One pie slice: its share of the total and its outline in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub fraction: f64,
    pub outline: Vec<(i32, i32)>,
}

/// Geometry helpers shared by the chart renderers.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Y range covering all values and zero, padded 10% above the extremes.
    ///
    /// Empty or flat-zero input gives `0..1` so the mesh still draws.
    pub fn value_range(values: &[f64]) -> (f64, f64) {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min == 0.0 && max == 0.0 {
            return (0.0, 1.0);
        }
        let pad = (max - min) * 0.1;
        let low = if min < 0.0 { min - pad } else { 0.0 };
        let high = if max > 0.0 { max + pad } else { 0.0 };
        (low, high)
    }

    /// X range placing category `i` at `x = i` with half a slot of margin each side.
    pub fn category_range(count: usize) -> (f64, f64) {
        (-0.5, count.max(1) as f64 - 0.5)
    }

    /// Label for an x tick; only integral positions inside the category list get text.
    pub fn category_label(labels: &[String], x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }

    /// Slices for the positive values, starting at twelve o'clock and going clockwise.
    ///
    /// Non-positive values get no slice; a non-positive total gives no slices at all.
    pub fn pie_slices(values: &[f64], center: (i32, i32), radius: f64) -> Vec<PieSlice> {
        let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
        if total <= 0.0 || !total.is_finite() {
            return Vec::new();
        }

        let mut slices = Vec::new();
        let mut start = -FRAC_PI_2;
        for (index, &value) in values.iter().enumerate() {
            if value <= 0.0 {
                continue;
            }
            let fraction = value / total;
            let sweep = fraction * TAU;
            let steps = ((sweep / ARC_STEP).ceil() as usize).max(2);

            let mut outline = Vec::with_capacity(steps + 2);
            outline.push(center);
            for step in 0..=steps {
                let angle = start + sweep * step as f64 / steps as f64;
                outline.push((
                    center.0 + (radius * angle.cos()).round() as i32,
                    center.1 + (radius * angle.sin()).round() as i32,
                ));
            }

            slices.push(PieSlice {
                index,
                fraction,
                outline,
            });
            start += sweep;
        }
        slices
    }
}
