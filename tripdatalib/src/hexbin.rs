//! Hexagonal binning of geographic points.
//!
//! Points (lat/lon) are projected into a local meter-scale plane around their
//! centroid, bucketed into pointy-top hexagonal cells of a fixed circumradius,
//! and returned with per-cell counts and corner geometry ready for drawing.
//! The equirectangular approximation is fine at city scale; the dashboard bins
//! within a ~50 km window.

use std::collections::BTreeMap;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// One hexagonal cell with its pickup count.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// Cell center as (lat, lon)
    pub center: (f64, f64),
    /// The six cell corners as (lat, lon), counter-clockwise
    pub corners: [(f64, f64); 6],
    /// Number of points that fell into this cell
    pub count: u32,
}

/// Aggregation result: all non-empty cells plus the densest cell's count,
/// used to scale the color ramp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexLayer {
    pub cells: Vec<HexCell>,
    pub max_count: u32,
}

impl HexLayer {
    /// Total number of points across all cells.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).sum()
    }
}

/// Bucket `points` (as (lat, lon) pairs) into hexagonal cells with the given
/// circumradius in meters. Every input point lands in exactly one cell, so the
/// layer's total count equals the input length.
///
/// Returns an empty layer for an empty input or a non-positive radius.
///
/// # Example
/// ```
/// use tripdatalib::hexbin;
///
/// let points = [(40.7690, -73.9549), (40.7691, -73.9549)];
/// let layer = hexbin::aggregate(&points, 100.0);
///
/// assert_eq!(layer.cells.len(), 1);
/// assert_eq!(layer.max_count, 2);
/// ```
#[must_use]
pub fn aggregate(points: &[(f64, f64)], radius_m: f64) -> HexLayer {
    if points.is_empty() || radius_m.is_nan() || radius_m <= 0.0 {
        return HexLayer::default();
    }

    // Local plane origin: centroid of the input
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(la, lo), p| (la + p.0, lo + p.1));
    let origin = (lat_sum / n, lon_sum / n);

    let meters_per_deg_lat = METERS_PER_DEGREE;
    let meters_per_deg_lon = METERS_PER_DEGREE * origin.0.to_radians().cos();

    // Count points per axial cell coordinate. BTreeMap keeps the output
    // deterministic regardless of input order.
    let mut counts: BTreeMap<(i64, i64), u32> = BTreeMap::new();
    for &(lat, lon) in points {
        let x = (lon - origin.1) * meters_per_deg_lon;
        let y = (lat - origin.0) * meters_per_deg_lat;
        *counts.entry(nearest_cell(x, y, radius_m)).or_insert(0) += 1;
    }

    let mut max_count = 0;
    let cells = counts
        .into_iter()
        .map(|((q, r), count)| {
            max_count = max_count.max(count);

            #[allow(clippy::cast_precision_loss)]
            let (q, r) = (q as f64, r as f64);
            let cx = radius_m * SQRT_3 * (q + r / 2.0);
            let cy = radius_m * 1.5 * r;

            let to_lat_lon = |x: f64, y: f64| {
                (
                    origin.0 + y / meters_per_deg_lat,
                    origin.1 + x / meters_per_deg_lon,
                )
            };

            let mut corners = [(0.0, 0.0); 6];
            for (i, corner) in corners.iter_mut().enumerate() {
                // Pointy-top hexagon: corners at 60deg * i - 30deg
                #[allow(clippy::cast_precision_loss)]
                let angle = (60.0 * i as f64 - 30.0).to_radians();
                *corner = to_lat_lon(cx + radius_m * angle.cos(), cy + radius_m * angle.sin());
            }

            HexCell {
                center: to_lat_lon(cx, cy),
                corners,
                count,
            }
        })
        .collect();

    HexLayer { cells, max_count }
}

/// Axial coordinates of the pointy-top hex cell containing local point (x, y).
fn nearest_cell(x: f64, y: f64, radius_m: f64) -> (i64, i64) {
    let q = (SQRT_3 / 3.0 * x - y / 3.0) / radius_m;
    let r = (2.0 / 3.0 * y) / radius_m;
    cube_round(q, r)
}

/// Round fractional cube coordinates to the containing cell, fixing up the
/// component with the largest rounding error so x + y + z stays zero.
#[allow(clippy::cast_possible_truncation)]
fn cube_round(q: f64, r: f64) -> (i64, i64) {
    let (x, z) = (q, r);
    let y = -x - z;

    let mut rx = x.round();
    let ry = y.round();
    let mut rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy <= dz {
        rz = -rx - ry;
    }

    (rx as i64, rz as i64)
}
