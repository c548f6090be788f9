use std::iter::FromIterator;
use std::ops::Index;

use crate::error::{Error, Result};
use crate::point::Point;

/// An ordered, indexable collection of points; index position is a point's
/// identity within the cloud
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coords<I: IntoIterator<Item = Vec<f64>>>(coords: I) -> Self {
        coords.into_iter().map(Point::new).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimensionality of the first point, or `None` for an empty cloud
    pub fn dimension(&self) -> Option<usize> {
        self.points.first().map(|p| p.dimension())
    }

    pub fn get(&self, idx: usize) -> Option<&Point> {
        self.points.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Linear-scan nearest neighbor; ties go to the lowest index.
    /// The point's dimensionality must match the cloud's.
    pub fn nearest_scan(&self, point: &Point) -> Option<(usize, f64)> {
        let distances = self
            .points
            .iter()
            .enumerate()
            .map(|(idx, other)| (idx, point.distance_squared(other)));
        let closest =
            distances.min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        closest.map(|(idx, d)| (idx, d.sqrt()))
    }
}

impl Index<usize> for PointCloud {
    type Output = Point;

    fn index(&self, idx: usize) -> &Point {
        &self.points[idx]
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Checks that both clouds are non-empty and agree on dimensionality,
/// returning the common dimension.
pub(crate) fn matched_dimension(reference: &PointCloud, query: &PointCloud) -> Result<usize> {
    let expected = reference.dimension().ok_or(Error::EmptyInput)?;
    if query.is_empty() {
        return Err(Error::EmptyInput);
    }
    for point in reference.iter().chain(query.iter()) {
        if point.dimension() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: point.dimension(),
            });
        }
    }
    Ok(expected)
}
