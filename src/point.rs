use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Point struct that holds an m-dimensional position
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Point {
    pub position: DVector<f64>,
}

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Point {
            position: DVector::from_vec(coords),
        }
    }

    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    pub fn coord(&self, axis: usize) -> f64 {
        self.position[axis]
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let d = self.distance_squared(other);
        d.sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        let d = &self.position - &other.position;
        d.magnitude_squared()
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point::new(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Point::new(coords.to_vec())
    }
}
