use nalgebra::{Point3, Vector3};

pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Arithmetic mean of a set of points, or `None` for an empty set.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::<f64>::zeros(), 0usize), |(sum, count), p| {
            (sum + p.coords, count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_euclidean() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((distance(&a, &b) - 5.0).abs() < EPS);
    }

    #[test]
    fn centroid_averages_points() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0)];
        let c = centroid(points.iter()).unwrap();
        assert!((c - Point3::new(1.0, 2.0, -3.0)).norm() < EPS);
    }

    #[test]
    fn centroid_of_empty_set_is_none() {
        let points: [Point3<f64>; 0] = [];
        assert!(centroid(points.iter()).is_none());
    }
}
