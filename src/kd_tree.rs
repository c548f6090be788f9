use crate::error::{Error, Result};
use crate::point::Point;
use crate::point_cloud::PointCloud;

const NIL: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    axis: usize,
    split: f64,
    left: u32, // NIL if leaf
    right: u32,
    // Leaf data: index of the stored point
    point: u32,
}

/// Balanced kd-tree over a borrowed point cloud, answering exact
/// 1-nearest-neighbor queries; read-only once built
#[derive(Debug)]
pub struct KdTree<'a> {
    cloud: &'a PointCloud,
    dimension: usize,
    nodes: Vec<KdNode>,
    root: u32,
}

impl<'a> KdTree<'a> {
    pub fn build(cloud: &'a PointCloud) -> Result<Self> {
        let dimension = cloud.dimension().ok_or(Error::EmptyInput)?;
        for point in cloud.iter() {
            if point.dimension() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    found: point.dimension(),
                });
            }
        }

        let mut order: Vec<u32> = (0..cloud.len() as u32).collect();
        // One point per leaf, so the tree has exactly 2n - 1 nodes
        let mut nodes = Vec::with_capacity(2 * cloud.len() - 1);
        let root = split_range(cloud, &mut nodes, &mut order, 0, dimension);

        Ok(Self {
            cloud,
            dimension,
            nodes,
            root,
        })
    }

    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Index of the stored point closest to `point`, and its Euclidean
    /// distance; ties go to the lowest index.
    pub fn query_nearest(&self, point: &Point) -> Result<(usize, f64)> {
        if point.dimension() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                found: point.dimension(),
            });
        }

        let mut best_idx = usize::MAX;
        let mut best_d2 = f64::INFINITY;
        self.query_recursive(self.root, point, &mut best_idx, &mut best_d2);
        Ok((best_idx, best_d2.sqrt()))
    }

    fn query_recursive(&self, node_idx: u32, point: &Point, best_idx: &mut usize, best_d2: &mut f64) {
        let node = &self.nodes[node_idx as usize];

        if node.left == NIL {
            let idx = node.point as usize;
            let d2 = point.distance_squared(&self.cloud[idx]);
            if d2 < *best_d2 || (d2 == *best_d2 && idx < *best_idx) {
                *best_idx = idx;
                *best_d2 = d2;
            }
            return;
        }

        let diff = point.coord(node.axis) - node.split;

        // Visit the half-space containing the query point first
        let (near, far) = if diff <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.query_recursive(near, point, best_idx, best_d2);

        // `<=` keeps equidistant candidates beyond the plane reachable,
        // which the lowest-index tie break depends on
        if diff * diff <= *best_d2 {
            self.query_recursive(far, point, best_idx, best_d2);
        }
    }
}

fn split_range(
    cloud: &PointCloud,
    nodes: &mut Vec<KdNode>,
    ids: &mut [u32],
    depth: usize,
    dimension: usize,
) -> u32 {
    if ids.len() == 1 {
        let node_idx = nodes.len() as u32;
        nodes.push(KdNode {
            axis: 0,
            split: 0.0,
            left: NIL,
            right: NIL,
            point: ids[0],
        });
        return node_idx;
    }

    // Splitting axis cycles through the dimensions by depth
    let axis = depth % dimension;

    // Median split; points equal to the split value may land on either side
    let mid = ids.len() / 2;
    ids.select_nth_unstable_by(mid, |&a, &b| {
        let va = cloud[a as usize].coord(axis);
        let vb = cloud[b as usize].coord(axis);
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let split = cloud[ids[mid] as usize].coord(axis);

    let (lo, hi) = ids.split_at_mut(mid);
    let left = split_range(cloud, nodes, lo, depth + 1, dimension);
    let right = split_range(cloud, nodes, hi, depth + 1, dimension);

    let node_idx = nodes.len() as u32;
    nodes.push(KdNode {
        axis,
        split,
        left,
        right,
        point: NIL,
    });
    node_idx
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_cloud(rng: &mut StdRng, n: usize, dimension: usize) -> PointCloud {
        (0..n)
            .map(|_| Point::new((0..dimension).map(|_| rng.gen_range(-1.0..1.0)).collect()))
            .collect()
    }

    #[test]
    fn build_rejects_empty_cloud() {
        let cloud = PointCloud::new(vec![]);
        assert!(matches!(KdTree::build(&cloud), Err(Error::EmptyInput)));
    }

    #[test]
    fn build_rejects_mixed_dimensions() {
        let cloud = PointCloud::from_coords(vec![vec![0., 0.], vec![1., 2., 3.]]);
        assert_eq!(
            KdTree::build(&cloud).err(),
            Some(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn query_rejects_mismatched_point() {
        let cloud = PointCloud::from_coords(vec![vec![0., 0.], vec![1., 1.]]);
        let tree = KdTree::build(&cloud).unwrap();
        assert_eq!(
            tree.query_nearest(&Point::new(vec![0.])).err(),
            Some(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn single_point_cloud() {
        let cloud = PointCloud::from_coords(vec![vec![3., 4.]]);
        let tree = KdTree::build(&cloud).unwrap();
        let (idx, dist) = tree.query_nearest(&Point::new(vec![0., 0.])).unwrap();
        assert_eq!(idx, 0);
        assert!((dist - 5.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_points_return_lowest_index() {
        let cloud = PointCloud::from_coords(vec![vec![2., 2.]; 8]);
        let tree = KdTree::build(&cloud).unwrap();
        let (idx, dist) = tree.query_nearest(&Point::new(vec![0., 0.])).unwrap();
        assert_eq!(idx, 0);
        assert!((dist - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn equidistant_tie_across_split_goes_to_lowest_index() {
        // (1, 0) and (-1, 0) are exactly as far from the origin; the split
        // puts them in different subtrees
        let cloud = PointCloud::from_coords(vec![vec![1., 0.], vec![-1., 0.]]);
        let tree = KdTree::build(&cloud).unwrap();
        let (idx, dist) = tree.query_nearest(&Point::new(vec![0., 0.])).unwrap();
        assert_eq!(idx, 0);
        assert!((dist - 1.0).abs() < 1e-12);
    }

    #[test]
    fn agrees_with_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        for dimension in 1..=4 {
            let cloud = random_cloud(&mut rng, 64, dimension);
            let tree = KdTree::build(&cloud).unwrap();
            for _ in 0..32 {
                let query =
                    Point::new((0..dimension).map(|_| rng.gen_range(-1.5..1.5)).collect());
                let (idx, dist) = tree.query_nearest(&query).unwrap();
                let (scan_idx, scan_dist) = cloud.nearest_scan(&query).unwrap();
                assert_eq!(idx, scan_idx);
                assert!((dist - scan_dist).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn agrees_with_linear_scan_on_skewed_data() {
        // All points on one line, heavy duplication
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = PointCloud::from_coords((0..50).map(|i| vec![(i % 5) as f64, 0.]));
        let tree = KdTree::build(&cloud).unwrap();
        for _ in 0..20 {
            let query = Point::new(vec![rng.gen_range(-1.0..6.0), rng.gen_range(-1.0..1.0)]);
            let (idx, dist) = tree.query_nearest(&query).unwrap();
            let (scan_idx, scan_dist) = cloud.nearest_scan(&query).unwrap();
            assert_eq!(idx, scan_idx);
            assert!((dist - scan_dist).abs() < 1e-12);
        }
    }
}
