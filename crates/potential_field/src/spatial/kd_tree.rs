//! K-d tree spatial partitioning structure
//!
//! Stores D-dimensional points in a binary tree that cycles through the
//! coordinate axes by depth: level `k` compares on axis `k mod D`. Points
//! are inserted at the first empty slot found by descending those
//! comparisons, so tree shape depends on insertion order. That is acceptable
//! here because repulsor sets are typically inserted once at setup and never
//! rebalanced or deleted.

use super::spatial_query::{DimensionMismatch, SpatialIndex};
use crate::foundation::math::{distance, Point};

/// Single node in the k-d tree, exclusively owning its children
#[derive(Debug, Clone)]
struct KdNode {
    point: Point,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

impl KdNode {
    fn new(point: Point) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }
}

/// K-d tree index over D-dimensional points
///
/// Supports insertion and "all points within radius r" retrieval. Range
/// queries prune a subtree whenever the query point is farther than the
/// query radius from the subtree's splitting hyperplane.
#[derive(Debug, Clone)]
pub struct KdTree {
    root: Option<Box<KdNode>>,
    dimensions: usize,
    len: usize,
}

impl KdTree {
    /// Create an empty tree fixed to the given dimensionality
    ///
    /// # Panics
    ///
    /// Panics if `dimensions` is zero.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        assert!(dimensions > 0, "k-d tree needs at least one dimension");
        Self {
            root: None,
            dimensions,
            len: 0,
        }
    }

    fn insert_below(slot: &mut Option<Box<KdNode>>, point: Point, depth: usize, dims: usize) {
        match slot {
            None => *slot = Some(Box::new(KdNode::new(point))),
            Some(node) => {
                let axis = depth % dims;
                if point[axis] < node.point[axis] {
                    Self::insert_below(&mut node.left, point, depth + 1, dims);
                } else {
                    Self::insert_below(&mut node.right, point, depth + 1, dims);
                }
            }
        }
    }

    fn collect_within<'a>(
        node: &'a KdNode,
        query: &Point,
        radius: f64,
        depth: usize,
        dims: usize,
        hits: &mut Vec<&'a Point>,
    ) {
        if distance(&node.point, query) <= radius {
            hits.push(&node.point);
        }

        let axis = depth % dims;
        let planar = query[axis] - node.point[axis];
        let (near, far) = if planar < 0.0 {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = near {
            Self::collect_within(child, query, radius, depth + 1, dims, hits);
        }
        // The far subtree lies entirely beyond the splitting hyperplane, so
        // it can only contain hits when the hyperplane itself is in range.
        if planar.abs() <= radius {
            if let Some(child) = far {
                Self::collect_within(child, query, radius, depth + 1, dims, hits);
            }
        }
    }
}

impl SpatialIndex for KdTree {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn insert(&mut self, point: Point) -> Result<(), DimensionMismatch> {
        DimensionMismatch::check(self.dimensions, &point)?;
        Self::insert_below(&mut self.root, point, 0, self.dimensions);
        self.len += 1;
        Ok(())
    }

    fn within_radius(&self, query: &Point, radius: f64) -> Vec<&Point> {
        let mut hits = Vec::new();
        if let Some(root) = &self.root {
            Self::collect_within(root, query, radius, 0, self.dimensions, &mut hits);
        }
        hits
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::point;
    use crate::spatial::BruteForce;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted_coords(hits: &[&Point]) -> Vec<Vec<f64>> {
        let mut coords: Vec<Vec<f64>> = hits.iter().map(|p| p.iter().copied().collect()).collect();
        coords.sort_by(|a, b| a.partial_cmp(b).unwrap());
        coords
    }

    #[test]
    fn test_empty_tree_returns_nothing() {
        let tree = KdTree::new(3);
        assert!(tree.is_empty());
        assert!(tree.within_radius(&point(&[0.0, 0.0, 0.0]), 100.0).is_empty());
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut tree = KdTree::new(2);
        assert!(tree.insert(point(&[1.0])).is_err());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_zero_radius_matches_exact_point_only() {
        let mut tree = KdTree::new(2);
        tree.insert(point(&[1.0, 2.0])).unwrap();
        tree.insert(point(&[1.5, 2.0])).unwrap();

        assert_eq!(tree.within_radius(&point(&[1.0, 2.0]), 0.0).len(), 1);
        assert!(tree.within_radius(&point(&[1.1, 2.0]), 0.0).is_empty());
        assert!(tree.within_radius(&point(&[1.0, 2.0]), -1.0).is_empty());
    }

    #[test]
    fn test_duplicate_points_are_all_returned() {
        let mut tree = KdTree::new(2);
        tree.insert(point(&[4.0, 4.0])).unwrap();
        tree.insert(point(&[4.0, 4.0])).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.within_radius(&point(&[4.0, 4.0]), 0.5).len(), 2);
    }

    #[test]
    fn test_range_query_matches_brute_force() {
        for seed in 0..4_u64 {
            for dims in [2_usize, 3] {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut tree = KdTree::new(dims);
                let mut oracle = BruteForce::new(dims);

                for _ in 0..200 {
                    let coords: Vec<f64> = (0..dims).map(|_| rng.gen_range(-10.0..10.0)).collect();
                    let p = Point::from_vec(coords);
                    tree.insert(p.clone()).unwrap();
                    oracle.insert(p).unwrap();
                }

                for radius in [0.5, 2.0, 8.0] {
                    let query_coords: Vec<f64> =
                        (0..dims).map(|_| rng.gen_range(-10.0..10.0)).collect();
                    let query = Point::from_vec(query_coords);

                    let tree_hits = sorted_coords(&tree.within_radius(&query, radius));
                    let oracle_hits = sorted_coords(&oracle.within_radius(&query, radius));
                    assert_eq!(tree_hits, oracle_hits, "seed {seed}, dims {dims}, radius {radius}");
                }
            }
        }
    }

    #[test]
    fn test_results_independent_of_insertion_order() {
        let points = [
            [3.0, 1.0],
            [-2.0, 4.0],
            [0.5, 0.5],
            [1.0, -3.0],
            [2.5, 2.5],
            [-1.0, -1.0],
        ];

        let mut forward = KdTree::new(2);
        for p in points {
            forward.insert(point(&p)).unwrap();
        }
        let mut backward = KdTree::new(2);
        for p in points.iter().rev() {
            backward.insert(point(p)).unwrap();
        }

        let query = point(&[0.0, 0.0]);
        assert_eq!(
            sorted_coords(&forward.within_radius(&query, 3.0)),
            sorted_coords(&backward.within_radius(&query, 3.0)),
        );
    }
}
