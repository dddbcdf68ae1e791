//! Axis-aligned bounding-box collision detection
//!
//! Each object's bounding corners are taken into world space and wrapped in
//! an [`Aabb`]. Two boxes collide when they overlap on all three axes after
//! padding by a fixed margin. Results for a whole tick are collected into a
//! [`CollisionSet`] instead of being written back into the objects.

use std::collections::HashSet;

use crate::foundation::collections::{ObjectId, ObjectPair};
use crate::foundation::math::Vec3;
use crate::scene::SceneObject;

/// Default padding, in world units, added to every axis of the overlap test
pub const DEFAULT_MARGIN: f32 = 0.5;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for point in rest {
            aabb.min = aabb.min.inf(point);
            aabb.max = aabb.max.sup(point);
        }
        Some(aabb)
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size on every axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test with `margin` of slack on every axis
    ///
    /// Per axis: `self.max + margin >= other.min` and
    /// `other.max + margin >= self.min`. Symmetric in its arguments.
    pub fn overlaps(&self, other: &Aabb, margin: f32) -> bool {
        (0..3).all(|axis| {
            self.max[axis] + margin >= other.min[axis] && other.max[axis] + margin >= self.min[axis]
        })
    }
}

/// Overlapping pairs found in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionSet {
    pairs: HashSet<ObjectPair>,
    colliding: HashSet<ObjectId>,
}

impl CollisionSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an overlapping pair
    pub fn insert(&mut self, a: ObjectId, b: ObjectId) {
        self.pairs.insert(ObjectPair::new(a, b));
        self.colliding.insert(a);
        self.colliding.insert(b);
    }

    /// Whether `id` overlaps at least one other object
    pub fn is_colliding(&self, id: ObjectId) -> bool {
        self.colliding.contains(&id)
    }

    /// Whether `a` and `b` overlap each other
    pub fn contains_pair(&self, a: ObjectId, b: ObjectId) -> bool {
        self.pairs.contains(&ObjectPair::new(a, b))
    }

    /// All overlapping pairs
    pub fn pairs(&self) -> impl Iterator<Item = &ObjectPair> {
        self.pairs.iter()
    }

    /// Number of overlapping pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing overlaps
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pairwise AABB overlap detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetector {
    /// Padding on every axis, in world units
    pub margin: f32,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN)
    }
}

impl CollisionDetector {
    /// Create a detector with the given margin
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    /// Whether the world-space boxes of `a` and `b` overlap
    pub fn overlaps(&self, a: &SceneObject, b: &SceneObject) -> bool {
        a.world_aabb().overlaps(&b.world_aabb(), self.margin)
    }

    /// Test every unordered pair once and collect the overlaps
    ///
    /// Every object passed in takes part; one with an empty mesh counts as a
    /// point at its position. [`Scene::tick`](crate::scene::Scene::tick)
    /// leaves such objects out.
    pub fn detect_all<'a, I>(&self, objects: I) -> CollisionSet
    where
        I: IntoIterator<Item = (ObjectId, &'a SceneObject)>,
    {
        let boxes: Vec<(ObjectId, Aabb)> = objects
            .into_iter()
            .map(|(id, object)| (id, object.world_aabb()))
            .collect();

        let mut set = CollisionSet::new();
        for (i, (id_a, box_a)) in boxes.iter().enumerate() {
            for (id_b, box_b) in &boxes[i + 1..] {
                if box_a.overlaps(box_b, self.margin) {
                    set.insert(*id_a, *id_b);
                }
            }
        }

        if !set.is_empty() {
            log::debug!("{} overlapping pair(s) this tick", set.len());
        }
        set
    }
}
