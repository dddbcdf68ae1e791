//! Handle types for the scene object registry

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a [`SceneObject`](crate::scene::SceneObject) inside a [`Scene`](crate::scene::Scene)
    pub struct ObjectId;
}

/// Registry of scene objects addressed by [`ObjectId`]
pub type ObjectMap<T> = SlotMap<ObjectId, T>;

/// Unordered pair of object handles, smaller key stored first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectPair {
    /// First object of the pair
    pub a: ObjectId,
    /// Second object of the pair
    pub b: ObjectId,
}

impl ObjectPair {
    /// Create a pair; the argument order does not matter
    pub fn new(a: ObjectId, b: ObjectId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Whether `id` is one of the two members
    pub fn contains(&self, id: ObjectId) -> bool {
        self.a == id || self.b == id
    }
}
