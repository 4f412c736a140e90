use std::ops::Sub;

use teselace_core::{StateGrid, Topology};
use tinyvec::ArrayVec;

use super::ConstraintWatcher;

/// An integer vector in lattice coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector3 {
    /// First axis.
    pub x: i64,
    /// Second axis.
    pub y: i64,
    /// Third axis.
    pub z: i64,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Returns the cross product `self × other`.
    #[must_use]
    pub const fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the dot product.
    #[must_use]
    pub const fn dot(self, other: Self) -> i64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns `true` for the zero vector.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

impl From<[i64; 3]> for Vector3 {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// A plane `normal · p == constant` with an integer normal.
///
/// Membership is decided with exact integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plane {
    normal: Vector3,
    constant: i64,
}

impl Plane {
    /// Returns the plane through three points, or `None` if they are collinear.
    ///
    /// # Examples
    ///
    /// ```
    /// use teselace_coverer::constraint::{Plane, Vector3};
    ///
    /// let plane = Plane::through(
    ///     Vector3::new(0, 0, 0),
    ///     Vector3::new(1, 0, 0),
    ///     Vector3::new(0, 1, 0),
    /// )
    /// .unwrap();
    /// assert!(plane.contains(Vector3::new(5, 7, 0)));
    /// assert!(!plane.contains(Vector3::new(0, 0, 1)));
    ///
    /// assert!(Plane::through(
    ///     Vector3::new(0, 0, 0),
    ///     Vector3::new(1, 1, 1),
    ///     Vector3::new(2, 2, 2),
    /// )
    /// .is_none());
    /// ```
    #[must_use]
    pub fn through(p1: Vector3, p2: Vector3, p3: Vector3) -> Option<Self> {
        let normal = (p2 - p1).cross(p3 - p1);
        if normal.is_zero() {
            return None;
        }
        Some(Self {
            normal,
            constant: normal.dot(p1),
        })
    }

    /// Returns the normal vector.
    #[must_use]
    pub fn normal(self) -> Vector3 {
        self.normal
    }

    /// Returns `true` if `point` lies on the plane.
    #[must_use]
    pub fn contains(self, point: Vector3) -> bool {
        self.normal.dot(point) == self.constant
    }
}

/// Snapshot of a [`PlanarWatcher`].
///
/// Holds up to three non-collinear points of the block; the plane is fixed once
/// the third one is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanarState {
    points: ArrayVec<[Vector3; 3]>,
    plane: Option<Plane>,
}

impl PlanarState {
    /// Returns the points recorded so far.
    #[must_use]
    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    /// Returns the plane, once three non-collinear points are known.
    #[must_use]
    pub fn plane(&self) -> Option<Plane> {
        self.plane
    }
}

/// Keeps all positions of a block within one plane.
///
/// The first two positions are always accepted. A third position is accepted
/// only if it is not collinear with them, and it fixes the plane. Every later
/// position must lie on that plane.
///
/// # Examples
///
/// ```
/// use teselace_core::{PyramidPosition, PyramidTopology, StateGrid};
/// use teselace_coverer::constraint::{ConstraintWatcher as _, PlanarWatcher};
///
/// let pyramid = PyramidTopology::new(3)?;
/// let grid = StateGrid::new(pyramid);
/// let mut watcher = PlanarWatcher::new(&pyramid, PyramidPosition::new(0, 0, 0));
///
/// assert!(watcher.check_position(&grid, PyramidPosition::new(1, 0, 0)));
/// watcher.commit();
/// assert!(watcher.check_position(&grid, PyramidPosition::new(0, 1, 0)));
/// watcher.commit();
///
/// assert!(watcher.check_position(&grid, PyramidPosition::new(1, 1, 0)));
/// assert!(!watcher.check_position(&grid, PyramidPosition::new(0, 0, 1)));
/// # Ok::<(), teselace_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarWatcher<T: Topology> {
    topology: T,
    state: PlanarState,
    checkpoints: Vec<PlanarState>,
}

impl<T: Topology> PlanarWatcher<T> {
    /// Creates a watcher for a block starting at `start`, with one checkpoint.
    #[must_use]
    pub fn new(topology: &T, start: T::Position) -> Self {
        let mut state = PlanarState::default();
        state.points.push(topology.coordinates(start).into());
        Self {
            topology: topology.clone(),
            checkpoints: vec![state.clone()],
            state,
        }
    }

    /// Returns the current working state.
    #[must_use]
    pub fn state(&self) -> &PlanarState {
        &self.state
    }

    /// Returns the number of saved checkpoints.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    fn restore(&mut self) {
        if let Some(state) = self.checkpoints.last() {
            self.state.clone_from(state);
        }
    }
}

impl<T: Topology> ConstraintWatcher for PlanarWatcher<T> {
    type Topology = T;

    fn check_position(&mut self, _grid: &StateGrid<T>, pos: T::Position) -> bool {
        self.restore();
        let point = Vector3::from(self.topology.coordinates(pos));

        if let Some(plane) = self.state.plane {
            return plane.contains(point);
        }
        match self.state.points.as_slice() {
            [] | [_] => {
                self.state.points.push(point);
                true
            }
            &[p1, p2] => match Plane::through(p1, p2, point) {
                Some(plane) => {
                    self.state.points.push(point);
                    self.state.plane = Some(plane);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn commit(&mut self) {
        self.checkpoints.push(self.state.clone());
    }

    fn rollback_state(&mut self) {
        self.checkpoints.pop();
        self.restore();
    }
}
