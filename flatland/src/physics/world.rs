use core::fmt;
use core::ops::AddAssign;
use core::time::Duration;
use std::time::Instant;

use arcstr::ArcStr;
use hashbrown::HashMap as HbHashMap;
use manyfmt::Refmt as _;

use crate::math::{Aab, Axis};
use crate::physics::{
    Body, BodyStepInfo, Collider, ColliderShape, DetachedColliderError, ExtentError,
    PhysicsConfig, PushOut, StepContext, collider_overlap, collider_push_out,
};
use crate::time::Tick;
use crate::util::{ConciseDebug, ErrorChain};

/// Number of single-ulp corrections attempted when writing a push-out back to a body whose
/// collider is offset from it.
const MAX_WRITE_BACK_NUDGES: usize = 8;

// -------------------------------------------------------------------------------------------------

/// Identifies a [`Body`] in a [`PhysicsWorld`].
///
/// Handles are never reused within one world, so a handle to a removed body stays invalid.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BodyHandle(usize);

/// Identifies a [`Collider`] in a [`PhysicsWorld`].
///
/// Handles are never reused within one world, so a handle to a removed collider stays
/// invalid.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ColliderHandle(usize);

impl BodyHandle {
    /// Returns the index of this handle, which counts bodies in order of insertion.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl ColliderHandle {
    /// Returns the index of this handle, which counts colliders in order of insertion.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for BodyHandle {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyHandle({})", self.0)
    }
}
impl fmt::Display for BodyHandle {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body #{}", self.0)
    }
}
impl fmt::Debug for ColliderHandle {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColliderHandle({})", self.0)
    }
}
impl fmt::Display for ColliderHandle {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider #{}", self.0)
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct BodyEntry {
    name: ArcStr,
    body: Body,
}

/// A collection of [`Body`]s and [`Collider`]s which interact with each other.
///
/// Bodies are registered under unique names; colliders are attached to bodies by handle.
/// Iteration over bodies, and the order in which pairs are resolved in
/// [`step()`](Self::step), is the order in which the bodies were inserted.
#[derive(Clone)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Vec<Option<BodyEntry>>,
    colliders: Vec<Option<Collider>>,
    names: HbHashMap<ArcStr, BodyHandle>,
}

impl PhysicsWorld {
    /// Creates an empty world with the given configuration.
    #[inline]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            colliders: Vec::new(),
            names: HbHashMap::new(),
        }
    }

    /// Returns the configuration of this world.
    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replaces the configuration of this world.
    #[inline]
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
    }

    // ---------------------------------------------------------------------------------------------
    // Bodies

    /// Adds a body to the world under the given name, and returns its handle.
    ///
    /// If the name is already taken, `"1"` is appended to it until it is not; use
    /// [`body_name()`](Self::body_name) to find out the name actually assigned.
    ///
    /// Any collider handle the body carries from elsewhere is discarded; use
    /// [`attach()`](Self::attach) to give it a collider in this world.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn insert_body(&mut self, name: impl Into<ArcStr>, mut body: Body) -> BodyHandle {
        let name = self.unique_name(name.into());
        let handle = BodyHandle(self.bodies.len());
        body.collider = None;
        self.names.insert(name.clone(), handle);
        self.bodies.push(Some(BodyEntry { name, body }));
        handle
    }

    fn unique_name(&self, mut name: ArcStr) -> ArcStr {
        while self.names.contains_key(&name) {
            name = arcstr::format!("{name}1");
        }
        name
    }

    /// Removes a body from the world, detaching its collider (which remains in the world),
    /// and frees its name for reuse.
    ///
    /// Returns [`None`] if the handle does not refer to a live body.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let BodyEntry { name, mut body } = self.bodies.get_mut(handle.0)?.take()?;
        self.names.remove(&name);
        if let Some(collider) = body.collider.take()
            && let Some(Some(collider)) = self.colliders.get_mut(collider.0)
        {
            collider.attached_body = None;
        }
        log::debug!("removed {handle} {name:?}");
        Some(body)
    }

    /// Returns the body with the given handle, if it is live.
    #[inline]
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        Some(&self.bodies.get(handle.0)?.as_ref()?.body)
    }

    /// Returns the body with the given handle, if it is live, for modification.
    #[inline]
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        Some(&mut self.bodies.get_mut(handle.0)?.as_mut()?.body)
    }

    /// Returns the name under which the body was registered.
    #[inline]
    pub fn body_name(&self, handle: BodyHandle) -> Option<&ArcStr> {
        Some(&self.bodies.get(handle.0)?.as_ref()?.name)
    }

    /// Looks up a body by its registered name.
    #[inline]
    pub fn body_by_name(&self, name: &str) -> Option<BodyHandle> {
        self.names.get(name).copied()
    }

    /// Returns the number of live bodies.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.names.len()
    }

    /// Iterates over all live bodies, in insertion order.
    #[inline]
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &ArcStr, &Body)> + '_ {
        self.bodies.iter().enumerate().filter_map(|(index, entry)| {
            let entry = entry.as_ref()?;
            Some((BodyHandle(index), &entry.name, &entry.body))
        })
    }

    // ---------------------------------------------------------------------------------------------
    // Colliders

    /// Adds a collider to the world, unattached, and returns its handle.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn insert_collider(&mut self, mut collider: Collider) -> ColliderHandle {
        collider.attached_body = None;
        let handle = ColliderHandle(self.colliders.len());
        self.colliders.push(Some(collider));
        handle
    }

    /// Removes a collider from the world, first detaching it from its body.
    ///
    /// Returns [`None`] if the handle does not refer to a live collider.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.detach_collider(handle).ok()?;
        self.colliders.get_mut(handle.0)?.take()
    }

    /// Returns the collider with the given handle, if it is live.
    #[inline]
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)?.as_ref()
    }

    /// Returns the collider with the given handle, if it is live, for modification.
    #[inline]
    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle.0)?.as_mut()
    }

    /// Attaches `collider` to `body`.
    ///
    /// Any collider previously attached to `body`, and any body `collider` was previously
    /// attached to, is detached first, so that both sides of every link always agree.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn attach(
        &mut self,
        body: BodyHandle,
        collider: ColliderHandle,
    ) -> Result<(), AttachError> {
        if self.body(body).is_none() {
            return Err(AttachError::NoSuchBody(body));
        }
        if self.collider(collider).is_none() {
            return Err(AttachError::NoSuchCollider(collider));
        }
        self.detach_body_collider(body)?;
        self.detach_collider(collider)?;

        if let Some(entry) = self.bodies[body.0].as_mut() {
            entry.body.collider = Some(collider);
        }
        if let Some(c) = self.colliders[collider.0].as_mut() {
            c.attached_body = Some(body);
        }
        Ok(())
    }

    /// Detaches `collider` from whatever body it is attached to, and returns that body.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn detach_collider(
        &mut self,
        collider: ColliderHandle,
    ) -> Result<Option<BodyHandle>, AttachError> {
        let c = self
            .collider_mut(collider)
            .ok_or(AttachError::NoSuchCollider(collider))?;
        let previous = c.attached_body.take();
        if let Some(body) = previous.and_then(|b| self.body_mut(b)) {
            body.collider = None;
        }
        Ok(previous)
    }

    /// Detaches whatever collider is attached to `body`, and returns that collider.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn detach_body_collider(
        &mut self,
        body: BodyHandle,
    ) -> Result<Option<ColliderHandle>, AttachError> {
        let b = self.body_mut(body).ok_or(AttachError::NoSuchBody(body))?;
        let previous = b.collider.take();
        if let Some(collider) = previous.and_then(|c| self.collider_mut(c)) {
            collider.attached_body = None;
        }
        Ok(previous)
    }

    /// Computes the current bounding sides of a collider from the body it is attached to.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn collider_sides(&self, handle: ColliderHandle) -> Result<Aab, ExtentError> {
        let detached = DetachedColliderError {
            collider: Some(handle),
        };
        let collider = self.collider(handle).ok_or(detached)?;
        let body = collider
            .attached_body
            .and_then(|b| self.body(b))
            .ok_or(detached)?;
        collider.bounding_sides(Some(body))
    }

    // ---------------------------------------------------------------------------------------------
    // Simulation

    /// Integrates a single body. See [`Body::integrate()`].
    #[inline]
    pub fn integrate_body(
        &mut self,
        handle: BodyHandle,
        context: &StepContext,
    ) -> Result<BodyStepInfo, DetachedBodyError> {
        let body = self
            .body_mut(handle)
            .ok_or(DetachedBodyError { body: handle })?;
        Ok(body.integrate(context))
    }

    /// If the colliders of `mover` and `obstacle` overlap, pushes `mover` out of `obstacle`
    /// and returns how; otherwise returns `Ok(None)`.
    ///
    /// `obstacle` is treated as immovable for this call, whether or not it is static.
    /// The new position is written to `mover` immediately, replacing its offset.
    /// Fails if `mover` is static, or if either body is not simulated.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn resolve_pair(
        &mut self,
        mover: BodyHandle,
        obstacle: BodyHandle,
    ) -> Result<Option<PushOut>, PairError> {
        let mover_body = self
            .body(mover)
            .ok_or(DetachedBodyError { body: mover })?;
        let obstacle_body = self
            .body(obstacle)
            .ok_or(DetachedBodyError { body: obstacle })?;
        if mover_body.is_static {
            return Err(StaticPairError { mover, obstacle }.into());
        }
        for (body, handle) in [(mover_body, mover), (obstacle_body, obstacle)] {
            if !body.is_simulated {
                return Err(PairError::NotSimulated { body: handle });
            }
        }

        let mover_collider_handle = mover_body
            .collider
            .ok_or(PairError::NoCollider { body: mover })?;
        let obstacle_collider_handle = obstacle_body
            .collider
            .ok_or(PairError::NoCollider { body: obstacle })?;
        let (Some(mover_collider), Some(obstacle_collider)) = (
            self.collider(mover_collider_handle),
            self.collider(obstacle_collider_handle),
        ) else {
            // Links are maintained together with removal, so this is unreachable.
            return Err(PairError::NoCollider { body: mover });
        };

        let mover_sides = mover_collider
            .bounding_sides(Some(mover_body))
            .map_err(|source| PairError::Extent {
                body: mover,
                source,
            })?;
        let obstacle_sides = obstacle_collider
            .bounding_sides(Some(obstacle_body))
            .map_err(|source| PairError::Extent {
                body: obstacle,
                source,
            })?;

        if !collider_overlap(
            mover_collider.shape,
            &mover_sides,
            obstacle_collider.shape,
            &obstacle_sides,
        ) {
            return Ok(None);
        }

        let push_out = collider_push_out(
            obstacle_collider.shape,
            obstacle_sides,
            mover_collider.shape,
            mover_sides,
            mover_body.velocity,
        );

        let mover_collider = mover_collider.clone();
        let obstacle_shape = obstacle_collider.shape;
        let Some(mover_body) = self.body_mut(mover) else {
            return Err(DetachedBodyError { body: mover }.into());
        };
        write_back(
            mover_body,
            &mover_collider,
            push_out,
            mover_sides,
            obstacle_shape,
            &obstacle_sides,
        );

        log::trace!(
            target: "flatland::physics::collision",
            "pushed {mover} out of {obstacle} to {:?} by {:?}",
            push_out.position.refmt(&ConciseDebug),
            push_out.method,
        );
        Ok(Some(push_out))
    }

    /// Advances time for every body in the world.
    ///
    /// 1. Every dynamic body is [integrated](Body::integrate).
    /// 2. For every ordered pair of distinct bodies in which the first is dynamic, the
    ///    second is simulated, and both have colliders, the pair is
    ///    [resolved](Self::resolve_pair) and `on_collision` is called if the first body was
    ///    pushed out. Static pairs are never visited.
    /// 3. Step 2 is repeated up to [`PhysicsConfig::relaxation_passes`] times in total,
    ///    stopping early after a pass that moved nothing.
    ///
    /// A failure involving one pair (for example, a body with a NaN size) is logged and
    /// counted in [`StepInfo::errors`], and the remaining pairs are still processed.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn step<CC>(&mut self, tick: Tick, mut on_collision: CC) -> StepInfo
    where
        CC: FnMut(CollisionEvent),
    {
        let start_time = Instant::now();
        let context = self.config.context(tick);
        let mut info = StepInfo::default();

        for entry in self.bodies.iter_mut().flatten() {
            if entry.body.integrate(&context).integrated {
                info.bodies_integrated += 1;
            }
        }

        let handles: Vec<BodyHandle> = self.bodies().map(|(handle, _, _)| handle).collect();
        for _ in 0..self.config.relaxation_passes.get() {
            info.passes += 1;
            let mut moved_any = false;
            for &mover in &handles {
                if !self.body(mover).is_some_and(|b| b.is_dynamic() && b.collider.is_some()) {
                    continue;
                }
                for &obstacle in &handles {
                    if obstacle == mover
                        || !self
                            .body(obstacle)
                            .is_some_and(|b| b.is_simulated && b.collider.is_some())
                    {
                        continue;
                    }
                    info.pairs_tested += 1;

                    let before = self.body(mover).map(Body::effective_position);
                    match self.resolve_pair(mover, obstacle) {
                        Ok(None) => {}
                        Ok(Some(push_out)) => {
                            info.overlaps += 1;
                            if before != self.body(mover).map(Body::effective_position) {
                                info.moved += 1;
                                moved_any = true;
                            }
                            on_collision(CollisionEvent {
                                mover,
                                obstacle,
                                push_out,
                            });
                        }
                        Err(error) => {
                            info.errors += 1;
                            log::error!(
                                "collision between {mover} and {obstacle} failed: {}",
                                ErrorChain(&error)
                            );
                        }
                    }
                }
            }
            if !moved_any {
                break;
            }
        }

        info.computation_time = Instant::now().saturating_duration_since(start_time);
        info
    }
}

/// Moves `body` so that its collider's bottom-left corner is at `push_out.position`.
///
/// When the collider has an offset, `position - offset + offset` may round differently from
/// `position`, so the result is checked and nudged one ulp at a time in the direction of the
/// push until the collider no longer overlaps the obstacle.
fn write_back(
    body: &mut Body,
    collider: &Collider,
    push_out: PushOut,
    original_sides: Aab,
    obstacle_shape: ColliderShape,
    obstacle_sides: &Aab,
) {
    let direction = push_out.displacement_from(original_sides.lower_bounds_p());
    let mut position = push_out.position - collider.local_offset;
    body.set_effective_position(position);

    for _ in 0..MAX_WRITE_BACK_NUDGES {
        let still_overlapping = match collider.bounding_sides(Some(body)) {
            Ok(sides) => collider_overlap(collider.shape, &sides, obstacle_shape, obstacle_sides),
            Err(_) => false,
        };
        if !still_overlapping {
            return;
        }
        for axis in Axis::ALL {
            if direction[axis] > 0.0 {
                position[axis] = position[axis].next_up();
            } else if direction[axis] < 0.0 {
                position[axis] = position[axis].next_down();
            }
        }
        body.set_effective_position(position);
    }
    log::debug!(
        "body at {:?} still overlaps {obstacle_sides:?} after push-out write-back",
        position.refmt(&ConciseDebug),
    );
}

impl fmt::Debug for PhysicsWorld {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            config,
            bodies,
            colliders,
            names: _,
        } = self;
        f.debug_struct("PhysicsWorld")
            .field("config", config)
            .field(
                "bodies",
                &bodies
                    .iter()
                    .flatten()
                    .map(|entry| (&entry.name, &entry.body))
                    .collect::<Vec<_>>(),
            )
            .field("colliders", &colliders.iter().flatten().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for PhysicsWorld {
    #[inline]
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

// -------------------------------------------------------------------------------------------------

/// Notification passed to the callback of [`PhysicsWorld::step()`] each time a body is
/// pushed out of another.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct CollisionEvent {
    /// The body that was moved.
    pub mover: BodyHandle,
    /// The body it was pushed out of.
    pub obstacle: BodyHandle,
    /// Where `mover`'s collider was placed, and why.
    pub push_out: PushOut,
}

/// Performance and outcome data about one or more [`PhysicsWorld::step()`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct StepInfo {
    /// Number of bodies that were integrated.
    pub bodies_integrated: usize,
    /// Number of collision passes run.
    pub passes: usize,
    /// Number of ordered body pairs examined.
    pub pairs_tested: usize,
    /// Number of pairs found overlapping.
    pub overlaps: usize,
    /// Number of push-outs that changed a body's position.
    pub moved: usize,
    /// Number of pairs that could not be processed.
    pub errors: usize,
    /// Time spent in the step.
    pub computation_time: Duration,
}

impl AddAssign for StepInfo {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Self {
            bodies_integrated: self.bodies_integrated + rhs.bodies_integrated,
            passes: self.passes + rhs.passes,
            pairs_tested: self.pairs_tested + rhs.pairs_tested,
            overlaps: self.overlaps + rhs.overlaps,
            moved: self.moved + rhs.moved,
            errors: self.errors + rhs.errors,
            computation_time: self.computation_time + rhs.computation_time,
        };
    }
}

impl fmt::Display for StepInfo {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            bodies_integrated,
            passes,
            pairs_tested,
            overlaps,
            moved,
            errors,
            computation_time,
        } = self;
        write!(
            f,
            "{bodies_integrated} integrated, {pairs_tested} pairs in {passes} passes, \
            {overlaps} overlapping, {moved} moved, {errors} errors, {}",
            computation_time.refmt(&ConciseDebug)
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// Error from operating on a [`BodyHandle`] that does not refer to a live body.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("{body} is not in the world")]
#[non_exhaustive]
pub struct DetachedBodyError {
    /// The handle that was used.
    pub body: BodyHandle,
}

impl core::error::Error for DetachedBodyError {}

/// Error from asking to push a static body out of another.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("{mover} is static and cannot be pushed out of {obstacle}")]
#[non_exhaustive]
pub struct StaticPairError {
    /// The static body that would have been moved.
    pub mover: BodyHandle,
    /// The other body of the pair.
    pub obstacle: BodyHandle,
}

impl core::error::Error for StaticPairError {}

/// Error from [`PhysicsWorld::resolve_pair()`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PairError {
    /// One of the bodies is not in the world.
    #[error(transparent)]
    DetachedBody(#[from] DetachedBodyError),

    /// The body to be moved is static.
    #[error(transparent)]
    Static(#[from] StaticPairError),

    /// One of the bodies is excluded from simulation.
    #[error("{body} is not simulated")]
    NotSimulated {
        /// The body which is not simulated.
        body: BodyHandle,
    },

    /// One of the bodies has no collider.
    #[error("{body} has no collider")]
    NoCollider {
        /// The body lacking a collider.
        body: BodyHandle,
    },

    /// The extent of one of the bodies' colliders could not be computed.
    #[error("could not compute the extent of {body}")]
    Extent {
        /// The body whose collider failed.
        body: BodyHandle,
        /// What went wrong.
        #[source]
        source: ExtentError,
    },
}

/// Error from attaching or detaching colliders.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum AttachError {
    /// The body handle does not refer to a live body.
    #[error("{0} is not in the world")]
    NoSuchBody(BodyHandle),
    /// The collider handle does not refer to a live collider.
    #[error("{0} is not in the world")]
    NoSuchCollider(ColliderHandle),
}
