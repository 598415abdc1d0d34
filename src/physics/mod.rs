//! Rigid-body world wrapper: steps rapier, reports impacts after each step,
//! and swaps broken bodies for their fragments between steps.

use crate::errors::PhysicsError;
use crate::float_types::Real;
use crate::float_types::rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase,
    ImpulseJointSet, IntegrationParameters, IslandManager, MassProperties,
    MultibodyJointSet, NarrowPhase, PhysicsPipeline, QueryPipeline, RigidBodyBuilder,
    RigidBodyHandle, RigidBodySet,
};
use crate::fracture::{Fragment, Impact, RigidBodyState, Shatter};
use crate::polyhedron::Polyhedron;
use hashbrown::{HashMap, HashSet};
use nalgebra::{Isometry3, Point3, Translation3, Vector3};

/// A body hit during the last step, in that body's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEvent {
    pub body: RigidBodyHandle,
    /// Contact point relative to the body origin
    pub local_point: Point3<Real>,
    /// Direction the hit pushes into the body
    pub local_normal: Vector3<Real>,
    /// Closing speed along the contact normal, measured before the step
    pub impact_speed: Real,
    /// `mass × impact_speed`
    pub momentum: Real,
}

impl ImpactEvent {
    pub fn impact(&self) -> Impact {
        Impact {
            local_point: self.local_point,
            direction: self.local_normal,
            momentum: self.momentum,
        }
    }
}

/// Velocity snapshot taken before a step.
#[derive(Debug, Clone, Copy)]
struct Motion {
    linvel: Vector3<Real>,
    angvel: Vector3<Real>,
    com: Point3<Real>,
}

impl Motion {
    fn rest() -> Motion {
        Motion {
            linvel: Vector3::zeros(),
            angvel: Vector3::zeros(),
            com: Point3::origin(),
        }
    }

    fn velocity_at(&self, p: &Point3<Real>) -> Vector3<Real> {
        self.linvel + self.angvel.cross(&(p - self.com))
    }
}

/// Rapier world with a registry of breakable bodies and their polyhedra.
pub struct PhysicsWorld {
    pub gravity: Vector3<Real>,
    pub integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    breakables: HashMap<RigidBodyHandle, Polyhedron>,
    touching: HashSet<(ColliderHandle, ColliderHandle)>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Empty world with gravity `(0, −9.8, 0)` and a 60 Hz step.
    pub fn new() -> Self {
        PhysicsWorld {
            gravity: Vector3::new(0.0, -9.8, 0.0),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            breakables: HashMap::new(),
            touching: HashSet::new(),
        }
    }

    /// Insert a dynamic, breakable body.
    ///
    /// The collider is the convex hull of the polyhedron's vertices; mass and
    /// principal inertia come from `state`, the centre of mass is the
    /// polyhedron's centroid.
    pub fn spawn(
        &mut self,
        polyhedron: Polyhedron,
        state: &RigidBodyState,
    ) -> Result<RigidBodyHandle, PhysicsError> {
        let collider = ColliderBuilder::convex_hull(polyhedron.vertices())
            .ok_or(PhysicsError::Collider(polyhedron.vertex_count()))?
            .mass_properties(MassProperties::new(
                polyhedron.centroid(),
                state.mass,
                state.inertia,
            ))
            .build();

        let body = RigidBodyBuilder::dynamic()
            .position(Isometry3::from_parts(
                Translation3::from(state.position.coords),
                state.orientation,
            ))
            .linvel(state.linvel)
            .angvel(state.angvel)
            .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.add_force(state.force, true);
        }

        self.breakables.insert(handle, polyhedron);
        Ok(handle)
    }

    /// Insert a fixed box collider (floor, table) centred at `position`.
    pub fn add_static_cuboid(
        &mut self,
        half_extents: Vector3<Real>,
        position: Point3<Real>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(position.coords)
            .build();
        self.colliders.insert(collider)
    }

    /// Advance the simulation one step and report the bodies hit during it.
    ///
    /// Events are collected once the solver is done, only for contact pairs
    /// that started touching in this step. The bodies can be broken with
    /// [`break_bodies`](Self::break_bodies) before the next step.
    pub fn step(&mut self) -> Vec<ImpactEvent> {
        let motions: HashMap<RigidBodyHandle, Motion> = self
            .bodies
            .iter()
            .map(|(handle, rb)| {
                (
                    handle,
                    Motion {
                        linvel: *rb.linvel(),
                        angvel: *rb.angvel(),
                        com: *rb.center_of_mass(),
                    },
                )
            })
            .collect();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        let mut events = Vec::new();
        let mut touching = HashSet::new();
        for pair in self.narrow_phase.contact_pairs() {
            if !pair.has_any_active_contact {
                continue;
            }
            let key = (pair.collider1, pair.collider2);
            touching.insert(key);
            if self.touching.contains(&key) {
                continue;
            }

            for manifold in &pair.manifolds {
                if manifold.points.is_empty() {
                    continue;
                }
                let Some(co1) = self.colliders.get(pair.collider1) else {
                    continue;
                };
                // manifold points live in the first collider's frame; use their mean
                let sum = manifold
                    .points
                    .iter()
                    .fold(Vector3::zeros(), |acc, p| acc + p.local_p1.coords);
                let local = Point3::from(sum / manifold.points.len() as Real);
                let point = co1.position() * local;
                let normal = manifold.data.normal;

                let body1 = co1.parent();
                let body2 = self.colliders.get(pair.collider2).and_then(|c| c.parent());
                let motion = |body: Option<RigidBodyHandle>| {
                    body.and_then(|h| motions.get(&h).copied())
                        .unwrap_or_else(Motion::rest)
                };
                let closing = motion(body1).velocity_at(&point) - motion(body2).velocity_at(&point);
                let speed = closing.dot(&normal).max(0.0);
                if speed <= 0.0 {
                    continue;
                }

                // the hit pushes into body 1 against the normal and into body 2 along it
                for (body, push) in [(body1, -normal), (body2, normal)] {
                    if let Some(event) = body.and_then(|h| self.impact_event(h, &point, &push, speed)) {
                        events.push(event);
                    }
                }
                break;
            }
        }
        self.touching = touching;

        if !events.is_empty() {
            tracing::debug!(events = events.len(), "physics: impacts this step");
        }
        events
    }

    fn impact_event(
        &self,
        handle: RigidBodyHandle,
        world_point: &Point3<Real>,
        world_push: &Vector3<Real>,
        speed: Real,
    ) -> Option<ImpactEvent> {
        if !self.breakables.contains_key(&handle) {
            return None;
        }
        let rb = self.bodies.get(handle)?;
        let pose = rb.position();
        Some(ImpactEvent {
            body: handle,
            local_point: pose.inverse_transform_point(world_point),
            local_normal: pose.inverse_transform_vector(world_push),
            impact_speed: speed,
            momentum: rb.mass() * speed,
        })
    }

    /// Replace every body hit with at least the shatter's momentum threshold
    /// by its fragments. Only the first qualifying event per body is used.
    ///
    /// Returns the handles of the inserted fragment bodies.
    pub fn break_bodies(
        &mut self,
        events: &[ImpactEvent],
        shatter: &mut dyn Shatter,
    ) -> Vec<RigidBodyHandle> {
        let threshold = shatter.momentum_threshold();
        let mut broken = HashSet::new();
        let mut spawned = Vec::new();

        for event in events {
            if event.momentum < threshold || !broken.insert(event.body) {
                continue;
            }
            let Some(source) = self.breakables.get(&event.body) else {
                continue;
            };
            let Ok(state) = self.body_state(event.body) else {
                continue;
            };

            let fragments = shatter.shatter(source, &state, &event.impact());
            if fragments.is_empty() {
                tracing::debug!(body = ?event.body, "physics: impact produced no fragments");
                continue;
            }

            self.remove_body(event.body);
            let count = fragments.len();
            for Fragment { polyhedron, state, .. } in fragments {
                match self.spawn(polyhedron, &state) {
                    Ok(handle) => spawned.push(handle),
                    Err(err) => tracing::warn!(%err, "physics: fragment not spawned"),
                }
            }
            tracing::info!(
                body = ?event.body,
                momentum = event.momentum,
                fragments = count,
                "physics: body broken"
            );
        }
        spawned
    }

    /// Remove every body whose origin fell below `height`. Returns how many were removed.
    pub fn remove_below(&mut self, height: Real) -> usize {
        let fallen: Vec<RigidBodyHandle> = self
            .bodies
            .iter()
            .filter(|(_, rb)| rb.translation().y < height)
            .map(|(handle, _)| handle)
            .collect();
        for &handle in &fallen {
            self.remove_body(handle);
        }
        fallen.len()
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.breakables.remove(&handle);
    }

    /// Current physical state of a body.
    pub fn body_state(&self, handle: RigidBodyHandle) -> Result<RigidBodyState, PhysicsError> {
        let rb = self
            .bodies
            .get(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        Ok(RigidBodyState {
            position: Point3::from(*rb.translation()),
            orientation: *rb.rotation(),
            mass: rb.mass(),
            linvel: *rb.linvel(),
            angvel: *rb.angvel(),
            inertia: rb.mass_properties().local_mprops.principal_inertia(),
            force: rb.user_force(),
        })
    }

    /// Geometry of a breakable body.
    pub fn polyhedron(&self, handle: RigidBodyHandle) -> Result<&Polyhedron, PhysicsError> {
        if !self.bodies.contains(handle) {
            return Err(PhysicsError::UnknownBody(handle));
        }
        self.breakables
            .get(&handle)
            .ok_or(PhysicsError::NotBreakable(handle))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = RigidBodyHandle> + '_ {
        self.bodies.iter().map(|(handle, _)| handle)
    }
}
