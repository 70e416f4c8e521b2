//! Camera director and the Bevy camera it drives.
//!
//! The director owns the camera pose (position and look-at point). It runs
//! timed transitions toward a framing of the selected body or the overview,
//! softly tracks the selected body in follow mode, and applies the user's
//! orbit/zoom input between transitions.
//!
//! Only one transition runs at a time. A request made while one is in flight
//! is rejected, not queued: rapid re-selection cannot make the camera jitter,
//! and a dropped request never fires a completion.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::math::DVec3;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f64::consts::PI;

use crate::catalog::Body;
use crate::simulation::{Orrery, OrrerySet};
use crate::types::{BodyCategory, SimulationSettings};

/// Duration of selection and reset transitions, in seconds.
pub const TRANSITION_SECONDS: f64 = 1.5;

/// Duration of the opening flight to the overview, in seconds.
pub const OPENING_SECONDS: f64 = 2.0;

/// Overview pose: far above and behind the origin, looking at it.
pub const OVERVIEW_POSITION: DVec3 = DVec3::new(0.0, 80.0, 180.0);

/// Where the camera starts before the opening flight.
pub const APPROACH_POSITION: DVec3 = DVec3::new(0.0, 200.0, 450.0);

/// Fixed offset from the star when it is selected.
pub const STAR_STANDOFF: DVec3 = DVec3::new(20.0, 15.0, 20.0);

/// Standoff distance per unit of body radius, by category.
pub const PLANET_STANDOFF: f64 = 8.0;
pub const SATELLITE_STANDOFF: f64 = 25.0;
pub const MOON_STANDOFF: f64 = 10.0;

/// Fraction of the remaining gap closed by follow mode each tick.
pub const FOLLOW_SMOOTHING: f64 = 0.05;

/// Zoom limits (distance from camera to look-at).
pub const MIN_DISTANCE: f64 = 1.0;
pub const MAX_DISTANCE: f64 = 400.0;

/// Largest angle between +Y and the camera direction.
pub const MAX_POLAR_ANGLE: f64 = PI / 1.5;

/// Smallest polar angle, keeps the view off the pole singularity.
const MIN_POLAR_ANGLE: f64 = 1e-3;

/// Radians of orbit per pixel of drag.
pub const ROTATE_SPEED: f64 = 0.006;

/// Zoom fraction per scroll line.
pub const ZOOM_SPEED: f64 = 0.1;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 60.0;

/// Interpolation curve of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out.
    QuadOut,
    /// Quadratic ease-in-out.
    QuadInOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Camera position plus the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
}

impl CameraPose {
    pub const OVERVIEW: CameraPose = CameraPose {
        position: OVERVIEW_POSITION,
        look_at: DVec3::ZERO,
    };

    pub fn lerp(&self, other: &CameraPose, s: f64) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, s),
            look_at: self.look_at.lerp(other.look_at, s),
        }
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.look_at)
    }
}

/// Handle for one transition; reported back when it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(pub u64);

/// An in-flight timed move of position and look-at.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    pub id: TransitionId,
    pub start: CameraPose,
    pub target: CameraPose,
    pub duration: f64,
    pub easing: Easing,
    pub started_at: f64,
}

impl CameraTransition {
    /// Linear progress in [0, 1] at director time `now`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn pose_at(&self, now: f64) -> CameraPose {
        self.start
            .lerp(&self.target, self.easing.apply(self.progress(now)))
    }
}

/// How far to stand off from a framed body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DistanceHint {
    /// Fixed offset used for the star.
    Star,
    /// Offset of `radius * multiplier`.
    Radius { radius: f64, multiplier: f64 },
}

impl DistanceHint {
    pub fn for_body(body: &Body) -> Self {
        let multiplier = match body.key.category {
            BodyCategory::Star => return DistanceHint::Star,
            BodyCategory::Planet => PLANET_STANDOFF,
            BodyCategory::Satellite => SATELLITE_STANDOFF,
            BodyCategory::Moon => MOON_STANDOFF,
        };
        DistanceHint::Radius {
            radius: body.radius,
            multiplier,
        }
    }

    /// Offset from the framed point to the camera: `(d, d/2, d)`.
    pub fn standoff(&self) -> DVec3 {
        match *self {
            DistanceHint::Star => STAR_STANDOFF,
            DistanceHint::Radius { radius, multiplier } => {
                let d = radius * multiplier;
                DVec3::new(d, d * 0.5, d)
            }
        }
    }
}

/// Owner of the camera pose.
#[derive(Clone, Debug)]
pub struct CameraDirector {
    pose: CameraPose,
    /// Seconds since creation; transition clock.
    elapsed: f64,
    transition: Option<CameraTransition>,
    next_id: u64,
    rejected: u64,
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::new(CameraPose {
            position: APPROACH_POSITION,
            look_at: DVec3::ZERO,
        })
    }
}

impl CameraDirector {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            elapsed: 0.0,
            transition: None,
            next_id: 1,
            rejected: 0,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    /// Number of requests rejected because a transition was in flight.
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    /// Start a transition to `target`, or return `None` if one is running.
    pub fn begin(
        &mut self,
        target: CameraPose,
        duration: f64,
        easing: Easing,
    ) -> Option<TransitionId> {
        if let Some(active) = &self.transition {
            self.rejected += 1;
            debug!("Camera busy with transition {:?}; request dropped", active.id);
            return None;
        }

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.transition = Some(CameraTransition {
            id,
            start: self.pose,
            target,
            duration,
            easing,
            started_at: self.elapsed,
        });
        Some(id)
    }

    /// Frame `target_world` from the standoff given by `hint`, looking at
    /// `look_at`.
    pub fn move_to(
        &mut self,
        target_world: DVec3,
        look_at: DVec3,
        hint: DistanceHint,
    ) -> Option<TransitionId> {
        let target = CameraPose {
            position: target_world + hint.standoff(),
            look_at,
        };
        self.begin(target, TRANSITION_SECONDS, Easing::QuadInOut)
    }

    /// Frame `body` at its resolved world position.
    pub fn frame_body(&mut self, body: &Body, world_position: DVec3) -> Option<TransitionId> {
        self.move_to(world_position, world_position, DistanceHint::for_body(body))
    }

    /// Return to the overview pose.
    pub fn reset(&mut self) -> Option<TransitionId> {
        self.begin(CameraPose::OVERVIEW, TRANSITION_SECONDS, Easing::QuadInOut)
    }

    /// The slower ease-out flight to the overview used at startup.
    pub fn opening_flight(&mut self) -> Option<TransitionId> {
        self.begin(CameraPose::OVERVIEW, OPENING_SECONDS, Easing::QuadOut)
    }

    /// Advance the transition clock by `dt` real seconds.
    ///
    /// Returns the id of a transition that completed during this step.
    pub fn step(&mut self, dt: f64) -> Option<TransitionId> {
        self.elapsed += dt;
        let now = self.elapsed;

        let (pose, done) = match &self.transition {
            Some(transition) => (transition.pose_at(now), transition.progress(now) >= 1.0),
            None => return None,
        };
        self.pose = pose;

        if !done {
            return None;
        }
        let finished = self.transition.take()?;
        self.pose = finished.target;
        debug!("Camera transition {:?} complete", finished.id);
        Some(finished.id)
    }

    /// Pull the look-at toward `target` by `FOLLOW_SMOOTHING`.
    ///
    /// Does nothing without a target or while a transition runs. The camera
    /// position is left alone so the user keeps orbit/zoom control.
    pub fn follow(&mut self, target: Option<DVec3>) -> bool {
        let Some(target) = target else {
            return false;
        };
        if self.is_transitioning() {
            return false;
        }
        self.pose.look_at += (target - self.pose.look_at) * FOLLOW_SMOOTHING;
        true
    }

    /// Rotate the camera about the look-at point. Ignored mid-transition.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let offset = self.pose.position - self.pose.look_at;
        let radius = offset.length();
        if radius <= f64::EPSILON {
            return false;
        }

        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.z.atan2(offset.x);
        let polar = (polar + pitch).clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
        let azimuth = azimuth + yaw;

        let offset = DVec3::new(
            radius * polar.sin() * azimuth.cos(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.sin(),
        );
        self.pose.position = self.pose.look_at + offset;
        true
    }

    /// Scale the distance to the look-at by `factor`, within the zoom
    /// limits. Ignored mid-transition.
    pub fn zoom(&mut self, factor: f64) -> bool {
        if self.is_transitioning() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let offset = self.pose.position - self.pose.look_at;
        let radius = offset.length();
        if radius <= f64::EPSILON {
            return false;
        }
        let new_radius = (radius * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.pose.position = self.pose.look_at + offset * (new_radius / radius);
        true
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Pointer drag tracking shared by orbit input and click picking.
#[derive(Resource, Default)]
pub struct PointerDrag {
    /// Cursor travel in pixels since the left button went down.
    pub travel: f32,
    /// Whether the current press started over the 3D view.
    pub in_view: bool,
}

/// Presses that travel further than this are drags, not clicks.
pub const CLICK_TOLERANCE_PX: f32 = 4.0;

/// Plugin providing the main camera and its input.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerDrag>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, camera_orbit_input.in_set(OrrerySet::Input))
            .add_systems(Update, sync_camera_transform.in_set(OrrerySet::Sync));
    }
}

fn to_render(v: DVec3) -> Vec3 {
    v.as_vec3()
}

/// Spawn the perspective camera at the director's pose.
fn setup_camera(mut commands: Commands, orrery: Res<Orrery>) {
    let pose = orrery.camera.pose();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEG.to_radians(),
            near: 0.1,
            far: 2500.0,
            ..default()
        }),
        Transform::from_translation(to_render(pose.position))
            .looking_at(to_render(pose.look_at), Vec3::Y),
        MainCamera,
    ));
}

/// Left drag orbits, scroll zooms. Holding the left button over the view
/// also pauses the simulation through `camera_interacting`.
pub fn camera_orbit_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut drag: ResMut<PointerDrag>,
    mut settings: ResMut<SimulationSettings>,
    mut orrery: ResMut<Orrery>,
) {
    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);

    if mouse_buttons.just_pressed(MouseButton::Left) {
        drag.travel = 0.0;
        drag.in_view = !over_ui;
    }

    let held = mouse_buttons.pressed(MouseButton::Left) && drag.in_view;
    if settings.camera_interacting != held {
        settings.camera_interacting = held;
    }

    if held && mouse_motion.delta != Vec2::ZERO {
        drag.travel += mouse_motion.delta.length();
        orrery.camera.orbit(
            -(mouse_motion.delta.x as f64) * ROTATE_SPEED,
            -(mouse_motion.delta.y as f64) * ROTATE_SPEED,
        );
    }

    if !over_ui && mouse_scroll.delta.y != 0.0 {
        // Logarithmic zoom: scroll up moves closer
        let factor = 1.0 - mouse_scroll.delta.y as f64 * ZOOM_SPEED;
        orrery.camera.zoom(factor.max(0.1));
    }
}

/// Copy the director's pose onto the camera transform.
fn sync_camera_transform(
    orrery: Res<Orrery>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let pose = orrery.camera.pose();
    *transform = Transform::from_translation(to_render(pose.position))
        .looking_at(to_render(pose.look_at), Vec3::Y);
}
