//! The orrery: all simulation state in one resource, advanced once per frame.
//!
//! Per-tick order:
//! 1. advance phase and spin of every body (one shared tick snapshot)
//! 2. resolve world positions for the visible bodies
//! 3. record trails (skipped while paused)
//! 4. spin the debris belts
//! 5. frame a pending list selection if the camera is idle
//! 6. step the camera transition
//! 7. follow the selected body (follow mode only)

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::belts::{ASTEROID_BELT, DebrisBelt, KUIPER_BELT};
use crate::camera::{CameraDirector, DistanceHint, TransitionId};
use crate::catalog::{Body, BodyCatalog, CatalogError, reference_catalog};
use crate::clock::{OrbitalClock, PhaseSeeder, TickInput};
use crate::frame::{FrameResolver, WorldFrame};
use crate::orbit::PathCache;
use crate::selection::SelectionController;
use crate::trail::TrailAccumulator;
use crate::types::{
    BodyCategory, BodyKey, CameraMode, LOCAL_PATH_SEGMENTS, PLANET_PATH_SEGMENTS,
    SelectableCategory, SimulationSettings,
};

/// Update-schedule phases, run in this order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrrerySet {
    /// Keyboard, mouse and picking.
    Input,
    /// Selection messages applied to the controller.
    Selection,
    /// The simulation tick.
    Simulate,
    /// Copy state onto transforms, draw gizmos.
    Sync,
}

/// A body was clicked in the 3D view.
#[derive(Message, Clone, Debug)]
pub struct BodyClicked {
    pub key: BodyKey,
    pub world_position: DVec3,
}

/// Select a body by name, e.g. from the object list.
#[derive(Message, Clone, Debug)]
pub struct SelectionRequest {
    pub category: SelectableCategory,
    pub id: String,
}

/// Deselect and fly back to the overview.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ClearSelection;

/// Fly back to the overview unless the camera is busy.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RecenterCamera;

/// A sampled orbit path placed in world space.
#[derive(Clone, Debug)]
pub struct OrbitLine {
    pub key: BodyKey,
    pub points: Vec<DVec3>,
}

/// Simulation state: catalog, resolved frame, trails, belts, camera and
/// selection.
#[derive(Resource)]
pub struct Orrery {
    pub catalog: BodyCatalog,
    pub clock: OrbitalClock,
    resolver: FrameResolver,
    frame: WorldFrame,
    pub trails: TrailAccumulator,
    paths: PathCache,
    pub belts: Vec<DebrisBelt>,
    pub camera: CameraDirector,
    pub selection: SelectionController,
}

impl Orrery {
    /// Build from `catalog`, drawing initial phases and belt layouts from
    /// `seeder`. The first frame is resolved immediately.
    pub fn new(catalog: BodyCatalog, seeder: &mut PhaseSeeder) -> Self {
        let catalog = catalog.with_random_phases(seeder);
        let belts = vec![
            DebrisBelt::generate(ASTEROID_BELT, seeder.rng()),
            DebrisBelt::generate(KUIPER_BELT, seeder.rng()),
        ];

        let mut resolver = FrameResolver::default();
        let frame = resolver.resolve_frame(catalog.iter());

        Self {
            catalog,
            clock: OrbitalClock::default(),
            resolver,
            frame,
            trails: TrailAccumulator::default(),
            paths: PathCache::default(),
            belts,
            camera: CameraDirector::default(),
            selection: SelectionController::default(),
        }
    }

    /// Reference catalog with reproducible phases.
    pub fn with_seed(seed: u64) -> Result<Self, CatalogError> {
        Ok(Self::new(reference_catalog()?, &mut PhaseSeeder::seeded(seed)))
    }

    /// Reference catalog with fresh random phases.
    pub fn from_os_rng() -> Result<Self, CatalogError> {
        Ok(Self::new(reference_catalog()?, &mut PhaseSeeder::from_os_rng()))
    }

    /// Latest resolved frame.
    pub fn frame(&self) -> &WorldFrame {
        &self.frame
    }

    pub fn position(&self, key: &BodyKey) -> Option<DVec3> {
        self.frame.position(key)
    }

    /// Run one tick. Returns the camera transition completed during it.
    pub fn tick(&mut self, delta_seconds: f64, settings: &SimulationSettings) -> Option<TransitionId> {
        let tick = TickInput {
            delta_seconds,
            speed_multiplier: settings.speed_multiplier(),
            paused: settings.effective_pause(),
        };

        self.clock.advance_all(&mut self.catalog, &tick);

        self.frame = self.resolver.resolve_frame(
            self.catalog
                .iter()
                .filter(|body| settings.is_visible(body.key.category)),
        );

        if !tick.paused {
            self.trails.record_frame(&self.frame);
        }
        for belt in &mut self.belts {
            belt.advance(&tick);
        }

        if let Some(id) =
            self.selection
                .process_pending(&self.catalog, &self.frame, &mut self.camera)
        {
            debug!("Framing list selection with transition {:?}", id);
        }
        let completed = self.camera.step(delta_seconds);

        if settings.camera_mode == CameraMode::Follow {
            let target = self.selection.follow_target(&self.catalog, &self.frame);
            self.camera.follow(target);
        }

        completed
    }

    /// Select a clicked body. The star selects as a planet.
    pub fn select_by_click(&mut self, key: &BodyKey, world_position: DVec3) -> Option<TransitionId> {
        let Some(body) = self.catalog.get(key) else {
            warn!("Click on unknown body {}", key);
            return None;
        };
        let hint = DistanceHint::for_body(body);
        self.selection.select_by_click(
            SelectableCategory::of(key.category),
            &key.id,
            world_position,
            hint,
            &mut self.camera,
        )
    }

    /// Select by name. Returns whether a camera framing was queued.
    pub fn select_by_reference(&mut self, category: SelectableCategory, id: &str) -> bool {
        self.selection.select_by_reference(category, id)
    }

    pub fn clear_selection(&mut self) -> Option<TransitionId> {
        self.selection.clear(&mut self.camera)
    }

    pub fn recenter(&mut self) -> Option<TransitionId> {
        self.selection.recenter(&mut self.camera)
    }

    /// The selected body, if it exists in the catalog.
    pub fn selected_body(&self) -> Option<&Body> {
        let selection = self.selection.selection();
        self.catalog
            .find_selectable(selection.category()?, selection.id()?)
    }

    /// World-space orbit paths of the bodies in the current frame. Paths of
    /// dependents are drawn around their parent's current position.
    pub fn orbit_lines(&mut self) -> Vec<OrbitLine> {
        let mut lines = Vec::new();
        for body in self.catalog.iter() {
            if self.frame.position(&body.key).is_none() {
                continue;
            }
            let origin = body
                .parent()
                .and_then(|parent| self.frame.position(parent))
                .unwrap_or(DVec3::ZERO);
            let segments = match body.key.category {
                BodyCategory::Planet => PLANET_PATH_SEGMENTS,
                _ => LOCAL_PATH_SEGMENTS,
            };

            let path = self.paths.path_for(&body.key, body.geometry(), segments);
            if path.points.is_empty() {
                continue;
            }
            lines.push(OrbitLine {
                key: body.key.clone(),
                points: path.line_strip().map(|point| origin + point).collect(),
            });
        }
        lines
    }
}

/// Plugin owning the simulation resource, its messages and its tick.
///
/// Inserts an `Orrery` built from the reference catalog unless one is
/// already present.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Orrery>() {
            let orrery = match Orrery::from_os_rng() {
                Ok(orrery) => orrery,
                Err(err) => {
                    error!("Reference catalog rejected: {err}");
                    Orrery::new(BodyCatalog::default(), &mut PhaseSeeder::from_os_rng())
                }
            };
            app.insert_resource(orrery);
        }

        app.init_resource::<SimulationSettings>()
            .add_message::<BodyClicked>()
            .add_message::<SelectionRequest>()
            .add_message::<ClearSelection>()
            .add_message::<RecenterCamera>()
            .configure_sets(
                Update,
                (
                    OrrerySet::Input,
                    OrrerySet::Selection,
                    OrrerySet::Simulate,
                    OrrerySet::Sync,
                )
                    .chain(),
            )
            .add_systems(Startup, begin_opening_flight)
            .add_systems(Update, apply_selection_messages.in_set(OrrerySet::Selection))
            .add_systems(Update, advance_simulation.in_set(OrrerySet::Simulate));
    }
}

fn begin_opening_flight(mut orrery: ResMut<Orrery>) {
    info!(
        "Orrery ready: {} bodies, {} belts",
        orrery.catalog.len(),
        orrery.belts.len()
    );
    orrery.camera.opening_flight();
}

/// Apply this frame's selection messages: list requests, then clicks (a
/// click overrides a same-frame list request), then clear and recenter.
fn apply_selection_messages(
    mut requests: MessageReader<SelectionRequest>,
    mut clicks: MessageReader<BodyClicked>,
    mut clears: MessageReader<ClearSelection>,
    mut recenters: MessageReader<RecenterCamera>,
    mut orrery: ResMut<Orrery>,
) {
    for request in requests.read() {
        orrery.select_by_reference(request.category, &request.id);
    }
    for click in clicks.read() {
        if orrery.select_by_click(&click.key, click.world_position).is_none() {
            debug!("Click on {} ignored while the camera is moving", click.key);
        }
    }
    if clears.read().count() > 0 {
        orrery.clear_selection();
    }
    if recenters.read().count() > 0 {
        orrery.recenter();
    }
}

fn advance_simulation(
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    mut orrery: ResMut<Orrery>,
) {
    orrery.tick(time.delta_secs_f64(), &settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use approx::assert_relative_eq;

    fn orrery() -> Orrery {
        Orrery::with_seed(1).unwrap()
    }

    #[test]
    fn test_first_frame_resolved_on_construction() {
        let orrery = orrery();
        assert_eq!(orrery.frame().len(), orrery.catalog.len());
        assert_eq!(orrery.position(&BodyKey::star("sun")), Some(DVec3::ZERO));
    }

    #[test]
    fn test_hidden_moons_leave_the_frame() {
        let mut orrery = orrery();
        let mut settings = SimulationSettings::default();
        settings.show_moons = false;
        orrery.tick(0.016, &settings);

        assert!(orrery.position(&BodyKey::moon("moon")).is_none());
        // Its orbiter falls back to the origin as parent position
        let lro = orrery.catalog.get(&BodyKey::satellite("lro")).unwrap();
        assert_eq!(
            orrery.position(&BodyKey::satellite("lro")),
            Some(lro.local_offset())
        );
    }

    #[test]
    fn test_paused_tick_freezes_positions_and_trails() {
        let mut orrery = orrery();
        let mut settings = SimulationSettings::default();
        orrery.tick(0.1, &settings);
        let earth = BodyKey::planet("earth");
        let before = orrery.position(&earth).unwrap();
        let trail_len = orrery.trails.snapshot(&earth).len();

        settings.camera_interacting = true;
        for _ in 0..10 {
            orrery.tick(0.1, &settings);
        }
        assert_eq!(orrery.position(&earth), Some(before));
        assert_eq!(orrery.trails.snapshot(&earth).len(), trail_len);
        assert_relative_eq!(orrery.belts[0].rotation(), 0.1 * ASTEROID_BELT.spin_rate);
    }

    #[test]
    fn test_camera_animates_while_paused() {
        let mut orrery = orrery();
        let mut settings = SimulationSettings::default();
        settings.paused = true;
        orrery.camera.opening_flight();
        let mut completed = None;
        for _ in 0..30 {
            completed = completed.or(orrery.tick(0.1, &settings));
        }
        assert!(completed.is_some());
    }

    #[test]
    fn test_list_selection_framed_on_next_tick() {
        let mut orrery = orrery();
        let settings = SimulationSettings::default();
        assert!(orrery.select_by_reference(SelectableCategory::Planet, "jupiter"));
        orrery.tick(0.0, &settings);
        assert!(orrery.camera.is_transitioning());

        let target = orrery.camera.transition().unwrap().target;
        let jupiter = orrery.position(&BodyKey::planet("jupiter")).unwrap();
        assert_eq!(target.look_at, jupiter);
        assert_relative_eq!(target.position.x, jupiter.x + 32.0, epsilon = 1e-9);
    }

    #[test]
    fn test_click_on_star_selects_as_planet() {
        let mut orrery = orrery();
        orrery
            .select_by_click(&BodyKey::star("sun"), DVec3::ZERO)
            .unwrap();
        assert_eq!(
            orrery.selection.selection(),
            &Selection::Planet("sun".into())
        );
        assert_eq!(orrery.selected_body().unwrap().key, BodyKey::star("sun"));
    }

    #[test]
    fn test_orbit_lines_follow_parent() {
        let mut orrery = orrery();
        let lines = orrery.orbit_lines();
        let moon_line = lines
            .iter()
            .find(|line| line.key == BodyKey::moon("moon"))
            .unwrap();
        let earth = orrery.position(&BodyKey::planet("earth")).unwrap();
        let centre = moon_line.points.iter().take(LOCAL_PATH_SEGMENTS).copied().sum::<DVec3>()
            / LOCAL_PATH_SEGMENTS as f64;
        assert_relative_eq!(centre.x, earth.x, epsilon = 1e-6);
        assert_relative_eq!(centre.z, earth.z, epsilon = 1e-6);

        assert!(lines.iter().all(|line| line.key != BodyKey::star("sun")));
        let rebuilds = orrery.paths.rebuilds();
        orrery.orbit_lines();
        assert_eq!(orrery.paths.rebuilds(), rebuilds);
    }
}
