//! Selection state and the rules that turn selections into camera moves.
//!
//! Exactly one of planet, satellite or moon (or nothing) is selected. Clicks
//! arrive with a world position and move the camera at once. Selections from
//! the object list arrive by name only and are framed on the next tick the
//! camera is idle, using the latest resolved frame.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::camera::{CameraDirector, DistanceHint, TransitionId};
use crate::catalog::BodyCatalog;
use crate::frame::WorldFrame;
use crate::types::SelectableCategory;

/// Current selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Planet(String),
    Satellite(String),
    Moon(String),
}

impl Selection {
    pub fn new(category: SelectableCategory, id: impl Into<String>) -> Self {
        let id = id.into();
        match category {
            SelectableCategory::Planet => Selection::Planet(id),
            SelectableCategory::Satellite => Selection::Satellite(id),
            SelectableCategory::Moon => Selection::Moon(id),
        }
    }

    pub fn category(&self) -> Option<SelectableCategory> {
        match self {
            Selection::None => None,
            Selection::Planet(_) => Some(SelectableCategory::Planet),
            Selection::Satellite(_) => Some(SelectableCategory::Satellite),
            Selection::Moon(_) => Some(SelectableCategory::Moon),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Planet(id) | Selection::Satellite(id) | Selection::Moon(id) => Some(id),
        }
    }

    /// Selected id within `category`, if that category is the active one.
    pub fn get(&self, category: SelectableCategory) -> Option<&str> {
        if self.category() == Some(category) {
            self.id()
        } else {
            None
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// A reference selection waiting for an idle camera.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingFraming {
    category: SelectableCategory,
    id: String,
}

/// Owner of the selection.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selection: Selection,
    /// Id last framed per category, for dropping repeated list selections.
    last_framed: [Option<String>; 3],
    pending: Option<PendingFraming>,
}

impl SelectionController {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Select a clicked body and frame it from its known world position.
    ///
    /// While the camera is mid-transition the click is dropped entirely and
    /// the selection does not change.
    pub fn select_by_click(
        &mut self,
        category: SelectableCategory,
        id: &str,
        world_position: DVec3,
        hint: DistanceHint,
        camera: &mut CameraDirector,
    ) -> Option<TransitionId> {
        let transition = camera.move_to(world_position, world_position, hint)?;

        debug!("Selected {:?} {} by click", category, id);
        self.selection = Selection::new(category, id);
        self.last_framed[category.index()] = Some(id.to_string());
        // A click in the same tick as a list selection wins
        self.pending = None;
        Some(transition)
    }

    /// Select a body by name. The selection always changes; framing is
    /// queued unless the id repeats the pending or last framed one in that
    /// category. Returns whether framing was queued.
    pub fn select_by_reference(&mut self, category: SelectableCategory, id: &str) -> bool {
        debug!("Selected {:?} {} from list", category, id);
        self.selection = Selection::new(category, id);

        let repeat_of_pending = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.category == category && pending.id == id);
        if repeat_of_pending {
            return false;
        }
        if self.last_framed[category.index()].as_deref() == Some(id) {
            // A pending framing of some other body no longer matches the selection
            self.pending = None;
            return false;
        }

        self.pending = Some(PendingFraming {
            category,
            id: id.to_string(),
        });
        true
    }

    /// Frame a pending list selection once the camera is idle.
    ///
    /// The lookup reads `frame`, the latest resolved positions. A body that is
    /// not in the frame (hidden layer) is selected but not framed.
    pub fn process_pending(
        &mut self,
        catalog: &BodyCatalog,
        frame: &WorldFrame,
        camera: &mut CameraDirector,
    ) -> Option<TransitionId> {
        if camera.is_transitioning() {
            return None;
        }
        let pending = self.pending.take()?;

        let Some(body) = catalog.find_selectable(pending.category, &pending.id) else {
            debug!("No {:?} named {}; nothing to frame", pending.category, pending.id);
            return None;
        };
        let Some(position) = frame.position(&body.key) else {
            debug!("{} is not in the current frame; nothing to frame", body.key);
            return None;
        };

        let transition = camera.frame_body(body, position)?;
        self.last_framed[pending.category.index()] = Some(pending.id);
        Some(transition)
    }

    /// Deselect and return the camera to the overview.
    ///
    /// The selection clears even if the camera is busy and the reset is
    /// dropped.
    pub fn clear(&mut self, camera: &mut CameraDirector) -> Option<TransitionId> {
        self.selection = Selection::None;
        self.last_framed = Default::default();
        self.pending = None;
        camera.reset()
    }

    /// Recenter control: like `clear`, but does nothing while the camera is
    /// busy.
    pub fn recenter(&mut self, camera: &mut CameraDirector) -> Option<TransitionId> {
        if camera.is_transitioning() {
            return None;
        }
        self.clear(camera)
    }

    /// World position of the selected body in `frame`, for follow mode.
    pub fn follow_target(&self, catalog: &BodyCatalog, frame: &WorldFrame) -> Option<DVec3> {
        let category = self.selection.category()?;
        let id = self.selection.id()?;
        let body = catalog.find_selectable(category, id)?;
        frame.position(&body.key)
    }
}
