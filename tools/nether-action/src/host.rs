//! Interfaces to the authoring host
//!
//! The sampler never evaluates animation itself. It moves the host's current
//! frame and reads back the pose the host computed for it, so one action's
//! sampling needs exclusive use of the host from construction until
//! [`Action::reset`](crate::Action::reset).

use crate::armature::Pose;
use crate::clip::Clip;

/// Frame pointer, authored range and pose of the active action
pub trait SceneHost {
    /// Frame rate from the scene's render settings
    fn frames_per_second(&self) -> f32;

    fn current_frame(&self) -> f32;

    /// Move the frame pointer; the host re-evaluates [`pose`](Self::pose)
    fn set_current_frame(&mut self, frame: f32);

    /// Authored start frame of the active action
    fn start_frame(&self) -> f32;

    /// Authored end frame of the active action
    fn end_frame(&self) -> f32;

    /// Pose evaluated at the current frame
    fn pose(&self) -> &Pose;

    fn pose_mut(&mut self) -> &mut Pose;
}

/// A host that can enumerate its clips and make one of them active
pub trait ActionHost: SceneHost {
    fn clips(&self) -> Vec<Clip>;

    /// Make the named clip the active action. Returns false if unknown.
    fn activate(&mut self, name: &str) -> bool;
}
