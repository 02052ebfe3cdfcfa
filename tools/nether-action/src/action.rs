//! Action sampler
//!
//! Prepares one authored action applied to one armature for export.
//!
//! Usage: construct while the action is active in the host, call
//! [`Action::add_pose`] once for every entry of
//! [`Action::blender_frames`], then [`Action::reset`] and
//! [`Action::cull`]. The `mats`, `locs` and `rots` tracks are then ready for
//! the exporter.
//!
//! An action whose [`blender_frames`](Action::blender_frames) is `None` has
//! no meaningful frames and should be discarded.

use glam::{Mat4, Quat, Vec3};
use hashbrown::{HashMap, HashSet};
use std::sync::Arc;

use crate::armature::{Armature, PoseBones};
use crate::clip::{Clip, Interpolation};
use crate::config::SamplerConfig;
use crate::cull::unused_channels;
use crate::error::ActionError;
use crate::host::SceneHost;
use crate::hierarchy::make_parent_relative;
use crate::keyframes::{scan_clip, Timeline};
use crate::math::{all_eq, decompose, is_identity};

/// Lifecycle state of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Accepting poses
    Sampling,
    /// Culled, read-only
    Culled,
    /// No keyframes or no significant channels; discard
    Empty,
}

/// One action's sampled bone tracks
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    armature: Arc<Armature>,
    config: SamplerConfig,
    state: ActionState,
    /// Frame pointer to restore in `reset`
    orig_frame: f32,
    timeline: Option<Timeline>,
    interpolation: Option<Interpolation>,
    locs: HashMap<String, Vec<Vec3>>,
    rots: HashMap<String, Vec<Quat>>,
    mats: HashMap<String, Vec<Mat4>>,
    frame_count: usize,
    rest_pose_frame: Option<usize>,
    channels: Option<usize>,
}

impl Action {
    /// Prepare `clip` for sampling.
    ///
    /// The clip must be the host's active action, so that the host's frame
    /// range belongs to it.
    pub fn new(
        clip: &Clip,
        armature: Arc<Armature>,
        host: &impl SceneHost,
        config: &SamplerConfig,
    ) -> Result<Self, ActionError> {
        let name = clip.name.clone();
        let orig_frame = host.current_frame();
        let start = host.start_frame();
        let end = host.end_frame();
        if start > end {
            return Err(ActionError::StartAfterEnd {
                action: name,
                start,
                end,
            });
        }
        let frame_rate = config
            .valid_frame_rate()
            .ok_or_else(|| ActionError::FrameRateUnset {
                action: name.clone(),
                frame_rate: config.frame_rate,
            })?;

        let mut locs = HashMap::new();
        let mut rots = HashMap::new();
        let mut mats = HashMap::new();
        for bone in clip.channel_names() {
            locs.insert(bone.to_string(), Vec::new());
            rots.insert(bone.to_string(), Vec::new());
            mats.insert(bone.to_string(), Vec::new());
        }

        let scan = scan_clip(clip)?;
        let mut action = Self {
            name,
            armature,
            config: *config,
            state: ActionState::Empty,
            orig_frame,
            timeline: None,
            interpolation: scan.interpolation,
            locs,
            rots,
            mats,
            frame_count: 0,
            rest_pose_frame: None,
            channels: None,
        };

        if scan.frames.is_empty() {
            tracing::info!("Action '{}' has no keyframes", action.name);
            return Ok(action);
        }

        let timeline = Timeline::build(&action.name, &scan.frames, start, end, frame_rate)?;
        tracing::debug!(
            "Action '{}': {} significant frames, playback {}..={}",
            action.name,
            timeline.len(),
            timeline.start_frame,
            timeline.end_frame
        );
        action.timeline = Some(timeline);
        action.state = ActionState::Sampling;
        Ok(action)
    }

    /// Record the pose of one frame. Call in increasing frame order.
    pub fn add_pose(&mut self, pose: &PoseBones) -> Result<(), ActionError> {
        match self.state {
            ActionState::Sampling => {}
            ActionState::Culled => return Err(self.invalid_state("was already culled")),
            ActionState::Empty => return Err(self.invalid_state("has no keyframes to sample")),
        }

        let mut frame_mats: HashMap<String, Mat4> = HashMap::with_capacity(self.mats.len());
        let mut all_rests = self.rest_pose_frame.is_none();
        for bone in self.mats.keys() {
            let pose_bone = pose.get(bone).ok_or_else(|| ActionError::MissingChannel {
                action: self.name.clone(),
                bone: bone.clone(),
            })?;
            frame_mats.insert(bone.clone(), pose_bone.pose_matrix);
            if all_rests && !is_identity(&pose_bone.local_matrix) {
                all_rests = false;
            }
        }

        make_parent_relative(&mut frame_mats, pose, &self.armature);

        let mut samples = Vec::with_capacity(frame_mats.len());
        for (bone, mat) in frame_mats {
            let parts = decompose(&mat);
            if !all_eq(parts.scale, 1.0, self.config.scale_tolerance) {
                return Err(ActionError::ScaledBone {
                    action: self.name.clone(),
                    bone,
                    scale: parts.scale,
                });
            }
            samples.push((bone, mat, parts.translation, parts.rotation));
        }

        for (bone, mat, loc, rot) in samples {
            if let Some(track) = self.mats.get_mut(&bone) {
                track.push(mat);
            }
            if let Some(track) = self.locs.get_mut(&bone) {
                track.push(loc);
            }
            if let Some(track) = self.rots.get_mut(&bone) {
                track.push(rot);
            }
        }

        if all_rests {
            self.rest_pose_frame = Some(self.frame_count);
        }
        self.frame_count += 1;
        Ok(())
    }

    /// Restore the host's frame pointer and put its pose back at rest
    pub fn reset(&self, host: &mut impl SceneHost) {
        host.set_current_frame(self.orig_frame);
        host.pose_mut().zero();
    }

    /// Drop channels that never move. Returns the number of channels kept.
    pub fn cull(&mut self) -> Result<usize, ActionError> {
        match self.state {
            ActionState::Sampling => {}
            ActionState::Culled => return Err(self.invalid_state("was already culled")),
            ActionState::Empty => return Ok(0),
        }

        for bone in unused_channels(&self.rots, &self.locs, &self.config) {
            tracing::info!(
                "Dropping unused channel '{}' from action '{}'",
                bone,
                self.name
            );
            self.rots.remove(&bone);
            self.locs.remove(&bone);
            self.mats.remove(&bone);
        }

        self.state = ActionState::Culled;
        if self.mats.is_empty() {
            tracing::info!("No significant channels for action '{}'", self.name);
            self.timeline = None;
            self.state = ActionState::Empty;
        }
        let channels = self.mats.len();
        self.channels = Some(channels);
        Ok(channels)
    }

    fn invalid_state(&self, reason: &'static str) -> ActionError {
        ActionError::InvalidState {
            action: self.name.clone(),
            reason,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bones that still have a channel
    pub fn channel_names(&self) -> HashSet<String> {
        self.mats.keys().cloned().collect()
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// True when the action carries nothing to export
    pub fn is_empty(&self) -> bool {
        self.timeline.is_none()
    }

    /// Host frame numbers of the significant frames
    pub fn blender_frames(&self) -> Option<&[f32]> {
        self.timeline.as_ref().map(|t| t.blender_frames.as_slice())
    }

    /// Seconds of the significant frames, parallel to `blender_frames`
    pub fn keyframe_times(&self) -> Option<&[f32]> {
        self.timeline.as_ref().map(|t| t.keyframe_times.as_slice())
    }

    /// Index of the authored start frame
    pub fn start_frame(&self) -> Option<usize> {
        self.timeline.as_ref().map(|t| t.start_frame)
    }

    /// Index of the authored end frame
    pub fn end_frame(&self) -> Option<usize> {
        self.timeline.as_ref().map(|t| t.end_frame)
    }

    pub fn interpolation(&self) -> Option<Interpolation> {
        self.interpolation
    }

    /// Index of the first sampled frame where every bone was at rest
    pub fn rest_pose_frame(&self) -> Option<usize> {
        self.rest_pose_frame
    }

    /// Channels kept by `cull`, `None` before culling
    pub fn channels(&self) -> Option<usize> {
        self.channels
    }

    /// Number of poses added so far
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn locs(&self) -> &HashMap<String, Vec<Vec3>> {
        &self.locs
    }

    pub fn rots(&self) -> &HashMap<String, Vec<Quat>> {
        &self.rots
    }

    pub fn mats(&self) -> &HashMap<String, Vec<Mat4>> {
        &self.mats
    }
}
