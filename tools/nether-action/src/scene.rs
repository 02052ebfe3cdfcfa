//! Recorded scene host
//!
//! Plays back a scene captured from the authoring tool: the armature, its
//! clips with their authored ranges, and the poses the tool evaluated at
//! each recorded frame. Between recorded frames the most recent earlier pose
//! is held.
//!
//! # Format
//! ```json
//! {
//!   "frames_per_second": 24.0,
//!   "current_frame": 1.0,
//!   "bones": [{ "name": "root" }, { "name": "spine", "parent": "root" }],
//!   "actions": [{
//!     "clip": { "name": "walk", "channels": [...] },
//!     "start_frame": 1.0,
//!     "end_frame": 10.0,
//!     "poses": [{ "frame": 1.0, "bones": [{ "name": "root", "pose_matrix": [16 floats], "local_matrix": [16 floats] }] }]
//!   }]
//! }
//! ```
//! Matrices are column-major.

use anyhow::{Context, Result};
use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::armature::{Armature, Pose, PoseBone};
use crate::clip::Clip;
use crate::host::{ActionHost, SceneHost};

/// Frames closer than this are the same frame
const FRAME_EPSILON: f32 = 1.0e-4;

fn default_frame() -> f32 {
    1.0
}

/// A bone of the recorded armature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneRecord {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// One bone's evaluated state at a recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseBoneRecord {
    pub name: String,
    pub pose_matrix: Mat4,
    #[serde(default)]
    pub local_matrix: Mat4,
}

/// Evaluated pose at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub frame: f32,
    #[serde(default)]
    pub bones: Vec<PoseBoneRecord>,
}

/// A clip, its authored range and its evaluated poses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub clip: Clip,
    pub start_frame: f32,
    pub end_frame: f32,
    #[serde(default)]
    pub poses: Vec<PoseRecord>,
}

/// Everything captured from the authoring tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecording {
    pub frames_per_second: f32,
    #[serde(default = "default_frame")]
    pub current_frame: f32,
    #[serde(default)]
    pub bones: Vec<BoneRecord>,
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
}

/// [`ActionHost`] that plays back a [`SceneRecording`]
#[derive(Debug, Clone)]
pub struct RecordedScene {
    recording: SceneRecording,
    armature: Arc<Armature>,
    active: Option<usize>,
    current_frame: f32,
    pose: Pose,
}

impl RecordedScene {
    pub fn new(recording: SceneRecording) -> Self {
        let armature = Arc::new(Armature::from_parents(
            recording
                .bones
                .iter()
                .map(|b| (b.name.as_str(), b.parent.as_deref())),
        ));
        let current_frame = recording.current_frame;
        let mut scene = Self {
            recording,
            armature,
            active: None,
            current_frame,
            pose: Pose::default(),
        };
        scene.evaluate();
        scene
    }

    /// Parse a recording from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let recording: SceneRecording =
            serde_json::from_str(text).context("Failed to parse scene recording")?;
        Ok(Self::new(recording))
    }

    /// Load a recording from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene recording: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scene recording: {}", path.display()))
    }

    pub fn armature(&self) -> Arc<Armature> {
        Arc::clone(&self.armature)
    }

    pub fn recording(&self) -> &SceneRecording {
        &self.recording
    }

    /// Name of the active action, if any
    pub fn active_action(&self) -> Option<&str> {
        self.active_record().map(|a| a.clip.name.as_str())
    }

    fn active_record(&self) -> Option<&ActionRecord> {
        self.active.and_then(|i| self.recording.actions.get(i))
    }

    /// Rebuild the pose for the current frame
    fn evaluate(&mut self) {
        let record = self.active_record().and_then(|action| {
            action
                .poses
                .iter()
                .filter(|p| p.frame <= self.current_frame + FRAME_EPSILON)
                .max_by(|a, b| a.frame.total_cmp(&b.frame))
                .or_else(|| action.poses.first())
        });

        let mut pose = Pose::default();
        match record {
            Some(record) => {
                for bone in &record.bones {
                    let parent = self.armature.bone(&bone.name).and_then(|b| b.parent.clone());
                    pose.bones.insert(
                        bone.name.clone(),
                        PoseBone::new(bone.pose_matrix, bone.local_matrix, parent),
                    );
                }
            }
            None => {
                for bone in self.armature.bones() {
                    pose.bones.insert(
                        bone.name.clone(),
                        PoseBone::new(Mat4::IDENTITY, Mat4::IDENTITY, bone.parent.clone()),
                    );
                }
            }
        }
        self.pose = pose;
    }
}

impl SceneHost for RecordedScene {
    fn frames_per_second(&self) -> f32 {
        self.recording.frames_per_second
    }

    fn current_frame(&self) -> f32 {
        self.current_frame
    }

    fn set_current_frame(&mut self, frame: f32) {
        self.current_frame = frame;
        self.evaluate();
    }

    fn start_frame(&self) -> f32 {
        self.active_record().map_or(1.0, |a| a.start_frame)
    }

    fn end_frame(&self) -> f32 {
        self.active_record().map_or(1.0, |a| a.end_frame)
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }
}

impl ActionHost for RecordedScene {
    fn clips(&self) -> Vec<Clip> {
        self.recording.actions.iter().map(|a| a.clip.clone()).collect()
    }

    fn activate(&mut self, name: &str) -> bool {
        match self.recording.actions.iter().position(|a| a.clip.name == name) {
            Some(index) => {
                self.active = Some(index);
                self.evaluate();
                true
            }
            None => false,
        }
    }
}
