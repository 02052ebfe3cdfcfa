//! nether-action library
//!
//! Samples armature pose animation ("actions") out of an authoring host and
//! reduces it to per-bone translation, rotation and matrix tracks ready for
//! export. Bones that never move are culled.

pub mod action;
pub mod armature;
pub mod clip;
pub mod config;
pub mod cull;
pub mod error;
pub mod hierarchy;
pub mod host;
pub mod keyframes;
pub mod math;
pub mod sampler;
pub mod scene;

// Re-export the sampler and its inputs
pub use action::{Action, ActionState};
pub use armature::{Armature, ArmatureBone, Pose, PoseBone, PoseBones};
pub use clip::{ChannelCurves, Clip, ControlPoint, Curve, CurveTarget, Interpolation};
pub use config::SamplerConfig;
pub use error::{ActionError, ErrorKind};
pub use host::{ActionHost, SceneHost};
pub use keyframes::Timeline;
pub use sampler::{sample_action, sample_actions, SampledBatch};

// Re-export the recorded scene host
pub use scene::{RecordedScene, SceneRecording};
