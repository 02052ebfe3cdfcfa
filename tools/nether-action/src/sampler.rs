//! Drives the host through an action's significant frames
//!
//! Owns the frame-stepping loop around [`Action`]: every significant frame is
//! visited in order, its pose recorded, and the host restored afterwards,
//! also when sampling fails.

use std::sync::Arc;

use crate::action::Action;
use crate::armature::Armature;
use crate::clip::Clip;
use crate::config::SamplerConfig;
use crate::error::ActionError;
use crate::host::{ActionHost, SceneHost};

/// Sample one clip. The clip must already be active in `host`.
///
/// Returns the culled action; check [`Action::is_empty`] before exporting.
pub fn sample_action<H: SceneHost>(
    host: &mut H,
    clip: &Clip,
    armature: Arc<Armature>,
    config: &SamplerConfig,
) -> Result<Action, ActionError> {
    let mut action = Action::new(clip, armature, &*host, config)?;
    let frames = match action.blender_frames() {
        Some(frames) => frames.to_vec(),
        None => return Ok(action),
    };

    for frame in frames {
        host.set_current_frame(frame);
        if let Err(err) = action.add_pose(&host.pose().bones) {
            action.reset(host);
            return Err(err);
        }
    }

    action.reset(host);
    action.cull()?;
    Ok(action)
}

/// Outcome of sampling every clip of a host
#[derive(Debug, Default)]
pub struct SampledBatch {
    /// Actions with exportable channels
    pub actions: Vec<Action>,
    /// Clips without keyframes or significant channels
    pub discarded: Vec<String>,
    /// Clips that failed, with the reason
    pub failed: Vec<ActionError>,
}

impl SampledBatch {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sample every clip of `host`, or only those accepted by `filter`.
///
/// A failing clip is reported in [`SampledBatch::failed`] and does not stop
/// the batch.
pub fn sample_actions<H: ActionHost>(
    host: &mut H,
    armature: Arc<Armature>,
    config: &SamplerConfig,
    filter: impl Fn(&Clip) -> bool,
) -> SampledBatch {
    let mut batch = SampledBatch::default();

    for clip in host.clips().into_iter().filter(|c| filter(c)) {
        if !host.activate(&clip.name) {
            tracing::warn!("Host refused to activate action '{}'", clip.name);
            continue;
        }
        match sample_action(host, &clip, Arc::clone(&armature), config) {
            Ok(action) if action.is_empty() => {
                tracing::info!("Discarding action '{}': nothing to export", clip.name);
                batch.discarded.push(clip.name);
            }
            Ok(action) => {
                tracing::info!(
                    "Sampled action '{}': {} channels, {} frames",
                    action.name(),
                    action.channels().unwrap_or(0),
                    action.frame_count()
                );
                batch.actions.push(action);
            }
            Err(err) => {
                tracing::warn!("Skipping action '{}' ({} error): {}", clip.name, err.kind(), err);
                batch.failed.push(err);
            }
        }
    }

    batch
}
