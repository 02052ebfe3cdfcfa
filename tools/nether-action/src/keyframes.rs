//! Significant-frame detection
//!
//! Collects the frames that carry real keyframes, then adds synthetic
//! entries for the authored start and end frame so the playback range is
//! always bounded by samples.

use crate::clip::{Clip, Interpolation};
use crate::error::ActionError;

/// Result of scanning a clip's representative curves
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeScan {
    /// Interpolation shared by all representative curves, if any were found
    pub interpolation: Option<Interpolation>,
    /// Distinct valid keyframe positions, ascending
    pub frames: Vec<f32>,
}

/// Scan the clip's location and rotation curves.
///
/// Fails if the representative curves disagree on interpolation. Keyframes
/// before frame 1 are discarded with a warning.
pub fn scan_clip(clip: &Clip) -> Result<KeyframeScan, ActionError> {
    let mut interpolation: Option<Interpolation> = None;
    let mut frames = Vec::new();

    for channel in &clip.channels {
        for curve in channel.curves.iter().filter(|c| c.target.is_representative()) {
            match interpolation {
                None => interpolation = Some(curve.interpolation),
                Some(first) if first != curve.interpolation => {
                    return Err(ActionError::MixedInterpolation {
                        action: clip.name.clone(),
                        first,
                        second: curve.interpolation,
                    });
                }
                Some(_) => {}
            }

            for point in &curve.points {
                if point.frame < 1.0 || point.frame.is_nan() {
                    tracing::warn!(
                        "Discarding off-the-chart keyframe at frame {} from action '{}'",
                        point.frame,
                        clip.name
                    );
                    continue;
                }
                frames.push(point.frame);
            }
        }
    }

    frames.sort_by(f32::total_cmp);
    frames.dedup();

    Ok(KeyframeScan {
        interpolation,
        frames,
    })
}

/// Time in seconds of a 1-based host frame
#[inline]
pub fn frame_to_time(frame: f32, frame_rate: f32) -> f32 {
    (frame - 1.0) / frame_rate
}

/// Significant frames of an action and their playback range
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Host frame numbers, strictly ascending
    pub blender_frames: Vec<f32>,
    /// Seconds, one per entry of `blender_frames`
    pub keyframe_times: Vec<f32>,
    /// Index of the authored start frame
    pub start_frame: usize,
    /// Index of the authored end frame
    pub end_frame: usize,
}

impl Timeline {
    /// Merge keyframe positions with the authored `[start, end]` range.
    ///
    /// `keyframes` must be ascending and distinct. A boundary that does not
    /// coincide with a keyframe is inserted before the first keyframe past
    /// it. An end frame past the last keyframe is clamped to the last
    /// keyframe; playback never extrapolates beyond the keyframe data.
    pub fn build(
        action: &str,
        keyframes: &[f32],
        start: f32,
        end: f32,
        frame_rate: f32,
    ) -> Result<Self, ActionError> {
        let mut blender_frames: Vec<f32> = Vec::with_capacity(keyframes.len() + 2);
        let mut start_frame = None;
        let mut end_frame = None;

        for &frame in keyframes {
            if start_frame.is_none() {
                if start == frame {
                    start_frame = Some(blender_frames.len());
                } else if start < frame {
                    start_frame = Some(blender_frames.len());
                    blender_frames.push(start);
                }
            }
            if end_frame.is_none() {
                if end == frame {
                    end_frame = Some(blender_frames.len());
                } else if end < frame {
                    // start == end, both inserted just above
                    if blender_frames.last() == Some(&end) {
                        end_frame = Some(blender_frames.len() - 1);
                    } else {
                        end_frame = Some(blender_frames.len());
                        blender_frames.push(end);
                    }
                }
            }
            blender_frames.push(frame);
        }

        let start_frame = start_frame.ok_or_else(|| ActionError::StartAfterKeyframes {
            action: action.to_string(),
            start,
        })?;
        let end_frame = end_frame.unwrap_or(blender_frames.len() - 1);

        let keyframe_times = blender_frames
            .iter()
            .map(|&frame| frame_to_time(frame, frame_rate))
            .collect();

        Ok(Self {
            blender_frames,
            keyframe_times,
            start_frame,
            end_frame,
        })
    }

    pub fn len(&self) -> usize {
        self.blender_frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blender_frames.is_empty()
    }
}
