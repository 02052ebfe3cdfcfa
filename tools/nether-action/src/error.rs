//! Errors raised while sampling an action.
//!
//! Every error is fatal to the action being processed. Export pipelines are
//! expected to report the offending clip and move on to the next one.

use glam::Vec3;

/// Broad category of an [`ActionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Authored range or sampler settings are unusable
    Configuration,
    /// Clip uses animation features the exporter cannot represent
    UnsupportedAnimation,
    /// Authored range does not overlap the keyframe data
    Range,
    /// A sampled bone carries a transform the exporter cannot represent
    UnsupportedTransform,
    /// Caller fed the sampler inconsistent data or called it out of order
    InternalConsistency,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::UnsupportedAnimation => "unsupported animation",
            ErrorKind::Range => "range",
            ErrorKind::UnsupportedTransform => "unsupported transform",
            ErrorKind::InternalConsistency => "internal consistency",
        };
        f.write_str(name)
    }
}

/// Error type for action sampling
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Specified start frame for action '{action}' is after the specified end frame: {start} vs. {end}")]
    StartAfterEnd { action: String, start: f32, end: f32 },

    #[error("Frame rate must be set to a positive value before sampling action '{action}' (got {frame_rate:?})")]
    FrameRateUnset {
        action: String,
        frame_rate: Option<f32>,
    },

    #[error("Action '{action}' mixes interpolation types ({first:?} and {second:?}); this is not supported")]
    MixedInterpolation {
        action: String,
        first: crate::clip::Interpolation,
        second: crate::clip::Interpolation,
    },

    #[error("Start frame for action '{action}' is set to a frame after the end of the animation: {start}")]
    StartAfterKeyframes { action: String, start: f32 },

    #[error("Bone '{bone}' in action '{action}' has scale {scale}; remove bone scaling before export")]
    ScaledBone {
        action: String,
        bone: String,
        scale: Vec3,
    },

    #[error("Internal error: channel '{bone}' has no pose for a frame in action '{action}'")]
    MissingChannel { action: String, bone: String },

    #[error("Internal error: action '{action}' {reason}")]
    InvalidState { action: String, reason: &'static str },
}

impl ActionError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::StartAfterEnd { .. } | ActionError::FrameRateUnset { .. } => {
                ErrorKind::Configuration
            }
            ActionError::MixedInterpolation { .. } => ErrorKind::UnsupportedAnimation,
            ActionError::StartAfterKeyframes { .. } => ErrorKind::Range,
            ActionError::ScaledBone { .. } => ErrorKind::UnsupportedTransform,
            ActionError::MissingChannel { .. } | ActionError::InvalidState { .. } => {
                ErrorKind::InternalConsistency
            }
        }
    }

    /// Name of the action that failed
    pub fn action(&self) -> &str {
        match self {
            ActionError::StartAfterEnd { action, .. }
            | ActionError::FrameRateUnset { action, .. }
            | ActionError::MixedInterpolation { action, .. }
            | ActionError::StartAfterKeyframes { action, .. }
            | ActionError::ScaledBone { action, .. }
            | ActionError::MissingChannel { action, .. }
            | ActionError::InvalidState { action, .. } => action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Interpolation;

    #[test]
    fn test_error_kinds() {
        let err = ActionError::StartAfterEnd {
            action: "walk".into(),
            start: 10.0,
            end: 2.0,
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.action(), "walk");

        let err = ActionError::MixedInterpolation {
            action: "run".into(),
            first: Interpolation::Bezier,
            second: Interpolation::Linear,
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedAnimation);

        let err = ActionError::ScaledBone {
            action: "idle".into(),
            bone: "arm".into(),
            scale: Vec3::splat(1.3),
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedTransform);
        assert!(err.to_string().contains("arm"));
    }

    #[test]
    fn test_missing_channel_message() {
        let err = ActionError::MissingChannel {
            action: "wave".into(),
            bone: "hand.L".into(),
        };
        assert_eq!(err.kind(), ErrorKind::InternalConsistency);
        assert_eq!(
            err.to_string(),
            "Internal error: channel 'hand.L' has no pose for a frame in action 'wave'"
        );
    }
}
