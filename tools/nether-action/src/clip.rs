//! Clip data handed over by the authoring host
//!
//! A clip is a named set of per-bone channels, each holding the animation
//! curves of that bone. Control points carry host frame numbers, which are
//! 1-based and may be non-integral.

use serde::{Deserialize, Serialize};

/// Interpolation mode of an animation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Constant,
    Linear,
    Bezier,
}

/// Component of a bone transform driven by a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveTarget {
    LocX,
    LocY,
    LocZ,
    QuatW,
    QuatX,
    QuatY,
    QuatZ,
    SizeX,
    SizeY,
    SizeZ,
}

impl CurveTarget {
    /// Whether this curve stands in for its whole group.
    ///
    /// Location curves always come as a full X/Y/Z set and quaternion
    /// curves as a full W/X/Y/Z set, so one curve of each group is enough
    /// to learn the group's keyframes and interpolation.
    pub fn is_representative(self) -> bool {
        matches!(self, CurveTarget::LocX | CurveTarget::QuatW)
    }
}

/// One control point of a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Host frame number (1-based)
    pub frame: f32,
    pub value: f32,
}

/// A single animation curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub target: CurveTarget,
    pub interpolation: Interpolation,
    #[serde(default)]
    pub points: Vec<ControlPoint>,
}

/// Curves animating one bone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCurves {
    pub bone: String,
    #[serde(default)]
    pub curves: Vec<Curve>,
}

/// An authored animation clip applied to one armature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelCurves>,
}

impl Clip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
        }
    }

    /// Add a channel, builder style
    pub fn with_channel(mut self, channel: ChannelCurves) -> Self {
        self.channels.push(channel);
        self
    }

    /// Names of the bones this clip animates
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.bone.as_str())
    }
}

impl ChannelCurves {
    pub fn new(bone: impl Into<String>) -> Self {
        Self {
            bone: bone.into(),
            curves: Vec::new(),
        }
    }

    /// Add a curve keyed at `frames` (values are irrelevant to sampling)
    pub fn with_curve(
        mut self,
        target: CurveTarget,
        interpolation: Interpolation,
        frames: &[f32],
    ) -> Self {
        self.curves.push(Curve {
            target,
            interpolation,
            points: frames
                .iter()
                .map(|&frame| ControlPoint { frame, value: 0.0 })
                .collect(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_curves() {
        assert!(CurveTarget::LocX.is_representative());
        assert!(CurveTarget::QuatW.is_representative());
        assert!(!CurveTarget::LocY.is_representative());
        assert!(!CurveTarget::QuatX.is_representative());
        assert!(!CurveTarget::SizeX.is_representative());
    }

    #[test]
    fn test_channel_names() {
        let clip = Clip::new("walk")
            .with_channel(ChannelCurves::new("root"))
            .with_channel(ChannelCurves::new("spine"));
        let names: Vec<_> = clip.channel_names().collect();
        assert_eq!(names, vec!["root", "spine"]);
    }

    #[test]
    fn test_clip_from_json() {
        let json = r#"{
            "name": "wave",
            "channels": [{
                "bone": "arm",
                "curves": [{
                    "target": "QuatW",
                    "interpolation": "bezier",
                    "points": [{ "frame": 1.0, "value": 1.0 }, { "frame": 12.5, "value": 0.7 }]
                }]
            }]
        }"#;
        let clip: Clip = serde_json::from_str(json).unwrap();
        assert_eq!(clip.name, "wave");
        let curve = &clip.channels[0].curves[0];
        assert_eq!(curve.target, CurveTarget::QuatW);
        assert_eq!(curve.interpolation, Interpolation::Bezier);
        assert_eq!(curve.points[1].frame, 12.5);
    }
}
