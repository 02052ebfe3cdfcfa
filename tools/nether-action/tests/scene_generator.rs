//! Builds scene recordings for the integration tests
//!
//! The armature is a three bone chain (root -> spine -> head). Child joints
//! sit on their parent's origin, so a child only carries signal when it is
//! posed itself.

#![allow(dead_code)]

use glam::{Mat4, Vec3};
use nether_action::clip::{ChannelCurves, Clip, CurveTarget, Interpolation};
use nether_action::scene::{ActionRecord, BoneRecord, PoseBoneRecord, PoseRecord, SceneRecording};

pub const BONES: [&str; 3] = ["root", "spine", "head"];

pub fn bones() -> Vec<BoneRecord> {
    vec![
        BoneRecord {
            name: "root".into(),
            parent: None,
        },
        BoneRecord {
            name: "spine".into(),
            parent: Some("root".into()),
        },
        BoneRecord {
            name: "head".into(),
            parent: Some("spine".into()),
        },
    ]
}

/// Clip keying rotation of every bone at `keys`
pub fn clip(name: &str, keys: &[f32], interpolation: Interpolation) -> Clip {
    let mut clip = Clip::new(name);
    for bone in BONES {
        clip = clip.with_channel(
            ChannelCurves::new(bone)
                .with_curve(CurveTarget::QuatW, interpolation, keys)
                .with_curve(CurveTarget::QuatZ, interpolation, keys),
        );
    }
    clip
}

/// Pose at `frame`: root turned by `angle` around Z and scaled by `scale`
pub fn chain_pose(frame: f32, angle: f32, scale: f32) -> PoseRecord {
    let root_local = Mat4::from_rotation_z(angle) * Mat4::from_scale(Vec3::splat(scale));
    PoseRecord {
        frame,
        bones: vec![
            PoseBoneRecord {
                name: "root".into(),
                pose_matrix: root_local,
                local_matrix: root_local,
            },
            PoseBoneRecord {
                name: "spine".into(),
                pose_matrix: root_local,
                local_matrix: Mat4::IDENTITY,
            },
            PoseBoneRecord {
                name: "head".into(),
                pose_matrix: root_local,
                local_matrix: Mat4::IDENTITY,
            },
        ],
    }
}

/// Root turns a little more at every key
pub fn turning_action(name: &str, keys: &[f32], start: f32, end: f32) -> ActionRecord {
    ActionRecord {
        clip: clip(name, keys, Interpolation::Bezier),
        start_frame: start,
        end_frame: end,
        poses: keys
            .iter()
            .map(|&frame| chain_pose(frame, (frame - 1.0) * 0.1, 1.0))
            .collect(),
    }
}

/// Keyed, but nothing ever moves
pub fn still_action(name: &str) -> ActionRecord {
    ActionRecord {
        clip: clip(name, &[1.0, 4.0], Interpolation::Linear),
        start_frame: 1.0,
        end_frame: 4.0,
        poses: vec![chain_pose(1.0, 0.0, 1.0), chain_pose(4.0, 0.0, 1.0)],
    }
}

/// No curves at all
pub fn empty_action(name: &str) -> ActionRecord {
    ActionRecord {
        clip: Clip::new(name),
        start_frame: 1.0,
        end_frame: 10.0,
        poses: Vec::new(),
    }
}

/// Root is scaled by 1.3 at the second key
pub fn scaled_action(name: &str) -> ActionRecord {
    ActionRecord {
        clip: clip(name, &[1.0, 5.0], Interpolation::Bezier),
        start_frame: 1.0,
        end_frame: 5.0,
        poses: vec![chain_pose(1.0, 0.0, 1.0), chain_pose(5.0, 0.2, 1.3)],
    }
}

/// Pose lacks the head bone
pub fn missing_bone_action(name: &str) -> ActionRecord {
    let mut pose = chain_pose(1.0, 0.3, 1.0);
    pose.bones.retain(|b| b.name != "head");
    ActionRecord {
        clip: clip(name, &[1.0], Interpolation::Bezier),
        start_frame: 1.0,
        end_frame: 1.0,
        poses: vec![pose],
    }
}

/// Location keyed with bezier, rotation keyed linear
pub fn mixed_action(name: &str) -> ActionRecord {
    let clip = Clip::new(name).with_channel(
        ChannelCurves::new("root")
            .with_curve(CurveTarget::LocX, Interpolation::Bezier, &[1.0, 3.0])
            .with_curve(CurveTarget::QuatW, Interpolation::Linear, &[1.0, 3.0]),
    );
    ActionRecord {
        clip,
        start_frame: 1.0,
        end_frame: 3.0,
        poses: vec![chain_pose(1.0, 0.0, 1.0)],
    }
}

pub fn scene(actions: Vec<ActionRecord>) -> SceneRecording {
    SceneRecording {
        frames_per_second: 24.0,
        current_frame: 17.0,
        bones: bones(),
        actions,
    }
}
