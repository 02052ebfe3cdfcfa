//! Armature hierarchy and live pose state
//!
//! The armature is the static skeleton (who is whose child). The pose is the
//! per-frame state the host evaluates for the current frame.

use glam::Mat4;
use hashbrown::HashMap;

/// A bone of the static skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct ArmatureBone {
    pub name: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

/// Static bone hierarchy of one armature, keyed by bone name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Armature {
    bones: HashMap<String, ArmatureBone>,
}

impl Armature {
    /// Build from `(name, parent)` pairs. Children keep the input order.
    pub fn from_parents<'a>(bones: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> Self {
        let mut map: HashMap<String, ArmatureBone> = HashMap::new();
        let mut order = Vec::new();
        for (name, parent) in bones {
            order.push((name.to_string(), parent.map(str::to_string)));
            map.insert(
                name.to_string(),
                ArmatureBone {
                    name: name.to_string(),
                    parent: parent.map(str::to_string),
                    children: Vec::new(),
                },
            );
        }
        for (name, parent) in order {
            let Some(parent) = parent else { continue };
            match map.get_mut(&parent) {
                Some(parent_bone) => parent_bone.children.push(name),
                None => tracing::warn!("Bone '{}' has unknown parent '{}'", name, parent),
            }
        }
        Self { bones: map }
    }

    pub fn bone(&self, name: &str) -> Option<&ArmatureBone> {
        self.bones.get(name)
    }

    /// Child bone names, empty for leaves and unknown bones
    pub fn children(&self, name: &str) -> &[String] {
        self.bones
            .get(name)
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bones(&self) -> impl Iterator<Item = &ArmatureBone> {
        self.bones.values()
    }
}

/// Live, per-frame state of one bone
#[derive(Debug, Clone, PartialEq)]
pub struct PoseBone {
    /// Armature-space (world) matrix of the posed bone
    pub pose_matrix: Mat4,
    /// Pose offset relative to the rest pose; identity at rest
    pub local_matrix: Mat4,
    pub parent: Option<String>,
}

impl PoseBone {
    pub fn new(pose_matrix: Mat4, local_matrix: Mat4, parent: Option<String>) -> Self {
        Self {
            pose_matrix,
            local_matrix,
            parent,
        }
    }
}

/// Pose bones keyed by bone name
pub type PoseBones = HashMap<String, PoseBone>;

/// The host's current pose of an armature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    pub bones: PoseBones,
}

impl Pose {
    /// Put every bone back into its rest pose
    pub fn zero(&mut self) {
        for bone in self.bones.values_mut() {
            bone.local_matrix = Mat4::IDENTITY;
        }
    }
}
