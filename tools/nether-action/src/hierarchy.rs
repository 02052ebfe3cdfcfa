//! Parent-relative recomposition of sampled bone matrices
//!
//! The host reports armature-space matrices. Each root keeps its matrix;
//! every tracked descendant is rewritten relative to its nearest tracked
//! ancestor by pushing inverse corrections down the armature.

use glam::Mat4;
use hashbrown::{HashMap, HashSet};

use crate::armature::{Armature, PoseBones};

/// Rewrite one frame's matrices from world space to parent space.
///
/// `mats` holds the frame's matrix for every tracked bone. Roots are tracked
/// bones whose pose bone has no parent. Bones missing from `mats` are
/// skipped, but their children still receive the correction of the nearest
/// tracked ancestor.
pub fn make_parent_relative(
    mats: &mut HashMap<String, Mat4>,
    pose: &PoseBones,
    armature: &Armature,
) {
    let mut roots: Vec<&str> = mats
        .keys()
        .filter(|name| pose.get(*name).is_some_and(|bone| bone.parent.is_none()))
        .map(String::as_str)
        .collect();
    roots.sort_unstable();

    let mut stack: Vec<(String, Mat4)> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    for root in roots {
        visited.insert(root.to_string());
        let inv = mats[root].inverse();
        for child in armature.children(root) {
            stack.push((child.clone(), inv));
        }
    }

    while let Some((name, correction)) = stack.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        let next = match mats.get_mut(&name) {
            Some(mat) => {
                *mat = correction * *mat;
                mat.inverse() * correction
            }
            None => correction,
        };
        for child in armature.children(&name) {
            stack.push((child.clone(), next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armature::PoseBone;
    use glam::{Quat, Vec3};

    fn pose_for(armature: &Armature, world: &HashMap<String, Mat4>) -> PoseBones {
        world
            .iter()
            .map(|(name, mat)| {
                let parent = armature.bone(name).and_then(|b| b.parent.clone());
                (name.clone(), PoseBone::new(*mat, Mat4::IDENTITY, parent))
            })
            .collect()
    }

    fn chain() -> (Armature, HashMap<String, Mat4>, [Mat4; 3]) {
        let armature =
            Armature::from_parents([("root", None), ("mid", Some("root")), ("tip", Some("mid"))]);
        let locals = [
            Mat4::from_rotation_translation(Quat::from_rotation_z(0.3), Vec3::new(0.0, 1.0, 0.0)),
            Mat4::from_rotation_translation(Quat::from_rotation_x(-0.8), Vec3::new(0.0, 2.0, 0.0)),
            Mat4::from_rotation_translation(Quat::from_rotation_y(1.1), Vec3::new(0.5, 1.0, 0.0)),
        ];
        let world_mid = locals[0] * locals[1];
        let world_tip = world_mid * locals[2];
        let mut world = HashMap::new();
        world.insert("root".to_string(), locals[0]);
        world.insert("mid".to_string(), world_mid);
        world.insert("tip".to_string(), world_tip);
        (armature, world, locals)
    }

    #[test]
    fn test_chain_recovers_locals() {
        let (armature, world, locals) = chain();
        let pose = pose_for(&armature, &world);
        let mut mats = world.clone();
        make_parent_relative(&mut mats, &pose, &armature);

        assert!(mats["root"].abs_diff_eq(locals[0], 1e-5));
        assert!(mats["mid"].abs_diff_eq(locals[1], 1e-5));
        assert!(mats["tip"].abs_diff_eq(locals[2], 1e-5));
    }

    #[test]
    fn test_untracked_bone_passes_correction_through() {
        let (armature, world, locals) = chain();
        let pose = pose_for(&armature, &world);
        let mut mats = world.clone();
        mats.remove("mid");
        make_parent_relative(&mut mats, &pose, &armature);

        // tip is now relative to root, its nearest tracked ancestor
        assert!(mats["tip"].abs_diff_eq(locals[1] * locals[2], 1e-5));
        assert!(!mats.contains_key("mid"));
    }

    #[test]
    fn test_siblings_share_parent_correction() {
        let armature = Armature::from_parents([
            ("root", None),
            ("a", Some("root")),
            ("b", Some("root")),
        ]);
        let root = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
        let a = Mat4::from_rotation_y(0.4);
        let b = Mat4::from_translation(Vec3::Z);
        let mut world = HashMap::new();
        world.insert("root".to_string(), root);
        world.insert("a".to_string(), root * a);
        world.insert("b".to_string(), root * b);
        let pose = pose_for(&armature, &world);

        let mut mats = world.clone();
        make_parent_relative(&mut mats, &pose, &armature);
        assert!(mats["a"].abs_diff_eq(a, 1e-5));
        assert!(mats["b"].abs_diff_eq(b, 1e-5));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let names: Vec<String> = (0..500).map(|i| format!("bone{i}")).collect();
        let armature = Armature::from_parents(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), (i > 0).then(|| names[i - 1].as_str()))),
        );
        let step = Mat4::from_translation(Vec3::new(0.0, 0.01, 0.0));
        let mut world = HashMap::new();
        let mut acc = Mat4::IDENTITY;
        for name in &names {
            acc *= step;
            world.insert(name.clone(), acc);
        }
        let pose = pose_for(&armature, &world);
        let mut mats = world.clone();
        make_parent_relative(&mut mats, &pose, &armature);
        assert!(mats["bone499"].abs_diff_eq(step, 1e-3));
    }
}
