//! Channel culling
//!
//! Frames are never culled; the animator placed them on purpose. Channels
//! (bones) whose samples never leave the rest pose are dropped.

use glam::{Quat, Vec3};
use hashbrown::{HashMap, HashSet};

use crate::config::SamplerConfig;
use crate::math::{is_identity_rotation, is_zero};

/// Bones with at least one non-identity rotation sample
pub fn used_rotation_channels(
    rots: &HashMap<String, Vec<Quat>>,
    config: &SamplerConfig,
) -> HashSet<String> {
    rots.iter()
        .filter(|(_, samples)| {
            samples
                .iter()
                .any(|q| !is_identity_rotation(*q, config.rotation_tolerance))
        })
        .map(|(name, _)| name.clone())
        .collect()
}

/// Bones with at least one non-zero location sample
pub fn used_location_channels(
    locs: &HashMap<String, Vec<Vec3>>,
    config: &SamplerConfig,
) -> HashSet<String> {
    locs.iter()
        .filter(|(_, samples)| {
            samples
                .iter()
                .any(|v| !is_zero(*v, config.location_tolerance))
        })
        .map(|(name, _)| name.clone())
        .collect()
}

/// Bones to drop: unused for both rotation and location.
///
/// A raw location change can show up as a derived rotation and the other
/// way round, so a channel is only dropped as a whole.
pub fn unused_channels(
    rots: &HashMap<String, Vec<Quat>>,
    locs: &HashMap<String, Vec<Vec3>>,
    config: &SamplerConfig,
) -> Vec<String> {
    let used_rots = used_rotation_channels(rots, config);
    let used_locs = used_location_channels(locs, config);
    let mut unused: Vec<String> = rots
        .keys()
        .filter(|name| !used_rots.contains(*name) && !used_locs.contains(*name))
        .cloned()
        .collect();
    unused.sort_unstable();
    unused
}
