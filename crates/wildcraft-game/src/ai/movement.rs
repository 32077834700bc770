//! Straight-line steering helpers (no obstacle avoidance).

/// Velocity `(vx, vz)` that moves from `(current_x, current_z)` toward
/// `(goal_x, goal_z)` at `speed` units/second.
pub fn move_toward(current_x: f32, current_z: f32, goal_x: f32, goal_z: f32, speed: f32) -> (f32, f32) {
    let dx = goal_x - current_x;
    let dz = goal_z - current_z;
    let dist = (dx * dx + dz * dz).sqrt();

    if dist < 0.01 {
        return (0.0, 0.0);
    }

    (dx / dist * speed, dz / dist * speed)
}

/// Velocity `(vx, vz)` that moves directly away from `(threat_x, threat_z)`.
///
/// When standing on the threat, `fallback_facing` picks the direction.
pub fn move_away(
    current_x: f32,
    current_z: f32,
    threat_x: f32,
    threat_z: f32,
    speed: f32,
    fallback_facing: f32,
) -> (f32, f32) {
    let dx = current_x - threat_x;
    let dz = current_z - threat_z;
    let dist = (dx * dx + dz * dz).sqrt();

    if dist < 0.01 {
        return (fallback_facing.sin() * speed, fallback_facing.cos() * speed);
    }

    (dx / dist * speed, dz / dist * speed)
}

/// Facing angle (radians) looking from one position toward another.
///
/// Convention: 0 faces +Z, `PI / 2` faces +X.
pub fn facing_toward(from_x: f32, from_z: f32, to_x: f32, to_z: f32) -> f32 {
    (to_x - from_x).atan2(to_z - from_z)
}

/// Facing angle of a velocity vector, or `None` when standing still.
pub fn facing_of(vx: f32, vz: f32) -> Option<f32> {
    if vx.abs() < 1e-4 && vz.abs() < 1e-4 {
        None
    } else {
        Some(vx.atan2(vz))
    }
}

/// Distance between two positions in the XZ plane.
pub fn distance_xz(x1: f32, z1: f32, x2: f32, z2: f32) -> f32 {
    let dx = x2 - x1;
    let dz = z2 - z1;
    (dx * dx + dz * dz).sqrt()
}

/// Euclidean distance between two 3D points.
pub fn distance_3d(a: (f32, f32, f32), b: (f32, f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let dz = b.2 - a.2;
    (dx * dx + dy * dy + dz * dz).sqrt()
}
