//! Sprocket rotation that puts a tooth gap under the seated rollers

use super::rollers::PlacedRoller;
use chainkit_core::ChainError;

/// Rotation in degrees for every sprocket so that a tooth gap, not a tooth
/// tip, faces the first roller seated on it.
pub(crate) fn rotation_offsets(
    rollers: &[PlacedRoller],
    teeth: &[u32],
) -> Result<Vec<f64>, ChainError> {
    let mut first_angle: Vec<Option<f64>> = vec![None; teeth.len()];
    for contact in rollers.iter().filter_map(|r| r.contact) {
        first_angle[contact.sprocket].get_or_insert(contact.angle);
    }

    first_angle
        .into_iter()
        .zip(teeth)
        .enumerate()
        .map(|(sprocket, (angle, &teeth))| {
            angle
                .map(|a| a + 180.0 / teeth as f64)
                .ok_or(ChainError::NoContactRoller { sprocket })
        })
        .collect()
}
