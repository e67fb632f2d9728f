//! Physics housekeeping systems.

use bevy::prelude::*;

use crate::bevy::rapier_plugin::PhysicsExternalForce;
use crate::bevy::StackGameState;

/// System to advance the game frame counter, once per fixed step.
pub fn advance_game_frame(mut game_state: ResMut<StackGameState>) {
    game_state.frame += 1;
}

/// System to clear external forces at the start of each physics step.
pub fn clear_external_forces(mut forces: Query<&mut PhysicsExternalForce>) {
    for mut force in forces.iter_mut() {
        force.force = Vec2::ZERO;
        force.torque = 0.0;
    }
}
