use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    /// Timers, cooldowns, resource regeneration, loadout wiring
    FrameStart,
    /// Input and AI turned into cast requests
    ResolveIntent,
    /// Projectile flight and collisions
    PerformAction,
    /// Damage over time, status effects
    Effect,
    /// Death bookkeeping
    FrameEnd,
}

pub struct SystemSchedulePlugin;

impl Plugin for SystemSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameSchedule::FrameStart,
                GameSchedule::ResolveIntent,
                GameSchedule::PerformAction,
                GameSchedule::Effect,
                GameSchedule::FrameEnd,
            )
                .chain(),
        );
    }
}
