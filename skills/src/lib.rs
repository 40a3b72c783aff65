pub mod active;
pub mod cast;
pub mod loadout;
pub mod projectile_skill;
pub mod skill;
pub mod slot;
pub mod support;
pub mod systems;


pub use {
    active::{ActiveEffect, ActiveSkill},
    cast::{AreaStrike, Cast, CastContext},
    loadout::{LinkOutcome, LoadoutError},
    projectile_skill::{MultiProjectile, Multishot, ProjectileSkill},
    skill::{Skill, SkillKind},
    slot::SkillSlot,
    support::{DamageAccumulator, DamageReaction, SupportEffect, SupportSkill},
};

use {
    bevy::prelude::*, skill_events::SkillEventsPlugin, skills_assets::SkillsAssetsPlugin,
    system_schedule::GameSchedule,
};

pub struct SkillsPlugin;

impl Plugin for SkillsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((SkillsAssetsPlugin, SkillEventsPlugin))
            .add_systems(
                Update,
                (
                    systems::build_pending_loadouts,
                    systems::tick_skill_slots,
                    systems::regenerate_mana,
                )
                    .in_set(GameSchedule::FrameStart),
            )
            .add_observer(systems::handle_cast_request)
            .add_observer(systems::handle_caster_damaged);
    }
}
