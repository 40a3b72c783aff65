use bevy::prelude::*;

pub struct SkillEventsPlugin;

impl Plugin for SkillEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SkillCastRequested>()
            .register_type::<CasterDamaged>()
            .register_type::<SkillCast>();
    }
}

/// Request to cast the skill equipped in `slot` of the caster's `SkillSlot`.
#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct SkillCastRequested {
    pub caster: Entity,
    pub slot: usize,
}

impl Default for SkillCastRequested {
    fn default() -> Self {
        Self {
            caster: Entity::PLACEHOLDER,
            slot: 0,
        }
    }
}

/// A caster took damage. Forwarded to every skill in its slot.
#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct CasterDamaged {
    pub caster: Entity,
    pub amount: f32,
}

impl Default for CasterDamaged {
    fn default() -> Self {
        Self {
            caster: Entity::PLACEHOLDER,
            amount: 0.0,
        }
    }
}

/// Emitted after a skill was cast and its projectiles spawned (for VFX/Audio hooks)
#[derive(Event, Debug, Reflect)]
#[reflect(Default)]
pub struct SkillCast {
    pub caster: Entity,
    pub skill: String,
    pub projectiles: Vec<Entity>,
}

impl Default for SkillCast {
    fn default() -> Self {
        Self {
            caster: Entity::PLACEHOLDER,
            skill: String::new(),
            projectiles: Vec::new(),
        }
    }
}
