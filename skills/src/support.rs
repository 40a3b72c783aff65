use {
    crate::skill::Skill,
    bevy::prelude::*,
    skill_components::{SkillIndex, SkillState, TriggerType},
};

/// Damage taken since a damage-reactive support last fired.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageAccumulator {
    accumulated: f32,
    pub threshold: f32,
}

impl DamageAccumulator {
    pub fn new(threshold: f32) -> Self {
        Self {
            accumulated: 0.0,
            threshold,
        }
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn add(&mut self, damage: f32) {
        self.accumulated += damage;
    }

    pub fn is_armed(&self) -> bool {
        self.accumulated >= self.threshold
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[derive(Debug, Clone)]
pub enum SupportEffect {
    /// Casts every linked skill once enough damage was taken
    CastOnDamageTaken(DamageAccumulator),
    /// Linked projectile skills fire in a fan
    MultipleProjectiles,
}

/// How a skill reacts to its owner taking damage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageReaction {
    None,
    /// A support fired; cast these linked skills if they are ready
    TriggerLinked(Vec<SkillIndex>),
    /// The skill itself fires on hit
    TriggerSelf,
}

/// A modifier linked to one or more active skills.
#[derive(Debug, Clone)]
pub struct SupportSkill {
    linked: Vec<SkillIndex>,
    pub effect: SupportEffect,
}

impl SupportSkill {
    pub fn new(effect: SupportEffect) -> Self {
        Self {
            linked: Vec::new(),
            effect,
        }
    }

    pub fn linked(&self) -> &[SkillIndex] {
        &self.linked
    }

    pub fn is_linked_to(&self, skill: SkillIndex) -> bool {
        self.linked.contains(&skill)
    }

    pub fn accumulator(&self) -> Option<&DamageAccumulator> {
        match &self.effect {
            SupportEffect::CastOnDamageTaken(accumulator) => Some(accumulator),
            SupportEffect::MultipleProjectiles => None,
        }
    }

    /// Whether `candidate` may be modified by this support.
    pub fn can_link_skill(&self, candidate: &Skill) -> bool {
        if candidate.state.trigger_type != TriggerType::Active || !candidate.is_active() {
            return false;
        }
        match &self.effect {
            SupportEffect::CastOnDamageTaken(_) => {
                !candidate.state.has_reservation && !candidate.state.is_channeling
            }
            SupportEffect::MultipleProjectiles => candidate.multi_projectile().is_some(),
        }
    }

    /// Links `candidate`, found at `index`, and applies structural modifiers to it.
    ///
    /// A rejected candidate is left untouched and `false` is returned.
    pub fn link_skill(&mut self, index: SkillIndex, candidate: &mut Skill) -> bool {
        if !self.can_link_skill(candidate) {
            debug!(skill = %candidate.state.name, "support rejected link");
            return false;
        }
        if self.is_linked_to(index) {
            return true;
        }

        self.linked.push(index);
        if let SupportEffect::MultipleProjectiles = self.effect
            && let Some(fan) = candidate.multi_projectile_mut()
        {
            fan.enable_multi_projectiles();
        }
        true
    }

    pub fn on_damage_taken(&mut self, state: &mut SkillState, damage: f32) -> DamageReaction {
        let SupportEffect::CastOnDamageTaken(accumulator) = &mut self.effect else {
            return DamageReaction::None;
        };

        accumulator.add(damage);
        trace!(
            skill = %state.name,
            accumulated = accumulator.accumulated(),
            threshold = accumulator.threshold,
            "damage accumulated"
        );
        if !accumulator.is_armed() || !state.is_ready() {
            return DamageReaction::None;
        }

        accumulator.reset();
        state.start_cooldown();
        info!(skill = %state.name, linked = self.linked.len(), "support fired");
        DamageReaction::TriggerLinked(self.linked.clone())
    }

    pub fn initialize(&mut self) {
        if let SupportEffect::CastOnDamageTaken(accumulator) = &mut self.effect {
            accumulator.reset();
        }
    }
}
