use {
    crate::{
        cast::{Cast, CastContext},
        loadout::{LinkOutcome, LoadoutError},
        skill::Skill,
        support::DamageReaction,
    },
    bevy::prelude::*,
    skill_components::{ResourcePool, SkillIndex},
};

/// Fixed set of skills owned by a caster.
///
/// The only entry points the rest of the game uses are `trigger_skill` and
/// `on_hit`; support links are wired once when the slot is built.
#[derive(Component, Debug, Clone, Default)]
pub struct SkillSlot {
    skills: Vec<Option<Skill>>,
}

/// Reborrows the caster's pool for a single cast.
fn reborrow<'a>(
    pool: &'a mut Option<&mut dyn ResourcePool>,
) -> Option<&'a mut dyn ResourcePool> {
    pool.as_mut().map(|pool| &mut **pool as &mut dyn ResourcePool)
}

impl SkillSlot {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            skills: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.skills.len()
    }

    pub fn equip(&mut self, index: usize, skill: Skill) -> Result<(), LoadoutError> {
        let capacity = self.capacity();
        let entry = self
            .skills
            .get_mut(index)
            .ok_or(LoadoutError::SlotOutOfRange { index, capacity })?;
        *entry = Some(skill);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Skill> {
        self.skills.get_mut(index).and_then(Option::as_mut)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Skill)> {
        self.skills
            .iter()
            .enumerate()
            .filter_map(|(index, skill)| skill.as_ref().map(|skill| (index, skill)))
    }

    pub fn initialize(&mut self) {
        for skill in self.skills.iter_mut().flatten() {
            skill.initialize();
        }
    }

    pub fn update(&mut self, delta: f32) {
        for skill in self.skills.iter_mut().flatten() {
            skill.update(delta);
        }
    }

    /// Links the support in slot `support` to the active skill in slot `active`.
    ///
    /// The active side records the support even when the support rejects the
    /// skill; only the support side decides whether the link has any effect.
    pub fn add_support(
        &mut self,
        active: usize,
        support: usize,
    ) -> Result<LinkOutcome, LoadoutError> {
        if active == support {
            return Err(LoadoutError::SelfLink(active));
        }
        let capacity = self.capacity();
        for index in [active, support] {
            if index >= capacity {
                return Err(LoadoutError::SlotOutOfRange { index, capacity });
            }
        }

        let Some(mut support_skill) = self.skills[support].take() else {
            return Err(LoadoutError::EmptySlot(support));
        };
        let outcome = self.link(active, support, &mut support_skill);
        self.skills[support] = Some(support_skill);
        outcome
    }

    fn link(
        &mut self,
        active: usize,
        support: usize,
        support_skill: &mut Skill,
    ) -> Result<LinkOutcome, LoadoutError> {
        let name = support_skill.state.name.clone();
        let Some(support_kind) = support_skill.as_support_mut() else {
            return Err(LoadoutError::NotASupport {
                index: support,
                name,
            });
        };
        let Some(active_skill) = self.skills[active].as_mut() else {
            return Err(LoadoutError::EmptySlot(active));
        };
        let Some(active_kind) = active_skill.as_active_mut() else {
            return Err(LoadoutError::NotAnActive {
                index: active,
                name: active_skill.state.name.clone(),
            });
        };

        if !active_kind.record_support(SkillIndex(support)) {
            return Ok(LinkOutcome::AlreadyLinked);
        }

        if support_kind.link_skill(SkillIndex(active), active_skill) {
            info!(support = %name, skill = %active_skill.state.name, "support linked");
            Ok(LinkOutcome::Linked)
        } else {
            Ok(LinkOutcome::Rejected)
        }
    }

    /// Casts the skill in slot `index`. Empty, out-of-range and support slots are no-ops.
    pub fn trigger_skill(
        &mut self,
        index: usize,
        ctx: &CastContext,
        pool: Option<&mut dyn ResourcePool>,
    ) -> Option<Cast> {
        let capacity = self.capacity();
        let Some(skill) = self.get_mut(index) else {
            warn!(index, capacity, "no skill in slot");
            return None;
        };
        if skill.is_support() {
            debug!(skill = %skill.state.name, "support skills cannot be cast directly");
            return None;
        }
        let cast = skill.trigger(ctx, pool)?;
        info!(skill = %cast.skill, projectiles = cast.projectiles.len(), "skill cast");
        Some(cast)
    }

    /// Forwards damage taken by the owner to every skill.
    ///
    /// Supports that fire cast each linked skill that is ready on its own;
    /// skills still cooling down are skipped, not queued.
    pub fn on_hit(
        &mut self,
        damage: f32,
        ctx: &CastContext,
        mut pool: Option<&mut dyn ResourcePool>,
    ) -> Vec<Cast> {
        let mut casts = Vec::new();
        for index in 0..self.skills.len() {
            let Some(skill) = self.skills[index].as_mut() else {
                continue;
            };

            let targets = match skill.on_damage_taken(damage) {
                DamageReaction::None => continue,
                DamageReaction::TriggerSelf => vec![SkillIndex(index)],
                DamageReaction::TriggerLinked(linked) => linked,
            };

            for SkillIndex(target) in targets {
                let Some(linked) = self.get_mut(target) else {
                    continue;
                };
                if !linked.can_trigger(pool.as_deref()) {
                    debug!(skill = %linked.state.name, "linked skill not ready, skipped");
                    continue;
                }
                if let Some(cast) = linked.trigger(ctx, reborrow(&mut pool)) {
                    info!(skill = %cast.skill, damage, "skill cast on hit");
                    casts.push(cast);
                }
            }
        }
        casts
    }
}
