use {
    crate::{
        cast::{AreaStrike, Cast, CastContext},
        projectile_skill::{MultiProjectile, ProjectileSkill},
    },
    bevy::prelude::*,
    skill_components::{ResourcePool, SkillIndex, SkillState},
};

/// What an active skill does when cast.
#[derive(Debug, Clone)]
pub enum ActiveEffect {
    Projectile(ProjectileSkill),
    /// Strikes every hostile within `radius` of the caster
    Retaliation { radius: f32, damage: f32 },
}

impl ActiveEffect {
    /// Fan-out capability, if this effect fires projectiles.
    pub fn multi_projectile(&self) -> Option<&dyn MultiProjectile> {
        match self {
            Self::Projectile(projectile) => Some(projectile),
            Self::Retaliation { .. } => None,
        }
    }

    pub fn multi_projectile_mut(&mut self) -> Option<&mut dyn MultiProjectile> {
        match self {
            Self::Projectile(projectile) => Some(projectile),
            Self::Retaliation { .. } => None,
        }
    }
}

/// A skill that can be cast. Remembers which supports were added to it.
#[derive(Debug, Clone)]
pub struct ActiveSkill {
    supports: Vec<SkillIndex>,
    pub effect: ActiveEffect,
}

impl ActiveSkill {
    pub fn new(effect: ActiveEffect) -> Self {
        Self {
            supports: Vec::new(),
            effect,
        }
    }

    pub fn supports(&self) -> &[SkillIndex] {
        &self.supports
    }

    pub fn has_support(&self, support: SkillIndex) -> bool {
        self.supports.contains(&support)
    }

    /// Returns false when the support was already recorded.
    pub(crate) fn record_support(&mut self, support: SkillIndex) -> bool {
        if self.has_support(support) {
            return false;
        }
        self.supports.push(support);
        true
    }

    /// Casts the skill.
    ///
    /// Order: readiness, aim resolution, payment, effect, cooldown. A cast that
    /// cannot resolve its aim spends nothing and leaves the cooldown untouched.
    pub fn cast(
        &self,
        state: &mut SkillState,
        ctx: &CastContext,
        pool: Option<&mut dyn ResourcePool>,
    ) -> Option<Cast> {
        if !state.is_ready() {
            debug!(skill = %state.name, cooldown = state.current_cooldown(), "skill on cooldown");
            return None;
        }

        let mut cast = Cast::new(state.name.clone(), ctx);
        match &self.effect {
            ActiveEffect::Projectile(projectile) => {
                let Some(direction) = projectile.aim_direction(ctx) else {
                    debug!(skill = %state.name, "no aim direction, cast skipped");
                    return None;
                };
                if !state.try_pay(pool) {
                    debug!(skill = %state.name, cost = state.mana_cost, "not enough mana");
                    return None;
                }
                cast.projectiles = projectile.create_projectiles(ctx.caster, direction);
                cast.strikes.extend(projectile.impact_strike(ctx));
            }
            ActiveEffect::Retaliation { radius, damage } => {
                if !state.try_pay(pool) {
                    debug!(skill = %state.name, cost = state.mana_cost, "not enough mana");
                    return None;
                }
                cast.strikes.push(AreaStrike {
                    center: ctx.origin,
                    radius: *radius,
                    damage: *damage,
                    dot_damage: 0.0,
                    dot_duration: 0.0,
                    targets: ctx.hostiles_within(ctx.origin, *radius),
                });
            }
        }

        state.start_cooldown();
        Some(cast)
    }

    pub fn projectile(&self) -> Option<&ProjectileSkill> {
        match &self.effect {
            ActiveEffect::Projectile(projectile) => Some(projectile),
            ActiveEffect::Retaliation { .. } => None,
        }
    }

    pub fn projectile_mut(&mut self) -> Option<&mut ProjectileSkill> {
        match &mut self.effect {
            ActiveEffect::Projectile(projectile) => Some(projectile),
            ActiveEffect::Retaliation { .. } => None,
        }
    }
}
