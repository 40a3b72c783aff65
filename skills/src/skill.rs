use {
    crate::{
        active::{ActiveEffect, ActiveSkill},
        cast::{Cast, CastContext},
        projectile_skill::{MultiProjectile, ProjectileSkill},
        support::{DamageAccumulator, DamageReaction, SupportEffect, SupportSkill},
    },
    skill_components::{ResourcePool, SkillState, TriggerType},
    skills_assets::{SkillDefinition, SkillKindDefinition},
};

#[derive(Debug, Clone)]
pub enum SkillKind {
    Active(ActiveSkill),
    Support(SupportSkill),
}

/// A skill instance owned by a `SkillSlot`.
#[derive(Debug, Clone)]
pub struct Skill {
    pub state: SkillState,
    pub kind: SkillKind,
}

impl Skill {
    pub fn active(state: SkillState, effect: ActiveEffect) -> Self {
        Self {
            state,
            kind: SkillKind::Active(ActiveSkill::new(effect)),
        }
    }

    pub fn support(state: SkillState, effect: SupportEffect) -> Self {
        Self {
            state,
            kind: SkillKind::Support(SupportSkill::new(effect)),
        }
    }

    pub fn from_definition(definition: &SkillDefinition) -> Self {
        let base = |trigger_type| {
            SkillState::new(definition.display_name.clone(), trigger_type)
                .with_description(definition.description.clone())
                .with_cooldown(definition.cooldown_secs)
                .with_mana_cost(definition.mana_cost)
                .with_reservation(definition.has_reservation)
                .with_channeling(definition.is_channeling)
        };

        match &definition.kind {
            SkillKindDefinition::Projectile {
                projectile,
                aim,
                multishot,
                impact,
            } => Self::active(
                base(TriggerType::Active),
                ActiveEffect::Projectile(
                    ProjectileSkill::new(projectile.clone())
                        .with_aim(*aim)
                        .with_multishot((*multishot).into())
                        .with_impact(*impact),
                ),
            ),
            SkillKindDefinition::Retaliation { radius, damage } => Self::active(
                base(TriggerType::OnHit).passive(),
                ActiveEffect::Retaliation {
                    radius: *radius,
                    damage: *damage,
                },
            ),
            SkillKindDefinition::CastOnDamageTaken { threshold } => Self::support(
                base(TriggerType::Support),
                SupportEffect::CastOnDamageTaken(DamageAccumulator::new(*threshold)),
            ),
            SkillKindDefinition::MultipleProjectiles => Self::support(
                base(TriggerType::Support).passive(),
                SupportEffect::MultipleProjectiles,
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn is_active(&self) -> bool {
        matches!(self.kind, SkillKind::Active(_))
    }

    pub fn is_support(&self) -> bool {
        matches!(self.kind, SkillKind::Support(_))
    }

    pub fn as_active(&self) -> Option<&ActiveSkill> {
        match &self.kind {
            SkillKind::Active(active) => Some(active),
            SkillKind::Support(_) => None,
        }
    }

    pub fn as_active_mut(&mut self) -> Option<&mut ActiveSkill> {
        match &mut self.kind {
            SkillKind::Active(active) => Some(active),
            SkillKind::Support(_) => None,
        }
    }

    pub fn as_support(&self) -> Option<&SupportSkill> {
        match &self.kind {
            SkillKind::Support(support) => Some(support),
            SkillKind::Active(_) => None,
        }
    }

    pub fn as_support_mut(&mut self) -> Option<&mut SupportSkill> {
        match &mut self.kind {
            SkillKind::Support(support) => Some(support),
            SkillKind::Active(_) => None,
        }
    }

    /// Fan-out capability, present on every skill that fires projectiles.
    pub fn multi_projectile(&self) -> Option<&dyn MultiProjectile> {
        self.as_active()
            .and_then(|active| active.effect.multi_projectile())
    }

    pub fn multi_projectile_mut(&mut self) -> Option<&mut dyn MultiProjectile> {
        self.as_active_mut()
            .and_then(|active| active.effect.multi_projectile_mut())
    }

    pub fn initialize(&mut self) {
        self.state.initialize();
        if let SkillKind::Support(support) = &mut self.kind {
            support.initialize();
        }
    }

    pub fn update(&mut self, delta: f32) {
        self.state.update(delta);
    }

    pub fn can_trigger(&self, pool: Option<&dyn ResourcePool>) -> bool {
        self.state.can_trigger(pool)
    }

    /// Casts an active skill. Supports are never cast directly.
    pub fn trigger(
        &mut self,
        ctx: &CastContext,
        pool: Option<&mut dyn ResourcePool>,
    ) -> Option<Cast> {
        match &self.kind {
            SkillKind::Active(active) => active.cast(&mut self.state, ctx, pool),
            SkillKind::Support(_) => None,
        }
    }

    pub fn on_damage_taken(&mut self, damage: f32) -> DamageReaction {
        match &mut self.kind {
            SkillKind::Support(support) => support.on_damage_taken(&mut self.state, damage),
            SkillKind::Active(_) if self.state.trigger_type == TriggerType::OnHit => {
                DamageReaction::TriggerSelf
            }
            SkillKind::Active(_) => DamageReaction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, bevy::prelude::*, projectile_components::ProjectileParams};

    fn fireball() -> Skill {
        Skill::active(
            SkillState::new("Fireball", TriggerType::Active)
                .with_cooldown(1.0)
                .with_mana_cost(20.0),
            ActiveEffect::Projectile(ProjectileSkill::new(ProjectileParams {
                speed: 300.0,
                damage: 25.0,
                ..default()
            })),
        )
    }

    struct Pool(f32);

    impl ResourcePool for Pool {
        fn available(&self) -> f32 {
            self.0
        }

        fn consume(&mut self, amount: f32) -> bool {
            if self.0 < amount {
                return false;
            }
            self.0 -= amount;
            true
        }
    }

    #[test]
    fn test_trigger_starts_cooldown_once_for_a_fan() {
        let mut skill = fireball();
        skill.initialize();
        if let Some(fan) = skill.multi_projectile_mut() {
            fan.enable_multi_projectiles();
        }

        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO).with_pointer(Some(Vec2::X));
        let mut pool = Pool(100.0);
        let cast = skill.trigger(&ctx, Some(&mut pool)).expect("fireball is ready");

        assert_eq!(cast.projectiles.len(), 3);
        assert_eq!(skill.state.current_cooldown(), 1.0);
        assert_eq!(pool.0, 80.0);
    }

    #[test]
    fn test_unresolved_aim_spends_nothing() {
        let mut skill = fireball();
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO);
        let mut pool = Pool(100.0);

        assert!(skill.trigger(&ctx, Some(&mut pool)).is_none());
        assert_eq!(pool.0, 100.0);
        assert!(skill.state.is_ready());
    }

    #[test]
    fn test_insufficient_mana_blocks_cast() {
        let mut skill = fireball();
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO).with_pointer(Some(Vec2::Y));
        let mut pool = Pool(5.0);

        assert!(skill.trigger(&ctx, Some(&mut pool)).is_none());
        assert_eq!(pool.0, 5.0);
        assert!(skill.state.is_ready());
    }

    #[test]
    fn test_retaliation_strikes_around_caster() {
        let mut world = World::new();
        let close = world.spawn_empty().id();
        let distant = world.spawn_empty().id();
        let hostiles = [(close, Vec2::new(30.0, 0.0)), (distant, Vec2::new(300.0, 0.0))];

        let mut retaliation = Skill::active(
            SkillState::new("Retaliation", TriggerType::OnHit)
                .with_cooldown(3.0)
                .passive(),
            ActiveEffect::Retaliation {
                radius: 120.0,
                damage: 15.0,
            },
        );
        assert_eq!(retaliation.on_damage_taken(1.0), DamageReaction::TriggerSelf);
        assert!(retaliation.multi_projectile().is_none());

        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO).with_hostiles(&hostiles);
        let cast = retaliation.trigger(&ctx, None).expect("retaliation is ready");
        assert!(cast.projectiles.is_empty());
        assert_eq!(cast.strikes.len(), 1);
        assert_eq!(cast.strikes[0].targets, vec![close]);
        assert!(retaliation.trigger(&ctx, None).is_none(), "on cooldown");
    }

    #[test]
    fn test_supports_are_never_cast() {
        let mut support = Skill::support(
            SkillState::new("Lesser Multiple Projectiles", TriggerType::Support),
            SupportEffect::MultipleProjectiles,
        );
        let ctx = CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO).with_pointer(Some(Vec2::X));
        assert!(support.trigger(&ctx, None).is_none());
        assert_eq!(support.on_damage_taken(50.0), DamageReaction::None);
    }
}
