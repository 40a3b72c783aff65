use bevy::prelude::*;

/// How a skill becomes active.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerType {
    /// Cast explicitly by the controlling actor
    #[default]
    Active,
    /// Modifies linked active skills
    Support,
    /// Always-on, never cast
    Passive,
    /// Fires on its own when the owner takes damage
    OnHit,
}

/// Position of a skill inside a caster's `SkillSlot`.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillIndex(pub usize);

impl From<usize> for SkillIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A pool a skill's cost is paid from (mana for the player).
pub trait ResourcePool {
    fn available(&self) -> f32;

    /// Deducts `amount` only when the pool covers all of it.
    /// Returns whether the deduction happened.
    fn consume(&mut self, amount: f32) -> bool;
}

/// Cooldown and cost bookkeeping shared by every skill.
///
/// The skill is *ready* while `current_cooldown <= 0`. `update` keeps
/// subtracting the frame delta while the cooldown is positive, so the stored
/// value may dip slightly below zero; only `start_cooldown` raises it again.
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct SkillState {
    pub name: String,
    pub description: String,
    /// Seconds between two casts
    pub cooldown: f32,
    current_cooldown: f32,
    pub mana_cost: f32,
    pub trigger_type: TriggerType,
    pub is_passive: bool,
    pub has_reservation: bool,
    pub is_channeling: bool,
}

impl SkillState {
    pub fn new(name: impl Into<String>, trigger_type: TriggerType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cooldown: 0.0,
            current_cooldown: 0.0,
            mana_cost: 0.0,
            trigger_type,
            is_passive: false,
            has_reservation: false,
            is_channeling: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_mana_cost(mut self, mana_cost: f32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    pub fn passive(mut self) -> Self {
        self.is_passive = true;
        self
    }

    pub fn with_reservation(mut self, has_reservation: bool) -> Self {
        self.has_reservation = has_reservation;
        self
    }

    pub fn with_channeling(mut self, is_channeling: bool) -> Self {
        self.is_channeling = is_channeling;
        self
    }

    pub fn initialize(&mut self) {
        self.current_cooldown = 0.0;
    }

    pub fn current_cooldown(&self) -> f32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown <= 0.0
    }

    pub fn update(&mut self, delta: f32) {
        if self.current_cooldown > 0.0 {
            self.current_cooldown -= delta;
        }
    }

    pub fn start_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// Read-only readiness check. With no pool known only the cooldown counts.
    pub fn can_trigger(&self, pool: Option<&dyn ResourcePool>) -> bool {
        self.is_ready()
            && pool.is_none_or(|pool| self.mana_cost <= 0.0 || pool.available() >= self.mana_cost)
    }

    /// Readiness check that also pays the cost in the same step.
    ///
    /// Nothing is deducted when the skill is still cooling down.
    pub fn try_pay(&self, pool: Option<&mut dyn ResourcePool>) -> bool {
        if !self.is_ready() {
            return false;
        }
        match pool {
            Some(pool) if self.mana_cost > 0.0 => pool.consume(self.mana_cost),
            _ => true,
        }
    }
}

/// Requests that a caster be equipped with the loadout of the given id.
/// Replaced by a `SkillSlot` once the loadout resolves.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component)]
pub struct EquippedLoadout(pub String);
