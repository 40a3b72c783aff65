use {
    crate::{skill::Skill, slot::SkillSlot},
    skills_assets::{LoadoutDefinition, SkillDefinition},
    thiserror::Error,
};

/// Result of asking an active skill to accept a support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    /// The pair was linked before; nothing changed
    AlreadyLinked,
    /// The support refused the skill; the skill's behaviour is unchanged
    Rejected,
}

/// Problems found while wiring a slot. Rejected links are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadoutError {
    #[error("unknown skill id `{0}`")]
    UnknownSkill(String),
    #[error("slot {index} out of range, capacity is {capacity}")]
    SlotOutOfRange { index: usize, capacity: usize },
    #[error("slot {0} is empty")]
    EmptySlot(usize),
    #[error("`{name}` in slot {index} is not a support skill")]
    NotASupport { index: usize, name: String },
    #[error("`{name}` in slot {index} is not an active skill")]
    NotAnActive { index: usize, name: String },
    #[error("slot {0} cannot be linked to itself")]
    SelfLink(usize),
}

impl SkillSlot {
    /// Builds and wires a slot from a loadout definition.
    ///
    /// `lookup` resolves a skill id to its definition.
    pub fn from_loadout<'a>(
        loadout: &LoadoutDefinition,
        lookup: impl Fn(&str) -> Option<&'a SkillDefinition>,
    ) -> Result<Self, LoadoutError> {
        let mut slot = SkillSlot::with_capacity(loadout.slots.len());
        for (index, id) in loadout.slots.iter().enumerate() {
            let Some(id) = id else {
                continue;
            };
            let definition =
                lookup(id.as_str()).ok_or_else(|| LoadoutError::UnknownSkill(id.clone()))?;
            slot.equip(index, Skill::from_definition(definition))?;
        }

        for link in &loadout.links {
            slot.add_support(link.active, link.support)?;
        }

        slot.initialize();
        Ok(slot)
    }
}
