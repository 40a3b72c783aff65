use {
    bevy::prelude::*,
    projectile_components::ProjectileParams,
    skills::*,
    skills_assets::{
        AimMode, ImpactBurst, LoadoutDefinition, MultishotSettings, SkillDefinition,
        SkillKindDefinition, SupportLink,
    },
};

fn definition(id: &str, cooldown_secs: f32, kind: SkillKindDefinition) -> SkillDefinition {
    SkillDefinition {
        id: id.to_string(),
        display_name: id.to_string(),
        description: String::new(),
        cooldown_secs,
        mana_cost: 0.0,
        has_reservation: false,
        is_channeling: false,
        kind,
    }
}

fn library() -> Vec<SkillDefinition> {
    vec![
        definition(
            "fireball",
            1.0,
            SkillKindDefinition::Projectile {
                projectile: ProjectileParams {
                    speed: 300.0,
                    damage: 25.0,
                    ..default()
                },
                aim: AimMode::Pointer,
                multishot: MultishotSettings {
                    count: 3,
                    step_degrees: 15.0,
                },
                impact: Some(ImpactBurst {
                    radius: 100.0,
                    damage: 30.0,
                    dot_damage: 0.0,
                    dot_duration: 3.0,
                }),
            },
        ),
        definition(
            "retaliation",
            3.0,
            SkillKindDefinition::Retaliation {
                radius: 120.0,
                damage: 15.0,
            },
        ),
        definition(
            "cast_on_damage_taken",
            0.25,
            SkillKindDefinition::CastOnDamageTaken { threshold: 10.0 },
        ),
        definition(
            "lesser_multiple_projectiles",
            0.0,
            SkillKindDefinition::MultipleProjectiles,
        ),
    ]
}

fn build(slots: &[Option<&str>], links: &[(usize, usize)]) -> Result<SkillSlot, LoadoutError> {
    let library = library();
    let loadout = LoadoutDefinition {
        id: "test".to_string(),
        slots: slots.iter().map(|id| id.map(str::to_string)).collect(),
        links: links
            .iter()
            .map(|&(support, active)| SupportLink { support, active })
            .collect(),
    };
    SkillSlot::from_loadout(&loadout, |id| library.iter().find(|d| d.id == id))
}

fn aimed_ctx(hostiles: &[(Entity, Vec2)]) -> CastContext<'_> {
    CastContext::new(Entity::PLACEHOLDER, Vec2::ZERO)
        .with_pointer(Some(Vec2::new(0.0, 80.0)))
        .with_hostiles(hostiles)
}

#[test]
fn test_fireball_fan_and_impact_from_loadout() {
    let mut world = World::new();
    let under_pointer = world.spawn_empty().id();
    let hostiles = [(under_pointer, Vec2::new(10.0, 90.0))];

    let mut slot = build(
        &[Some("fireball"), Some("lesser_multiple_projectiles")],
        &[(1, 0)],
    )
    .unwrap();

    let cast = slot.trigger_skill(0, &aimed_ctx(&hostiles), None).unwrap();
    assert_eq!(cast.projectiles.len(), 3);
    assert_eq!(cast.strikes.len(), 1);
    assert_eq!(cast.strikes[0].targets, vec![under_pointer]);
    assert_eq!(cast.strikes[0].damage, 30.0);

    let multishot = slot
        .get_mut(0)
        .and_then(Skill::as_active_mut)
        .and_then(ActiveSkill::projectile_mut)
        .unwrap();
    multishot.disable_multi_projectiles();
    assert!(!multishot.is_multi_projectile_enabled());

    slot.update(1.0);
    let cast = slot.trigger_skill(0, &aimed_ctx(&hostiles), None).unwrap();
    assert_eq!(cast.projectiles.len(), 1);
    assert_eq!(cast.projectiles[0].direction, Vec2::Y);
}

#[test]
fn test_rejected_link_is_not_an_error() {
    let slot = build(
        &[Some("retaliation"), Some("lesser_multiple_projectiles")],
        &[(1, 0)],
    )
    .expect("rejected links do not fail the loadout");

    let support = slot.get(1).and_then(Skill::as_support).unwrap();
    assert!(support.linked().is_empty());
    assert!(slot.get(0).and_then(Skill::multi_projectile).is_none());
}

#[test]
fn test_duplicate_links_apply_once() {
    let slot = build(
        &[
            Some("fireball"),
            Some("cast_on_damage_taken"),
            Some("lesser_multiple_projectiles"),
        ],
        &[(1, 0), (1, 0), (2, 0), (2, 0)],
    )
    .unwrap();

    let active = slot.get(0).and_then(Skill::as_active).unwrap();
    assert_eq!(active.supports().len(), 2);
    for support in [1, 2] {
        let linked = slot.get(support).and_then(Skill::as_support).unwrap().linked();
        assert_eq!(linked.len(), 1);
    }
}

#[test]
fn test_loadout_errors() {
    assert_eq!(
        build(&[Some("meteor")], &[]).unwrap_err(),
        LoadoutError::UnknownSkill("meteor".to_string())
    );
    assert_eq!(
        build(&[Some("fireball")], &[(3, 0)]).unwrap_err(),
        LoadoutError::SlotOutOfRange {
            index: 3,
            capacity: 1
        }
    );
    assert_eq!(
        build(&[Some("fireball"), None], &[(1, 0)]).unwrap_err(),
        LoadoutError::EmptySlot(1)
    );
    assert!(matches!(
        build(&[Some("fireball"), Some("retaliation")], &[(1, 0)]),
        Err(LoadoutError::NotASupport { index: 1, .. })
    ));
    assert!(matches!(
        build(
            &[Some("cast_on_damage_taken"), Some("lesser_multiple_projectiles")],
            &[(1, 0)]
        ),
        Err(LoadoutError::NotAnActive { index: 0, .. })
    ));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = build(&[Some("meteor")], &[]).unwrap_err();
    assert_eq!(err.to_string(), "unknown skill id `meteor`");
}
