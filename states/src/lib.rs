use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Skill and loadout definitions are being read from disk
    #[default]
    Loading,
    Running,
}
