//! Define common resources used for asset loading

use bevy::{asset::LoadedFolder, prelude::*};

#[derive(Debug, Resource)]
pub(super) struct SkillsFolderHandle(pub Handle<LoadedFolder>);

#[derive(Debug, Resource)]
pub(super) struct LoadoutsFolderHandle(pub Handle<LoadedFolder>);
