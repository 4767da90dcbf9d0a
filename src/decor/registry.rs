// src/decor/registry.rs
//! Data-driven room layouts + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::core::{Room, SpawnGroup};

// ---------- Public plugin to register asset+loader ----------

pub struct DecorRegistryAssetPlugin;

impl Plugin for DecorRegistryAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<DecorRegistry>()
            .register_asset_loader(DecorRegistryLoader);
    }
}

// ---------- Layout definition (data form) ----------

/// A named room and the groups that decorate it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomLayout {
    /// Unique human-readable name (used for lookup).
    pub name: String,
    #[serde(default)]
    pub room: Room,
    /// Processed in order; earlier groups constrain later ones.
    #[serde(default)]
    pub groups: Vec<SpawnGroup>,
}

// ---------- Runtime registry asset ----------

#[derive(Asset, TypePath, Clone, Debug, Default)]
pub struct DecorRegistry {
    pub layouts: Vec<RoomLayout>,
    /// Name → index for quick lookups.
    pub name_to_index: HashMap<String, usize>,
}

impl DecorRegistry {
    pub fn from_layouts(layouts: Vec<RoomLayout>) -> Result<Self, DecorRegistryLoadError> {
        let mut name_to_index = HashMap::with_capacity(layouts.len());
        for (i, layout) in layouts.iter().enumerate() {
            if let Some(prev) = name_to_index.insert(layout.name.clone(), i) {
                return Err(DecorRegistryLoadError::DuplicateName {
                    name: layout.name.clone(),
                    first: prev,
                    second: i,
                });
            }
        }
        Ok(Self { layouts, name_to_index })
    }

    pub fn parse_ron(bytes: &[u8]) -> Result<Self, DecorRegistryLoadError> {
        let layouts: Vec<RoomLayout> =
            ron::de::from_bytes(bytes).map_err(|e| DecorRegistryLoadError::Ron(e.to_string()))?;
        Self::from_layouts(layouts)
    }

    pub fn get(&self, name: &str) -> Option<&RoomLayout> {
        self.name_to_index.get(name).and_then(|&i| self.layouts.get(i))
    }
}

// ---------- Asset loader for `.decor.ron` ----------

#[derive(Default)]
pub struct DecorRegistryLoader;

impl AssetLoader for DecorRegistryLoader {
    type Asset = DecorRegistry;
    type Settings = ();
    type Error = DecorRegistryLoadError;

    fn extensions(&self) -> &[&str] {
        &["decor.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        DecorRegistry::parse_ron(&bytes)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum DecorRegistryLoadError {
    #[error("I/O while reading decor registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Duplicate layout name '{name}' (first idx {first}, second idx {second})")]
    DuplicateName { name: String, first: usize, second: usize },
}
