//! Pack registry
//!
//! Holds the builtin manifests (enumerated lazily from a [`ManifestSource`])
//! and the manifests registered at runtime, globally or for one guild.
//! Readers get an immutable [`RegistrySnapshot`]; `register` and `clear`
//! replace it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::modules::catalog::domain::entities::{DisaggregatedCharacter, DisaggregatedMedia};
use crate::modules::packs::domain::{Manifest, ManifestSource, ManifestType, StaticManifestSource};
use crate::shared::errors::AppResult;

/// Local catalog of one pack, indexed by local id
#[derive(Debug)]
pub struct PackCatalog {
    manifest: Arc<Manifest>,
    media_index: HashMap<String, usize>,
    character_index: HashMap<String, usize>,
}

impl PackCatalog {
    fn new(manifest: Arc<Manifest>) -> Self {
        let media_index = manifest
            .media_entries()
            .iter()
            .enumerate()
            .map(|(position, media)| (media.info.id.clone(), position))
            .collect();

        let character_index = manifest
            .character_entries()
            .iter()
            .enumerate()
            .map(|(position, character)| (character.info.id.clone(), position))
            .collect();

        Self {
            manifest,
            media_index,
            character_index,
        }
    }

    pub fn pack_id(&self) -> &str {
        &self.manifest.id
    }

    pub fn manifest(&self) -> &Arc<Manifest> {
        &self.manifest
    }

    /// Media by local id, tagged with this pack's id
    pub fn media(&self, id: &str) -> Option<DisaggregatedMedia> {
        self.media_index
            .get(id)
            .and_then(|position| self.manifest.media_entries().get(*position))
            .map(|media| media.clone().with_pack(self.pack_id()))
    }

    /// Character by local id, tagged with this pack's id
    pub fn character(&self, id: &str) -> Option<DisaggregatedCharacter> {
        self.character_index
            .get(id)
            .and_then(|position| self.manifest.character_entries().get(*position))
            .map(|character| character.clone().with_pack(self.pack_id()))
    }

    /// Every media entry in declaration order
    pub fn all_media(&self) -> impl Iterator<Item = DisaggregatedMedia> + '_ {
        self.manifest
            .media_entries()
            .iter()
            .map(|media| media.clone().with_pack(self.pack_id()))
    }

    /// Every character entry in declaration order
    pub fn all_characters(&self) -> impl Iterator<Item = DisaggregatedCharacter> + '_ {
        self.manifest
            .character_entries()
            .iter()
            .map(|character| character.clone().with_pack(self.pack_id()))
    }
}

#[derive(Debug)]
struct PackEntry {
    catalog: Arc<PackCatalog>,
    /// `None` for builtin and global manual packs
    guild_id: Option<String>,
}

impl PackEntry {
    fn manifest(&self) -> &Arc<Manifest> {
        self.catalog.manifest()
    }

    fn visible_to(&self, guild_id: Option<&str>) -> bool {
        match &self.guild_id {
            None => true,
            Some(owner) => guild_id == Some(owner.as_str()),
        }
    }
}

/// Immutable view of every loaded pack
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    entries: Vec<PackEntry>,
}

impl RegistrySnapshot {
    fn visible<'a>(&'a self, guild_id: Option<&'a str>) -> impl Iterator<Item = &'a PackEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.visible_to(guild_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registry access counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Snapshot reads by any component
    pub reads: u64,
    /// Times the manifest source was enumerated
    pub loads: u64,
}

#[derive(Default)]
struct RegistryState {
    builtin: Option<Vec<Arc<Manifest>>>,
    manual: Vec<(Arc<Manifest>, Option<String>)>,
    snapshot: Option<Arc<RegistrySnapshot>>,
}

pub struct PackRegistry {
    source: Arc<dyn ManifestSource>,
    state: RwLock<RegistryState>,
    reads: AtomicU64,
    loads: AtomicU64,
}

impl PackRegistry {
    pub fn new(source: Arc<dyn ManifestSource>) -> Self {
        Self {
            source,
            state: RwLock::new(RegistryState::default()),
            reads: AtomicU64::new(0),
            loads: AtomicU64::new(0),
        }
    }

    /// Registry with no builtin packs
    pub fn empty() -> Self {
        Self::new(Arc::new(StaticManifestSource::default()))
    }

    /// Enumerate the builtin manifests now, surfacing load errors
    pub fn init(&self) -> AppResult<()> {
        let manifests = self.source.load()?;
        self.loads.fetch_add(1, Ordering::Relaxed);

        let mut state = self.write_state();
        log::info!("Packs: Loaded {} builtin manifests", manifests.len());
        state.builtin = Some(manifests.into_iter().map(Arc::new).collect());
        state.snapshot = None;

        Ok(())
    }

    /// Add a manual pack, globally or for one guild
    ///
    /// Replaces an earlier manual registration with the same id and scope.
    pub fn register(&self, mut manifest: Manifest, guild_id: Option<&str>) {
        manifest.manifest_type = ManifestType::Manual;

        let scope = guild_id.map(str::to_string);
        let mut state = self.write_state();

        state
            .manual
            .retain(|(existing, owner)| !(existing.id == manifest.id && *owner == scope));

        log::debug!(
            "Packs: Registered manual pack '{}' (guild: {:?})",
            manifest.id,
            scope
        );

        state.manual.push((Arc::new(manifest), scope));
        state.snapshot = None;
    }

    /// Drop every cached and registered manifest
    ///
    /// The next read enumerates the manifest source again.
    pub fn clear(&self) {
        let mut state = self.write_state();
        *state = RegistryState::default();
        log::debug!("Packs: Registry cleared");
    }

    /// Manifests visible globally, see [`PackRegistry::list_for`]
    pub fn list(&self, manifest_type: Option<ManifestType>) -> Vec<Arc<Manifest>> {
        self.list_for(None, manifest_type)
    }

    /// Manifests visible to a guild, in load order
    ///
    /// With a type, filters by exact type. Without one, returns the data packs
    /// (manifests declaring a media or characters section).
    pub fn list_for(
        &self,
        guild_id: Option<&str>,
        manifest_type: Option<ManifestType>,
    ) -> Vec<Arc<Manifest>> {
        self.snapshot()
            .visible(guild_id)
            .map(PackEntry::manifest)
            .filter(|manifest| match manifest_type {
                Some(kind) => manifest.manifest_type == kind,
                None => manifest.is_data_pack(),
            })
            .cloned()
            .collect()
    }

    /// Catalog of a pack visible to the guild
    ///
    /// A guild's own registration wins over a global one with the same id.
    pub fn catalog(&self, pack_id: &str, guild_id: Option<&str>) -> Option<Arc<PackCatalog>> {
        let snapshot = self.snapshot();

        let mut matches = snapshot
            .visible(guild_id)
            .filter(|entry| entry.catalog.pack_id() == pack_id);

        let mut found = matches.next()?;
        for entry in matches {
            if entry.guild_id.is_some() || found.guild_id.is_none() {
                found = entry;
            }
        }

        Some(found.catalog.clone())
    }

    /// Catalogs of every data pack visible to the guild
    pub fn catalogs(&self, guild_id: Option<&str>) -> Vec<Arc<PackCatalog>> {
        self.snapshot()
            .visible(guild_id)
            .filter(|entry| entry.manifest().is_data_pack())
            .map(|entry| entry.catalog.clone())
            .collect()
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            reads: self.reads.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot, enumerating the source on first use
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        {
            let state = self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(snapshot) = &state.snapshot {
                return snapshot.clone();
            }
        }

        let mut state = self.write_state();

        if let Some(snapshot) = &state.snapshot {
            return snapshot.clone();
        }

        if state.builtin.is_none() {
            match self.source.load() {
                Ok(manifests) => {
                    self.loads.fetch_add(1, Ordering::Relaxed);
                    log::debug!("Packs: Enumerated {} builtin manifests", manifests.len());
                    state.builtin = Some(manifests.into_iter().map(Arc::new).collect());
                }
                Err(e) => {
                    // Not cached, so the next read tries again
                    log::error!("Packs: Failed to load builtin manifests: {}", e);
                }
            }
        }

        let builtin = state
            .builtin
            .iter()
            .flatten()
            .map(|manifest| PackEntry {
                catalog: Arc::new(PackCatalog::new(manifest.clone())),
                guild_id: None,
            });

        let manual = state.manual.iter().map(|(manifest, guild_id)| PackEntry {
            catalog: Arc::new(PackCatalog::new(manifest.clone())),
            guild_id: guild_id.clone(),
        });

        let snapshot = Arc::new(RegistrySnapshot {
            entries: builtin.chain(manual).collect(),
        });

        if state.builtin.is_some() {
            state.snapshot = Some(snapshot.clone());
        }

        snapshot
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PackRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
