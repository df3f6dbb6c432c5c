use super::settings::Settings;
use super::tree::SearchTree;
use crate::betting::seating::Seating;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Every search tree an agent has grown, one per seating, created the
/// first time a seating is played.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTreeSet {
    settings: Settings,
    trees: HashMap<Seating, SearchTree>,
}

impl SearchTreeSet {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            trees: HashMap::new(),
        })
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn len(&self) -> usize {
        self.trees.len()
    }
    pub fn get(&self, seating: &Seating) -> Option<&SearchTree> {
        self.trees.get(seating)
    }
    pub fn tree(&mut self, seating: &Seating) -> anyhow::Result<&mut SearchTree> {
        if !self.trees.contains_key(seating) {
            log::debug!("new search tree for {}", seating);
            let tree = SearchTree::new(seating, self.settings)?;
            self.trees.insert(seating.clone(), tree);
        }
        self.trees
            .get_mut(seating)
            .ok_or_else(|| anyhow::anyhow!("tree for {} vanished", seating))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)
            .with_context(|| format!("write {}", path.display()))?;
        log::info!("saved {} search tree(s) to {}", self.trees.len(), path.display());
        Ok(())
    }
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open {}", path.display()))?;
        let set: Self = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse {}", path.display()))?;
        set.settings.validate()?;
        log::info!("loaded {} search tree(s) from {}", set.trees.len(), path.display());
        Ok(set)
    }
}
