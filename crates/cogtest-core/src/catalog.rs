use crate::animals;
use crate::error::{CogError, CogResult};
use crate::item::{CatalogItem, Category, Tier};

/// Read-only view over a core list and an extended list of items.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    core: &'a [CatalogItem],
    extended: &'a [CatalogItem],
}

impl Catalog<'static> {
    pub fn builtin() -> Self {
        Self::new(animals::CORE, animals::EXTENDED)
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> Catalog<'a> {
    pub fn new(core: &'a [CatalogItem], extended: &'a [CatalogItem]) -> Self {
        Self { core, extended }
    }

    pub fn core(&self) -> &'a [CatalogItem] {
        self.core
    }

    pub fn extended(&self) -> &'a [CatalogItem] {
        self.extended
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogItem> {
        self.core.iter().chain(self.extended.iter())
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.extended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> Vec<&'a CatalogItem> {
        self.iter().collect()
    }

    pub fn find(&self, id: &str) -> Option<&'a CatalogItem> {
        self.iter().find(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> CogResult<&'a CatalogItem> {
        self.find(id)
            .ok_or_else(|| CogError::NotFound(format!("catalog item {id}")))
    }

    pub fn by_tier(&self, tier: Tier) -> Vec<&'a CatalogItem> {
        self.iter().filter(|item| item.tier == tier).collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<&'a CatalogItem> {
        self.iter().filter(|item| item.category == category).collect()
    }

    pub fn with_assets(&self) -> Vec<&'a CatalogItem> {
        self.iter().filter(|item| item.has_asset()).collect()
    }

    pub fn without_assets(&self) -> Vec<&'a CatalogItem> {
        self.iter().filter(|item| !item.has_asset()).collect()
    }
}
