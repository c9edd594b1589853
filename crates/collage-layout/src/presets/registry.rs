use crate::constants::COPY_SUFFIX;
use crate::types::{LayoutPreset, PageSize, PresetError};

/// Common surface of page size and layout presets
pub trait Preset: Clone + std::fmt::Debug {
    /// Tag used in synthetic ids, e.g. `custom-page-3`
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn label(&self) -> &str;
    fn set_label(&mut self, label: String);
    /// Check the dimensional invariants of the preset
    fn validate(&self) -> std::result::Result<(), String>;
}

impl Preset for PageSize {
    const KIND: &'static str = "page";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn validate(&self) -> std::result::Result<(), String> {
        PageSize::validate(self)
    }
}

impl Preset for LayoutPreset {
    const KIND: &'static str = "layout";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn validate(&self) -> std::result::Result<(), String> {
        LayoutPreset::validate(self)
    }
}

/// A registered preset with its registry metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PresetEntry<T> {
    pub preset: T,
    /// User-created (and therefore deletable)
    pub is_custom: bool,
    /// Shown in pickers
    pub visible: bool,
}

/// Built-in and user-defined presets, in display order.
///
/// The registry knows nothing about which preset a collage currently uses.
#[derive(Debug, Clone)]
pub struct PresetRegistry<T> {
    entries: Vec<PresetEntry<T>>,
    next_custom: u64,
}

impl<T: Preset> PresetRegistry<T> {
    /// Registry holding `builtins`, all visible, in the given order
    pub fn new(builtins: Vec<T>) -> Self {
        let entries = builtins
            .into_iter()
            .map(|preset| PresetEntry {
                preset,
                is_custom: false,
                visible: true,
            })
            .collect();
        Self {
            entries,
            next_custom: 1,
        }
    }

    /// All entries in display order
    pub fn entries(&self) -> &[PresetEntry<T>] {
        &self.entries
    }

    /// Visible presets in display order
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|entry| entry.visible)
            .map(|entry| &entry.preset)
    }

    /// User-created presets in display order
    pub fn custom(&self) -> impl Iterator<Item = &PresetEntry<T>> {
        self.entries.iter().filter(|entry| entry.is_custom)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entry(id).map(|entry| &entry.preset)
    }

    pub fn entry(&self, id: &str) -> Option<&PresetEntry<T>> {
        self.entries.iter().find(|entry| entry.preset.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current display order as a list of ids
    pub fn order(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.preset.id().to_string())
            .collect()
    }

    /// Register a user preset under a fresh synthetic id, returned on success
    pub fn add_custom(&mut self, preset: T) -> std::result::Result<String, PresetError> {
        self.insert_custom(preset, false)
    }

    /// Replace the contents of a custom preset, keeping its id and position
    pub fn update_custom(&mut self, preset: T) -> std::result::Result<(), PresetError> {
        preset.validate().map_err(PresetError::InvalidRecord)?;
        let index = self.custom_index(preset.id())?;
        self.entries[index].preset = preset;
        Ok(())
    }

    /// Delete a custom preset. Built-ins are refused.
    pub fn delete(&mut self, id: &str) -> std::result::Result<T, PresetError> {
        let index = self.custom_index(id)?;
        Ok(self.entries.remove(index).preset)
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> std::result::Result<(), PresetError> {
        let index = self.index_of(id)?;
        self.entries[index].visible = visible;
        Ok(())
    }

    /// Flip visibility, returning the new value
    pub fn toggle_visibility(&mut self, id: &str) -> std::result::Result<bool, PresetError> {
        let index = self.index_of(id)?;
        let entry = &mut self.entries[index];
        entry.visible = !entry.visible;
        Ok(entry.visible)
    }

    /// Clone any preset as a new custom one labelled "<label> (Copy)".
    ///
    /// The copy is placed right after the original.
    pub fn duplicate(&mut self, id: &str) -> std::result::Result<String, PresetError> {
        let index = self.index_of(id)?;
        let mut copy = self.entries[index].preset.clone();
        let label = format!("{}{}", copy.label(), COPY_SUFFIX);
        copy.set_label(label);

        let new_id = self.fresh_id();
        copy.set_id(new_id.clone());
        self.entries.insert(
            index + 1,
            PresetEntry {
                preset: copy,
                is_custom: true,
                visible: true,
            },
        );
        Ok(new_id)
    }

    /// Apply an explicit display order.
    ///
    /// Listed ids move to the front in the given order; unknown ids are
    /// skipped and unlisted entries keep their relative order at the end.
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) {
        let mut remaining = std::mem::take(&mut self.entries);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in order {
            if let Some(pos) = remaining
                .iter()
                .position(|entry| entry.preset.id() == id.as_ref())
            {
                reordered.push(remaining.remove(pos));
            }
        }

        reordered.extend(remaining);
        self.entries = reordered;
    }

    /// Validate and append a custom preset.
    ///
    /// With `keep_id`, the preset's own id is used unless it is empty or
    /// already taken; otherwise a synthetic id is always assigned.
    pub(crate) fn insert_custom(
        &mut self,
        mut preset: T,
        keep_id: bool,
    ) -> std::result::Result<String, PresetError> {
        preset.validate().map_err(PresetError::InvalidRecord)?;

        let reuse = keep_id && !preset.id().is_empty() && !self.contains(preset.id());
        if !reuse {
            let id = self.fresh_id();
            preset.set_id(id);
        }

        let id = preset.id().to_string();
        self.entries.push(PresetEntry {
            preset,
            is_custom: true,
            visible: true,
        });
        Ok(id)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("custom-{}-{}", T::KIND, self.next_custom);
            self.next_custom += 1;
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.preset.id() == id)
    }

    fn index_of(&self, id: &str) -> std::result::Result<usize, PresetError> {
        self.position(id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))
    }

    fn custom_index(&self, id: &str) -> std::result::Result<usize, PresetError> {
        let index = self.index_of(id)?;
        if !self.entries[index].is_custom {
            log::warn!("Refusing to modify built-in preset '{}'", id);
            return Err(PresetError::BuiltIn(id.to_string()));
        }
        Ok(index)
    }
}

impl PresetRegistry<PageSize> {
    /// Registry seeded with the standard paper sizes
    pub fn with_builtin_pages() -> Self {
        Self::new(super::builtin_page_sizes())
    }
}

impl PresetRegistry<LayoutPreset> {
    /// Registry seeded with the standard photo layouts
    pub fn with_builtin_layouts() -> Self {
        Self::new(super::builtin_layouts())
    }
}

// =============================================================================
// Tests
// =============================================================================
