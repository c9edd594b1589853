//! Collage state controller
//!
//! The controller is the only owner of the collage state. Each user action
//! clones the current snapshot, runs it through the grid calculator and cell
//! assignment engine, and swaps the result in whole. Readers holding an older
//! snapshot keep a consistent view; no half-updated state is ever visible.

use crate::cells;
use crate::constants::DEFAULT_LAYOUT_ID;
use crate::options::ControllerConfig;
use crate::presets::PresetRegistry;
use crate::stats::calculate_statistics;
use crate::types::*;
use crate::units::Unit;
use std::sync::Arc;

/// A user action, as delivered by the view layer
#[derive(Debug, Clone, PartialEq)]
pub enum CollageAction {
    SelectPage {
        id: String,
    },
    SetPageSize {
        page: PageSize,
    },
    SelectLayout {
        id: String,
    },
    SetLayout {
        layout: LayoutPreset,
    },
    SetPageOrientation {
        orientation: Orientation,
    },
    SetMode {
        mode: SpaceMode,
    },
    ToggleMode,
    AddImage {
        image: NewImage,
    },
    RemoveImage {
        id: ImageId,
    },
    UpdateCount {
        id: ImageId,
        count: usize,
    },
    SetImageFit {
        id: ImageId,
        fit: FitMode,
    },
    SetImageOrientation {
        id: ImageId,
        orientation: ImageOrientation,
    },
    AssignCell {
        row: usize,
        col: usize,
        image_id: Option<ImageId>,
    },
    DistributeEqually,
    Rearrange,
    ResetCanvas,
    ClearAll,
    SetUnit {
        unit: Unit,
    },
    SetCuttingMarkers {
        visible: bool,
        color: Option<String>,
    },
}

/// What an applied action produced, beyond the new snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    /// Id given to an image added by this action
    pub added_image: Option<ImageId>,
    /// Capacity check after a rearrange
    pub capacity: Option<CapacityReport>,
    /// Conditions the user should be told about
    pub warnings: Vec<CollageWarning>,
}

/// Owner of the collage state and the preset registries
#[derive(Debug, Clone)]
pub struct CollageController {
    state: Arc<CollageState>,
    pages: PresetRegistry<PageSize>,
    layouts: PresetRegistry<LayoutPreset>,
    next_image_id: u64,
}

impl CollageController {
    /// Controller over the built-in preset catalogues
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_registries(
            config,
            PresetRegistry::with_builtin_pages(),
            PresetRegistry::with_builtin_layouts(),
        )
    }

    /// Controller over caller-supplied registries (e.g. with imported presets).
    ///
    /// Initial page and layout come from the config; ids missing from the
    /// registries fall back to the first registered entry.
    pub fn with_registries(
        config: ControllerConfig,
        pages: PresetRegistry<PageSize>,
        layouts: PresetRegistry<LayoutPreset>,
    ) -> Self {
        let page = resolve_or_first(&pages, &config.page_id)
            .unwrap_or_else(|| PageSize::from_paper(PaperSize::A4));
        let layout = resolve_or_first(&layouts, &config.layout_id)
            .unwrap_or_else(|| LayoutPreset::new(DEFAULT_LAYOUT_ID, "2×2 grid", 89.0, 127.0));

        let mut state = CollageState::new(page, layout, config.mode);
        state.unit = config.unit;
        state.cutting_markers = config.cutting_markers();
        log_grid(&state);

        Self {
            state: Arc::new(state),
            pages,
            layouts,
            next_image_id: 1,
        }
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<CollageState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &CollageState {
        &self.state
    }

    pub fn pages(&self) -> &PresetRegistry<PageSize> {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut PresetRegistry<PageSize> {
        &mut self.pages
    }

    pub fn layouts(&self) -> &PresetRegistry<LayoutPreset> {
        &self.layouts
    }

    pub fn layouts_mut(&mut self) -> &mut PresetRegistry<LayoutPreset> {
        &mut self.layouts
    }

    /// Apply new preferences. Unknown page or layout ids abort the whole
    /// change with the state untouched.
    pub fn apply_config(&mut self, config: &ControllerConfig) -> Result<()> {
        config.validate()?;
        let page = self.lookup_page(&config.page_id)?;
        let layout = self.lookup_layout(&config.layout_id)?;

        let mut next = self.next_state();
        next.page = page;
        next.layout = layout;
        next.mode = config.mode;
        next.unit = config.unit;
        next.cutting_markers = config.cutting_markers();
        self.commit_regrid(next);
        Ok(())
    }

    // =========================================================================
    // Page, layout and mode
    // =========================================================================

    pub fn select_page(&mut self, id: &str) -> Result<()> {
        let page = self.lookup_page(id)?;
        self.set_page_size(page)
    }

    /// Switch to an arbitrary page. Pages failing validation (e.g. a negative
    /// margin) are refused with the state untouched.
    pub fn set_page_size(&mut self, page: PageSize) -> Result<()> {
        page.validate().map_err(CollageError::Config)?;
        log::debug!("Page size -> {} ({}×{}mm)", page.id, page.width_mm, page.height_mm);
        let mut next = self.next_state();
        next.page = page;
        self.commit_regrid(next);
        Ok(())
    }

    pub fn select_layout(&mut self, id: &str) -> Result<()> {
        let layout = self.lookup_layout(id)?;
        self.set_layout(layout);
        Ok(())
    }

    pub fn set_layout(&mut self, layout: LayoutPreset) {
        log::debug!(
            "Layout -> {} ({}×{}mm)",
            layout.id,
            layout.cell_width_mm,
            layout.cell_height_mm
        );
        let mut next = self.next_state();
        next.layout = layout;
        self.commit_regrid(next);
    }

    pub fn set_page_orientation(&mut self, orientation: Orientation) {
        log::debug!("Page orientation -> {:?}", orientation);
        let mut next = self.next_state();
        next.page_orientation = orientation;
        self.commit_regrid(next);
    }

    pub fn set_mode(&mut self, mode: SpaceMode) {
        log::debug!("Space mode -> {:?}", mode);
        let mut next = self.next_state();
        next.mode = mode;
        self.commit_regrid(next);
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    // =========================================================================
    // Images and cells
    // =========================================================================

    /// Add an image to the pool.
    ///
    /// The first image into an empty pool fills the whole grid; later images
    /// leave existing assignments alone until the next rearrange or manual
    /// assignment.
    pub fn add_image(&mut self, image: NewImage) -> ImageId {
        let id = ImageId(self.next_image_id);
        self.next_image_id += 1;

        let mut next = self.next_state();
        next.images.push(image.into_image(id));

        if let Some(only) = cells::single_image(&next.images).cloned() {
            let grid = std::mem::take(&mut next.cells);
            next.cells = cells::fill_all(grid, &only);
        }

        log::debug!("Added image {} ({} in pool)", id, next.images.len());
        self.commit(next);
        id
    }

    /// Remove an image and clear its cells. Returns whether it was in the pool.
    pub fn remove_image(&mut self, id: ImageId) -> bool {
        let existed = self.state.image(id).is_some();
        let next = cells::remove_image(self.next_state(), id);
        self.commit(next);
        existed
    }

    pub fn update_count(&mut self, id: ImageId, count: usize) {
        let next = cells::update_count(self.next_state(), id, count);
        self.commit(next);
    }

    pub fn set_image_fit(&mut self, id: ImageId, fit: FitMode) {
        self.update_image(id, |image| image.fit = fit);
    }

    /// Change an image's preferred orientation; applies to cells on the next
    /// rearrange or assignment
    pub fn set_image_orientation(&mut self, id: ImageId, orientation: ImageOrientation) {
        self.update_image(id, |image| image.orientation = orientation);
    }

    pub fn assign_cell(&mut self, row: usize, col: usize, image_id: Option<ImageId>) {
        let mut next = self.next_state();
        let grid = std::mem::take(&mut next.cells);
        next.cells = cells::assign_cell(grid, row, col, image_id, &next.images);
        self.commit(next);
    }

    pub fn distribute_equally(&mut self) {
        let next = cells::distribute_equally(self.next_state());
        self.commit(next);
    }

    /// Pack the pool into the grid and report how the counts compare with
    /// the capacity
    pub fn rearrange(&mut self) -> CapacityReport {
        let next = cells::rearrange(self.next_state());
        let report = cells::capacity_report(&next);
        if report.is_over_capacity() {
            log::warn!(
                "{} images requested, only {} cells available",
                report.requested,
                report.capacity
            );
        }
        self.commit(next);
        report
    }

    pub fn reset_canvas(&mut self) {
        let next = cells::reset_canvas(self.next_state());
        self.commit(next);
    }

    pub fn clear_all(&mut self) {
        let next = cells::clear_all(self.next_state());
        self.commit(next);
    }

    // =========================================================================
    // Display preferences
    // =========================================================================

    pub fn set_unit(&mut self, unit: Unit) {
        let mut next = self.next_state();
        next.unit = unit;
        self.commit(next);
    }

    pub fn set_cutting_markers(&mut self, visible: bool, color: Option<String>) {
        let mut next = self.next_state();
        next.cutting_markers.visible = visible;
        if let Some(color) = color {
            next.cutting_markers.color = color;
        }
        self.commit(next);
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Conditions in the current state the user should be warned about
    pub fn warnings(&self) -> Vec<CollageWarning> {
        let mut warnings = Vec::new();
        if self.state.total_cells() == 0 {
            warnings.push(CollageWarning::DegenerateGrid);
        }
        let report = cells::capacity_report(&self.state);
        if report.is_over_capacity() {
            warnings.push(CollageWarning::OverCapacity {
                requested: report.requested,
                capacity: report.capacity,
            });
        }
        warnings
    }

    pub fn statistics(&self) -> CollageStatistics {
        calculate_statistics(&self.state)
    }

    /// Dispatch a user action.
    ///
    /// Only unknown preset ids and invalid pages fail; the state is unchanged
    /// when they do.
    pub fn apply(&mut self, action: CollageAction) -> Result<ActionOutcome> {
        log::debug!("Applying {:?}", action);
        let mut outcome = ActionOutcome::default();

        match action {
            CollageAction::SelectPage { id } => self.select_page(&id)?,
            CollageAction::SetPageSize { page } => self.set_page_size(page)?,
            CollageAction::SelectLayout { id } => self.select_layout(&id)?,
            CollageAction::SetLayout { layout } => self.set_layout(layout),
            CollageAction::SetPageOrientation { orientation } => {
                self.set_page_orientation(orientation)
            }
            CollageAction::SetMode { mode } => self.set_mode(mode),
            CollageAction::ToggleMode => self.toggle_mode(),
            CollageAction::AddImage { image } => {
                outcome.added_image = Some(self.add_image(image));
            }
            CollageAction::RemoveImage { id } => {
                self.remove_image(id);
            }
            CollageAction::UpdateCount { id, count } => self.update_count(id, count),
            CollageAction::SetImageFit { id, fit } => self.set_image_fit(id, fit),
            CollageAction::SetImageOrientation { id, orientation } => {
                self.set_image_orientation(id, orientation)
            }
            CollageAction::AssignCell { row, col, image_id } => {
                self.assign_cell(row, col, image_id)
            }
            CollageAction::DistributeEqually => self.distribute_equally(),
            CollageAction::Rearrange => {
                outcome.capacity = Some(self.rearrange());
            }
            CollageAction::ResetCanvas => self.reset_canvas(),
            CollageAction::ClearAll => self.clear_all(),
            CollageAction::SetUnit { unit } => self.set_unit(unit),
            CollageAction::SetCuttingMarkers { visible, color } => {
                self.set_cutting_markers(visible, color)
            }
        }

        outcome.warnings = self.warnings();
        Ok(outcome)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lookup_page(&self, id: &str) -> Result<PageSize> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| PresetError::NotFound(id.to_string()).into())
    }

    fn lookup_layout(&self, id: &str) -> Result<LayoutPreset> {
        self.layouts
            .get(id)
            .cloned()
            .ok_or_else(|| PresetError::NotFound(id.to_string()).into())
    }

    fn update_image(&mut self, id: ImageId, update: impl FnOnce(&mut CollageImage)) {
        let mut next = self.next_state();
        let Some(image) = next.images.iter_mut().find(|image| image.id == id) else {
            return;
        };
        update(image);
        self.commit(next);
    }

    fn next_state(&self) -> CollageState {
        (*self.state).clone()
    }

    fn commit(&mut self, next: CollageState) {
        debug_assert!(next.is_consistent());
        self.state = Arc::new(next);
    }

    /// Commit after recomputing the grid and rebuilding all cells
    fn commit_regrid(&mut self, next: CollageState) {
        let next = next.regrid();
        log_grid(&next);
        self.commit(next);
    }
}

fn resolve_or_first<T: crate::presets::Preset>(
    registry: &PresetRegistry<T>,
    id: &str,
) -> Option<T> {
    registry.get(id).cloned().or_else(|| {
        log::warn!("Unknown {} preset '{}', using the first entry", T::KIND, id);
        registry.entries().first().map(|entry| entry.preset.clone())
    })
}

fn log_grid(state: &CollageState) {
    if state.total_cells() == 0 {
        log::warn!(
            "Page '{}' is too small for layout '{}': empty grid",
            state.page.id,
            state.layout.id
        );
    } else {
        log::info!(
            "Grid rebuilt: {} rows × {} columns ({:?} cells)",
            state.rows,
            state.columns,
            state.grid_orientation
        );
    }
}
