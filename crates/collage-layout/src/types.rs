use crate::constants::{DEFAULT_IMAGE_COUNT, DEFAULT_MARGIN_MM, DEFAULT_MARKER_COLOR};
use crate::layout::GridPosition;
use crate::units::Unit;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Failures of preset registry operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    #[error("Built-in preset '{0}' cannot be deleted")]
    BuiltIn(String),
    #[error("No preset with id '{0}'")]
    NotFound(String),
    #[error("Invalid preset record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, CollageError>;

/// Paper and grid orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    /// 4×6 inch photo paper
    Photo4x6,
    /// 5×7 inch photo paper
    Photo5x7,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Every named size, in catalogue order
    pub const STANDARD: [PaperSize; 8] = [
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::A5,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Tabloid,
        PaperSize::Photo4x6,
        PaperSize::Photo5x7,
    ];

    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Photo4x6 => (101.6, 152.4),
            PaperSize::Photo5x7 => (127.0, 177.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        orient(self.dimensions_mm(), orientation)
    }

    /// Stable identifier used by the preset registry
    pub fn id(self) -> &'static str {
        match self {
            PaperSize::A3 => "a3",
            PaperSize::A4 => "a4",
            PaperSize::A5 => "a5",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
            PaperSize::Tabloid => "tabloid",
            PaperSize::Photo4x6 => "photo-4x6",
            PaperSize::Photo5x7 => "photo-5x7",
            PaperSize::Custom { .. } => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Photo4x6 => "4×6 in",
            PaperSize::Photo5x7 => "5×7 in",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Portrait keeps `(w, h)` as given; landscape swaps the two sides
fn orient((w, h): (f32, f32), orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    }
}

/// Space optimization mode for the grid calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpaceMode {
    /// Every cell in the same (portrait) orientation; simplest to cut
    #[default]
    Loose,
    /// Pick whichever cell orientation fits more cells
    Tight,
}

impl SpaceMode {
    pub fn toggled(self) -> Self {
        match self {
            SpaceMode::Loose => SpaceMode::Tight,
            SpaceMode::Tight => SpaceMode::Loose,
        }
    }
}

/// How an image is scaled into its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FitMode {
    /// Fill the cell, cropping the overflow
    #[default]
    Cover,
    /// Fit inside the cell, leaving bars
    Contain,
    /// Stretch to the cell (ignores aspect ratio)
    Fill,
    /// Natural size, centered
    Original,
}

/// Orientation preference of an image, or the effective rotation of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageOrientation {
    #[default]
    Auto,
    Portrait,
    Landscape,
}

/// Handle to an image in the collage pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// A page size preset. All dimensions are millimeters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSize {
    pub id: String,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "width"))]
    pub width_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "height"))]
    pub height_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "margin"))]
    pub margin_mm: f32,
}

impl PageSize {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        width_mm: f32,
        height_mm: f32,
        margin_mm: f32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width_mm,
            height_mm,
            margin_mm,
        }
    }

    /// Page preset for a standard paper size with the default margin
    pub fn from_paper(paper: PaperSize) -> Self {
        let (width_mm, height_mm) = paper.dimensions_mm();
        Self::new(
            paper.id(),
            paper.label(),
            width_mm,
            height_mm,
            DEFAULT_MARGIN_MM,
        )
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(&self, orientation: Orientation) -> (f32, f32) {
        PaperSize::Custom {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
        }
        .dimensions_with_orientation(orientation)
    }

    /// Check the page has a non-degenerate usable area
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.width_mm > 0.0 && self.height_mm > 0.0) {
            return Err(format!(
                "page '{}' must have positive width and height",
                self.id
            ));
        }
        if !(self.margin_mm >= 0.0) {
            return Err(format!("page '{}' has a negative margin", self.id));
        }
        if self.margin_mm * 2.0 >= self.width_mm.min(self.height_mm) {
            return Err(format!(
                "page '{}' margin leaves no usable area",
                self.id
            ));
        }
        Ok(())
    }
}

/// A cell template. Both dimensions are millimeters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutPreset {
    pub id: String,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "cellWidth"))]
    pub cell_width_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "cellHeight"))]
    pub cell_height_mm: f32,
}

impl LayoutPreset {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        cell_width_mm: f32,
        cell_height_mm: f32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            cell_width_mm,
            cell_height_mm,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.cell_width_mm > 0.0 && self.cell_height_mm > 0.0) {
            return Err(format!(
                "layout '{}' must have positive cell dimensions",
                self.id
            ));
        }
        Ok(())
    }
}

/// An uploaded image and how many times it should appear
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageImage {
    pub id: ImageId,
    /// Opaque reference to the image data (path, URL, blob key)
    pub source: String,
    pub name: String,
    pub count: usize,
    pub fit: FitMode,
    pub orientation: ImageOrientation,
}

impl CollageImage {
    pub fn new(id: ImageId, source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            name: name.into(),
            count: DEFAULT_IMAGE_COUNT,
            fit: FitMode::default(),
            orientation: ImageOrientation::default(),
        }
    }
}

/// Everything needed to add an image; the controller assigns the id
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewImage {
    pub source: String,
    pub name: String,
    pub count: usize,
    pub fit: FitMode,
    pub orientation: ImageOrientation,
}

impl NewImage {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            count: DEFAULT_IMAGE_COUNT,
            fit: FitMode::default(),
            orientation: ImageOrientation::default(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_orientation(mut self, orientation: ImageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub(crate) fn into_image(self, id: ImageId) -> CollageImage {
        CollageImage {
            id,
            source: self.source,
            name: self.name,
            count: self.count,
            fit: self.fit,
            orientation: self.orientation,
        }
    }
}

/// One slot of the collage grid. Holds a non-owning reference to an image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageCell {
    /// Position in the grid, doubling as the cell id
    pub position: GridPosition,
    pub image_id: Option<ImageId>,
    pub orientation: ImageOrientation,
}

impl CollageCell {
    pub fn empty(position: GridPosition) -> Self {
        Self {
            position,
            image_id: None,
            orientation: ImageOrientation::Auto,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_id.is_none()
    }

    /// Reference `image`, adopting its preferred orientation
    pub fn assign(&mut self, image: &CollageImage) {
        self.image_id = Some(image.id);
        self.orientation = image.orientation;
    }

    pub fn clear(&mut self) {
        self.image_id = None;
        self.orientation = ImageOrientation::Auto;
    }
}

/// Row-major grid of cells: `cells[row][col]`
pub type CellGrid = Vec<Vec<CollageCell>>;

/// Cutting guide settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuttingMarkers {
    pub visible: bool,
    /// CSS-style colour string, passed through to the view layer
    pub color: String,
}

impl Default for CuttingMarkers {
    fn default() -> Self {
        Self {
            visible: true,
            color: DEFAULT_MARKER_COLOR.to_string(),
        }
    }
}

/// The collage aggregate.
///
/// Invariants: `cells.len() == rows`, every row holds `columns` cells, and
/// every referenced image id exists in `images`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageState {
    pub page: PageSize,
    pub page_orientation: Orientation,
    pub layout: LayoutPreset,
    pub images: Vec<CollageImage>,
    pub cells: CellGrid,
    pub rows: usize,
    pub columns: usize,
    /// Orientation of the cell template chosen by the grid calculation
    pub grid_orientation: Orientation,
    pub mode: SpaceMode,
    pub cutting_markers: CuttingMarkers,
    pub unit: Unit,
}

impl CollageState {
    /// New empty collage with its grid already computed
    pub fn new(page: PageSize, layout: LayoutPreset, mode: SpaceMode) -> Self {
        Self {
            page,
            page_orientation: Orientation::Portrait,
            layout,
            images: Vec::new(),
            cells: Vec::new(),
            rows: 0,
            columns: 0,
            grid_orientation: Orientation::Portrait,
            mode,
            cutting_markers: CuttingMarkers::default(),
            unit: Unit::default(),
        }
        .regrid()
    }

    /// Recompute rows/columns from page, layout and mode, and replace the
    /// cell grid with a freshly built one. Existing assignments are dropped.
    pub fn regrid(mut self) -> Self {
        let (page_width, page_height) = self.page_dimensions_mm();
        let grid = crate::layout::compute_grid_for(
            page_width,
            page_height,
            self.page.margin_mm,
            &self.layout,
            self.mode,
        );

        self.rows = grid.rows;
        self.columns = grid.columns;
        self.grid_orientation = grid.orientation;
        self.cells = crate::cells::rebuild_cells(grid.rows, grid.columns, &self.images);
        self
    }

    pub fn total_cells(&self) -> usize {
        self.rows * self.columns
    }

    /// Page width and height with the page orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.page.dimensions_with_orientation(self.page_orientation)
    }

    /// Cell width and height as laid out on the page
    pub fn cell_dimensions_mm(&self) -> (f32, f32) {
        crate::layout::cell_dimensions(
            self.layout.cell_width_mm,
            self.layout.cell_height_mm,
            self.grid_orientation,
        )
    }

    pub fn image(&self, id: ImageId) -> Option<&CollageImage> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CollageCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Iterate cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = &CollageCell> {
        self.cells.iter().flatten()
    }

    pub fn filled_cells(&self) -> usize {
        self.iter_cells().filter(|cell| !cell.is_empty()).count()
    }

    /// Check the structural invariants of the aggregate
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == self.rows
            && self.cells.iter().all(|row| row.len() == self.columns)
            && self
                .iter_cells()
                .filter_map(|cell| cell.image_id)
                .all(|id| self.image(id).is_some())
    }
}

/// Problems the caller should surface to the user. None of these are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CollageWarning {
    /// Margin or cell size leaves room for no cells at all
    DegenerateGrid,
    /// More instances were requested than the grid can hold
    OverCapacity { requested: usize, capacity: usize },
}

impl std::fmt::Display for CollageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollageWarning::DegenerateGrid => {
                write!(f, "Page is too small for the selected cell size")
            }
            CollageWarning::OverCapacity {
                requested,
                capacity,
            } => write!(
                f,
                "{} images requested but only {} cells available",
                requested, capacity
            ),
        }
    }
}

/// Requested instances versus grid capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    /// Sum of all repeat counts
    pub requested: usize,
    /// Total cells in the grid
    pub capacity: usize,
    /// Instances that fit
    pub placed: usize,
}

impl CapacityReport {
    pub fn overflow(&self) -> usize {
        self.requested.saturating_sub(self.capacity)
    }

    pub fn is_over_capacity(&self) -> bool {
        self.requested > self.capacity
    }
}

/// Statistics about the collage
#[derive(Debug, Clone, PartialEq)]
pub struct CollageStatistics {
    pub rows: usize,
    pub columns: usize,
    pub total_cells: usize,
    pub filled_cells: usize,
    pub empty_cells: usize,
    /// Distinct images that appear in at least one cell
    pub images_placed: usize,
    /// Sum of all repeat counts
    pub requested_instances: usize,
    /// Requested instances that do not fit
    pub overflow: usize,
    /// Share of the page covered by the grid, 0..=100
    pub coverage_percent: f32,
}
