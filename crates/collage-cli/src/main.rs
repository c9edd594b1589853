mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use collage_layout::*;
use std::path::{Path, PathBuf};

use crate::logger::CliLogger;

#[derive(Parser)]
#[command(name = "collage", about = "Photo collage layout tool", version)]
struct Cli {
    /// Load preferences from a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page size preset id (see `presets list`)
    #[arg(long)]
    page: Option<String>,

    /// Layout preset id (see `presets list --kind layout`)
    #[arg(long)]
    layout: Option<String>,

    /// Page margin, e.g. "5mm", "0.5cm", "0.25in"
    #[arg(long)]
    margin: Option<String>,

    /// Space mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Lay the page out landscape
    #[arg(long)]
    landscape: bool,

    /// Unit for printed dimensions
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grid a page and layout produce
    Grid {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Place images into the grid and print the resulting assignment
    Plan {
        #[command(flatten)]
        page: PageArgs,

        /// Image as name[:count]; repeat for more images
        #[arg(short, long = "image", required = true, num_args = 1..)]
        images: Vec<String>,

        /// Split the grid evenly between images before placing them
        #[arg(long)]
        distribute: bool,
    },

    /// Convert a dimension between units
    Convert {
        /// Dimension such as "8.5in", "21 cm" or "210"
        text: String,

        /// Target unit
        #[arg(long, value_enum, default_value = "mm")]
        to: UnitArg,

        /// Decimal places
        #[arg(long, default_value = "2")]
        decimals: usize,
    },

    /// Manage page size and layout presets
    Presets {
        #[command(subcommand)]
        action: PresetsAction,
    },
}

#[derive(Subcommand)]
enum PresetsAction {
    /// List presets, including any imported from a file
    List {
        #[arg(long, value_enum, default_value = "page")]
        kind: KindArg,

        /// Presets file to import before listing
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Write custom presets to a JSON file
    Export {
        /// Output JSON file
        output: PathBuf,

        #[arg(long, value_enum, default_value = "layout")]
        kind: KindArg,

        /// Preset as "Label=WIDTHxHEIGHT", e.g. "Mini=40x60" or "Postcard=6inx4in"
        #[arg(long = "add", required = true, num_args = 1..)]
        presets: Vec<String>,

        /// Margin for page presets
        #[arg(long, default_value = "5mm")]
        margin: String,
    },

    /// Check a presets file and report accepted and rejected records
    Import {
        /// Input JSON file
        input: PathBuf,

        #[arg(long, value_enum, default_value = "layout")]
        kind: KindArg,

        /// Write the accepted presets back out here
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Loose,
    Tight,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Mm,
    Cm,
    In,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Page,
    Layout,
}

impl From<ModeArg> for SpaceMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Loose => Self::Loose,
            ModeArg::Tight => Self::Tight,
        }
    }
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Mm => Self::Millimeters,
            UnitArg::Cm => Self::Centimeters,
            UnitArg::In => Self::Inches,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(500, cli.verbose);
    logger.clone().init()?;

    let config = match &cli.config {
        Some(path) => ControllerConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ControllerConfig::default(),
    };

    match cli.command {
        Commands::Grid { page } => {
            let controller = build_controller(config, &page)?;
            print_grid(controller.state());
        }

        Commands::Plan {
            page,
            images,
            distribute,
        } => {
            let mut controller = build_controller(config, &page)?;
            for spec in &images {
                let (name, count) = parse_image_arg(spec)?;
                let id = controller.add_image(NewImage::new(name, name));
                controller.update_count(id, count);
            }
            if distribute {
                controller.distribute_equally();
            }
            controller.rearrange();

            print_grid(controller.state());
            println!();
            print_assignment(controller.state());
            println!();
            print_statistics(&controller.statistics());
            for warning in controller.warnings() {
                println!("Warning: {}", warning);
            }
        }

        Commands::Convert { text, to, decimals } => {
            let dimension = parse_dimension(&text);
            if !dimension.is_valid() {
                bail!("Not a dimension: '{}'", text);
            }
            println!("{}", format_dimension(dimension.to_mm(), to.into(), decimals));
        }

        Commands::Presets { action } => run_presets(action).await?,
    }

    let warnings = logger.warning_count();
    if warnings > 0 {
        log::debug!("Finished with {} warning(s)", warnings);
    }

    Ok(())
}

/// Controller from the loaded config with the command-line overrides applied
fn build_controller(mut config: ControllerConfig, args: &PageArgs) -> Result<CollageController> {
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(unit) = args.unit {
        config.unit = unit.into();
    }

    let mut controller = CollageController::new(config);

    if let Some(id) = &args.page {
        controller.select_page(id)?;
    }
    if let Some(id) = &args.layout {
        controller.select_layout(id)?;
    }
    if let Some(margin) = &args.margin {
        let mut page = controller.state().page.clone();
        page.margin_mm = parse_margin(margin)?;
        controller.set_page_size(page)?;
    }
    if args.landscape {
        controller.set_page_orientation(Orientation::Landscape);
    }

    Ok(controller)
}

/// Split "name[:count]"; the count defaults to one
fn parse_image_arg(spec: &str) -> Result<(&str, usize)> {
    match spec.rsplit_once(':') {
        Some((name, count)) if !name.is_empty() => {
            let count = count
                .parse()
                .with_context(|| format!("Invalid count in '{}'", spec))?;
            Ok((name, count))
        }
        _ => Ok((spec, DEFAULT_IMAGE_COUNT)),
    }
}

fn parse_length(text: &str) -> Result<f32> {
    let dimension = parse_dimension(text);
    if !dimension.is_valid() {
        bail!("Not a dimension: '{}'", text);
    }
    Ok(dimension.to_mm())
}

/// Like `parse_length`, but zero is allowed for a borderless page
fn parse_margin(text: &str) -> Result<f32> {
    let dimension = parse_dimension(text);
    if dimension.unit.is_none() {
        bail!("Not a margin: '{}'", text);
    }
    Ok(dimension.to_mm())
}

/// Parse "Label=WIDTHxHEIGHT"
fn parse_preset_arg(spec: &str) -> Result<(&str, f32, f32)> {
    let Some((label, size)) = spec.split_once('=') else {
        bail!("Expected Label=WIDTHxHEIGHT, got '{}'", spec);
    };
    let Some((width, height)) = size.split_once(['x', '×']) else {
        bail!("Expected WIDTHxHEIGHT, got '{}'", size);
    };
    Ok((label.trim(), parse_length(width)?, parse_length(height)?))
}

fn print_grid(state: &CollageState) {
    let unit = state.unit;
    let (page_width, page_height) = state.page_dimensions_mm();
    let (cell_width, cell_height) = state.cell_dimensions_mm();

    println!("Grid:");
    println!(
        "  Page: {} ({} × {}, margin {})",
        state.page.label,
        format_dimension(page_width, unit, DEFAULT_DECIMALS),
        format_dimension(page_height, unit, DEFAULT_DECIMALS),
        format_dimension(state.page.margin_mm, unit, DEFAULT_DECIMALS)
    );
    println!(
        "  Cell: {} ({} × {})",
        state.layout.label,
        format_dimension(cell_width, unit, DEFAULT_DECIMALS),
        format_dimension(cell_height, unit, DEFAULT_DECIMALS)
    );
    println!("  Mode: {:?}", state.mode);
    println!("  Rows: {}", state.rows);
    println!("  Columns: {}", state.columns);
    println!("  Orientation: {:?}", state.grid_orientation);
    println!("  Total cells: {}", state.total_cells());
}

fn print_assignment(state: &CollageState) {
    let width = state
        .images
        .iter()
        .map(|image| image.name.chars().count())
        .max()
        .unwrap_or(1)
        + 2;

    println!("Assignment:");
    for row in &state.cells {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let label = match cell.image_id.and_then(|id| state.image(id)) {
                    Some(image) => match cell.orientation {
                        ImageOrientation::Landscape => format!("{}↔", image.name),
                        _ => image.name.clone(),
                    },
                    None => "-".to_string(),
                };
                format!("{:<width$}", label, width = width)
            })
            .collect();
        println!("  {}", line.join(" ").trim_end());
    }
}

fn print_statistics(stats: &CollageStatistics) {
    println!("Statistics:");
    println!("  Filled cells: {}/{}", stats.filled_cells, stats.total_cells);
    println!("  Empty cells: {}", stats.empty_cells);
    println!("  Images placed: {}", stats.images_placed);
    println!("  Requested instances: {}", stats.requested_instances);
    if stats.overflow > 0 {
        println!("  Not placed: {}", stats.overflow);
    }
    println!("  Page coverage: {:.1}%", stats.coverage_percent);
}

async fn run_presets(action: PresetsAction) -> Result<()> {
    match action {
        PresetsAction::List { kind, from } => match kind {
            KindArg::Page => {
                let mut pages = PresetRegistry::with_builtin_pages();
                if let Some(path) = &from {
                    report_import(&pages.import_file(path).await?, path);
                }
                for entry in pages.entries() {
                    let page = &entry.preset;
                    println!(
                        "{:<16} {:<24} {} × {} mm{}",
                        page.id,
                        page.label,
                        page.width_mm,
                        page.height_mm,
                        if entry.is_custom { "  (custom)" } else { "" }
                    );
                }
            }
            KindArg::Layout => {
                let mut layouts = PresetRegistry::with_builtin_layouts();
                if let Some(path) = &from {
                    report_import(&layouts.import_file(path).await?, path);
                }
                for entry in layouts.entries() {
                    let layout = &entry.preset;
                    println!(
                        "{:<16} {:<24} {} × {} mm{}",
                        layout.id,
                        layout.label,
                        layout.cell_width_mm,
                        layout.cell_height_mm,
                        if entry.is_custom { "  (custom)" } else { "" }
                    );
                }
            }
        },

        PresetsAction::Export {
            output,
            kind,
            presets,
            margin,
        } => {
            let count = presets.len();
            match kind {
                KindArg::Page => {
                    let margin = parse_margin(&margin)?;
                    let mut pages = PresetRegistry::with_builtin_pages();
                    for spec in &presets {
                        let (label, width, height) = parse_preset_arg(spec)?;
                        pages.add_custom(PageSize::new("", label, width, height, margin))?;
                    }
                    pages.export_file(&output).await?;
                }
                KindArg::Layout => {
                    let mut layouts = PresetRegistry::with_builtin_layouts();
                    for spec in &presets {
                        let (label, width, height) = parse_preset_arg(spec)?;
                        layouts.add_custom(LayoutPreset::new("", label, width, height))?;
                    }
                    layouts.export_file(&output).await?;
                }
            }
            println!("Exported {} preset(s) → {}", count, output.display());
        }

        PresetsAction::Import {
            input,
            kind,
            output,
        } => {
            let report = match kind {
                KindArg::Page => import_and_rewrite::<PageSize>(
                    PresetRegistry::with_builtin_pages(),
                    &input,
                    output.as_deref(),
                )
                .await?,
                KindArg::Layout => import_and_rewrite::<LayoutPreset>(
                    PresetRegistry::with_builtin_layouts(),
                    &input,
                    output.as_deref(),
                )
                .await?,
            };
            report_import(&report, &input);
            if let Some(output) = output {
                println!("Wrote {} preset(s) → {}", report.accepted, output.display());
            }
        }
    }

    Ok(())
}

async fn import_and_rewrite<T>(
    mut registry: PresetRegistry<T>,
    input: &Path,
    output: Option<&Path>,
) -> Result<ImportReport>
where
    T: Preset + serde::Serialize + serde::de::DeserializeOwned,
{
    let report = registry.import_file(input).await?;
    if let Some(output) = output {
        registry.export_file(output).await?;
    }
    Ok(report)
}

fn report_import(report: &ImportReport, path: &Path) {
    println!(
        "Imported {} preset(s) from {} ({} rejected)",
        report.accepted,
        path.display(),
        report.rejected
    );
    for error in &report.errors {
        println!("  {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_margin_accepts_zero() {
        assert_eq!(parse_margin("0").unwrap(), 0.0);
        assert_eq!(parse_margin("0mm").unwrap(), 0.0);
        assert!((parse_margin("0.5cm").unwrap() - 5.0).abs() < 1e-4);
        assert!(parse_margin("-1mm").is_err());
        assert!(parse_margin("wide").is_err());
    }

    #[test]
    fn test_parse_length_rejects_zero() {
        assert!(parse_length("0").is_err());
        assert!((parse_length("4in").unwrap() - 101.6).abs() < 1e-3);
    }

    #[test]
    fn test_borderless_margin_override() {
        let args = PageArgs {
            page: Some("a4".to_string()),
            layout: Some("grid-2x2".to_string()),
            margin: Some("0".to_string()),
            mode: None,
            landscape: false,
            unit: None,
        };
        let controller = build_controller(ControllerConfig::default(), &args).unwrap();
        assert_eq!(controller.state().page.margin_mm, 0.0);
    }

    #[test]
    fn test_parse_image_arg() {
        assert_eq!(parse_image_arg("beach:3").unwrap(), ("beach", 3));
        assert_eq!(parse_image_arg("beach").unwrap(), ("beach", 1));
        assert!(parse_image_arg("beach:many").is_err());
    }
}
