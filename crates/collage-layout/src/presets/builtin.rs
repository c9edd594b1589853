use crate::types::{LayoutPreset, PageSize, PaperSize};

/// Standard paper sizes as page presets, in catalogue order
pub fn builtin_page_sizes() -> Vec<PageSize> {
    PaperSize::STANDARD
        .iter()
        .map(|&paper| PageSize::from_paper(paper))
        .collect()
}

/// Common photo print sizes as cell templates
pub fn builtin_layouts() -> Vec<LayoutPreset> {
    vec![
        LayoutPreset::new("grid-2x2", "2×2 grid (3.5×5 in)", 89.0, 127.0),
        LayoutPreset::new("passport", "Passport (35×45 mm)", 35.0, 45.0),
        LayoutPreset::new("wallet", "Wallet (2.5×3.5 in)", 64.0, 89.0),
        LayoutPreset::new("photo-4x6", "4×6 in", 101.6, 152.4),
        LayoutPreset::new("photo-5x7", "5×7 in", 127.0, 177.8),
        LayoutPreset::new("square-50", "Square (50×50 mm)", 50.0, 50.0),
    ]
}
