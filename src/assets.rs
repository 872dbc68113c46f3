use crate::sprites::SheetLayout;
use anyhow::{Context, ensure};
use image::RgbaImage;
use std::path::Path;

/// Decoded sprite sheet, tightly packed RGBA8 rows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SheetImage {
    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }
}

pub fn load_sheet<P>(path: P, layout: SheetLayout) -> anyhow::Result<SheetImage>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("couldn't load sprite sheet {}", path.display()))?
        .to_rgba8();
    let sheet =
        sheet_from_image(image, layout).with_context(|| format!("in {}", path.display()))?;
    log::info!("Loaded {} ({}x{})", path.display(), sheet.width, sheet.height);
    Ok(sheet)
}

/// Check that every cell of `layout` fits in `image`
pub fn sheet_from_image(image: RgbaImage, layout: SheetLayout) -> anyhow::Result<SheetImage> {
    let required = layout.required_size();
    let (width, height) = image.dimensions();
    ensure!(
        layout.clips().all(|clip| clip.right() <= width && clip.bottom() <= height),
        "sheet is {width}x{height}, needs at least {}x{} for {} cells",
        required.x,
        required.y,
        layout.count
    );
    Ok(SheetImage { width, height, rgba: image.into_raw() })
}
