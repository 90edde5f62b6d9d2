use log::{debug, warn};
use resvg::{tiny_skia, usvg};

use crate::Error;

/// rasterize `svg` onto a white `width` x `height` canvas and encode it as PNG
pub(crate) fn svg_to_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, Error> {
    let mut opts = usvg::Options::default();
    opts.fontdb_mut().load_system_fonts();
    let faces = opts.fontdb.len();
    debug!("loaded {faces} font faces");
    if let Some(msg) = missing_fonts(svg, faces) {
        warn!("{msg}");
    }

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Render(format!("failed to parse drawing: {e}")))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        Error::Render(format!("cannot allocate a {width}x{height} image"))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| Error::Render(format!("failed to encode PNG: {e}")))
}

/// a warning when `svg` has labels but no font faces were loaded to draw them
fn missing_fonts(svg: &str, faces: usize) -> Option<String> {
    let labels = svg.matches("<text").count();
    (faces == 0 && labels > 0).then(|| {
        format!("no system fonts found, {labels} atom label(s) will be missing from the PNG")
    })
}
