use crate::bitmap::Bitmap;

use image::{ImageBuffer, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

/*---- Utilities ----*/

/// Returns a string of SVG code for the given bitmap, one unit per pixel.
///
/// Each run of set pixels in a row becomes one rectangle in a single path.
/// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(bitmap: &Bitmap) -> String {
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {} {}\" stroke=\"none\">\n",
        bitmap.width(),
        bitmap.height()
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..bitmap.height() {
        let mut x = 0;
        while x < bitmap.width() {
            if !bitmap.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < bitmap.width() && bitmap.get(x, y) {
                x += 1;
            }
            if !first {
                result += " ";
            }
            first = false;
            result += &format!("M{},{}h{}v1h-{}z", start, y, x - start, x - start);
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Returns the bitmap as block art, two characters per pixel so it looks square in a terminal.
pub fn to_ascii(bitmap: &Bitmap) -> String {
    let mut out = String::new();
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let c: char = if bitmap.get(x, y) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Prints the given bitmap to the console.
pub fn print_bitmap(bitmap: &Bitmap) {
    println!("{}", to_ascii(bitmap));
}

/// Converts a bitmap into a grayscale image buffer: set pixels black, clear pixels white.
///
/// # Example
///
/// ```rust
/// use qirender::helper::to_image_buffer;
/// use qirender::{BitMatrix, ModuleSizeRenderer, Renderable};
///
/// let mut renderer = ModuleSizeRenderer::new();
/// let bitmap = renderer.render(&BitMatrix::new(21, 21)).unwrap();
/// let img = to_image_buffer(bitmap);
/// assert_eq!(img.dimensions(), (116, 116));
/// ```
pub fn to_image_buffer(bitmap: &Bitmap) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    ImageBuffer::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        if bitmap.get(x, y) {
            Luma([0u8]) // Black
        } else {
            Luma([255u8]) // White
        }
    })
}

/// Saves a bitmap as a PNG file and returns the written path.
///
/// # Arguments
///
/// * `bitmap` - The rendered bitmap.
/// * `directory_path` - Optional. Target directory, created if missing. Defaults to "generated".
/// * `filename` - Optional. File name without extension. Defaults to a timestamp.
///
/// # Errors
///
/// Returns [`crate::RenderError::Io`] if the directory cannot be created and
/// [`crate::RenderError::Image`] if the image cannot be written.
pub fn save_png(
    bitmap: &Bitmap,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}", since_the_epoch.as_nanos())
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = Path::new(directory_path).join(format!("{}.png", filename));
    to_image_buffer(bitmap).save(&file_path)?;
    Ok(file_path)
}
