use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes the frame as a binary (P6) PPM, creating parent directories as needed.
pub fn write_ppm(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let filepath = filepath.as_ref();

    if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = BufWriter::new(fs::File::create(filepath)?);
    encode_ppm(buffer, &mut file)?;
    file.flush()
}

pub fn encode_ppm<W: Write>(buffer: &PixelBuffer, out: &mut W) -> std::io::Result<()> {
    let dimensions = buffer.dimensions();

    // P6 = binary RGB, then width height max_colour
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", dimensions.width, dimensions.height)?;
    writeln!(out, "255")?;
    out.write_all(buffer.buffer())
}
