use crate::error::{GlintError, Result};
use glow::{HasContext, PixelUnpackData};
use std::path::Path;
use std::sync::Arc;

/// Levels in a full mip chain over a `width` x `height` image.
pub(crate) fn calc_miplevels(width: u32, height: u32) -> u32 {
    let mut size = std::cmp::max(width, height);
    let mut levels = 0;
    while size != 0 {
        levels += 1;
        size >>= 1;
    }
    levels
}

/// An immutable, mipmapped 2D texture.
///
/// Wrap is repeat on both axes and both filters are linear; the scenes have
/// no use for anything configurable here.
pub struct Texture2D {
    gl: Arc<glow::Context>,
    raw: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Decode the image at `path` into RGBA8 and upload it.
    ///
    /// A file that cannot be read or decoded is a hard error; continuing
    /// without the texture would leave sampling undefined.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self> {
        // GL samples with a bottom-left UV origin; flip the decoded rows.
        let image = image::open(path.as_ref())?.flipv().to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba8(gl, width, height, &image.into_raw())
    }

    /// Upload tightly packed RGBA8 pixels with a full mip chain.
    pub fn from_rgba8(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> Result<Self> {
        let levels = calc_miplevels(width, height);
        let raw = unsafe {
            let raw = gl.create_texture().map_err(GlintError::Allocation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_storage_2d(
                glow::TEXTURE_2D,
                levels as i32,
                glow::RGBA8,
                width as i32,
                height as i32,
            );

            gl.pixel_store_i32(glow::UNPACK_ROW_LENGTH, 0);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(bytes)),
            );

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
            raw
        };

        Ok(Texture2D {
            gl: Arc::clone(gl),
            raw,
            width,
            height,
        })
    }

    /// Bind to the given texture unit for sampling.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.raw) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miplevels_cover_the_largest_axis() {
        assert_eq!(calc_miplevels(1, 1), 1);
        assert_eq!(calc_miplevels(2, 2), 2);
        assert_eq!(calc_miplevels(256, 256), 9);
        assert_eq!(calc_miplevels(800, 600), 10);
        assert_eq!(calc_miplevels(8, 1), 4);
    }
}
