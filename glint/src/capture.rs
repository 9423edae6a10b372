use glow::{HasContext, PixelPackData};

/// Read the back buffer into an image with a top-left origin.
///
/// Call after [`draw_frame`](crate::draw_frame) and before presenting; after
/// a buffer swap the back buffer contents are undefined.
pub fn capture_frame(gl: &glow::Context, width: u32, height: u32) -> image::RgbaImage {
    let mut bytes = vec![0u8; width as usize * height as usize * 4];
    unsafe {
        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelPackData::Slice(Some(bytes.as_mut_slice())),
        );
    }

    // read_pixels returns rows bottom-up.
    let mut image = image::RgbaImage::from_raw(width, height, bytes)
        .expect("capture buffer sized to width * height * 4");
    image::imageops::flip_vertical_in_place(&mut image);
    image
}
