use crate::error::{Result, TrayError};

pub const ICON_SIZE: u32 = 64;

/// Raw RGBA pixels a backend turns into an [`IconHandle`](super::IconHandle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

impl IconImage {
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(TrayError::InvalidArgument(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self { rgba, width, height })
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Same pixels reordered to BGRA, as GDI expects.
    pub fn to_bgra(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect()
    }
}

/// Default glyph: a filled disc on a transparent background.
pub fn default_icon() -> IconImage {
    let mut data = vec![0u8; (ICON_SIZE * ICON_SIZE * 4) as usize];
    let center = ICON_SIZE as i32 / 2;
    paint_disc(&mut data, ICON_SIZE, (center, center), center - 4, [40, 120, 220, 255]);
    IconImage {
        rgba: data,
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

pub fn default_icon_with_badge() -> IconImage {
    let mut icon = default_icon();
    add_notification_dot(&mut icon.rgba, ICON_SIZE);
    icon
}

fn add_notification_dot(data: &mut [u8], size: u32) {
    let dot_radius = 8i32;
    let center = ((size as i32) - dot_radius - 2, dot_radius + 2);
    paint_disc(data, size, center, dot_radius, [230, 150, 0, 255]);
}

fn paint_disc(data: &mut [u8], size: u32, center: (i32, i32), radius: i32, color: [u8; 4]) {
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = x - center.0;
            let dy = y - center.1;
            if dx * dx + dy * dy <= radius * radius {
                let idx = ((y as u32 * size + x as u32) * 4) as usize;
                data[idx..idx + 4].copy_from_slice(&color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(image: &IconImage, x: u32, y: u32) -> &[u8] {
        let idx = ((y * image.width() + x) * 4) as usize;
        &image.rgba()[idx..idx + 4]
    }

    #[test]
    fn from_rgba_validates_length() {
        let cases = [
            (vec![0u8; 16], 2, 2, true),
            (vec![0u8; 15], 2, 2, false),
            (vec![0u8; 0], 0, 0, false),
            (vec![0u8; 32], 2, 2, false),
        ];

        for (data, w, h, ok) in cases {
            let len = data.len();
            assert_eq!(IconImage::from_rgba(data, w, h).is_ok(), ok, "{} bytes for {}x{}", len, w, h);
        }
    }

    #[test]
    fn default_icon_is_opaque_in_center_and_clear_in_corner() {
        let icon = default_icon();

        assert_eq!(pixel(&icon, 32, 32)[3], 255);
        assert_eq!(pixel(&icon, 0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn badge_paints_top_right_corner() {
        let plain = default_icon();
        let badged = default_icon_with_badge();

        assert_eq!(pixel(&badged, 54, 10), &[230, 150, 0, 255]);
        assert_ne!(pixel(&plain, 54, 10), pixel(&badged, 54, 10));
        assert_eq!(pixel(&plain, 10, 54), pixel(&badged, 10, 54));
    }

    #[test]
    fn to_bgra_swaps_red_and_blue() {
        let image = IconImage::from_rgba(vec![1, 2, 3, 4], 1, 1).unwrap();
        assert_eq!(image.to_bgra(), vec![3, 2, 1, 4]);
    }
}
