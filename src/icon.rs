use image::{Rgba, RgbaImage};

const ICON_SIZE: u32 = 32;
const COLOR_IDLE: (u8, u8, u8) = (142, 142, 147);
const COLOR_RECORDING: (u8, u8, u8) = (255, 59, 48);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    Idle,
    Recording,
}

impl MicState {
    pub fn icon(&self) -> Result<tray_icon::Icon, tray_icon::BadIcon> {
        let image = match self {
            MicState::Idle => draw_dot(COLOR_IDLE),
            MicState::Recording => draw_dot(COLOR_RECORDING),
        };
        let (width, height) = image.dimensions();
        tray_icon::Icon::from_rgba(image.into_raw(), width, height)
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            MicState::Idle => "spacetalk - hold space to record",
            MicState::Recording => "spacetalk - recording",
        }
    }
}

/// A filled circle on a transparent square.
fn draw_dot((r, g, b): (u8, u8, u8)) -> RgbaImage {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;
    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        if dx * dx + dy * dy <= radius * radius {
            Rgba([r, g, b, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_is_round() {
        let image = draw_dot(COLOR_RECORDING);
        assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(ICON_SIZE / 2, ICON_SIZE / 2).0, [255, 59, 48, 255]);
    }

    #[test]
    fn test_icons_build() {
        assert!(MicState::Idle.icon().is_ok());
        assert!(MicState::Recording.icon().is_ok());
    }
}
