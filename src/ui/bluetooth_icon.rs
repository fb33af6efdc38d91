//! "No Bluetooth" indicator

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{Point, Size},
    image::{Image, ImageRaw},
    pixelcolor::{BinaryColor, Rgb565},
    primitives::Rectangle,
    Drawable,
};

use super::BACKGROUND_COLOR;

/// Icon width and height
pub const ICON_SIZE: u32 = 16;

/// Screen area reserved for the icon
pub const AREA_SIZE: u32 = 30;

/// Crossed out Bluetooth rune, 1bpp, MSB first
#[rustfmt::skip]
const NO_BT_DATA: [u8; 32] = [
    0b10000000, 0b10000000,
    0b01000000, 0b11000000,
    0b00100000, 0b10100000,
    0b00010100, 0b10010000,
    0b00001010, 0b10010000,
    0b00000101, 0b10100000,
    0b00000011, 0b10000000,
    0b00000001, 0b10000000,
    0b00000011, 0b11000000,
    0b00000101, 0b01100000,
    0b00001001, 0b00110000,
    0b00010001, 0b00101000,
    0b00000000, 0b10100100,
    0b00000000, 0b11000010,
    0b00000000, 0b10000001,
    0b00000000, 0b00000000,
];

/// Shown while the phone is disconnected, hidden otherwise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BluetoothIcon {
    area: Rectangle,
}

impl BluetoothIcon {
    /// Icon in the bottom right corner of a display of the given size
    pub fn new(display: Size) -> Self {
        let top_left = Point::new(
            display.width as i32 - AREA_SIZE as i32,
            display.height as i32 - AREA_SIZE as i32,
        );
        Self {
            area: Rectangle::new(top_left, Size::new(AREA_SIZE, AREA_SIZE)),
        }
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    pub fn draw<D>(&self, connected: bool, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.fill_solid(&self.area, BACKGROUND_COLOR)?;
        if connected {
            return Ok(());
        }

        let raw = ImageRaw::<BinaryColor>::new(&NO_BT_DATA, ICON_SIZE);
        let offset = Point::new(ICON_SIZE as i32 / 2, ICON_SIZE as i32 / 2);
        Image::new(&raw, self.area.center() - offset).draw(&mut target.color_converted())
    }
}
