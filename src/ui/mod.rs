//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, prelude::RgbColor};

use crate::battery::BatteryInfo;

pub mod bluetooth_icon;
pub mod default_watchface;
pub mod labels;
pub mod status_bar;

pub use default_watchface::DefaultWatchface;

/// Screen background
pub const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;

/// Event interface of a watch face
///
/// Each platform event maps to one method. The firmware feeds events in as
/// they arrive and calls `draw` to bring the screen up to date.
pub trait WatchFace {
    /// Local time changed to a new minute
    fn on_tick(&mut self, time: NaiveDateTime);

    /// Battery level or charging state changed
    fn on_battery(&mut self, info: BatteryInfo);

    /// Phone connection established or lost
    fn on_connection(&mut self, connected: bool);

    /// Current state
    fn state(&self) -> &WatchFaceState;

    /// Whether `draw` has anything to paint
    fn is_dirty(&self) -> bool;

    /// Repaint the parts of the screen affected by events since the last draw
    fn draw<D>(&mut self, target: &mut D) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>;
}

/// State for the watch face
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchFaceState {
    /// Local time
    pub time: NaiveDateTime,
    pub battery: BatteryInfo,
    /// Phone connection
    pub connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Draw target failed
    Draw(E),
    /// Label text did not fit its buffer
    Format,
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Draw(_) => defmt::write!(fmt, "Draw"),
            Error::Format => defmt::write!(fmt, "Format"),
        }
    }
}
