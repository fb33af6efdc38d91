//! Battery status bar
//!
//! A thin bar across the display whose filled width follows the battery
//! level. The fill color encodes charging, low battery, and phone connection.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb565,
    prelude::RgbColor,
    primitives::Rectangle,
};

use super::{WatchFaceState, BACKGROUND_COLOR};

/// Height of the bar in pixels
pub const BAR_HEIGHT: u32 = 5;

/// Battery level at or below which the bar turns red
pub const LOW_BATTERY_PERCENT: u8 = 20;

/// Fill color of the bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarColor {
    /// Charging
    Green,
    /// Low battery
    Red,
    /// Phone connected
    Blue,
    White,
}

impl From<BarColor> for Rgb565 {
    fn from(color: BarColor) -> Self {
        match color {
            BarColor::Green => Rgb565::GREEN,
            BarColor::Red => Rgb565::RED,
            BarColor::Blue => Rgb565::BLUE,
            BarColor::White => Rgb565::WHITE,
        }
    }
}

/// Filled part of the bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarFill {
    /// Filled width in pixels
    pub width: u32,
    pub color: BarColor,
}

/// Compute the filled width and color of the bar.
///
/// The width is truncated, not rounded: `percent / 100 * width` is computed
/// in `f32` and cast back to an integer. The fill never exceeds `width`.
pub fn compute_bar(percent: u8, charging: bool, blue: bool, width: u32) -> BarFill {
    let percent = percent.min(100);
    // f32 rounds widths above 2^24, which may land past `width`
    let fill = ((percent as f32 / 100.0 * width as f32) as u32).min(width);

    let color = if charging {
        BarColor::Green
    } else if percent <= LOW_BATTERY_PERCENT {
        BarColor::Red
    } else if blue {
        BarColor::Blue
    } else {
        BarColor::White
    };

    BarFill { width: fill, color }
}

/// Battery bar drawn on a black track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusBar {
    bounds: Rectangle,
}

impl StatusBar {
    /// Bar spanning `width` pixels at the top of the display
    pub fn new(width: u32) -> Self {
        Self::at(Point::zero(), width)
    }

    pub fn at(top_left: Point, width: u32) -> Self {
        Self {
            bounds: Rectangle::new(top_left, Size::new(width, BAR_HEIGHT)),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Fill of this bar for the given state
    pub fn fill(&self, state: &WatchFaceState) -> BarFill {
        let battery = state.battery.clamped();
        compute_bar(
            battery.percent,
            battery.charging,
            state.connected,
            self.bounds.size.width,
        )
    }

    pub fn draw<D>(&self, state: &WatchFaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fill = self.fill(state);

        // Track
        target.fill_solid(&self.bounds, BACKGROUND_COLOR)?;

        // Bar
        if fill.width > 0 {
            let bar = Rectangle::new(self.bounds.top_left, Size::new(fill.width, BAR_HEIGHT));
            target.fill_solid(&bar, fill.color.into())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::BatteryInfo;
    use embedded_graphics::mock_display::MockDisplay;

    fn state(percent: u8, charging: bool, connected: bool) -> WatchFaceState {
        WatchFaceState {
            battery: BatteryInfo { percent, charging },
            connected,
            ..Default::default()
        }
    }

    #[test]
    fn empty_battery() {
        let fill = compute_bar(0, false, false, 100);
        assert_eq!(fill.width, 0);
    }

    #[test]
    fn full_battery() {
        assert_eq!(compute_bar(100, false, false, 100).width, 100);
        assert_eq!(compute_bar(100, false, false, 240).width, 240);
    }

    #[test]
    fn width_is_truncated() {
        // 33% of 10px is 3.3px
        assert_eq!(compute_bar(33, false, false, 10).width, 3);
        // 99% of 10px is 9.9px
        assert_eq!(compute_bar(99, false, false, 10).width, 9);
        assert_eq!(compute_bar(50, false, false, 144).width, 72);
    }

    #[test]
    fn out_of_range_percent_is_clamped() {
        assert_eq!(compute_bar(200, false, false, 100), compute_bar(100, false, false, 100));
    }

    #[test]
    fn zero_width() {
        assert_eq!(compute_bar(80, false, false, 0).width, 0);
    }

    #[test]
    fn width_is_monotonic() {
        for width in [0, 1, 7, 100, 144, 240] {
            let mut last = 0;
            for percent in 0..=100 {
                let fill = compute_bar(percent, false, false, width);
                assert!(fill.width >= last, "{percent}% of {width}px");
                assert!(fill.width <= width);
                last = fill.width;
            }
        }
    }

    #[test]
    fn fill_stays_within_wide_bars() {
        for width in [16_777_217, 33_554_431, u32::MAX] {
            assert!(compute_bar(100, false, false, width).width <= width);
            assert!(compute_bar(99, false, false, width).width <= width);
        }
        assert_eq!(compute_bar(100, false, false, 33_554_431).width, 33_554_431);
    }

    #[test]
    fn color_priority() {
        // Charging overrides everything
        assert_eq!(compute_bar(50, true, false, 100).color, BarColor::Green);
        assert_eq!(compute_bar(10, true, true, 100).color, BarColor::Green);
        // Low battery overrides the connection color
        assert_eq!(compute_bar(15, false, true, 100).color, BarColor::Red);
        assert_eq!(compute_bar(20, false, false, 100).color, BarColor::Red);
        assert_eq!(compute_bar(50, false, true, 100).color, BarColor::Blue);
        assert_eq!(compute_bar(21, false, false, 100).color, BarColor::White);
    }

    #[test]
    fn compute_is_pure() {
        let first = compute_bar(64, false, true, 200);
        let second = compute_bar(64, false, true, 200);
        assert_eq!(first, second);
    }

    #[test]
    fn draw_partial_bar() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);

        StatusBar::new(64)
            .draw(&state(50, false, true), &mut display)
            .unwrap();

        for y in 0..BAR_HEIGHT as i32 {
            for x in 0..32 {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(Rgb565::BLUE));
            }
            for x in 32..64 {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(Rgb565::BLACK));
            }
        }
        assert_eq!(display.get_pixel(Point::new(0, BAR_HEIGHT as i32)), None);
    }

    #[test]
    fn draw_empty_bar_shows_only_track() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);

        StatusBar::new(64)
            .draw(&state(0, false, false), &mut display)
            .unwrap();

        for y in 0..BAR_HEIGHT as i32 {
            for x in 0..64 {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(Rgb565::BLACK));
            }
        }
    }

    #[test]
    fn draw_clamps_hand_built_state() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);

        StatusBar::new(64)
            .draw(&state(150, true, false), &mut display)
            .unwrap();

        assert_eq!(display.get_pixel(Point::new(63, 0)), Some(Rgb565::GREEN));
    }
}
