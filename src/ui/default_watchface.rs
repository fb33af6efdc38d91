//! Default watchface
//!
//! Hours in red stacked over minutes in white, the date below, a battery bar
//! along the top edge and a "no Bluetooth" icon in the bottom right corner.

use chrono::NaiveDateTime;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::RgbColor,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use profont::{PROFONT_14_POINT, PROFONT_24_POINT};

use super::{
    bluetooth_icon::{self, BluetoothIcon},
    labels::{self, BUF_LEN},
    status_bar::StatusBar,
    Error, WatchFace, WatchFaceState, BACKGROUND_COLOR,
};
use crate::{battery::BatteryInfo, config::WatchfaceConfig};

const CLOCK_FONT: &MonoFont<'static> = &PROFONT_24_POINT;
const DATE_FONT: &MonoFont<'static> = &PROFONT_14_POINT;

const HOURS_COLOR: Rgb565 = Rgb565::RED;
const MINUTES_COLOR: Rgb565 = Rgb565::WHITE;
const DATE_COLOR: Rgb565 = Rgb565::WHITE;

/// Gap between the clock labels and the vertical center
const CLOCK_GAP: i32 = 4;

/// Screen regions of the watchface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub bar: StatusBar,
    pub hours: Rectangle,
    pub minutes: Rectangle,
    pub date: Rectangle,
    pub icon: BluetoothIcon,
}

impl Layout {
    /// Layout for a display of the given size
    pub fn new(size: Size) -> Self {
        let w = size.width;
        let h = size.height as i32;
        let clock_height = CLOCK_FONT.character_size.height;
        let date_height = DATE_FONT.character_size.height;

        // The date stays clear of the icon column on both sides
        let side = bluetooth_icon::AREA_SIZE;

        Self {
            bar: StatusBar::new(w),
            hours: Rectangle::new(
                Point::new(0, h / 2 - clock_height as i32 - CLOCK_GAP),
                Size::new(w, clock_height),
            ),
            minutes: Rectangle::new(Point::new(0, h / 2 + CLOCK_GAP), Size::new(w, clock_height)),
            date: Rectangle::new(
                Point::new(side as i32, h * 140 / 168),
                Size::new(w.saturating_sub(2 * side), date_height),
            ),
            icon: BluetoothIcon::new(size),
        }
    }
}

/// Parts of the screen waiting for a repaint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Dirty {
    background: bool,
    clock: bool,
    battery: bool,
    connection: bool,
}

impl Dirty {
    const ALL: Self = Self {
        background: true,
        clock: true,
        battery: true,
        connection: true,
    };

    const NONE: Self = Self {
        background: false,
        clock: false,
        battery: false,
        connection: false,
    };
}

/// Basic default watchface
pub struct DefaultWatchface {
    config: WatchfaceConfig,
    state: WatchFaceState,
    dirty: Dirty,
}

impl DefaultWatchface {
    /// Create new watchface, fully repainted on the first draw
    pub fn new(config: WatchfaceConfig, state: WatchFaceState) -> Self {
        Self {
            config,
            state: WatchFaceState {
                battery: state.battery.clamped(),
                ..state
            },
            dirty: Dirty::ALL,
        }
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    /// Repaint the whole screen on the next draw
    pub fn invalidate(&mut self) {
        self.dirty = Dirty::ALL;
    }

    fn draw_clock<D>(&self, layout: &Layout, target: &mut D) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let time = &self.state.time;
        let mut buf = [0u8; BUF_LEN];

        let text = labels::format_hours(&mut buf, time, self.config.hour_format)
            .map_err(|_| Error::Format)?;
        draw_label(target, layout.hours, text, CLOCK_FONT, HOURS_COLOR).map_err(Error::Draw)?;

        let text = labels::format_minutes(&mut buf, time).map_err(|_| Error::Format)?;
        draw_label(target, layout.minutes, text, CLOCK_FONT, MINUTES_COLOR)
            .map_err(Error::Draw)?;

        let text = labels::format_date(&mut buf, time).map_err(|_| Error::Format)?;
        draw_label(target, layout.date, text, DATE_FONT, DATE_COLOR).map_err(Error::Draw)
    }
}

impl WatchFace for DefaultWatchface {
    fn on_tick(&mut self, time: NaiveDateTime) {
        if time != self.state.time {
            self.state.time = time;
            self.dirty.clock = true;
        }
    }

    fn on_battery(&mut self, info: BatteryInfo) {
        let info = info.clamped();
        if info != self.state.battery {
            self.state.battery = info;
            self.dirty.battery = true;
        }
    }

    fn on_connection(&mut self, connected: bool) {
        if connected != self.state.connected {
            self.state.connected = connected;
            self.dirty.connection = true;
            // Bar color follows the connection
            self.dirty.battery = true;
        }
    }

    fn state(&self) -> &WatchFaceState {
        &self.state
    }

    fn is_dirty(&self) -> bool {
        self.dirty != Dirty::NONE
    }

    fn draw<D>(&mut self, target: &mut D) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = Layout::new(target.bounding_box().size);
        let dirty = self.dirty;

        if dirty.background {
            target.clear(BACKGROUND_COLOR).map_err(Error::Draw)?;
        }
        if dirty.clock || dirty.background {
            self.draw_clock(&layout, target)?;
        }
        if dirty.battery || dirty.background {
            layout.bar.draw(&self.state, target).map_err(Error::Draw)?;
        }
        if dirty.connection || dirty.background {
            layout
                .icon
                .draw(self.state.connected, target)
                .map_err(Error::Draw)?;
        }

        self.dirty = Dirty::NONE;
        Ok(())
    }
}

/// Clear a label area and draw centered text at its top
fn draw_label<D>(
    target: &mut D,
    area: Rectangle,
    text: &str,
    font: &MonoFont<'_>,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.fill_solid(&area, BACKGROUND_COLOR)?;

    let character_style = MonoTextStyle::new(font, color);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let position = Point::new(area.center().x, area.top_left.y);

    Text::with_text_style(text, position, character_style, text_style).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_regions_do_not_overlap() {
        let layout = Layout::new(Size::new(240, 240));
        let regions = [
            layout.bar.bounds(),
            layout.hours,
            layout.minutes,
            layout.date,
            layout.icon.area(),
        ];

        for (i, a) in regions.iter().enumerate() {
            for b in regions.iter().skip(i + 1) {
                assert!(a.intersection(b).is_zero_sized(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn layout_for_pinetime() {
        let layout = Layout::new(Size::new(240, 240));
        assert_eq!(layout.bar.bounds(), Rectangle::new(Point::zero(), Size::new(240, 5)));
        assert_eq!(layout.date.top_left, Point::new(30, 200));
        assert_eq!(layout.date.size.width, 180);
        assert_eq!(layout.minutes.top_left, Point::new(0, 124));
    }

    #[test]
    fn new_clamps_battery() {
        let face = DefaultWatchface::new(
            WatchfaceConfig::default(),
            WatchFaceState {
                battery: BatteryInfo { percent: 130, charging: false },
                ..Default::default()
            },
        );
        assert_eq!(face.state().battery.percent, 100);
        assert!(face.is_dirty());
    }

    #[test]
    fn unchanged_events_do_not_dirty() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::default(), WatchFaceState::default());
        face.dirty = Dirty::NONE;

        face.on_connection(false);
        face.on_battery(BatteryInfo::default());
        face.on_tick(NaiveDateTime::default());
        assert!(!face.is_dirty());

        face.on_connection(true);
        assert!(face.dirty.connection);
        assert!(face.dirty.battery);
        assert!(!face.dirty.clock);
    }
}
