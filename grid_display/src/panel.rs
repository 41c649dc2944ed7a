// panel.rs - Panel wiring options shared by the display backends

use conway::DisplayError;

/// Wiring ids the panel driver understands.
pub const HARDWARE_MAPPINGS: &[&str] = &[
    "regular",
    "regular-pi1",
    "adafruit-hat",
    "adafruit-hat-pwm",
    "classic",
    "classic-pi1",
    "compute-module",
];

pub const MAX_GPIO_SLOWDOWN: u32 = 4;

/// Panel geometry and driver settings, passed through from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelOptions {
    pub rows: usize,
    pub cols: usize,
    pub chain: usize,
    pub parallel: usize,
    pub hardware_mapping: String,
    pub gpio_slowdown: u32,
    pub brightness: u8,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 32,
            chain: 1,
            parallel: 1,
            hardware_mapping: "adafruit-hat".to_string(),
            gpio_slowdown: 4,
            brightness: 80,
        }
    }
}

impl PanelOptions {
    /// Chained panels extend the display horizontally.
    pub fn width(&self) -> usize {
        self.cols * self.chain
    }

    /// Parallel chains stack vertically.
    pub fn height(&self) -> usize {
        self.rows * self.parallel
    }

    /// What a driver would check before touching the hardware.
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.rows == 0 || self.cols == 0 || self.chain == 0 || self.parallel == 0 {
            return Err(DisplayError::Init(format!(
                "panel geometry must be non-zero (rows {}, cols {}, chain {}, parallel {})",
                self.rows, self.cols, self.chain, self.parallel
            )));
        }
        if !HARDWARE_MAPPINGS.contains(&self.hardware_mapping.as_str()) {
            return Err(DisplayError::Init(format!(
                "unknown hardware mapping `{}` (expected one of: {})",
                self.hardware_mapping,
                HARDWARE_MAPPINGS.join(", ")
            )));
        }
        if !(1..=100).contains(&self.brightness) {
            return Err(DisplayError::Init(format!(
                "brightness {} must be between 1 and 100",
                self.brightness
            )));
        }
        if self.gpio_slowdown > MAX_GPIO_SLOWDOWN {
            return Err(DisplayError::Init(format!(
                "gpio slowdown {} must be at most {MAX_GPIO_SLOWDOWN}",
                self.gpio_slowdown
            )));
        }
        Ok(())
    }
}
