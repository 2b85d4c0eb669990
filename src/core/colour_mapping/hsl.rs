use crate::core::data::colour::Colour;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Two-temperature HSL to RGB conversion, rounding each channel.
    ///
    /// Hue wraps per channel, so any `h` in `[0, 360]` is accepted.
    #[must_use]
    pub fn to_rgb(self) -> Colour {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let val = channel(l * 255.0);
            return Colour::new(val, val, val);
        }

        let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let t1 = 2.0 * l - t2;

        let mut rgb = [0_u8; 3];
        for (i, out) in rgb.iter_mut().enumerate() {
            let mut t3 = h + 1.0 / 3.0 * -(i as f64 - 1.0);
            if t3 < 0.0 {
                t3 += 1.0;
            }
            if t3 > 1.0 {
                t3 -= 1.0;
            }

            let val = if 6.0 * t3 < 1.0 {
                t1 + (t2 - t1) * 6.0 * t3
            } else if 2.0 * t3 < 1.0 {
                t2
            } else if 3.0 * t3 < 2.0 {
                t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
            } else {
                t1
            };

            *out = channel(val * 255.0);
        }

        Colour::from(rgb)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
