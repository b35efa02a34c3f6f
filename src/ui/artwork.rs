//! Procedural header artwork — a great wave under a pale sky with a small
//! mountain on the horizon — plus the blur and darkening the engine asks for.
//!
//! Everything works in normalised image space `(u, v) ∈ [0, 1]²` so the
//! picture stretches with the header when it grows under a pull.

use std::f64::consts::TAU;

use ratatui::style::Color;

/// Linear RGB triple in `[0, 1]`.
pub type Rgb = [f64; 3];

const SKY: Rgb = [0.93, 0.88, 0.76];
const MOUNTAIN: Rgb = [0.36, 0.42, 0.55];
const SNOW: Rgb = [0.97, 0.97, 0.97];
const FOAM: Rgb = [0.95, 0.96, 0.93];
const SEA_LIGHT: Rgb = [0.30, 0.48, 0.66];
const SEA_DEEP: Rgb = [0.06, 0.16, 0.33];

/// Samples taken per axis when blurring.
const BLUR_TAPS: i32 = 5;

fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn wave_surface(u: f64) -> f64 {
    0.58 + 0.16 * (u * TAU * 1.3 + 0.8).sin() + 0.05 * (u * TAU * 6.0).sin()
}

/// Colour of the unblurred artwork at `(u, v)`; inputs outside the unit
/// square are clamped to its edge.
pub fn sample(u: f64, v: f64) -> Rgb {
    let u = u.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let surface = wave_surface(u);

    if v < surface {
        let peak = 0.42 + (u - 0.72).abs() * 1.4;
        if v > peak {
            return if v < peak + 0.04 { SNOW } else { MOUNTAIN };
        }
        return mix(SKY, [1.0, 0.95, 0.85], 1.0 - v);
    }

    let depth = v - surface;
    if depth < 0.035 {
        return FOAM;
    }
    // Bands of lighter water running along the swell.
    let band = 0.5 + 0.5 * (u * TAU * 9.0 + depth * 40.0).sin();
    mix(mix(SEA_LIGHT, SEA_DEEP, depth * 2.2), FOAM, band * 0.15)
}

/// Box-blurred sample.  `radius_u` / `radius_v` are the blur radius as a
/// fraction of the image's width / height.
pub fn blurred(u: f64, v: f64, radius_u: f64, radius_v: f64) -> Rgb {
    if radius_u <= 0.0 && radius_v <= 0.0 {
        return sample(u, v);
    }
    let mut acc = [0.0; 3];
    let half = BLUR_TAPS / 2;
    for j in -half..=half {
        for i in -half..=half {
            let du = radius_u * f64::from(i) / f64::from(half);
            let dv = radius_v * f64::from(j) / f64::from(half);
            let c = sample(u + du, v + dv);
            acc[0] += c[0];
            acc[1] += c[1];
            acc[2] += c[2];
        }
    }
    let n = f64::from(BLUR_TAPS * BLUR_TAPS);
    [acc[0] / n, acc[1] / n, acc[2] / n]
}

/// Composite a black overlay of the given opacity over `rgb`.
pub fn darken(rgb: Rgb, overlay_opacity: f64) -> Rgb {
    mix(rgb, [0.0; 3], overlay_opacity)
}

pub fn to_color(rgb: Rgb) -> Color {
    let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(byte(rgb[0]), byte(rgb[1]), byte(rgb[2]))
}

/// Blend towards `target` by `t`; non-RGB colours are treated as black.
pub fn fade(under: Color, target: Rgb, t: f64) -> Color {
    let base = match under {
        Color::Rgb(r, g, b) => [f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0],
        _ => [0.0; 3],
    };
    to_color(mix(base, target, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_on_top_sea_below() {
        let top = sample(0.1, 0.0);
        let bottom = sample(0.1, 1.0);
        assert!(top[2] < top[0], "sky is warm");
        assert!(bottom[2] > bottom[0], "sea is blue");
    }

    #[test]
    fn zero_radius_blur_is_exact_sample() {
        assert_eq!(blurred(0.3, 0.7, 0.0, 0.0), sample(0.3, 0.7));
    }

    #[test]
    fn blur_stays_in_gamut() {
        let c = blurred(0.5, 0.6, 0.2, 0.2);
        assert!(c.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn darken_scales_towards_black() {
        assert_eq!(darken([0.8, 0.4, 0.2], 0.0), [0.8, 0.4, 0.2]);
        let half = darken([0.8, 0.4, 0.2], 0.5);
        assert!((half[0] - 0.4).abs() < 1e-12);
        assert!((half[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn fade_reaches_target_at_full_opacity() {
        assert_eq!(fade(Color::Rgb(10, 20, 30), [1.0; 3], 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(fade(Color::Reset, [1.0; 3], 0.0), Color::Rgb(0, 0, 0));
    }
}
