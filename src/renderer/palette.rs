//! Theme colors for the canvas widgets
//!
//! All colors are linear-ish RGBA in [0, 1].

use crate::settings::Theme;

pub type Rgba = [f32; 4];

const fn rgb8(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

pub const INDIGO_400: Rgba = rgb8(129, 140, 248);
pub const INDIGO_500: Rgba = rgb8(99, 102, 241);
pub const PURPLE_400: Rgba = rgb8(192, 132, 252);
pub const PURPLE_500: Rgba = rgb8(168, 85, 247);
pub const PINK_500: Rgba = rgb8(236, 72, 153);
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Gradient pairs for the slider fills, cycled by slider index
pub const SLIDER_FILLS: [(Rgba, Rgba); 5] = [
    (rgb8(129, 140, 248), rgb8(168, 85, 247)), // indigo -> purple
    (rgb8(251, 113, 133), rgb8(236, 72, 153)), // rose -> pink
    (rgb8(34, 211, 238), rgb8(59, 130, 246)),  // cyan -> blue
    (rgb8(52, 211, 153), rgb8(20, 184, 166)),  // emerald -> teal
    (rgb8(251, 191, 36), rgb8(249, 115, 22)),  // amber -> orange
];

/// Page background gradient (top, bottom)
pub fn background(theme: Theme) -> (Rgba, Rgba) {
    match theme {
        Theme::Dark => (rgb8(17, 24, 39), rgb8(3, 7, 18)),
        Theme::Light => (rgb8(249, 250, 251), rgb8(229, 231, 235)),
    }
}

/// Widget panel fill
pub fn panel(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => [0.12, 0.16, 0.22, 0.85],
        Theme::Light => [1.0, 1.0, 1.0, 0.7],
    }
}

/// Empty slider track
pub fn track(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => rgb8(55, 65, 81),
        Theme::Light => rgb8(229, 231, 235),
    }
}

/// Popped bubble (flattened)
pub fn popped_bubble(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => rgb8(31, 41, 55),
        Theme::Light => rgb8(209, 213, 219),
    }
}

/// Intact bubble gradient
pub fn bubble(theme: Theme) -> (Rgba, Rgba) {
    match theme {
        Theme::Dark => (INDIGO_500, PURPLE_500),
        Theme::Light => (INDIGO_400, PURPLE_400),
    }
}

/// Spinner body gradient
pub fn spinner(theme: Theme) -> (Rgba, Rgba) {
    match theme {
        Theme::Dark => (INDIGO_500, PINK_500),
        Theme::Light => (INDIGO_400, PURPLE_400),
    }
}

/// Bearing / hub color
pub fn hub(theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => rgb8(229, 231, 235),
        Theme::Light => rgb8(55, 65, 81),
    }
}

/// Color stops for the slide section backdrop: (position, rgb, alpha)
fn backdrop_stops(theme: Theme) -> [(f32, [f32; 3], f32); 4] {
    let c = |r: u8, g: u8, b: u8| [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
    match theme {
        Theme::Dark => [
            (0.0, c(79, 70, 229), 0.4),
            (0.33, c(139, 92, 246), 0.4),
            (0.66, c(236, 72, 153), 0.4),
            (1.0, c(248, 113, 113), 0.4),
        ],
        Theme::Light => [
            (0.0, c(99, 102, 241), 0.2),
            (0.33, c(167, 139, 250), 0.2),
            (0.66, c(244, 114, 182), 0.2),
            (1.0, c(251, 146, 146), 0.2),
        ],
    }
}

/// Backdrop tint for an average slider position in [0, 100], composited
/// over the theme's base color
pub fn slider_backdrop(average: f32, theme: Theme) -> Rgba {
    let t = (average / 100.0).clamp(0.0, 1.0);
    let stops = backdrop_stops(theme);

    let (lower, upper) = stops
        .windows(2)
        .find(|w| t >= w[0].0 && t <= w[1].0)
        .map(|w| (w[0], w[1]))
        .unwrap_or((stops[0], stops[3]));
    let span = upper.0 - lower.0;
    let f = if span > 0.0 { (t - lower.0) / span } else { 0.0 };

    let lerp = |a: f32, b: f32| a + (b - a) * f;
    let alpha = lerp(lower.2, upper.2);
    let base = background(theme).0;
    let mut out = [0.0, 0.0, 0.0, 1.0];
    for i in 0..3 {
        let tint = lerp(lower.1[i], upper.1[i]);
        out[i] = base[i] * (1.0 - alpha) + tint * alpha;
    }
    out
}

/// Brighten a color toward white by `amount` in [0, 1]
pub fn lighten(color: Rgba, amount: f32) -> Rgba {
    let a = amount.clamp(0.0, 1.0);
    [
        color[0] + (1.0 - color[0]) * a,
        color[1] + (1.0 - color[1]) * a,
        color[2] + (1.0 - color[2]) * a,
        color[3],
    ]
}
