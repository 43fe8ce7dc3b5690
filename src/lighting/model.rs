use crate::foundation::core::Rgba8;

/// Discrete lighting presets for the preview room.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LightingCondition {
    /// Bright daylight.
    #[default]
    Day,
    /// Warm evening light.
    Evening,
    /// Cool, dim night light.
    Night,
    /// Focused gallery spotlight.
    Spotlight,
}

impl LightingCondition {
    /// Fixed animation cycle order.
    pub const CYCLE: [LightingCondition; 4] = [Self::Day, Self::Evening, Self::Night, Self::Spotlight];

    /// Next condition in [`Self::CYCLE`], wrapping.
    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|c| *c == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    /// Whether the glass glare highlight is drawn under this light.
    pub fn casts_glare(self) -> bool {
        matches!(self, Self::Day | Self::Spotlight)
    }
}

/// Resolved lighting colors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LightingProfile {
    /// Condition this profile was resolved from.
    pub condition: LightingCondition,
    /// Full-canvas overlay color.
    pub ambient: Rgba8,
    /// Drop-shadow color.
    pub shadow: Rgba8,
    /// Glare color.
    pub highlight: Rgba8,
    /// Scalar in `[0, 1]` applied to reflection opacity.
    pub intensity: f32,
}

impl LightingProfile {
    /// Peak reflection opacity before intensity scaling.
    pub const GLASS_BASE_OPACITY: f32 = 0.15;

    /// Glass reflection opacity: `base * intensity`.
    pub fn glass_opacity(&self) -> f32 {
        Self::GLASS_BASE_OPACITY * self.intensity
    }

    /// Whether the compositor should add the radial spotlight vignette.
    pub fn wants_vignette(&self) -> bool {
        self.condition == LightingCondition::Spotlight
    }
}

/// Pure lookup from condition to lighting colors.
pub fn resolve(condition: LightingCondition) -> LightingProfile {
    let (ambient, shadow, intensity, highlight) = match condition {
        LightingCondition::Day => (
            Rgba8::rgba_f(255, 255, 255, 0.8),
            Rgba8::rgba_f(0, 0, 0, 0.1),
            0.8,
            Rgba8::rgba_f(255, 255, 255, 0.5),
        ),
        LightingCondition::Evening => (
            Rgba8::rgba_f(255, 215, 125, 0.6),
            Rgba8::rgba_f(0, 0, 0, 0.2),
            0.6,
            Rgba8::rgba_f(255, 200, 100, 0.4),
        ),
        LightingCondition::Night => (
            Rgba8::rgba_f(100, 120, 180, 0.4),
            Rgba8::rgba_f(0, 0, 0, 0.35),
            0.4,
            Rgba8::rgba_f(150, 170, 220, 0.25),
        ),
        LightingCondition::Spotlight => (
            Rgba8::rgba_f(255, 255, 255, 0.3),
            Rgba8::rgba_f(0, 0, 0, 0.5),
            1.0,
            Rgba8::rgba_f(255, 255, 255, 0.8),
        ),
    };
    LightingProfile {
        condition,
        ambient,
        shadow,
        highlight,
        intensity,
    }
}

/// Room presets behind the frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomStyle {
    /// Neutral modern interior.
    #[default]
    Modern,
    /// Warm classic interior.
    Classic,
    /// Bare white walls.
    Minimalist,
    /// Mixed, cooler interior.
    Eclectic,
    /// Natural materials.
    Natural,
}

/// Wall color and shadow tint for a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RoomPalette {
    /// Background wall fill.
    pub wall: Rgba8,
    /// Shadow tint.
    pub shadow: Rgba8,
}

impl RoomStyle {
    /// Fixed animation cycle order.
    pub const CYCLE: [RoomStyle; 5] = [
        Self::Modern,
        Self::Classic,
        Self::Minimalist,
        Self::Eclectic,
        Self::Natural,
    ];

    /// Next style in [`Self::CYCLE`], wrapping.
    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|s| *s == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    /// Colors bound to this room.
    pub fn palette(self) -> RoomPalette {
        match self {
            Self::Modern => RoomPalette {
                wall: Rgba8::rgb(0xF5, 0xF5, 0xF5),
                shadow: Rgba8::rgba_f(0, 0, 0, 0.1),
            },
            Self::Classic => RoomPalette {
                wall: Rgba8::rgb(0xF8, 0xF4, 0xE9),
                shadow: Rgba8::rgba_f(139, 69, 19, 0.1),
            },
            Self::Minimalist => RoomPalette {
                wall: Rgba8::rgb(0xFF, 0xFF, 0xFF),
                shadow: Rgba8::rgba_f(0, 0, 0, 0.05),
            },
            Self::Eclectic => RoomPalette {
                wall: Rgba8::rgb(0xF0, 0xF0, 0xF0),
                shadow: Rgba8::rgba_f(70, 130, 180, 0.1),
            },
            Self::Natural => RoomPalette {
                wall: Rgba8::rgb(0xF5, 0xF2, 0xE9),
                shadow: Rgba8::rgba_f(139, 69, 19, 0.15),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lighting/model.rs"]
mod tests;
