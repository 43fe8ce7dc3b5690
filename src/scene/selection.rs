use crate::animation::scheduler::AnimationKind;
use crate::catalog::Catalog;
use crate::catalog::material::{MaterialKind, MaterialOption};
use crate::layout::geometry::{MatFlags, Reveals};
use crate::lighting::model::{LightingCondition, RoomStyle};

/// The designer view model.
///
/// Created when a designer view mounts, mutated by user actions and animation ticks, dropped on
/// unmount. The engine never persists it; it is serde-friendly so callers can.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelectionState {
    /// Selected frame moulding.
    pub frame_index: usize,
    /// Selected top mat.
    pub mat_index: usize,
    /// Middle mat, used only when `use_middle_mat`.
    pub middle_mat_index: Option<usize>,
    /// Bottom mat, used only when `use_bottom_mat`.
    pub bottom_mat_index: Option<usize>,
    /// Selected glazing; `None` means no glass.
    pub glass_index: Option<usize>,
    /// Second moulding stacked on the first (priced only).
    pub stacked_frame_index: Option<usize>,
    /// Enable the stacked moulding.
    pub use_stacked_frame: bool,
    /// Enable the middle mat.
    pub use_middle_mat: bool,
    /// Enable the bottom mat.
    pub use_bottom_mat: bool,
    /// Float-mount the artwork (price surcharge only).
    pub use_float_mount: bool,
    /// Glass spacers; only meaningful together with a float mount.
    pub use_glass_spacer: bool,
    /// Reveal scale of the top mat.
    pub top_mat_reveal: u8,
    /// Reveal scale of the middle mat.
    pub middle_mat_reveal: u8,
    /// Room behind the frame.
    pub room_style: RoomStyle,
    /// Lighting preset.
    pub lighting: LightingCondition,
    /// Accessibility rendering.
    pub high_contrast: bool,
    /// Running animation, mirrored from the scheduler.
    pub animation: Option<AnimationKind>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            frame_index: 0,
            mat_index: 0,
            middle_mat_index: None,
            bottom_mat_index: None,
            glass_index: None,
            stacked_frame_index: None,
            use_stacked_frame: false,
            use_middle_mat: false,
            use_bottom_mat: false,
            use_float_mount: false,
            use_glass_spacer: false,
            top_mat_reveal: 1,
            middle_mat_reveal: 1,
            room_style: RoomStyle::default(),
            lighting: LightingCondition::default(),
            high_contrast: false,
            animation: None,
        }
    }
}

/// Plain result handed back to the caller on commit (e.g. for cart insertion).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CommitSelection {
    /// Chosen frame record.
    pub frame_style: MaterialOption,
    /// Chosen top mat record.
    pub mat_style: MaterialOption,
}

impl SelectionState {
    /// Reveal scales as consumed by geometry.
    pub fn reveals(&self) -> Reveals {
        Reveals {
            top: self.top_mat_reveal,
            middle: self.middle_mat_reveal,
        }
    }

    /// Mat flags as consumed by geometry.
    pub fn mat_flags(&self) -> MatFlags {
        MatFlags {
            use_middle_mat: self.use_middle_mat,
            use_bottom_mat: self.use_bottom_mat,
        }
    }

    /// Middle mat index when the middle mat is active. Falls back to the second catalog mat.
    pub fn active_middle_mat(&self, catalog: &Catalog) -> Option<usize> {
        self.use_middle_mat.then(|| {
            let i = self
                .middle_mat_index
                .unwrap_or(1.min(catalog.len(MaterialKind::Mat) - 1));
            catalog.clamp_index(MaterialKind::Mat, i)
        })
    }

    /// Bottom mat index when the bottom mat is active. Falls back to the third catalog mat.
    pub fn active_bottom_mat(&self, catalog: &Catalog) -> Option<usize> {
        self.use_bottom_mat.then(|| {
            let i = self
                .bottom_mat_index
                .unwrap_or(2.min(catalog.len(MaterialKind::Mat) - 1));
            catalog.clamp_index(MaterialKind::Mat, i)
        })
    }

    /// Stacked frame index when enabled.
    pub fn active_stacked_frame(&self, catalog: &Catalog) -> Option<usize> {
        if !self.use_stacked_frame {
            return None;
        }
        self.stacked_frame_index
            .map(|i| catalog.clamp_index(MaterialKind::Frame, i))
    }

    /// Clamp every index against the (re)loaded catalog.
    ///
    /// Out-of-range selections are gone; they reset to the first option.
    pub fn sanitize(&mut self, catalog: &Catalog) {
        self.frame_index = catalog.clamp_index(MaterialKind::Frame, self.frame_index);
        self.mat_index = catalog.clamp_index(MaterialKind::Mat, self.mat_index);
        let mat = |i: Option<usize>| i.map(|i| catalog.clamp_index(MaterialKind::Mat, i));
        self.middle_mat_index = mat(self.middle_mat_index);
        self.bottom_mat_index = mat(self.bottom_mat_index);
        self.glass_index = self
            .glass_index
            .map(|i| catalog.clamp_index(MaterialKind::Glass, i));
        self.stacked_frame_index = self
            .stacked_frame_index
            .map(|i| catalog.clamp_index(MaterialKind::Frame, i));
    }

    /// Apply one animation step.
    pub fn advance(&mut self, kind: AnimationKind, catalog: &Catalog) {
        match kind {
            AnimationKind::Room => self.room_style = self.room_style.next(),
            AnimationKind::Lighting => self.lighting = self.lighting.next(),
            AnimationKind::Styles => {
                let frame = catalog.clamp_index(MaterialKind::Frame, self.frame_index);
                let mat = catalog.clamp_index(MaterialKind::Mat, self.mat_index);
                self.frame_index = (frame + 1) % catalog.len(MaterialKind::Frame);
                self.mat_index = (mat + 1) % catalog.len(MaterialKind::Mat);
            }
        }
    }

    /// Snapshot the chosen frame and top mat records.
    pub fn commit(&self, catalog: &Catalog) -> CommitSelection {
        CommitSelection {
            frame_style: catalog.get(MaterialKind::Frame, self.frame_index).clone(),
            mat_style: catalog.get(MaterialKind::Mat, self.mat_index).clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/selection.rs"]
mod tests;
