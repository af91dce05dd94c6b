//! Hover polish
//!
//! Each cell owns its own [`CellVisualState`]; pointer events mutate only
//! that state. The static page expresses the same effect as a CSS `:hover`
//! rule generated from a [`HoverEffect`].

use serde::{Deserialize, Serialize};

/// Transform applied while the pointer is over an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverEffect {
    pub scale: f64,
    pub z_index: i32,
}

impl HoverEffect {
    /// Heatmap cells grow more than calendar cells
    pub const HEATMAP: HoverEffect = HoverEffect {
        scale: 1.3,
        z_index: 10,
    };

    pub const CALENDAR: HoverEffect = HoverEffect {
        scale: 1.2,
        z_index: 10,
    };

    /// CSS rule reproducing the effect for `selector`
    pub fn css_rule(&self, selector: &str) -> String {
        format!(
            "{}:hover {{ transform: scale({}); z-index: {}; }}",
            selector, self.scale, self.z_index
        )
    }
}

/// Transient visual state of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisualState {
    pub scale: f64,
    pub z_index: i32,
}

impl Default for CellVisualState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            z_index: 1,
        }
    }
}

impl CellVisualState {
    pub fn pointer_enter(&mut self, effect: &HoverEffect) {
        self.scale = effect.scale;
        self.z_index = effect.z_index;
    }

    pub fn pointer_leave(&mut self) {
        *self = Self::default();
    }

    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_leave_cycle() {
        let mut state = CellVisualState::default();
        state.pointer_enter(&HoverEffect::HEATMAP);
        assert_eq!(state.transform(), "scale(1.3)");
        assert_eq!(state.z_index, 10);

        state.pointer_leave();
        assert_eq!(state, CellVisualState::default());
        assert_eq!(state.transform(), "scale(1)");
    }

    #[test]
    fn test_states_are_independent() {
        let mut a = CellVisualState::default();
        let b = CellVisualState::default();
        a.pointer_enter(&HoverEffect::CALENDAR);
        assert_eq!(a.scale, 1.2);
        assert_eq!(b.scale, 1.0);
    }

    #[test]
    fn test_css_rule() {
        assert_eq!(
            HoverEffect::HEATMAP.css_rule(".heatmap-cell"),
            ".heatmap-cell:hover { transform: scale(1.3); z-index: 10; }"
        );
    }
}
