//! Table border toggles and off-state rendering behavior (§4.8, §6).
//!
//! Lives here rather than in `virtua-table` for the same reason
//! `HScrollMode`/`HScrollScope` live in `config.rs`: `virtua-proto`'s
//! `Intent` needs to name these types to carry `SetBorderMask`/
//! `SetBorderAbsentBehavior` as data, and `virtua-proto` can't depend on
//! `virtua-table` (the dependency runs the other way).

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BorderMask: u8 {
        const TOP               = 0b0000_0001;
        const BOTTOM            = 0b0000_0010;
        const HEADER_SEPARATOR  = 0b0000_0100;
        const VERTICALS         = 0b0000_1000;
    }
}

impl Default for BorderMask {
    /// All borders on, matching the teacher's "opt out, not opt in"
    /// default posture for display toggles.
    fn default() -> Self {
        Self::all()
    }
}

/// How a line whose border bit is off is rendered. §6 names this choice
/// only for `top` and `bottom` ("top-space-remove, bottom-space-remove");
/// the header separator has no such variant — when its bit is off the
/// line is always elided, never held open as blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentBorderBehavior {
    /// Render a blank line in its place, preserving vertical rhythm.
    BlankLine,
    /// Elide the line entirely — §4.8's "remove space" option.
    RemoveSpace,
}

impl Default for AbsentBorderBehavior {
    fn default() -> Self {
        AbsentBorderBehavior::BlankLine
    }
}

/// Which of the two independently-configurable border lines an
/// `Intent::SetBorderAbsentBehavior` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    Top,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_has_everything_on() {
        let mask = BorderMask::default();
        assert!(mask.contains(BorderMask::TOP));
        assert!(mask.contains(BorderMask::BOTTOM));
        assert!(mask.contains(BorderMask::HEADER_SEPARATOR));
        assert!(mask.contains(BorderMask::VERTICALS));
    }

    #[test]
    fn toggling_one_bit_leaves_others_set() {
        let mut mask = BorderMask::default();
        mask.remove(BorderMask::HEADER_SEPARATOR);
        assert!(!mask.contains(BorderMask::HEADER_SEPARATOR));
        assert!(mask.contains(BorderMask::TOP));
    }
}
