use crate::PopoverConfig;
use core::time::Duration;
use popover_dom::{Document, ElementId, Event};
use popover_geometry::Axis;
use popover_placement::Placement;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Called with the new state whenever the popover opens or closes.
pub type ChangeHandler = Rc<dyn Fn(bool)>;
/// Called whenever the popover closes.
pub type CloseHandler = Rc<dyn Fn()>;
/// Replaces the default close-on-click-away behaviour.
pub type ClickAwayHandler = Rc<dyn Fn(&Event)>;
/// Fills a freshly mounted content node.
pub type RenderHandler = Rc<dyn Fn(&dyn Document, ElementId)>;

/// Plain-data popover settings.
///
/// Every field is optional on the wire, so a host bridge can send
/// `{"placement":"center-after","offsetY":4}` and leave the rest to
/// [`PopoverConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopoverOptions {
    /// Where the panel sits relative to the trigger.
    pub placement: Option<Placement>,
    /// Horizontal shift in px, positive to the right.
    pub offset_x: Option<f64>,
    /// Vertical shift in px, positive downwards.
    pub offset_y: Option<f64>,
    /// Exit fade length in milliseconds.
    #[serde(rename = "transitionDuration")]
    pub transition_duration_ms: Option<u64>,
    /// Stacking order of the portal container.
    pub z_index: Option<i32>,
    /// Leave page scrolling alone and position against the body instead.
    pub disable_scroll_lock: bool,
}

impl PopoverOptions {
    /// Effective placement.
    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement.unwrap_or_default()
    }

    /// Effective offset along `axis`, falling back to the placement's default.
    #[must_use]
    pub fn offset(&self, axis: Axis) -> f64 {
        let explicit = match axis {
            Axis::Horizontal => self.offset_x,
            Axis::Vertical => self.offset_y,
        };
        explicit.unwrap_or_else(|| self.placement().default_offset(axis))
    }

    #[must_use]
    pub fn transition_duration(&self, config: &PopoverConfig) -> Duration {
        self.transition_duration_ms
            .map_or_else(|| config.transition_duration(), Duration::from_millis)
    }

    #[must_use]
    pub fn z_index(&self, config: &PopoverConfig) -> i32 {
        self.z_index.unwrap_or(config.z_index)
    }
}

/// Everything a popover is created with.
///
/// `trigger` is the wrapper element whose clicks toggle the popover and which
/// it is positioned against; `anchor` overrides the positioning reference
/// without affecting toggling.
#[derive(Clone, Default)]
pub struct PopoverProps {
    /// Requested open state.
    pub open: bool,
    /// Element whose clicks toggle the popover.
    pub trigger: Option<ElementId>,
    /// Positioning reference overriding the trigger.
    pub anchor: Option<ElementId>,
    pub options: PopoverOptions,
    pub on_change: Option<ChangeHandler>,
    pub on_close: Option<CloseHandler>,
    pub on_click_away: Option<ClickAwayHandler>,
    /// Fills the content node after it mounts.
    pub render: Option<RenderHandler>,
}

impl PopoverProps {
    #[inline]
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self {
            open,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn trigger(mut self, trigger: ElementId) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub const fn anchor(mut self, anchor: ElementId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn options(mut self, options: PopoverOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.options.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(bool) + 'static) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    #[must_use]
    pub fn on_close(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }

    #[must_use]
    pub fn on_click_away(mut self, handler: impl Fn(&Event) + 'static) -> Self {
        self.on_click_away = Some(Rc::new(handler));
        self
    }

    /// Populate the content node each time it is mounted.
    #[must_use]
    pub fn render(mut self, handler: impl Fn(&dyn Document, ElementId) + 'static) -> Self {
        self.render = Some(Rc::new(handler));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popover_placement::{COMPACT_BOTTOM_GAP, Vocabulary};

    #[test]
    fn deserializes_camel_case_json() {
        let options: Option<PopoverOptions> = serde_json::from_str(
            r#"{"placement":"center-after","offsetY":4,"transitionDuration":120,"disableScrollLock":true}"#,
        )
        .ok();
        let options = options.unwrap_or_default();
        assert_eq!(options.placement().to_string(), "center-after");
        assert_eq!(options.offset_y, Some(4.0));
        assert_eq!(options.offset_x, None);
        assert_eq!(options.transition_duration_ms, Some(120));
        assert!(options.disable_scroll_lock);
    }

    #[test]
    fn unset_fields_fall_back_to_config() {
        let config = PopoverConfig::default();
        let options = PopoverOptions::default();
        assert_eq!(options.placement(), Placement::default());
        assert_eq!(options.transition_duration(&config), Duration::from_millis(200));
        assert_eq!(options.z_index(&config), 800);
        assert!(options.offset(Axis::Horizontal).abs() < f64::EPSILON);
    }

    #[test]
    fn compact_bottom_defaults_its_vertical_offset() {
        let options = PopoverOptions {
            placement: Placement::parse("start-bottom", Vocabulary::Compact).ok(),
            ..PopoverOptions::default()
        };
        assert!((options.offset(Axis::Vertical) - COMPACT_BOTTOM_GAP).abs() < f64::EPSILON);
        let explicit = PopoverOptions {
            offset_y: Some(2.0),
            ..options
        };
        assert!((explicit.offset(Axis::Vertical) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unknown_placements() {
        let options = serde_json::from_str::<PopoverOptions>(r#"{"placement":"above"}"#);
        assert_eq!(options.ok(), None);
    }
}
