use popover_geometry::AxisOrigin;
use serde::Serialize;
use smallvec::SmallVec;

/// CSS `position` of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Viewport relative. Used while document scrolling is locked.
    #[default]
    Fixed,
    /// Body relative. Used when the page may scroll under the panel.
    Absolute,
}

impl Position {
    /// Position that matches offsets measured from `origin`.
    #[inline]
    #[must_use]
    pub const fn for_origin(origin: AxisOrigin) -> Self {
        match origin {
            AxisOrigin::Window => Self::Fixed,
            AxisOrigin::Body => Self::Absolute,
        }
    }

    /// The CSS keyword.
    #[inline]
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Absolute => "absolute",
        }
    }
}

/// Horizontal anchor. Exactly one of `left`/`right` is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    /// Distance of the panel's left edge from the frame's left edge.
    Left(f64),
    /// Distance of the panel's right edge from the frame's right edge.
    Right(f64),
}

impl Horizontal {
    /// The offset in px, whichever side it is measured from.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Left(value) | Self::Right(value) => value,
        }
    }
}

/// Vertical anchor. Exactly one of `top`/`bottom` is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    /// Distance of the panel's top edge from the frame's top edge.
    Top(f64),
    /// Distance of the panel's bottom edge from the frame's bottom edge.
    Bottom(f64),
}

impl Vertical {
    /// The offset in px, whichever side it is measured from.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Top(value) | Self::Bottom(value) => value,
        }
    }
}

/// Inline style applied to the popover panel.
///
/// Serializes to a flat CSS-like map: `{"position":"fixed","left":50.0,"top":120.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    /// CSS `position`.
    pub position: Position,
    /// `left` or `right`, unset until the first resolve.
    #[serde(flatten)]
    pub horizontal: Option<Horizontal>,
    /// `top` or `bottom`, unset until the first resolve.
    #[serde(flatten)]
    pub vertical: Option<Vertical>,
}

impl Style {
    /// A style with a position and no anchors yet.
    #[inline]
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            horizontal: None,
            vertical: None,
        }
    }

    /// Whether both axes carry an anchor.
    #[inline]
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.horizontal.is_some() && self.vertical.is_some()
    }

    /// Shift the horizontal anchor to make room for a scrollbar of `size`
    /// that is about to reappear.
    pub fn compensate_scrollbar(&mut self, size: f64) {
        self.horizontal = self.horizontal.map(|horizontal| match horizontal {
            Horizontal::Left(left) => Horizontal::Left(left + size),
            Horizontal::Right(right) => Horizontal::Right(right - size),
        });
    }

    /// Declarations to write to an element, one per managed property.
    ///
    /// A `None` value means the property must be removed so a stale anchor
    /// from a previous placement cannot linger.
    #[must_use]
    pub fn declarations(&self) -> SmallVec<(&'static str, Option<String>), 5> {
        let px = |value: f64| Some(format!("{value}px"));
        let (left, right) = match self.horizontal {
            Some(Horizontal::Left(left)) => (px(left), None),
            Some(Horizontal::Right(right)) => (None, px(right)),
            None => (None, None),
        };
        let (top, bottom) = match self.vertical {
            Some(Vertical::Top(top)) => (px(top), None),
            Some(Vertical::Bottom(bottom)) => (None, px(bottom)),
            None => (None, None),
        };

        let mut declarations = SmallVec::new();
        declarations.push(("position", Some(self.position.as_css().to_owned())));
        declarations.push(("left", left));
        declarations.push(("right", right));
        declarations.push(("top", top));
        declarations.push(("bottom", bottom));
        declarations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensation_moves_towards_the_scrollbar() {
        let mut style = Style {
            position: Position::Fixed,
            horizontal: Some(Horizontal::Left(30.0)),
            vertical: Some(Vertical::Top(10.0)),
        };
        style.compensate_scrollbar(15.0);
        assert_eq!(style.horizontal, Some(Horizontal::Left(45.0)));

        style.horizontal = Some(Horizontal::Right(30.0));
        style.compensate_scrollbar(15.0);
        assert_eq!(style.horizontal, Some(Horizontal::Right(15.0)));
        assert_eq!(style.vertical, Some(Vertical::Top(10.0)));
    }

    #[test]
    fn compensation_without_anchor_is_a_no_op() {
        let mut style = Style::new(Position::Fixed);
        style.compensate_scrollbar(15.0);
        assert_eq!(style, Style::new(Position::Fixed));
        assert!(!style.is_anchored());
    }

    #[test]
    fn declarations_clear_unused_anchors() {
        let style = Style {
            position: Position::Absolute,
            horizontal: Some(Horizontal::Right(12.5)),
            vertical: Some(Vertical::Top(-4.0)),
        };
        let declarations = style.declarations();
        let lookup = |property: &str| {
            declarations
                .iter()
                .find(|(name, _value)| *name == property)
                .and_then(|(_name, value)| value.clone())
        };
        assert_eq!(declarations.len(), 5);
        assert_eq!(lookup("position").as_deref(), Some("absolute"));
        assert_eq!(lookup("right").as_deref(), Some("12.5px"));
        assert_eq!(lookup("top").as_deref(), Some("-4px"));
        assert_eq!(lookup("left"), None);
        assert_eq!(lookup("bottom"), None);
    }

    #[test]
    fn serializes_as_a_flat_map() {
        let style = Style {
            position: Position::Fixed,
            horizontal: Some(Horizontal::Left(50.0)),
            vertical: Some(Vertical::Bottom(8.0)),
        };
        let json = serde_json::to_value(style).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "position": "fixed", "left": 50.0, "bottom": 8.0 }))
        );
    }
}
