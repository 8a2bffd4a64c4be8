use anyhow::{Result, anyhow, bail};
use core::fmt;
use core::str::FromStr;
use popover_geometry::{Align, Axis, Frame, Rect};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Vertical gap the compact vocabulary leaves under a `bottom` placement
/// when no explicit vertical offset is given.
pub const COMPACT_BOTTOM_GAP: f64 = 10.0;

/// Frame edge an axis is anchored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    /// `left` / `top`.
    #[default]
    Near,
    /// `right` / `bottom`, measured back from the frame extent.
    Far,
}

/// Placement on a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisPlacement {
    /// Which trigger edge the panel lines up with.
    pub align: Align,
    /// Which frame edge the resulting coordinate is written against.
    pub edge: Edge,
}

impl AxisPlacement {
    /// Anchor from the near edge.
    #[inline]
    #[must_use]
    pub const fn near(align: Align) -> Self {
        Self {
            align,
            edge: Edge::Near,
        }
    }

    /// Anchor from the far edge.
    #[inline]
    #[must_use]
    pub const fn far(align: Align) -> Self {
        Self {
            align,
            edge: Edge::Far,
        }
    }

    /// Coordinate of the panel for this axis, measured from `self.edge`.
    ///
    /// A far-edge coordinate describes the same box as its near-edge
    /// counterpart: `extent - (near + size)`.
    #[must_use]
    pub fn place(self, axis: Axis, frame: &Frame, trigger: &Rect, popover: &Rect, offset: f64) -> f64 {
        let near = self.align.place(axis, frame, trigger, popover, offset).value;
        match self.edge {
            Edge::Near => near,
            Edge::Far => frame.extent(axis) - (near + axis.size(popover)),
        }
    }
}

/// Which token set a placement was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vocabulary {
    /// `before | start | center | end | after` on both axes.
    #[default]
    Full,
    /// `start | center | end` by `top | center | bottom`.
    Compact,
}

impl Vocabulary {
    /// Placement used when none is configured.
    #[must_use]
    pub const fn default_placement(self) -> Placement {
        match self {
            Self::Full => Placement::new(Align::Start, Align::Start),
            Self::Compact => Placement {
                x: AxisPlacement::near(Align::Center),
                y: AxisPlacement::near(Align::Center),
                vocabulary: Self::Compact,
            },
        }
    }
}

fn compact_x(token: &str) -> Option<AxisPlacement> {
    match token {
        "start" => Some(AxisPlacement::near(Align::Start)),
        "center" => Some(AxisPlacement::near(Align::Center)),
        "end" => Some(AxisPlacement::far(Align::End)),
        _ => None,
    }
}

fn compact_y(token: &str) -> Option<AxisPlacement> {
    match token {
        "top" => Some(AxisPlacement::far(Align::Before)),
        "center" => Some(AxisPlacement::near(Align::Center)),
        "bottom" => Some(AxisPlacement::near(Align::After)),
        _ => None,
    }
}

const fn compact_x_token(align: Align) -> &'static str {
    match align {
        Align::Before | Align::Start => "start",
        Align::Center => "center",
        Align::End | Align::After => "end",
    }
}

const fn compact_y_token(align: Align) -> &'static str {
    match align {
        Align::Before | Align::Start => "top",
        Align::Center => "center",
        Align::End | Align::After => "bottom",
    }
}

/// A horizontal and a vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Horizontal placement.
    pub x: AxisPlacement,
    /// Vertical placement.
    pub y: AxisPlacement,
    /// Token set this placement is written back in.
    pub vocabulary: Vocabulary,
}

impl Default for Placement {
    fn default() -> Self {
        Vocabulary::Full.default_placement()
    }
}

impl Placement {
    /// A full-vocabulary placement, both axes anchored from the near edge.
    #[inline]
    #[must_use]
    pub const fn new(x: Align, y: Align) -> Self {
        Self {
            x: AxisPlacement::near(x),
            y: AxisPlacement::near(y),
            vocabulary: Vocabulary::Full,
        }
    }

    /// Every full-vocabulary placement.
    pub fn all() -> impl Iterator<Item = Self> {
        Align::ALL
            .into_iter()
            .flat_map(|x| Align::ALL.into_iter().map(move |y| Self::new(x, y)))
    }

    /// Parse `token` in a specific vocabulary.
    ///
    /// # Errors
    /// Returns an error if `token` is not `<x>-<y>` with both halves from
    /// `vocabulary`.
    pub fn parse(token: &str, vocabulary: Vocabulary) -> Result<Self> {
        let (x_token, y_token) = token
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("placement `{token}` is not of the form <x>-<y>"))?;

        let parsed = match vocabulary {
            Vocabulary::Full => Align::from_token(x_token)
                .zip(Align::from_token(y_token))
                .map(|(x, y)| Self::new(x, y)),
            Vocabulary::Compact => compact_x(x_token).zip(compact_y(y_token)).map(|(x, y)| Self {
                x,
                y,
                vocabulary: Vocabulary::Compact,
            }),
        };

        match parsed {
            Some(placement) => Ok(placement),
            None => bail!("placement `{token}` is not in the {vocabulary:?} vocabulary"),
        }
    }

    /// Default offset along `axis` when the caller supplies none.
    #[must_use]
    pub fn default_offset(&self, axis: Axis) -> f64 {
        let bottom = self.vocabulary == Vocabulary::Compact
            && axis == Axis::Vertical
            && self.y.align == Align::After;
        if bottom { COMPACT_BOTTOM_GAP } else { 0.0 }
    }
}

impl FromStr for Placement {
    type Err = anyhow::Error;

    /// Parse a placement, trying the full vocabulary before the compact one.
    fn from_str(token: &str) -> Result<Self> {
        Self::parse(token, Vocabulary::Full)
            .or_else(|_full| Self::parse(token, Vocabulary::Compact))
            .map_err(|_compact| anyhow!("unknown placement `{token}`"))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vocabulary {
            Vocabulary::Full => write!(formatter, "{}-{}", self.x.align.token(), self.y.align.token()),
            Vocabulary::Compact => write!(
                formatter,
                "{}-{}",
                compact_x_token(self.x.align),
                compact_y_token(self.y.align)
            ),
        }
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}
