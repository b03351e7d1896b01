//! Axis-aligned rectangle geometry used by every collision pass.
//!
//! Two pure functions make up the collision predicates:
//!
//! - [`overlaps`]: strict AABB intersection. Rectangles that merely share an
//!   edge do not overlap.
//! - [`contact_side`]: which edge of `other` the player is pressing against,
//!   chosen by the minimum-translation heuristic. The axis with the smaller
//!   overlap depth is the contact axis; on a tie the horizontal axis wins.
//!
//! # Example
//!
//! ```
//! use stompline_core::geometry::{contact_side, overlaps, ContactSide, Rect};
//!
//! let platform = Rect::new(300.0, 450.0, 100.0, 20.0);
//! let player = Rect::new(320.0, 430.0, 40.0, 40.0);
//!
//! assert!(overlaps(&player, &platform));
//! assert_eq!(contact_side(&player, &platform), ContactSide::Top);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space (top-left origin, `y` down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a position and size vector.
    #[must_use]
    pub fn from_pos_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Edge of the *other* rectangle that the player is in contact with.
///
/// `Top` means the player is above the other rectangle (landing or stomping),
/// `Bottom` means the player is below it (head bump), `Left` and `Right` mean
/// the player is pressing against that vertical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSide {
    /// Player is above the other rectangle.
    Top,
    /// Player is below the other rectangle.
    Bottom,
    /// Player is left of the other rectangle.
    Left,
    /// Player is right of the other rectangle.
    Right,
}

impl ContactSide {
    /// Returns `true` for `Left` or `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Strict AABB intersection test.
///
/// Symmetric in its arguments. Rectangles sharing only an edge, or with a zero
/// extent, never overlap.
#[must_use]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Penetration depth of two rectangles along each axis.
///
/// Only meaningful when [`overlaps`] holds; otherwise components may be zero
/// or negative.
#[must_use]
pub fn overlap_depth(a: &Rect, b: &Rect) -> Vec2 {
    Vec2::new(
        a.right().min(b.right()) - a.x.max(b.x),
        a.bottom().min(b.bottom()) - a.y.max(b.y),
    )
}

/// Determines which edge of `other` the `player` rectangle is touching.
///
/// The axis with the smaller overlap depth is the contact axis; equal depths
/// resolve horizontally. The sign of the center-to-center offset on that axis
/// picks the side.
#[must_use]
pub fn contact_side(player: &Rect, other: &Rect) -> ContactSide {
    let depth = overlap_depth(player, other);
    let player_center = player.center();
    let other_center = other.center();

    if depth.x <= depth.y {
        if player_center.x < other_center.x {
            ContactSide::Left
        } else {
            ContactSide::Right
        }
    } else if player_center.y < other_center.y {
        ContactSide::Top
    } else {
        ContactSide::Bottom
    }
}
