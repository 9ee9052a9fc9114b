#![forbid(unsafe_code)]

//! Click ripple on buttons.

use core::time::Duration;

use landing_core::geometry::ClientRect;
use serde::{Deserialize, Serialize};

/// Default ripple lifetime (matches the 0.6s CSS animation).
pub const DEFAULT_RIPPLE_LIFETIME: Duration = Duration::from_millis(600);

/// Elements that carry the ripple on the shipped page.
pub const DEFAULT_RIPPLE_BUTTONS: [&str; 2] = ["cta-btn", "submit-btn"];

/// Unique identifier for a ripple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RippleId(pub u64);

/// Square ripple geometry, relative to the button's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleGeometry {
    /// Side length.
    pub size: f64,
    /// Left offset.
    pub x: f64,
    /// Top offset.
    pub y: f64,
}

impl RippleGeometry {
    /// Center a ripple covering `rect` on the click point.
    #[must_use]
    pub fn at(rect: &ClientRect, client_x: f64, client_y: f64) -> Self {
        let size = rect.max_side();
        Self {
            size,
            x: client_x - rect.left - size / 2.0,
            y: client_y - rect.top - size / 2.0,
        }
    }
}

/// A live ripple.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    /// Identifier.
    pub id: RippleId,
    /// Button element the ripple lives in.
    pub element: String,
    /// Geometry.
    pub geometry: RippleGeometry,
    /// Removal time.
    pub expires_at: Duration,
}

/// Spawns ripples and removes them once their animation has run.
#[derive(Debug, Clone)]
pub struct RippleEffects {
    lifetime: Duration,
    next_id: u64,
    live: Vec<Ripple>,
}

impl Default for RippleEffects {
    fn default() -> Self {
        Self::new(DEFAULT_RIPPLE_LIFETIME)
    }
}

impl RippleEffects {
    /// Ripples lasting `lifetime`.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            next_id: 0,
            live: Vec::new(),
        }
    }

    /// Spawn a ripple in `element` for a click at `(client_x, client_y)`.
    pub fn spawn(
        &mut self,
        element: impl Into<String>,
        rect: &ClientRect,
        client_x: f64,
        client_y: f64,
        now: Duration,
    ) -> &Ripple {
        self.next_id += 1;
        let idx = self.live.len();
        self.live.push(Ripple {
            id: RippleId(self.next_id),
            element: element.into(),
            geometry: RippleGeometry::at(rect, client_x, client_y),
            expires_at: now.saturating_add(self.lifetime),
        });
        &self.live[idx]
    }

    /// Remove every ripple due at `now`, returning them oldest first.
    pub fn expire(&mut self, now: Duration) -> Vec<Ripple> {
        let (expired, live): (Vec<Ripple>, Vec<Ripple>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(|r| r.expires_at <= now);
        self.live = live;
        expired
    }

    /// Earliest removal time.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.live.iter().map(|r| r.expires_at).min()
    }

    /// Ripples currently alive.
    #[must_use]
    pub fn live(&self) -> &[Ripple] {
        &self.live
    }

    /// Drop every ripple without reporting them.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn geometry_centers_on_click() {
        let rect = ClientRect::new(100.0, 50.0, 200.0, 40.0);
        let g = RippleGeometry::at(&rect, 150.0, 70.0);
        assert_eq!(g.size, 200.0);
        assert_eq!(g.x, 150.0 - 100.0 - 100.0);
        assert_eq!(g.y, 70.0 - 50.0 - 100.0);
    }

    #[test]
    fn expires_after_lifetime() {
        let mut fx = RippleEffects::default();
        let rect = ClientRect::new(0.0, 0.0, 10.0, 10.0);
        let first = fx.spawn("cta-btn", &rect, 5.0, 5.0, Duration::ZERO).id;
        fx.spawn("submit-btn", &rect, 5.0, 5.0, Duration::from_millis(100));
        assert_eq!(fx.deadline(), Some(Duration::from_millis(600)));

        assert!(fx.expire(Duration::from_millis(599)).is_empty());
        let gone = fx.expire(Duration::from_millis(600));
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].id, first);
        assert_eq!(fx.live().len(), 1);
        assert_eq!(fx.deadline(), Some(Duration::from_millis(700)));
    }
}
