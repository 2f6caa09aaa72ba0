//! Scripted pointer movement for headless runs
//!
//! Stands in for mouse and touch events: every tick the runner samples the
//! path and feeds the point to the simulation as the pointer.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape the scripted pointer traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPathKind {
    /// Pointer parked at the center
    Static,
    /// Circle around the center
    Circle,
    /// Lemniscate through the center
    FigureEight,
    /// Closed loop through a list of points
    Waypoints,
}

impl PointerPathKind {
    pub fn all() -> &'static [PointerPathKind] {
        &[
            PointerPathKind::Static,
            PointerPathKind::Circle,
            PointerPathKind::FigureEight,
            PointerPathKind::Waypoints,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PointerPathKind::Static => "static",
            PointerPathKind::Circle => "circle",
            PointerPathKind::FigureEight => "figure-eight",
            PointerPathKind::Waypoints => "waypoints",
        }
    }
}

impl std::fmt::Display for PointerPathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PointerPathKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" | "still" => Ok(PointerPathKind::Static),
            "circle" => Ok(PointerPathKind::Circle),
            "figure-eight" | "figure8" | "eight" => Ok(PointerPathKind::FigureEight),
            "waypoints" | "loop" => Ok(PointerPathKind::Waypoints),
            _ => Err(format!(
                "Unknown pointer path: {}. Valid: static, circle, figure-eight, waypoints",
                s
            )),
        }
    }
}

/// A periodic pointer trajectory in canvas coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerPath {
    pub kind: PointerPathKind,
    pub center: Vec2,
    pub radius: f32,
    /// Ticks per full lap
    pub period: u64,
    /// Points visited in order by [`PointerPathKind::Waypoints`]
    pub waypoints: Vec<Vec2>,
}

impl PointerPath {
    pub fn new(kind: PointerPathKind, center: Vec2, radius: f32, period: u64) -> Self {
        Self {
            kind,
            center,
            radius,
            period: period.max(1),
            waypoints: Vec::new(),
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Vec2>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Pointer position at `tick`
    pub fn sample(&self, tick: u64) -> Vec2 {
        let phase = (tick % self.period) as f32 / self.period as f32;
        let theta = phase * TAU;

        match self.kind {
            PointerPathKind::Static => self.center,
            PointerPathKind::Circle => self.center + Vec2::from_angle(theta) * self.radius,
            PointerPathKind::FigureEight => {
                let denom = 1.0 + theta.sin() * theta.sin();
                let offset = Vec2::new(theta.cos(), theta.sin() * theta.cos()) / denom;
                self.center + offset * self.radius
            }
            PointerPathKind::Waypoints => self.sample_waypoints(phase),
        }
    }

    fn sample_waypoints(&self, phase: f32) -> Vec2 {
        match self.waypoints.len() {
            0 => self.center,
            1 => self.waypoints[0],
            count => {
                let position = phase * count as f32;
                let index = (position as usize).min(count - 1);
                let from = self.waypoints[index];
                let to = self.waypoints[(index + 1) % count];
                from.lerp(to, position - index as f32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in PointerPathKind::all() {
            assert_eq!(kind.name().parse::<PointerPathKind>().unwrap(), *kind);
        }
        assert_eq!("Figure8".parse::<PointerPathKind>().unwrap(), PointerPathKind::FigureEight);
        assert!("zigzag".parse::<PointerPathKind>().is_err());
    }

    #[test]
    fn test_static_stays_at_center() {
        let path = PointerPath::new(PointerPathKind::Static, Vec2::new(10.0, 20.0), 50.0, 100);
        assert_eq!(path.sample(0), Vec2::new(10.0, 20.0));
        assert_eq!(path.sample(73), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_circle_keeps_radius_and_loops() {
        let path = PointerPath::new(PointerPathKind::Circle, Vec2::new(100.0, 100.0), 40.0, 90);
        for tick in 0..90 {
            assert!((path.sample(tick).distance(path.center) - 40.0).abs() < 1e-3);
        }
        assert!(path.sample(0).distance(path.sample(90)) < 1e-4);
    }

    #[test]
    fn test_figure_eight_crosses_center() {
        let path = PointerPath::new(PointerPathKind::FigureEight, Vec2::ZERO, 100.0, 100);
        assert!((path.sample(0) - Vec2::new(100.0, 0.0)).length() < 1e-3);
        assert!(path.sample(25).length() < 1e-3);
    }

    #[test]
    fn test_waypoints_interpolate() {
        let path = PointerPath::new(PointerPathKind::Waypoints, Vec2::ZERO, 0.0, 40).with_waypoints(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]);
        assert_eq!(path.sample(0), Vec2::new(0.0, 0.0));
        assert!((path.sample(5) - Vec2::new(50.0, 0.0)).length() < 1e-3);
        assert!((path.sample(10) - Vec2::new(100.0, 0.0)).length() < 1e-3);
        assert!((path.sample(35) - Vec2::new(0.0, 50.0)).length() < 1e-3);

        let empty = PointerPath::new(PointerPathKind::Waypoints, Vec2::new(3.0, 4.0), 0.0, 10);
        assert_eq!(empty.sample(7), Vec2::new(3.0, 4.0));
    }
}
