use web_time::{Duration, Instant};

use crate::animation;
use crate::drag::Phase;
use crate::geometry::Vec2;
use crate::grid::SortGrid;
use crate::scheduler::MotionSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub position: Vec2,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, position: Vec2) -> Self {
        Self { phase, position }
    }
}

struct PressState {
    key: String,
    started: Instant,
    start_pos: Vec2,
    long_press_fired: bool,
    armed: bool,
    dragging: bool,
}

/// Turns a raw pointer stream into the engine's gesture lifecycle calls:
/// tap, long-press arming, drag activation, per-frame moves, release.
///
/// Tracks a single contact; no ordering decisions live here. Long-press
/// timing goes through the animation clock so tests can drive it.
pub struct GridGestureAdapter {
    press: Option<PressState>,
    /// Movement tolerance for tap and long-press recognition, px.
    slop: f32,
}

const TAP_MAX: Duration = Duration::from_millis(200);

impl Default for GridGestureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GridGestureAdapter {
    pub fn new() -> Self {
        Self {
            press: None,
            slop: 10.0,
        }
    }

    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop;
        self
    }

    pub fn handle_pointer<S: MotionSink>(&mut self, grid: &mut SortGrid<S>, sample: PointerSample) {
        match sample.phase {
            PointerPhase::Down => {
                if let Some(key) = grid.hit_test(sample.position) {
                    self.press = Some(PressState {
                        key,
                        started: animation::now(),
                        start_pos: sample.position,
                        long_press_fired: false,
                        armed: false,
                        dragging: false,
                    });
                }
            }
            PointerPhase::Move => {
                let slop = self.slop;
                let Some(press) = self.press.as_mut() else {
                    return;
                };
                let distance = sample.position.distance(press.start_pos);

                if !press.long_press_fired
                    && distance <= slop
                    && animation::now().saturating_duration_since(press.started)
                        >= grid.config().long_press_delay
                {
                    grid.press(&press.key);
                    press.long_press_fired = true;
                    press.armed = grid.phase() == Phase::Armed;
                }

                if press.armed && !press.dragging && distance > slop {
                    grid.drag_activate(sample.position - press.start_pos);
                    press.dragging = true;
                }
                if press.dragging {
                    grid.drag_move(sample.position - press.start_pos);
                }
            }
            PointerPhase::Up => {
                let Some(press) = self.press.take() else {
                    return;
                };
                if press.armed || press.dragging {
                    grid.drag_release();
                } else if !press.long_press_fired
                    && sample.position.distance(press.start_pos) <= self.slop
                    && animation::now().saturating_duration_since(press.started) < TAP_MAX
                {
                    grid.tap(&press.key);
                }
            }
            PointerPhase::Cancel => {
                if let Some(press) = self.press.take() {
                    if press.armed || press.dragging {
                        grid.cancel();
                    }
                }
            }
        }
    }
}
