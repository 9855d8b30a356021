use slotmap::SecondaryMap;

use crate::animation::{AnimatedValue, AnimationSpec};
use crate::geometry::Vec2;
use crate::registry::ItemSlot;

/// Output sink for motion commands.
///
/// The drag machine and the diff pass decide *which* items move *where*;
/// this trait is how those decisions leave the engine, so they stay testable
/// against a recording double with no real animation driver behind it.
pub trait MotionSink {
    /// Timed transition to `target`; supersedes any in-flight transition for
    /// the same slot (last call wins, no queueing).
    fn animate_to(&mut self, slot: ItemSlot, target: Vec2, spec: AnimationSpec);
    /// Place without animating (insertion anchor, drag tracking, forced
    /// reset).
    fn snap_to(&mut self, slot: ItemSlot, position: Vec2);
    /// Timed transition of the lift scale (grab elevate / settle back down).
    fn scale_to(&mut self, slot: ItemSlot, target: f32, spec: AnimationSpec);
    /// Drop the slot's motion state; finalizes any in-flight transition.
    fn remove(&mut self, slot: ItemSlot);

    fn position(&self, slot: ItemSlot) -> Option<Vec2>;
    fn scale(&self, slot: ItemSlot) -> f32;
    fn is_settled(&self, slot: ItemSlot) -> bool;

    /// Advance all motion one frame. Returns true while anything still moves.
    fn tick(&mut self) -> bool;
}

struct Motion {
    position: AnimatedValue<Vec2>,
    scale: AnimatedValue<f32>,
}

/// The real sink: tween-driven position and scale per tracked item, advanced
/// by the host's frame tick.
#[derive(Default)]
pub struct TweenScheduler {
    motions: SecondaryMap<ItemSlot, Motion>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn motion_mut(&mut self, slot: ItemSlot) -> &mut Motion {
        if !self.motions.contains_key(slot) {
            self.motions.insert(
                slot,
                Motion {
                    position: AnimatedValue::new(Vec2::default(), AnimationSpec::default()),
                    scale: AnimatedValue::new(1.0, AnimationSpec::fast()),
                },
            );
        }
        &mut self.motions[slot]
    }
}

impl MotionSink for TweenScheduler {
    fn animate_to(&mut self, slot: ItemSlot, target: Vec2, spec: AnimationSpec) {
        self.motion_mut(slot).position.set_target(target, spec);
    }

    fn snap_to(&mut self, slot: ItemSlot, position: Vec2) {
        self.motion_mut(slot).position.snap_to(position);
    }

    fn scale_to(&mut self, slot: ItemSlot, target: f32, spec: AnimationSpec) {
        self.motion_mut(slot).scale.set_target(target, spec);
    }

    fn remove(&mut self, slot: ItemSlot) {
        self.motions.remove(slot);
    }

    fn position(&self, slot: ItemSlot) -> Option<Vec2> {
        self.motions.get(slot).map(|m| *m.position.get())
    }

    fn scale(&self, slot: ItemSlot) -> f32 {
        self.motions.get(slot).map(|m| *m.scale.get()).unwrap_or(1.0)
    }

    fn is_settled(&self, slot: ItemSlot) -> bool {
        self.motions
            .get(slot)
            .map(|m| !m.position.is_animating() && !m.scale.is_animating())
            .unwrap_or(true)
    }

    fn tick(&mut self) -> bool {
        let mut moving = false;
        for (_, motion) in self.motions.iter_mut() {
            moving |= motion.position.update();
            moving |= motion.scale.update();
        }
        moving
    }
}
