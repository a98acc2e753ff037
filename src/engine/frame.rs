//! The host-independent per-frame update.
//!
//! [`FrameStep::run`] performs everything a frame does before drawing:
//! read the clock, spin the section meshes, place the camera for the
//! current scroll, ease the rig toward the parallax target and advance
//! the section tweens. It touches no GPU state, so it is unit tested and
//! benchmarked directly.

use glam::Vec2;
use web_time::Instant;

use crate::animation::SectionAnimator;
use crate::input::InputState;
use crate::options::MotionOptions;
use crate::scene::Scene;
use crate::util::clock::{Clock, FrameTime};

/// One frame of scene updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Idle spin in radians per second around X and Y.
    idle_spin: Vec2,
}

impl FrameStep {
    /// A step using the configured idle spin.
    #[must_use]
    pub fn new(motion: &MotionOptions) -> Self {
        Self {
            idle_spin: Vec2::from_array(motion.idle_spin),
        }
    }

    /// Run one frame at `now` and return the clock reading it used.
    pub fn run(
        &self,
        clock: &mut Clock,
        now: Instant,
        input: &InputState,
        viewport_height: f32,
        scene: &mut Scene,
        animator: &mut SectionAnimator,
    ) -> FrameTime {
        let time = clock.tick_at(now);
        self.advance(time.delta, input, viewport_height, scene);
        animator.update(now, &mut scene.sections);
        time
    }

    /// Apply the clock-driven part of a frame for a step of `delta`
    /// seconds.
    pub fn advance(
        &self,
        delta: f32,
        input: &InputState,
        viewport_height: f32,
        scene: &mut Scene,
    ) {
        for mesh in &mut scene.sections {
            mesh.rotation.x += delta * self.idle_spin.x;
            mesh.rotation.y += delta * self.idle_spin.y;
        }

        let spacing = scene.section_spacing();
        scene
            .rig
            .place_for_scroll(input.scroll_y, viewport_height, spacing);

        let target = scene.rig.parallax_target(input.cursor);
        scene.rig.ease_toward(target, delta);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::input::{InputEvent, InputTracker, ScrollDelta};
    use crate::options::Options;

    fn scene() -> Scene {
        let options = Options::default();
        let mut rng = StdRng::seed_from_u64(11);
        Scene::build_with_rng(&options, options.material.color, &mut rng)
    }

    fn step() -> FrameStep {
        FrameStep::new(&MotionOptions::default())
    }

    #[test]
    fn idle_spin_scales_with_delta() {
        let mut scene = scene();
        step().advance(0.5, &InputState::default(), 800.0, &mut scene);
        for mesh in &scene.sections {
            assert!((mesh.rotation.x - 0.05).abs() < 1e-6);
            assert!((mesh.rotation.y - 0.1).abs() < 1e-6);
            assert_eq!(mesh.rotation.z, 0.0);
        }
    }

    #[test]
    fn one_viewport_of_scroll_moves_one_section() {
        let mut scene = scene();
        let input = InputState {
            scroll_y: 800.0,
            ..InputState::default()
        };
        step().advance(0.0, &input, 800.0, &mut scene);
        assert!((scene.rig.local().y + 4.0).abs() < 1e-6);
        assert_eq!(scene.rig.local().z, 3.0);
    }

    #[test]
    fn window_resize_keeps_the_wheel_section_in_view() {
        let mut scene = scene();
        let mut tracker = InputTracker::new(1000.0, 800.0, 3);
        let _ = tracker.handle_event(InputEvent::Wheel {
            delta: ScrollDelta::Pixels(800.0),
        });
        tracker.resize(1000.0, 400.0);
        step().advance(0.0, tracker.state(), 400.0, &mut scene);
        assert!((scene.rig.local().y + 4.0).abs() < 1e-6);
    }

    #[test]
    fn rig_approaches_parallax_target() {
        let mut scene = scene();
        let mut tracker = InputTracker::new(1000.0, 800.0, 3);
        tracker.handle_cursor(1000.0, 0.0);
        let input = *tracker.state();
        let target = scene.rig.parallax_target(input.cursor);
        assert_eq!(target, Vec2::new(0.25, 0.25));

        let mut distance = target.distance(scene.rig.group().truncate());
        for _ in 0..120 {
            step().advance(1.0 / 60.0, &input, 800.0, &mut scene);
            let next = target.distance(scene.rig.group().truncate());
            assert!(next < distance);
            distance = next;
        }
        assert!(distance < 0.01);
    }

    #[test]
    fn centered_cursor_leaves_rig_at_rest() {
        let mut scene = scene();
        let mut tracker = InputTracker::new(1000.0, 800.0, 3);
        tracker.handle_cursor(500.0, 400.0);
        let input = *tracker.state();
        assert_eq!(input.cursor, Vec2::ZERO);

        for _ in 0..30 {
            step().advance(1.0 / 60.0, &input, 800.0, &mut scene);
        }
        assert_eq!(scene.rig.group(), Vec3::ZERO);
    }

    #[test]
    fn scrolling_to_section_one_animates_only_that_mesh() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let mut scene = scene();
        let mut animator =
            SectionAnimator::new(scene.section_count(), &MotionOptions::default());
        let mut tracker = InputTracker::new(1000.0, 800.0, 3);

        let fired = tracker.handle_scroll(800.0);
        assert_eq!(fired, Some(1));
        animator.trigger(1, start);

        let time = step().run(
            &mut clock,
            start + Duration::from_millis(750),
            tracker.state(),
            800.0,
            &mut scene,
            &mut animator,
        );
        let idle = Vec3::new(time.delta * 0.1, time.delta * 0.2, 0.0);
        assert!(scene.sections[0].rotation.abs_diff_eq(idle, 1e-5));
        assert!(scene.sections[2].rotation.abs_diff_eq(idle, 1e-5));
        // Halfway through a symmetric ease the tween has applied half its
        // rotation.
        let expected = idle + Vec3::new(3.0, 3.0, 0.75);
        assert!(scene.sections[1].rotation.abs_diff_eq(expected, 1e-4));
        assert_eq!(animator.active(1), 1);
    }

    #[test]
    fn first_frame_delta_is_elapsed_time() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let mut scene = scene();
        let mut animator =
            SectionAnimator::new(scene.section_count(), &MotionOptions::default());
        let time = step().run(
            &mut clock,
            start + Duration::from_millis(100),
            &InputState::default(),
            800.0,
            &mut scene,
            &mut animator,
        );
        assert_eq!(time.delta, time.elapsed);
        assert!(!animator.is_animating());
    }
}
