//! Per-section tween queues.

use std::time::Duration;

use glam::Vec3;
use web_time::Instant;

use super::tween::RotationTween;
use crate::options::MotionOptions;
use crate::scene::SectionMesh;
use crate::util::easing::EasingFunction;

/// Plays the trigger rotation of each section mesh.
///
/// One queue per mesh; a trigger pushes a tween, every update applies the
/// increments of all live tweens and drops the finished ones.
#[derive(Debug, Clone)]
pub struct SectionAnimator {
    queues: Vec<Vec<RotationTween>>,
    duration: Duration,
    easing: EasingFunction,
    rotation: Vec3,
}

impl SectionAnimator {
    /// An animator for `section_count` meshes.
    #[must_use]
    pub fn new(section_count: usize, motion: &MotionOptions) -> Self {
        Self {
            queues: vec![Vec::new(); section_count],
            // Negative, NaN and unrepresentable durations complete at once.
            duration: Duration::try_from_secs_f32(motion.trigger_duration.max(0.0))
                .unwrap_or(Duration::ZERO),
            easing: motion.trigger_easing,
            rotation: Vec3::from_array(motion.trigger_rotation),
        }
    }

    /// Start the trigger rotation of section `index` at `now`. Out-of-range
    /// indices are ignored.
    pub fn trigger(&mut self, index: usize, now: Instant) {
        let Some(queue) = self.queues.get_mut(index) else {
            log::warn!("trigger for unknown section {index}");
            return;
        };
        queue.push(RotationTween::new(
            now,
            self.duration,
            self.easing,
            self.rotation,
        ));
        log::debug!(
            "section {index} triggered ({} tween(s) active)",
            queue.len()
        );
    }

    /// Apply every live tween to its mesh at `now`.
    pub fn update(&mut self, now: Instant, sections: &mut [SectionMesh]) {
        for (queue, mesh) in self.queues.iter_mut().zip(sections.iter_mut()) {
            for tween in queue.iter_mut() {
                mesh.rotation += tween.advance(now);
            }
            queue.retain(|tween| !tween.is_complete());
        }
    }

    /// Number of running tweens on section `index`.
    #[must_use]
    pub fn active(&self, index: usize) -> usize {
        self.queues.get(index).map_or(0, Vec::len)
    }

    /// Whether any tween is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.queues.iter().any(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::Options;
    use crate::scene::Scene;

    fn setup() -> (SectionAnimator, Scene) {
        let options = Options::default();
        let scene = Scene::build_with_rng(
            &options,
            options.material.color,
            &mut StdRng::seed_from_u64(0),
        );
        (SectionAnimator::new(scene.section_count(), &options.motion), scene)
    }

    fn run_to(
        animator: &mut SectionAnimator,
        scene: &mut Scene,
        start: Instant,
        until_ms: u64,
    ) {
        for ms in (0..=until_ms).step_by(16) {
            animator.update(start + Duration::from_millis(ms), &mut scene.sections);
        }
        animator.update(start + Duration::from_millis(until_ms), &mut scene.sections);
    }

    #[test]
    fn only_the_triggered_mesh_moves() {
        let (mut animator, mut scene) = setup();
        let start = Instant::now();
        animator.trigger(1, start);
        run_to(&mut animator, &mut scene, start, 2000);

        assert_eq!(scene.sections[0].rotation, Vec3::ZERO);
        assert_eq!(scene.sections[2].rotation, Vec3::ZERO);
        assert!(scene.sections[1]
            .rotation
            .abs_diff_eq(Vec3::new(6.0, 6.0, 1.5), 1e-4));
        assert!(!animator.is_animating());
    }

    #[test]
    fn rapid_triggers_compound() {
        let (mut animator, mut scene) = setup();
        let start = Instant::now();
        scene.sections[0].rotation = Vec3::new(0.5, 0.25, 0.0);
        animator.trigger(0, start);
        animator.update(start + Duration::from_millis(200), &mut scene.sections);
        animator.trigger(0, start + Duration::from_millis(200));
        assert_eq!(animator.active(0), 2);

        run_to(&mut animator, &mut scene, start, 2000);
        let gained = scene.sections[0].rotation - Vec3::new(0.5, 0.25, 0.0);
        assert!(
            gained.abs_diff_eq(Vec3::new(12.0, 12.0, 3.0), 1e-3),
            "{gained}"
        );
        assert_eq!(animator.active(0), 0);
    }

    #[test]
    fn delta_is_relative_to_rotation_at_trigger_time() {
        let (mut animator, mut scene) = setup();
        let start = Instant::now();
        animator.trigger(2, start);
        // Another writer (the idle spin) changes the rotation mid-tween.
        animator.update(start + Duration::from_millis(500), &mut scene.sections);
        scene.sections[2].rotation.x += 1.0;
        run_to(&mut animator, &mut scene, start, 1600);
        assert!(scene.sections[2]
            .rotation
            .abs_diff_eq(Vec3::new(7.0, 6.0, 1.5), 1e-4));
    }

    #[test]
    fn unknown_section_is_ignored() {
        let (mut animator, _) = setup();
        animator.trigger(7, Instant::now());
        assert!(!animator.is_animating());
    }

    #[test]
    fn infinite_duration_completes_at_once() {
        let (_, mut scene) = setup();
        let motion = MotionOptions {
            trigger_duration: f32::INFINITY,
            ..MotionOptions::default()
        };
        let mut animator = SectionAnimator::new(scene.section_count(), &motion);
        let start = Instant::now();
        animator.trigger(0, start);
        animator.update(start, &mut scene.sections);
        assert!(scene.sections[0]
            .rotation
            .abs_diff_eq(Vec3::new(6.0, 6.0, 1.5), 1e-4));
        assert!(!animator.is_animating());
    }
}
