//! Ambient particle cloud.

use glam::Vec3;
use rand::Rng;

/// Immutable set of particle positions filling the scroll column.
#[derive(Debug, Clone, Default)]
pub struct ParticleCloud {
    positions: Vec<Vec3>,
}

impl ParticleCloud {
    /// Scatter `count` particles over the sections.
    ///
    /// X and Z fall in `[-spread / 2, spread / 2)`. Y starts half a section
    /// above the first mesh and extends down through `section_count`
    /// sections: `y ∈ (spacing * 0.5 - spacing * section_count, spacing *
    /// 0.5]`.
    pub fn scatter<R: Rng + ?Sized>(
        count: usize,
        spread: f32,
        spacing: f32,
        section_count: usize,
        rng: &mut R,
    ) -> Self {
        let depth = spacing * section_count as f32;
        let positions = (0..count)
            .map(|_| {
                let x = (rng.random::<f32>() - 0.5) * spread;
                let y = spacing * 0.5 - rng.random::<f32>() * depth;
                let z = (rng.random::<f32>() - 0.5) * spread;
                Vec3::new(x, y, z)
            })
            .collect();
        Self { positions }
    }

    /// World-space particle positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn particles_fill_the_section_column() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = ParticleCloud::scatter(200, 10.0, 4.0, 3, &mut rng);
        assert_eq!(cloud.len(), 200);
        for p in cloud.positions() {
            assert!(p.x >= -5.0 && p.x < 5.0, "x {}", p.x);
            assert!(p.z >= -5.0 && p.z < 5.0, "z {}", p.z);
            assert!(p.y <= 2.0 && p.y > 2.0 - 12.0, "y {}", p.y);
        }
    }

    #[test]
    fn section_count_stretches_the_column() {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = ParticleCloud::scatter(500, 10.0, 4.0, 5, &mut rng);
        let lowest = cloud
            .positions()
            .iter()
            .map(|p| p.y)
            .fold(f32::MAX, f32::min);
        // Five sections reach well below the third mesh at y = -8.
        assert!(lowest < -10.0);
        assert!(lowest > -18.0);
    }

    #[test]
    fn same_seed_same_cloud() {
        let a = ParticleCloud::scatter(10, 10.0, 4.0, 3, &mut StdRng::seed_from_u64(1));
        let b = ParticleCloud::scatter(10, 10.0, 4.0, 3, &mut StdRng::seed_from_u64(1));
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn empty_cloud() {
        let cloud = ParticleCloud::scatter(0, 10.0, 4.0, 3, &mut StdRng::seed_from_u64(0));
        assert!(cloud.is_empty());
    }
}
