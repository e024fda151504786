//! Falling-particle decoration drawn behind the homepage.
//!
//! A fixed pool of independent sprites drifts down a canvas sized to the
//! viewport. Each particle's look and speed come from its [`Variant`], chosen
//! once at spawn (from the current season, or a single plain variant). Once a
//! particle passes the bottom edge it is recycled just above the top edge at a
//! new random x.
//!
//! Frame order is `clear -> (update, draw) per particle`, see
//! [`ParticleField::frame`]. The browser driver lives in [`animator`].

pub mod animator;
pub mod rng;
pub mod surface;

use std::f64::consts::FRAC_PI_4;

use serde::Deserialize;

use crate::holiday::Season;
use rng::RandomSource;
use surface::DrawSurface;

/// Number of particles in the pool. Fixed for the page lifetime.
pub const POOL_SIZE: usize = 60;
/// y coordinate new and recycled particles start at (just above the surface).
pub const SPAWN_Y: f64 = -10.0;

const SPRING_PALETTE: &[&str] = &["#ff9ff3", "#feca57", "#ff6b6b", "#48dbfb", "#1dd1a1"];
const AUTUMN_PALETTE: &[&str] = &["#ff6b6b", "#feca57", "#ff9ff3", "#a29bfe"];

// --- Variants ---------------------------------------------------------------

/// Shape/behaviour category of a particle. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Snowflake, // winter
    Petal,     // spring
    Raindrop,  // summer
    Leaf,      // autumn
    Plain,     // non-seasonal build
}

/// Sampling ranges and colors for one variant. Ranges are `(min, max)`.
#[derive(Clone, Copy, Debug)]
pub struct VariantParams {
    pub size: (f64, f64),
    pub speed_x: (f64, f64),
    pub speed_y: (f64, f64),
    pub palette: &'static [&'static str],
}

static SNOWFLAKE: VariantParams = VariantParams {
    size: (3.0, 9.0),
    speed_x: (-0.75, 0.75),
    speed_y: (0.5, 2.5),
    palette: &["#ffffff"],
};

static PETAL: VariantParams = VariantParams {
    size: (4.0, 12.0),
    speed_x: (-1.0, 1.0),
    speed_y: (1.0, 3.5),
    palette: SPRING_PALETTE,
};

static RAINDROP: VariantParams = VariantParams {
    size: (2.0, 6.0),
    speed_x: (-0.5, 0.5),
    speed_y: (2.0, 6.0),
    palette: &["#48dbfb"],
};

static LEAF: VariantParams = VariantParams {
    size: (5.0, 15.0),
    speed_x: (-1.25, 1.25),
    speed_y: (1.5, 4.5),
    palette: AUTUMN_PALETTE,
};

static PLAIN: VariantParams = VariantParams {
    size: (4.0, 12.0),
    speed_x: (-1.0, 1.0),
    speed_y: (1.0, 4.0),
    palette: SPRING_PALETTE,
};

impl Variant {
    pub fn for_season(season: Season) -> Self {
        match season {
            Season::Winter => Variant::Snowflake,
            Season::Spring => Variant::Petal,
            Season::Summer => Variant::Raindrop,
            Season::Autumn => Variant::Leaf,
        }
    }

    pub fn params(self) -> &'static VariantParams {
        match self {
            Variant::Snowflake => &SNOWFLAKE,
            Variant::Petal => &PETAL,
            Variant::Raindrop => &RAINDROP,
            Variant::Leaf => &LEAF,
            Variant::Plain => &PLAIN,
        }
    }
}

// --- Shapes -----------------------------------------------------------------

/// What a particle paints, independent of where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapePrimitive {
    Circle { radius: f64 },
    /// Semi-axes plus rotation in radians.
    Ellipse { radius_x: f64, radius_y: f64, rotation: f64 },
}

/// Map a variant and size to the primitive it draws.
pub fn draw_shape(variant: Variant, size: f64) -> ShapePrimitive {
    match variant {
        Variant::Snowflake | Variant::Petal | Variant::Plain => ShapePrimitive::Circle { radius: size },
        Variant::Raindrop => ShapePrimitive::Ellipse {
            radius_x: size * 0.5,
            radius_y: size * 1.5,
            rotation: FRAC_PI_4,
        },
        Variant::Leaf => ShapePrimitive::Ellipse {
            radius_x: size * 0.6,
            radius_y: size * 1.2,
            rotation: FRAC_PI_4,
        },
    }
}

// --- Particle ---------------------------------------------------------------

/// One falling sprite. Only the position changes after construction.
#[derive(Clone, Debug)]
pub struct Particle {
    x: f64,
    y: f64,
    speed_x: f64,
    speed_y: f64,
    size: f64,
    color: &'static str,
    opacity: f64,
    variant: Variant,
}

impl Particle {
    /// Spawn just above the surface at a random x in `[0, surface_width)`.
    pub fn spawn(variant: Variant, surface_width: f64, rng: &mut impl RandomSource) -> Self {
        let p = variant.params();
        Self {
            x: rng.range(0.0, surface_width),
            y: SPAWN_Y,
            size: rng.range(p.size.0, p.size.1),
            speed_x: rng.range(p.speed_x.0, p.speed_x.1),
            speed_y: rng.range(p.speed_y.0, p.speed_y.1),
            color: p.palette[rng.index(p.palette.len())],
            opacity: rng.range(0.2, 1.0),
            variant,
        }
    }

    /// Advance one frame. Wraps to the top at a fresh x once past the bottom.
    pub fn update(&mut self, surface_width: f64, surface_height: f64, rng: &mut impl RandomSource) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        if self.y > surface_height {
            self.y = SPAWN_Y;
            self.x = rng.range(0.0, surface_width);
        }
    }

    pub fn draw(&self, surface: &mut impl DrawSurface) {
        surface.fill_shape(self.x, self.y, self.shape(), self.color, self.opacity);
    }

    pub fn shape(&self) -> ShapePrimitive {
        draw_shape(self.variant, self.size)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.speed_x, self.speed_y)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> &'static str {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
}

// --- Field ------------------------------------------------------------------

/// What happens to particle x coordinates when the surface is resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Leave positions alone; off-surface particles come back on their next wrap.
    #[default]
    KeepPositions,
    /// Resample x for particles that now lie outside `[0, width)`.
    ResampleOutOfBounds,
}

/// The particle pool plus the random source it samples from.
pub struct ParticleField<R: RandomSource> {
    particles: Vec<Particle>,
    rng: R,
    resize_policy: ResizePolicy,
}

impl<R: RandomSource> ParticleField<R> {
    pub fn new(variant: Variant, surface_width: f64, mut rng: R) -> Self {
        let particles = (0..POOL_SIZE)
            .map(|_| Particle::spawn(variant, surface_width, &mut rng))
            .collect();
        Self { particles, rng, resize_policy: ResizePolicy::default() }
    }

    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// One display tick: clear, then update and draw each particle in pool order.
    pub fn frame(&mut self, surface: &mut impl DrawSurface) {
        let (w, h) = (surface.width(), surface.height());
        surface.clear();
        for p in &mut self.particles {
            p.update(w, h, &mut self.rng);
            p.draw(surface);
        }
    }

    /// Resize the surface and apply the resize policy to the pool.
    pub fn resize(&mut self, surface: &mut impl DrawSurface, width: f64, height: f64) {
        surface.resize(width, height);
        if self.resize_policy == ResizePolicy::ResampleOutOfBounds {
            for p in &mut self.particles {
                if p.x >= width || p.x < 0.0 {
                    p.x = self.rng.range(0.0, width);
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::rng::XorShift;
    use super::test_support::{RecordingSurface, SeqRandom};
    use super::*;

    const ALL: [Variant; 5] = [
        Variant::Snowflake,
        Variant::Petal,
        Variant::Raindrop,
        Variant::Leaf,
        Variant::Plain,
    ];

    fn within(v: f64, (lo, hi): (f64, f64)) -> bool {
        v >= lo && v <= hi
    }

    #[test]
    fn spawn_samples_from_variant_ranges() {
        let mut rng = XorShift::new(3);
        for variant in ALL {
            let params = variant.params();
            for _ in 0..500 {
                let p = Particle::spawn(variant, 800.0, &mut rng);
                let (x, y) = p.position();
                let (vx, vy) = p.velocity();
                assert!((0.0..800.0).contains(&x));
                assert_eq!(y, SPAWN_Y);
                assert!(within(p.size(), params.size), "{variant:?} size {}", p.size());
                assert!(within(vx, params.speed_x), "{variant:?} vx {vx}");
                assert!(within(vy, params.speed_y), "{variant:?} vy {vy}");
                assert!(params.palette.contains(&p.color()));
            }
        }
    }

    #[test]
    fn opacity_in_range_for_many_spawns() {
        let mut rng = XorShift::new(11);
        for i in 0..10_000 {
            let p = Particle::spawn(ALL[i % ALL.len()], 640.0, &mut rng);
            assert!((0.2..=1.0).contains(&p.opacity()), "opacity {}", p.opacity());
        }
    }

    #[test]
    fn fixed_colors_for_snow_and_rain() {
        let mut rng = XorShift::new(5);
        for _ in 0..50 {
            assert_eq!(Particle::spawn(Variant::Snowflake, 100.0, &mut rng).color(), "#ffffff");
            assert_eq!(Particle::spawn(Variant::Raindrop, 100.0, &mut rng).color(), "#48dbfb");
        }
    }

    #[test]
    fn wrap_resets_y_and_resamples_x() {
        // spawn draws x, size, speed_x, speed_y, color, opacity; speed_y = 2 + 0.25 * 4 = 3
        let mut rng = SeqRandom { values: vec![0.25, 0.5, 0.5, 0.25, 0.0, 0.5], pos: 0 };
        let mut p = Particle::spawn(Variant::Raindrop, 400.0, &mut rng);
        p.y = 499.0;
        p.speed_y = 3.0;
        rng.values = vec![0.75];
        p.update(400.0, 500.0, &mut rng);
        assert_eq!(p.position(), (300.0, SPAWN_Y));
    }

    #[test]
    fn no_wrap_while_on_surface() {
        let mut rng = XorShift::new(1);
        let mut p = Particle::spawn(Variant::Leaf, 300.0, &mut rng);
        p.y = 100.0;
        let (x0, _) = p.position();
        let (vx, vy) = p.velocity();
        p.update(300.0, 500.0, &mut rng);
        let (x1, y1) = p.position();
        assert!((x1 - (x0 + vx)).abs() < 1e-12);
        assert!((y1 - (100.0 + vy)).abs() < 1e-12);
    }

    #[test]
    fn y_stays_in_bounds_over_many_updates() {
        let mut rng = XorShift::new(17);
        let (w, h) = (320.0, 240.0);
        for variant in ALL {
            let mut p = Particle::spawn(variant, w, &mut rng);
            for _ in 0..5_000 {
                p.update(w, h, &mut rng);
                let (_, y) = p.position();
                assert!((SPAWN_Y..=h).contains(&y), "{variant:?} y {y}");
            }
        }
    }

    #[test]
    fn construction_attributes_never_change() {
        let mut field = ParticleField::new(Variant::Leaf, 500.0, XorShift::new(24));
        let before: Vec<_> = field
            .particles()
            .iter()
            .map(|p| (p.variant(), p.size(), p.color(), p.velocity(), p.opacity()))
            .collect();
        let mut surface = RecordingSurface::new(500.0, 200.0);
        for _ in 0..1_000 {
            field.frame(&mut surface);
        }
        let after: Vec<_> = field
            .particles()
            .iter()
            .map(|p| (p.variant(), p.size(), p.color(), p.velocity(), p.opacity()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn shapes_per_variant() {
        assert_eq!(draw_shape(Variant::Snowflake, 4.0), ShapePrimitive::Circle { radius: 4.0 });
        assert_eq!(draw_shape(Variant::Petal, 6.0), ShapePrimitive::Circle { radius: 6.0 });
        assert_eq!(draw_shape(Variant::Plain, 5.0), ShapePrimitive::Circle { radius: 5.0 });
        assert_eq!(
            draw_shape(Variant::Raindrop, 4.0),
            ShapePrimitive::Ellipse { radius_x: 2.0, radius_y: 6.0, rotation: FRAC_PI_4 }
        );
        assert_eq!(
            draw_shape(Variant::Leaf, 10.0),
            ShapePrimitive::Ellipse { radius_x: 6.0, radius_y: 12.0, rotation: FRAC_PI_4 }
        );
    }

    #[test]
    fn frame_clears_then_draws_every_particle() {
        let mut field = ParticleField::new(Variant::Petal, 800.0, XorShift::new(9));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        field.frame(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.fills.len(), POOL_SIZE);
        // drawn positions are post-update positions
        for (p, fill) in field.particles().iter().zip(&surface.fills) {
            assert_eq!((fill.0, fill.1), p.position());
            assert_eq!(fill.3, p.color());
            assert_eq!(fill.4, p.opacity());
        }
    }

    #[test]
    fn drawing_does_not_move_particles() {
        let mut rng = XorShift::new(2);
        let p = Particle::spawn(Variant::Snowflake, 100.0, &mut rng);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let before = p.position();
        p.draw(&mut surface);
        p.draw(&mut surface);
        assert_eq!(p.position(), before);
    }

    #[test]
    fn pool_size_is_constant() {
        let mut field = ParticleField::new(Variant::Raindrop, 200.0, XorShift::new(4));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        for _ in 0..2_000 {
            field.frame(&mut surface);
            assert_eq!(field.len(), POOL_SIZE);
        }
    }

    #[test]
    fn resize_keeps_positions_by_default() {
        let mut field = ParticleField::new(Variant::Petal, 800.0, XorShift::new(6));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        for _ in 0..30 {
            field.frame(&mut surface);
        }
        let before: Vec<_> = field.particles().iter().map(Particle::position).collect();
        field.resize(&mut surface, 400.0, 300.0);
        let after: Vec<_> = field.particles().iter().map(Particle::position).collect();
        assert_eq!(before, after);
        field.frame(&mut surface);
        assert_eq!(surface.cleared_at.last(), Some(&(400.0, 300.0)));
    }

    #[test]
    fn resample_policy_pulls_x_back_on_surface() {
        let mut field = ParticleField::new(Variant::Petal, 800.0, XorShift::new(8))
            .with_resize_policy(ResizePolicy::ResampleOutOfBounds);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        field.resize(&mut surface, 100.0, 600.0);
        assert!(field.particles().iter().all(|p| (0.0..100.0).contains(&p.position().0)));
    }
}
