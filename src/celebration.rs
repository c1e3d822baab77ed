use rand::{seq::SliceRandom, Rng};
use std::time::{Duration, Instant};

const BANNER: &str = "TIME'S UP!";
const BURST_SIZE: usize = 30;
const GRAVITY: f64 = 15.0;
const OFF_SCREEN_BUFFER: f64 = 5.0;
pub const EFFECT_DURATION: Duration = Duration::from_secs(3);

/// One spark of the expiry burst, or one letter of the banner.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// letters fly to a fixed slot in the banner instead of falling
    pub target: Option<(f64, f64)>,
}

impl Particle {
    fn spark<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *['*', '+', 'o', '.', 'x', '~'].choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
            target: None,
        }
    }

    fn letter(x: f64, y: f64, target_x: f64, target_y: f64, symbol: char, color: usize) -> Self {
        Self {
            x,
            y,
            vel_x: target_x - x,
            vel_y: target_y - y,
            symbol,
            color_index: color,
            age: 0.0,
            // letters outlive the effect, the effect clears them
            max_age: f64::INFINITY,
            target: Some((target_x, target_y)),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let dist = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                if dist > 0.5 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    // re-aim so overshoot cannot happen
                    self.vel_x = (tx - self.x) * 2.0;
                    self.vel_y = (ty - self.y) * 2.0;
                } else {
                    self.x = tx;
                    self.y = ty;
                    self.vel_x = 0.0;
                    self.vel_y = 0.0;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += GRAVITY * dt;
            }
        }
        self.age += dt;
        self.age < self.max_age
    }
}

/// The visual effect shown once the countdown reaches zero
#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    started_at: Option<Instant>,
    last_update: Option<Instant>,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            started_at: None,
            last_update: None,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self, width: u16, height: u16, now: Instant) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.started_at = Some(now);
        self.last_update = Some(now);
        self.width = f64::from(width);
        self.height = f64::from(height);

        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;

        // banner sits above the clock digits
        let spacing = 2.0;
        let banner_y = (center_y - 8.0).max(0.0);
        let left = center_x - (BANNER.chars().count() as f64 - 1.0) * spacing / 2.0;
        for (i, ch) in BANNER.chars().enumerate().filter(|(_, c)| *c != ' ') {
            let from_x = center_x + rng.gen_range(-10.0..10.0);
            let from_y = center_y + rng.gen_range(-5.0..5.0);
            let color = rng.gen_range(0..7);
            self.particles.push(Particle::letter(
                from_x,
                from_y,
                left + i as f64 * spacing,
                banner_y,
                ch,
                color,
            ));
        }

        for _ in 0..BURST_SIZE {
            let x = center_x + rng.gen_range(-15.0..15.0);
            let y = center_y + rng.gen_range(-8.0..8.0);
            self.particles.push(Particle::spark(x, y, &mut rng));
        }
    }

    pub fn stop(&mut self) {
        self.particles.clear();
        self.started_at = None;
        self.last_update = None;
    }

    /// Advance the animation to `now`.
    pub fn update(&mut self, now: Instant) {
        let (Some(started), Some(last)) = (self.started_at, self.last_update) else {
            return;
        };

        if now.saturating_duration_since(started) >= EFFECT_DURATION {
            self.stop();
            return;
        }

        let dt = now.saturating_duration_since(last).as_secs_f64();
        self.last_update = Some(now);

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|particle| {
            let alive = particle.update(dt);
            if particle.is_letter() {
                return alive;
            }
            let off_screen = particle.y > height + OFF_SCREEN_BUFFER
                || particle.x < -OFF_SCREEN_BUFFER
                || particle.x > width + OFF_SCREEN_BUFFER;
            alive && !off_screen
        });
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn test_spark_falls() {
        let mut rng = rand::thread_rng();
        let mut spark = Particle::spark(10.0, 10.0, &mut rng);
        let vel_y = spark.vel_y;
        assert!(spark.update(0.1));
        assert!(spark.vel_y > vel_y);
        assert_ne!(spark.y, 10.0);
    }

    #[test]
    fn test_letter_reaches_target() {
        let mut letter = Particle::letter(0.0, 0.0, 10.0, 5.0, 'T', 0);
        assert!(letter.is_letter());
        for _ in 0..40 {
            assert!(letter.update(0.1));
        }
        assert_eq!((letter.x, letter.y), (10.0, 5.0));
    }

    #[test]
    fn test_inactive_by_default() {
        let mut effect = Celebration::new();
        assert!(!effect.is_active());
        effect.update(Instant::now());
        assert!(effect.particles.is_empty());
    }

    #[test]
    fn test_start_spawns_banner_and_sparks() {
        let mut effect = Celebration::new();
        effect.start(80, 24, Instant::now());
        assert!(effect.is_active());

        let letters: String = effect
            .particles
            .iter()
            .filter(|p| p.is_letter())
            .map(|p| p.symbol)
            .collect();
        assert_eq!(letters, "TIME'SUP!");
        assert_eq!(
            effect.particles.iter().filter(|p| !p.is_letter()).count(),
            BURST_SIZE
        );
    }

    #[test]
    fn test_particles_move_over_time() {
        let mut effect = Celebration::new();
        let mut now = Instant::now();
        effect.start(80, 24, now);
        let before: Vec<(f64, f64)> = effect.particles.iter().map(|p| (p.x, p.y)).collect();

        for _ in 0..5 {
            now += STEP;
            effect.update(now);
        }

        let moved = effect
            .particles
            .iter()
            .zip(before.iter())
            .filter(|(p, &(x, y))| (p.x - x).abs() > 0.1 || (p.y - y).abs() > 0.1)
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn test_off_screen_sparks_are_dropped() {
        let mut effect = Celebration::new();
        let mut now = Instant::now();
        effect.start(20, 10, now);
        let mut rng = rand::thread_rng();
        effect.particles.push(Particle::spark(100.0, 100.0, &mut rng));

        now += STEP;
        effect.update(now);

        for p in effect.particles.iter().filter(|p| !p.is_letter()) {
            assert!(p.y <= 10.0 + OFF_SCREEN_BUFFER);
            assert!(p.x <= 20.0 + OFF_SCREEN_BUFFER);
        }
    }

    #[test]
    fn test_effect_ends_after_duration() {
        let mut effect = Celebration::new();
        let start = Instant::now();
        effect.start(80, 24, start);

        effect.update(start + EFFECT_DURATION - STEP);
        assert!(effect.is_active());

        effect.update(start + EFFECT_DURATION);
        assert!(!effect.is_active());
        assert!(effect.particles.is_empty());
    }
}
