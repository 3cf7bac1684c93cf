//! "LAUNCH PARTY" particle burst drawn over the whole terminal.
//!
//! For two seconds every frame launches a volley from each side of the
//! screen. Particles then fall off the screen on their own, and the
//! effect is over once the last one has left.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::schedule::{Burst, Interval, earliest};

/// How long new particles keep launching.
pub const DURATION: Duration = Duration::from_secs(2);

/// Animation frame period (~30 fps).
pub const FRAME: Duration = Duration::from_millis(33);

const PER_SIDE: usize = 5;
const SPREAD_DEG: f32 = 55.0;
const LEFT_ANGLE_DEG: f32 = 60.0;
const RIGHT_ANGLE_DEG: f32 = 120.0;
const ORIGIN_Y: f32 = 0.5;
const DECAY: f32 = 0.92;
const GRAVITY: f32 = 0.004;
const MAX_TICKS: u16 = 200;

const COLORS: [Color; 7] = [
    Color::Rgb(0x26, 0xcc, 0xff),
    Color::Rgb(0xa2, 0x5a, 0xfd),
    Color::Rgb(0xff, 0x5e, 0x7e),
    Color::Rgb(0x88, 0xff, 0x5a),
    Color::Rgb(0xfc, 0xff, 0x42),
    Color::Rgb(0xff, 0xa6, 0x2d),
    Color::Rgb(0xff, 0x36, 0xff),
];

const GLYPHS: [char; 6] = ['■', '▪', '●', '◆', '▲', '★'];

/// One piece of confetti in normalized screen space (0..1 on both axes,
/// y grows downward).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub glyph: char,
    pub color: Color,
    ticks_left: u16,
}

impl Particle {
    fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= DECAY;
        self.vy = self.vy * DECAY + GRAVITY;
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    fn is_alive(&self) -> bool {
        self.ticks_left > 0 && self.y <= 1.0 && (-0.05..=1.05).contains(&self.x)
    }
}

/// A running celebration.
#[derive(Debug)]
pub struct Celebration {
    launch: Burst,
    frames: Interval,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Celebration {
    /// Start the effect; the first volley launches immediately.
    pub fn start(now: Instant, rng: StdRng) -> Self {
        let mut celebration = Celebration {
            launch: Burst::new(now, DURATION, FRAME),
            frames: Interval::new(FRAME, now),
            particles: Vec::new(),
            rng,
        };
        if celebration.launch.poll(now) {
            celebration.volley();
        }
        celebration
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance the animation if a frame is due. Returns true if anything moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        let stepped = self.frames.poll(now);
        if stepped {
            for p in &mut self.particles {
                p.step();
            }
            self.particles.retain(Particle::is_alive);
        }
        let launched = self.launch.poll(now);
        if launched {
            self.volley();
        }
        stepped || launched
    }

    /// Launches are over and every particle has left the screen.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.launch.is_finished(now) && self.particles.is_empty()
    }

    pub fn next_due(&self, now: Instant) -> Option<Instant> {
        if self.is_finished(now) {
            return None;
        }
        earliest(self.launch.next_due(now), Some(self.frames.next_due()))
    }

    fn volley(&mut self) {
        for _ in 0..PER_SIDE {
            let p = self.particle(0.0, LEFT_ANGLE_DEG);
            self.particles.push(p);
        }
        for _ in 0..PER_SIDE {
            let p = self.particle(1.0, RIGHT_ANGLE_DEG);
            self.particles.push(p);
        }
    }

    fn particle(&mut self, x: f32, angle_deg: f32) -> Particle {
        let half = SPREAD_DEG / 2.0;
        let angle = (angle_deg + self.rng.gen_range(-half..=half)).to_radians();
        let speed = self.rng.gen_range(0.02..0.045);
        Particle {
            x,
            y: ORIGIN_Y,
            vx: angle.cos() * speed,
            vy: -angle.sin() * speed,
            glyph: GLYPHS[self.rng.gen_range(0..GLYPHS.len())],
            color: COLORS[self.rng.gen_range(0..COLORS.len())],
            ticks_left: MAX_TICKS,
        }
    }
}

impl Widget for &Celebration {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let max_x = f32::from(area.width - 1);
        let max_y = f32::from(area.height - 1);
        for p in &self.particles {
            if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
                continue;
            }
            let col = area.x + (p.x * max_x).round() as u16;
            let row = area.y + (p.y * max_y).round() as u16;
            if let Some(cell) = buf.cell_mut((col, row)) {
                cell.set_char(p.glyph).set_fg(p.color);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn start(t0: Instant) -> Celebration {
        Celebration::start(t0, StdRng::seed_from_u64(7))
    }

    #[test]
    fn first_volley_launches_immediately() {
        let t0 = Instant::now();
        let c = start(t0);
        assert_eq!(c.particles().len(), PER_SIDE * 2);
        assert!(c.particles().iter().all(|p| p.y == ORIGIN_Y));
    }

    #[test]
    fn volleys_launch_from_both_edges() {
        let c = start(Instant::now());
        let left = c.particles().iter().filter(|p| p.x == 0.0).count();
        let right = c.particles().iter().filter(|p| p.x == 1.0).count();
        assert_eq!(left, PER_SIDE);
        assert_eq!(right, PER_SIDE);
    }

    #[test]
    fn particles_head_inward_and_upward() {
        let c = start(Instant::now());
        for p in c.particles() {
            if p.x == 0.0 {
                assert!(p.vx > 0.0);
            } else {
                assert!(p.vx < 0.0);
            }
            assert!(p.vy < 0.0);
        }
    }

    #[test]
    fn stops_launching_after_duration_then_finishes() {
        let t0 = Instant::now();
        let mut c = start(t0);

        let mut t = t0;
        while t < t0 + DURATION {
            t += FRAME;
            c.poll(t);
        }
        assert!(c.launch.is_finished(t));

        // No more launches: particle count can only shrink from here
        let mut last = c.particles().len();
        for _ in 0..(MAX_TICKS as u32 + 10) {
            t += FRAME;
            c.poll(t);
            assert!(c.particles().len() <= last);
            last = c.particles().len();
        }
        assert!(c.is_finished(t));
        assert_eq!(c.next_due(t), None);
    }

    #[test]
    fn next_due_is_pending_while_running() {
        let t0 = Instant::now();
        let c = start(t0);
        let due = c.next_due(t0).expect("running effect has a wakeup");
        assert!(due <= t0 + FRAME);
    }

    #[test]
    fn renders_particles_into_buffer() {
        let c = start(Instant::now());
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        (&c).render(area, &mut buf);
        let drawn = buf
            .content()
            .iter()
            .filter(|cell| GLYPHS.iter().any(|g| cell.symbol() == g.to_string()))
            .count();
        assert!(drawn > 0);
    }
}
