// Horizontally oscillating turret that fires a rotating ring.

use super::{BossLink, BossStep, Encounter};
use crate::domain::entities::{Body, Bullet, EntityKind, Positioned};
use crate::domain::geometry::{Point, Vector};
use crate::domain::tuning::boss::{
    BOSS_HEIGHT, BOSS_WIDTH, V1_BULLET_MULTIPLIERS, V1_FIRE_PERIOD, V1_ROTATE_STEP,
};
use crate::domain::tuning::hazards::BULLET_DAMAGE;
use serde::{Deserialize, Serialize};

/// Mutable part of the turret, persisted in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossV1State {
    pub body: Body,
    pub move_x: f64,
    pub angle: f64,
    pub phase: u32,
    pub health: i64,
    pub encounter: Encounter,
}

#[derive(Debug, Clone)]
pub struct BossV1 {
    pub name: String,
    pub start_x: f64,
    pub speed: f64,
    pub length: f64,
    pub start_health: i64,
    pub link: BossLink,
    pub state: BossV1State,
}

impl BossV1 {
    pub fn new(
        name: impl Into<String>,
        origin: Point,
        speed: f64,
        length: f64,
        health: i64,
        link: BossLink,
    ) -> Self {
        Self {
            name: name.into(),
            start_x: origin.x,
            speed,
            length,
            start_health: health,
            link,
            state: BossV1State {
                body: Body::new(origin, BOSS_WIDTH, BOSS_HEIGHT),
                move_x: -speed,
                angle: 0.0,
                phase: 0,
                health,
                encounter: Encounter::default(),
            },
        }
    }

    /// One tick of an active encounter.
    pub fn step(&mut self) -> BossStep {
        let st = &mut self.state;
        st.phase = (st.phase + 1) % V1_FIRE_PERIOD;
        st.health -= 1;
        if st.health <= 0 {
            st.encounter.dead = true;
            return BossStep::death();
        }
        st.angle += V1_ROTATE_STEP;

        if st.body.origin.x < self.start_x - self.length {
            st.move_x = self.speed;
        } else if st.body.origin.x > self.start_x {
            st.move_x = -self.speed;
        }
        st.body.origin.x += st.move_x;

        BossStep {
            bullets: self.ring(),
            died: false,
        }
    }

    fn ring(&self) -> Vec<Bullet> {
        let st = &self.state;
        if st.phase != 0 {
            return Vec::new();
        }

        let (sin, cos) = st.angle.sin_cos();
        let axes = [Vector::new(cos, sin), Vector::new(sin, cos)];
        let center = st.body.rectangle().center();
        V1_BULLET_MULTIPLIERS
            .iter()
            .flat_map(|&k| axes.iter().map(move |&axis| axis * k))
            .map(|dir| Bullet::new(center, BULLET_DAMAGE, dir))
            .collect()
    }

    /// Restores the fight but never un-kills the boss's reward.
    pub fn reset(&mut self) {
        let st = &mut self.state;
        st.angle = 0.0;
        st.move_x = -self.speed;
        st.phase = 0;
        st.health = self.start_health;
        st.encounter.dead = false;
        st.encounter.entered = false;
    }
}

impl Positioned for BossV1 {
    fn body(&self) -> &Body {
        &self.state.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::BossV1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boss(health: i64) -> BossV1 {
        let link = BossLink {
            portal: 0,
            item: 0,
            win_point: Point::new(0.0, 0.0),
        };
        BossV1::new("turret", Point::new(500.0, 100.0), 2.0, 100.0, health, link)
    }

    #[test]
    fn fires_six_bullets_every_eighth_tick() {
        let mut b = boss(1000);
        let volleys: Vec<usize> = (0..16).map(|_| b.step().bullets.len()).collect();
        let expected: Vec<usize> = (1..=16).map(|t| if t % 8 == 0 { 6 } else { 0 }).collect();
        assert_eq!(volleys, expected);
    }

    #[test]
    fn oscillates_between_start_and_length() {
        let mut b = boss(1000);
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        for _ in 0..200 {
            b.step();
            min_x = min_x.min(b.state.body.origin.x);
            max_x = max_x.max(b.state.body.origin.x);
        }
        assert!(min_x >= 500.0 - 100.0 - 2.0 * 2.0);
        assert!(max_x <= 500.0 + 2.0 * 2.0);
        assert!(max_x - min_x >= 100.0);
    }

    #[test]
    fn dies_when_health_runs_out() {
        let mut b = boss(3);
        assert!(!b.step().died);
        assert!(!b.step().died);
        let last = b.step();
        assert!(last.died);
        assert!(last.bullets.is_empty());
        assert!(b.state.encounter.dead);
    }

    #[test]
    fn reset_restores_fight_state() {
        let mut b = boss(50);
        b.state.encounter.entered = true;
        for _ in 0..10 {
            b.step();
        }
        b.state.encounter.reward_placed = true;
        b.reset();
        assert_eq!(b.state.health, 50);
        assert_eq!(b.state.angle, 0.0);
        assert_eq!(b.state.phase, 0);
        assert_eq!(b.state.move_x, -2.0);
        assert!(!b.state.encounter.entered);
        assert!(b.state.encounter.reward_placed);
    }
}
