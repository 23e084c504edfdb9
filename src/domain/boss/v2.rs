// Rectangle-patrolling boss with homing crosses, dropping barbells and aimed volleys.

use super::{BossLink, BossStep, Encounter};
use crate::domain::entities::{Body, Bullet, EntityKind, Positioned};
use crate::domain::geometry::{Point, Rectangle, Vector};
use crate::domain::tuning::boss::{
    BARBELL_DROP_DEPTH, BARBELL_FALL_TICKS, BARBELL_HOVER_HEIGHT, BARBELL_SIZE,
    BARBELL_START_DELAYS, BOSS_HEIGHT, BOSS_WIDTH, CROSS_BUDGETS, CROSS_SIZE,
    V2_BULLET_DIVISORS, V2_FIRE_PERIOD,
};
use crate::domain::tuning::hazards::BULLET_DAMAGE;
use crate::domain::tuning::player;
use serde::{Deserialize, Serialize};

/// Edge of the patrol rectangle the boss is walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Patrol {
    Left,
    Down,
    Right,
    Up,
}

/// Hazard that periodically aims at the player and drifts there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub body: Body,
    pub budget: u32,
    pub timer: u32,
    pub direction: Option<Vector>,
}

impl Cross {
    fn new(origin: Point, budget: u32) -> Self {
        Self {
            body: Body::new(origin, CROSS_SIZE, CROSS_SIZE),
            budget,
            timer: 0,
            direction: None,
        }
    }

    fn step(&mut self, target: Point) {
        if self.timer == 0 {
            self.timer = self.budget + self.budget / 10;
            let budget = f64::from(self.budget);
            let d = target - self.body.origin;
            self.direction = Some(Vector::new(d.x / budget, d.y / budget));
        } else {
            self.timer -= 1;
            if let Some(d) = self.direction {
                self.body.move_by(d);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarbellPhase {
    /// Hovering toward a point above the player.
    Armed,
    /// Lined up over the player; the drop is computed next tick.
    Triggered,
    /// Falling, then returning to Armed.
    Resetting,
}

/// Hazard that hunts above the player and drops onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barbell {
    pub body: Body,
    /// Ticks left before the barbell starts acting.
    pub delay: u32,
    /// Fraction of the remaining distance covered per tick is `1 / divisor`.
    pub divisor: u32,
    pub phase: BarbellPhase,
    pub fall_ticks: u32,
    pub fall_speed: f64,
}

impl Barbell {
    fn new(origin: Point, delay: u32) -> Self {
        Self {
            body: Body::new(origin, BARBELL_SIZE, BARBELL_SIZE),
            delay,
            divisor: delay,
            phase: BarbellPhase::Armed,
            fall_ticks: 0,
            fall_speed: 0.0,
        }
    }

    fn step(&mut self, target: Point) {
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }

        match self.phase {
            BarbellPhase::Armed => {
                let xc = self.body.origin.x + self.body.width / 2.0;
                let over_player = target.x <= xc && xc <= target.x + player::WIDTH;
                if over_player && self.body.origin.y < target.y {
                    self.phase = BarbellPhase::Triggered;
                } else {
                    let hover = Point::new(
                        target.x + player::WIDTH / 2.0 - self.body.width / 2.0,
                        target.y - BARBELL_HOVER_HEIGHT,
                    );
                    let divisor = f64::from(self.divisor);
                    let d = hover - self.body.origin;
                    self.body.move_by(Vector::new(d.x / divisor, d.y / divisor));
                }
            }
            BarbellPhase::Triggered => {
                let distance = (target.y + BARBELL_DROP_DEPTH - self.body.origin.y).max(0.0);
                self.fall_speed = distance / f64::from(BARBELL_FALL_TICKS);
                self.fall_ticks = BARBELL_FALL_TICKS;
                self.phase = BarbellPhase::Resetting;
            }
            BarbellPhase::Resetting => {
                self.fall_ticks = self.fall_ticks.saturating_sub(1);
                if self.fall_ticks == 0 {
                    self.phase = BarbellPhase::Armed;
                } else {
                    self.body.move_by(Vector::new(0.0, self.fall_speed));
                }
            }
        }
    }
}

/// Mutable part of the boss, persisted in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossV2State {
    pub body: Body,
    pub patrol: Patrol,
    pub ticks: u64,
    pub health: i64,
    pub crosses: Vec<Cross>,
    pub barbells: Vec<Barbell>,
    pub encounter: Encounter,
}

#[derive(Debug, Clone)]
pub struct BossV2 {
    pub name: String,
    pub start: Point,
    pub speed: f64,
    pub patrol_width: f64,
    pub patrol_height: f64,
    pub start_health: i64,
    pub link: BossLink,
    pub state: BossV2State,
}

impl BossV2 {
    pub fn new(
        name: impl Into<String>,
        start: Point,
        speed: f64,
        (patrol_width, patrol_height): (f64, f64),
        health: i64,
        link: BossLink,
    ) -> Self {
        let mut boss = Self {
            name: name.into(),
            start,
            speed,
            patrol_width,
            patrol_height,
            start_health: health,
            link,
            state: BossV2State {
                body: Body::new(start, BOSS_WIDTH, BOSS_HEIGHT),
                patrol: Patrol::Left,
                ticks: 0,
                health,
                crosses: Vec::new(),
                barbells: Vec::new(),
                encounter: Encounter::default(),
            },
        };
        boss.arm_hazards();
        boss
    }

    fn arm_hazards(&mut self) {
        let (s, w, h) = (self.start, self.patrol_width, self.patrol_height);
        let corners = [
            s,
            Point::new(s.x - w, s.y),
            Point::new(s.x, s.y + h),
            Point::new(s.x - w, s.y + h),
        ];
        self.state.crosses = corners
            .into_iter()
            .zip(CROSS_BUDGETS)
            .map(|(origin, budget)| Cross::new(origin, budget))
            .collect();
        self.state.barbells = corners[..2]
            .iter()
            .zip(BARBELL_START_DELAYS)
            .map(|(&origin, delay)| Barbell::new(origin, delay))
            .collect();
    }

    /// One tick of an active encounter, aimed at the player's origin.
    pub fn step(&mut self, target: Point) -> BossStep {
        let st = &mut self.state;
        st.ticks += 1;
        st.health -= 1;
        if st.health <= 0 {
            st.encounter.dead = true;
            return BossStep::death();
        }

        for cross in &mut st.crosses {
            cross.step(target);
        }
        for barbell in &mut st.barbells {
            barbell.step(target);
        }

        let next = self.next_position();
        self.state.body.move_to(next);

        BossStep {
            bullets: self.volley(target),
            died: false,
        }
    }

    /// Walks one patrol edge, or turns the corner without moving.
    fn next_position(&mut self) -> Point {
        let st = &mut self.state;
        let o = st.body.origin;
        let (s, w, h, v) = (self.start, self.patrol_width, self.patrol_height, self.speed);
        match st.patrol {
            Patrol::Left if o.x > s.x - w => Point::new(o.x - v, o.y),
            Patrol::Down if o.y < s.y + h => Point::new(o.x, o.y + v),
            Patrol::Right if o.x < s.x => Point::new(o.x + v, o.y),
            Patrol::Up if o.y > s.y => Point::new(o.x, o.y - v),
            current => {
                st.patrol = match current {
                    Patrol::Left => Patrol::Down,
                    Patrol::Down => Patrol::Right,
                    Patrol::Right => Patrol::Up,
                    Patrol::Up => Patrol::Left,
                };
                o
            }
        }
    }

    fn volley(&self, target: Point) -> Vec<Bullet> {
        if self.state.ticks % V2_FIRE_PERIOD != 0 {
            return Vec::new();
        }
        let origin = self.state.body.origin;
        let center = self.state.body.rectangle().center();
        let d = target - origin;
        V2_BULLET_DIVISORS
            .iter()
            .map(|&c| Bullet::new(center, BULLET_DAMAGE, Vector::new(d.x / c, d.y / c)))
            .collect()
    }

    /// Any cross or barbell overlapping the rectangle.
    pub fn hazard_hits(&self, r: &Rectangle) -> bool {
        self.state
            .crosses
            .iter()
            .map(|c| c.body.rectangle())
            .chain(self.state.barbells.iter().map(|b| b.body.rectangle()))
            .any(|h| h.intersects(r))
    }

    pub fn reset(&mut self) {
        self.state.ticks = 0;
        self.state.health = self.start_health;
        self.state.body.move_to(self.start);
        self.state.patrol = Patrol::Left;
        self.state.encounter.dead = false;
        self.state.encounter.entered = false;
        self.arm_hazards();
    }
}

impl Positioned for BossV2 {
    fn body(&self) -> &Body {
        &self.state.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::BossV2
    }
}
