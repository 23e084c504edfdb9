// The per-tick update pipeline.

use super::Engine;
use crate::domain::boss::BossLink;
use crate::domain::collision::EntityHandle;
use crate::domain::dialog::DialogState;
use crate::domain::entities::{BossSlot, Positioned};
use crate::domain::geometry::{Point, Rectangle, Vector};
use crate::domain::input::{Input, Key};
use crate::domain::player::Animation;
use crate::domain::tuning::boss::REWARD_GAP;
use crate::domain::tuning::player::INTERACT_RANGE;

/// What a tick produced for the session layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// An item was picked up; the caller should persist a snapshot.
    pub checkpoint: bool,
    /// State of the open dialog after this tick.
    pub dialog: Option<DialogState>,
    pub win: bool,
    pub player_dead: bool,
    /// Pose the player is drawn with after this tick.
    pub animation: Animation,
}

impl Engine {
    /// Advances the simulation by exactly one tick.
    pub fn update(&mut self, input: &Input) -> TickReport {
        let mut checkpoint = false;
        self.run_pipeline(input, &mut checkpoint);
        TickReport {
            checkpoint,
            dialog: self.dialog_state().cloned(),
            win: self.win,
            player_dead: self.player_dead(),
            animation: self.world.player.animation(),
        }
    }

    fn run_pipeline(&mut self, input: &Input, checkpoint: &mut bool) {
        self.tick += 1;
        self.hand_out_rewards();

        if self.active_npc.is_some() {
            self.drive_dialog(input);
            return;
        }

        if input.just_pressed(Key::P) {
            self.paused = !self.paused;
        }
        if self.paused {
            return;
        }

        if input.just_pressed(Key::R) {
            self.restart();
            return;
        }

        if self.world.missing_important() == 0 {
            self.win = true;
            return;
        }

        if self.player_dead() {
            return;
        }

        self.move_player(input);
        self.use_portals();
        self.apply_spikes();
        self.advance_bullets();
        self.run_bosses();
        *checkpoint = self.collect_items();
        self.open_dialog(input);
        self.follow_player();
    }

    /// Moves rewards of NPCs that agreed to give them next to the NPC.
    fn hand_out_rewards(&mut self) {
        let w = &mut self.world;
        for npc in w.npcs.iter_mut() {
            if npc.reward_given || !npc.dialog.state().gave_item {
                continue;
            }
            let item = &mut w.items[npc.reward_item];
            let nb = npc.body;
            item.body.move_to(Point::new(
                nb.origin.x + nb.width + REWARD_GAP,
                nb.origin.y + nb.height - item.body.height,
            ));
            npc.reward_given = true;
        }
    }

    fn drive_dialog(&mut self, input: &Input) {
        let Some(i) = self.active_npc else {
            return;
        };

        if input.just_pressed(Key::Escape) {
            self.active_npc = None;
            self.dialog_input.clear();
            self.dialog_scroll = 0;
            return;
        }

        let dialog = &mut self.world.npcs[i].dialog;
        for &key in &input.new_pressed {
            let finished = dialog.state().finished;
            match key {
                Key::Up => self.dialog_scroll = self.dialog_scroll.saturating_sub(1),
                Key::Down => {
                    let lines = dialog.state().text.lines().count();
                    if self.dialog_scroll + 1 < lines {
                        self.dialog_scroll += 1;
                    }
                }
                Key::Enter => {
                    if !finished {
                        dialog.feed(&self.dialog_input);
                    }
                    self.dialog_input.clear();
                }
                Key::Backspace => {
                    self.dialog_input.pop();
                }
                other => {
                    if let Some(c) = other.rune().filter(|_| !finished) {
                        self.dialog_input.push(c);
                    }
                }
            }
        }
    }

    fn restart(&mut self) {
        self.world.player.respawn(self.spawn);
        self.world.bullets.clear();
        if let Some(b) = self.world.boss_v1.as_mut().filter(|b| !b.state.encounter.dead) {
            b.reset();
        }
        if let Some(b) = self.world.boss_v2.as_mut().filter(|b| !b.state.encounter.dead) {
            b.reset();
        }
        self.tick = 0;
        self.follow_player();
    }

    fn move_player(&mut self, input: &Input) {
        self.world.player.apply_input(input);

        self.world.player.step_x();
        let moving = self.world.player.rectangle();
        if let Some(solid) = self.world.first_solid(&moving) {
            let push = solid.push_vector_x(&moving);
            self.world.player.body.move_by(push);
        }

        self.world.player.step_y();
        let moving = self.world.player.rectangle();
        if let Some(solid) = self.world.first_solid(&moving) {
            let push = solid.push_vector_y(&moving);
            self.world.player.land_or_bump(push);
        }
    }

    fn player_hits(&self) -> Vec<EntityHandle> {
        self.world.collisions(&self.world.player.rectangle())
    }

    fn use_portals(&mut self) {
        let Some(p) = self.player_hits().into_iter().find_map(|h| match h {
            EntityHandle::Portal(i) => Some(i),
            _ => None,
        }) else {
            return;
        };

        let portal = &self.world.portals[p];
        let (target, boss) = (portal.teleport_to, portal.boss);
        self.world.player.body.move_to(target);
        tracing::debug!(portal = %portal.portal_to, "teleported");

        let encounter = match boss {
            Some(BossSlot::V1) => self.world.boss_v1.as_mut().map(|b| &mut b.state.encounter),
            Some(BossSlot::V2) => self.world.boss_v2.as_mut().map(|b| &mut b.state.encounter),
            None => None,
        };
        if let Some(e) = encounter.filter(|e| !e.dead) {
            e.entered = true;
        }
    }

    fn apply_spikes(&mut self) {
        let damage: i64 = self
            .player_hits()
            .into_iter()
            .filter_map(|h| match h {
                EntityHandle::Spike(i) => Some(self.world.spikes[i].damage),
                _ => None,
            })
            .sum();
        if damage > 0 {
            self.world.player.take_damage(damage);
        }
    }

    fn advance_bullets(&mut self) {
        let w = &mut self.world;
        let player = w.player.rectangle();
        let mut damage = 0;
        for b in w.bullets.iter_mut() {
            b.advance();
            if !b.triggered && b.rectangle().intersects(&player) {
                b.triggered = true;
                damage += b.damage;
            }
        }
        if damage > 0 {
            w.player.take_damage(damage);
        }

        let level = Rectangle::from_origin(Point::default(), w.width, w.height);
        let tiles = &w.tiles;
        w.bullets.retain(|b| {
            let r = b.rectangle();
            r.intersects(&level) && !tiles.iter().any(|t| t.rectangle().intersects(&r))
        });
    }

    fn run_bosses(&mut self) {
        let target = self.world.player.body.origin;

        if let Some(boss) = self.world.boss_v1.as_mut() {
            if boss.state.encounter.is_active() {
                let step = boss.step();
                self.world.bullets.extend(step.bullets);
                if step.died {
                    let link = boss.link;
                    let placed = std::mem::replace(&mut boss.state.encounter.reward_placed, true);
                    boss.state.encounter.entered = false;
                    if !placed {
                        self.place_boss_reward(link);
                    }
                }
            }
        }

        if let Some(boss) = self.world.boss_v2.as_mut() {
            if boss.state.encounter.is_active() {
                let step = boss.step(target);
                self.world.bullets.extend(step.bullets);
                if step.died {
                    let link = boss.link;
                    let placed = std::mem::replace(&mut boss.state.encounter.reward_placed, true);
                    boss.state.encounter.entered = false;
                    if !placed {
                        self.place_boss_reward(link);
                    }
                } else if boss.hazard_hits(&self.world.player.rectangle()) {
                    self.world.player.kill();
                }
            }
        }
    }

    fn place_boss_reward(&mut self, link: BossLink) {
        let portal = &mut self.world.portals[link.portal];
        portal.body.move_to(link.win_point);
        let offset = Vector::new(portal.body.width + REWARD_GAP, 0.0);
        self.world.items[link.item].body.move_to(link.win_point + offset);
        tracing::info!(tick = self.tick, "boss defeated");
    }

    fn collect_items(&mut self) -> bool {
        let mut picked = false;
        for h in self.player_hits() {
            let EntityHandle::Item(i) = h else {
                continue;
            };
            let item = &mut self.world.items[i];
            if item.collected {
                continue;
            }
            item.collected = true;
            self.world.player.inventory.push(i);
            picked = true;
        }
        picked
    }

    fn open_dialog(&mut self, input: &Input) {
        if !input.just_pressed(Key::E) {
            return;
        }
        let reach = self.world.player.rectangle().extended(INTERACT_RANGE);
        let Some(i) = self
            .world
            .npcs
            .iter()
            .position(|n| n.rectangle().intersects(&reach))
        else {
            return;
        };

        let dialog = &mut self.world.npcs[i].dialog;
        if !dialog.state().finished {
            dialog.greeting();
        }
        self.active_npc = Some(i);
        self.dialog_input.clear();
        self.dialog_scroll = 0;
    }
}
