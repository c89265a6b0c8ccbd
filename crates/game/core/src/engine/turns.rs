//! Turn and mode transitions, plus the enemy-AI step.

use super::{EngineError, GameEngine};
use crate::combat::{damage_roll, hit_chance};
use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::rng::compute_seed;
use crate::state::{EffectKind, EntityId, EntityKind, Mode, Point, Turn};

const SALT_HIT: u32 = 0;
const SALT_DAMAGE: u32 = 1;

impl GameEngine<'_> {
    /// Switches to combat mode with the player acting first. Idempotent.
    ///
    /// The runtime must cancel any in-flight walk timers when it sees
    /// `CombatStarted`; a pending wander path must not keep ticking into a
    /// turn-based fight.
    pub fn start_combat(&mut self) -> Vec<GameEvent> {
        let mut sink = EventSink::new();
        if self.state.mode == Mode::Combat {
            return sink.into_events();
        }
        self.state.mode = Mode::Combat;
        self.state.turn = Turn::Player;
        self.log(&mut sink, "Combat initiated!");
        sink.push(GameEvent::CombatStarted);
        sink.into_events()
    }

    /// Passive detection: any living enemy within its Manhattan detection
    /// radius of the player forces the wander -> combat transition.
    ///
    /// Called after every wander-mode step.
    pub(super) fn check_detection(&mut self, sink: &mut EventSink) {
        if self.state.mode != Mode::Wander {
            return;
        }
        let player_pos = self.state.player().pos;
        let default_range = self.config.default_detection_range;
        let spotted = self.state.living_enemies().any(|enemy| {
            let range = enemy.detection_range.unwrap_or(default_range);
            enemy.pos.manhattan_distance(player_pos) <= range
        });
        if spotted {
            for event in self.start_combat() {
                sink.push(event);
            }
        }
    }

    /// Hands the turn to the enemies.
    ///
    /// Restores **every** entity's AP to max, not just the side whose turn
    /// begins. Combat balance depends on the uniform reset on each hand-off.
    pub fn end_player_turn(&mut self) -> Vec<GameEvent> {
        let mut sink = EventSink::new();
        if self.state.mode != Mode::Combat || self.state.turn != Turn::Player {
            return sink.into_events();
        }
        self.state.turn = Turn::Enemy;
        for entity in &mut self.state.entities {
            entity.restore_ap();
        }
        self.log(&mut sink, "Enemy turn begins...");
        sink.push(GameEvent::TurnChanged(Turn::Enemy));
        sink.into_events()
    }

    /// Executes the whole enemy turn, then hands control back to the player.
    ///
    /// Each living enemy acts exactly once: adjacent enemies swing at the
    /// player (base chance 50, their own AP in the attacker term, fixed 2-7
    /// damage); everyone else takes one orthogonal step toward the player,
    /// x-axis first. The think-delay before this runs belongs to the runtime.
    pub fn advance_enemy_turn(&mut self) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        if self.state.mode != Mode::Combat || self.state.turn != Turn::Enemy {
            return Ok(sink.into_events());
        }

        let enemy_ids: Vec<EntityId> = self
            .state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Enemy && e.is_alive())
            .map(|e| e.id.clone())
            .collect();

        for enemy_id in &enemy_ids {
            let player_pos = self.state.player().pos;
            let enemy = self
                .state
                .entity(enemy_id)
                .ok_or_else(|| EngineError::UnknownEntity(enemy_id.clone()))?;

            if enemy.pos.manhattan_distance(player_pos) <= 1 {
                self.enemy_attack(enemy_id, &mut sink);
            } else {
                self.enemy_step_toward_player(enemy_id, &mut sink)?;
            }
        }

        self.state.turn = Turn::Player;
        for entity in &mut self.state.entities {
            entity.restore_ap();
        }
        self.log(&mut sink, "Your turn begins. AP restored.");
        sink.push(GameEvent::TurnChanged(Turn::Player));
        Ok(sink.into_events())
    }

    /// One enemy swing at the player. Uses the AI baseline chance and a
    /// fixed damage range, independent of any weapon model.
    fn enemy_attack(&mut self, enemy_id: &EntityId, sink: &mut EventSink) {
        let (enemy_ap, enemy_name) = {
            let enemy = self.state.entity(enemy_id).expect("caller resolved id");
            (enemy.ap, enemy.name.clone())
        };
        let (player_ac, player_pos) = {
            let player = self.state.player();
            (player.ac, player.pos)
        };

        let chance = hit_chance(enemy_ap, player_ac, GameConfig::ENEMY_BASE_HIT_CHANCE);
        let nonce = self.state.next_nonce();
        let hit_seed = compute_seed(self.state.game_seed, nonce, SALT_HIT);
        let roll = self.rng.roll_percent(hit_seed);

        if roll <= chance {
            let damage_seed = compute_seed(self.state.game_seed, nonce, SALT_DAMAGE);
            let (min, max) = GameConfig::ENEMY_DAMAGE;
            let damage = damage_roll(self.rng, damage_seed, min, max);
            self.state.player_mut().take_damage(damage);
            self.log(sink, format!("{enemy_name} hits you for {damage} damage!"));
            self.effect(sink, EffectKind::Impact, player_pos);
            if !self.state.player().is_alive() {
                sink.push(GameEvent::PlayerDied);
            }
        } else {
            self.log(sink, format!("{enemy_name} misses you!"));
            self.effect(sink, EffectKind::Miss, player_pos);
        }
    }

    /// One orthogonal step toward the player, closing the x gap before the y
    /// gap (deterministic tie-break). Blocked or out-of-bounds cells fall
    /// back to the other axis; a fully boxed-in enemy stands still.
    fn enemy_step_toward_player(
        &mut self,
        enemy_id: &EntityId,
        sink: &mut EventSink,
    ) -> Result<(), EngineError> {
        let player_pos = self.state.player().pos;
        let enemy_pos = self
            .state
            .entity(enemy_id)
            .ok_or_else(|| EngineError::UnknownEntity(enemy_id.clone()))?
            .pos;

        let obstacles = self.state.obstacles();
        let grid = self.config.grid_size;
        let mut candidates: Vec<Point> = Vec::with_capacity(2);
        if enemy_pos.x != player_pos.x {
            let dx = (player_pos.x - enemy_pos.x).signum();
            candidates.push(Point::new(enemy_pos.x + dx, enemy_pos.y));
        }
        if enemy_pos.y != player_pos.y {
            let dy = (player_pos.y - enemy_pos.y).signum();
            candidates.push(Point::new(enemy_pos.x, enemy_pos.y + dy));
        }

        let step = candidates.into_iter().find(|cell| {
            cell.x >= 0
                && cell.x < grid
                && cell.y >= 0
                && cell.y < grid
                && !obstacles.contains(cell)
        });

        if let Some(next) = step {
            let enemy = self.state.entity_mut(enemy_id).expect("resolved above");
            let dx = next.x - enemy.pos.x;
            let dy = next.y - enemy.pos.y;
            if let Some(facing) = crate::state::Facing::from_step(dx, dy) {
                enemy.facing = Some(facing);
            }
            enemy.pos = next;
            sink.push(GameEvent::Moved {
                entity: enemy_id.clone(),
                to: next,
            });
        }
        Ok(())
    }
}
