//! Attack resolution.

use super::{EngineError, GameEngine};
use crate::combat::{damage_roll, hit_chance};
use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::progression::award_exp;
use crate::rng::compute_seed;
use crate::state::{EffectKind, EntityId, Mode};

/// Salt values for the independent rolls within one attack.
const SALT_HIT: u32 = 0;
const SALT_DAMAGE: u32 = 1;

impl GameEngine<'_> {
    /// Resolves a melee attack from `attacker_id` against `target_id`.
    ///
    /// Range and AP rejections leave the state untouched apart from the log
    /// line. A miss still costs the full AP price of the swing. Kills remove
    /// the victim from the roster (the player is never removed — death is a
    /// terminal flag), award XP to a player attacker, and re-evaluate the
    /// combat-continuation condition.
    pub fn resolve_attack(
        &mut self,
        attacker_id: &EntityId,
        target_id: &EntityId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        self.require_entity(attacker_id)?;
        self.require_entity(target_id)?;

        let attacker = self.state.entity(attacker_id).expect("checked above");
        let target = self.state.entity(target_id).expect("checked above");
        let attacker_is_player = attacker.is_player();
        let attacker_name = attacker.name.clone();
        let target_name = target.name.clone();
        let target_pos = target.pos;

        if attacker.pos.manhattan_distance(target.pos) > 1 {
            self.log(&mut sink, "Too far to attack!");
            return Ok(sink.into_events());
        }

        let (ap_cost, dmg_min, dmg_max) = attacker.attack_profile();
        if attacker.ap < ap_cost {
            self.log(&mut sink, "Not enough AP to attack!");
            return Ok(sink.into_events());
        }

        // Hit chance uses the attacker's AP before the swing is paid for.
        let chance = hit_chance(attacker.ap, target.ac, GameConfig::BASE_HIT_CHANCE);
        let nonce = self.state.next_nonce();
        let hit_seed = compute_seed(self.state.game_seed, nonce, SALT_HIT);
        let roll = self.rng.roll_percent(hit_seed);

        self.state
            .entity_mut(attacker_id)
            .expect("checked above")
            .spend_ap(ap_cost);

        if roll <= chance {
            let damage_seed = compute_seed(self.state.game_seed, nonce, SALT_DAMAGE);
            let damage = damage_roll(self.rng, damage_seed, dmg_min, dmg_max);
            self.state
                .entity_mut(target_id)
                .expect("checked above")
                .take_damage(damage);

            let message = if attacker_is_player {
                format!("You hit {target_name} for {damage} damage!")
            } else {
                format!("{attacker_name} hits {target_name} for {damage} damage!")
            };
            self.log(&mut sink, message);
            self.effect(&mut sink, EffectKind::Impact, target_pos);

            self.handle_defeat(attacker_id, target_id, &mut sink);
        } else {
            let message = if attacker_is_player {
                format!("You missed {target_name}!")
            } else {
                format!("{attacker_name} missed!")
            };
            self.log(&mut sink, message);
            self.effect(&mut sink, EffectKind::Miss, target_pos);
        }

        Ok(sink.into_events())
    }

    /// Handles a defender reaching zero HP: roster removal, XP award, and
    /// the combat-continuation check. No-op while the defender still stands.
    fn handle_defeat(
        &mut self,
        attacker_id: &EntityId,
        target_id: &EntityId,
        sink: &mut EventSink,
    ) {
        let Some(target) = self.state.entity(target_id) else {
            return;
        };
        if target.is_alive() {
            return;
        }

        if target.is_player() {
            // Terminal state, not removal: the player stays in the roster.
            sink.push(GameEvent::PlayerDied);
            return;
        }

        let exp_value = target.exp_value;
        self.state.entities.retain(|e| &e.id != target_id);
        sink.push(GameEvent::EntityDied(target_id.clone()));

        if let Some(amount) = exp_value {
            let attacker_is_player = self
                .state
                .entity(attacker_id)
                .map(|e| e.is_player())
                .unwrap_or(false);
            if attacker_is_player {
                let award = {
                    let attacker = self.state.entity_mut(attacker_id).expect("attacker alive");
                    award_exp(attacker, amount)
                };
                if award.levels_gained > 0 {
                    self.log(
                        sink,
                        format!("You reached level {}!", award.new_level),
                    );
                    sink.push(GameEvent::LevelUp {
                        level: award.new_level,
                        skill_points: award.skill_points,
                    });
                }
            }
        }

        // Combat ends within the same resolution step once the roster holds
        // no more living enemies.
        if self.state.mode == Mode::Combat && !self.state.has_living_enemies() {
            self.state.mode = Mode::Wander;
            self.log(sink, "All hostiles eliminated. Wander mode active.");
            sink.push(GameEvent::CombatEnded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{enemy_at, player_at, state_with};
    use crate::rng::{PcgRng, RngOracle};
    use crate::state::{Point, Turn};

    /// Forces every roll to a fixed value so outcomes are scriptable.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn combat_state() -> crate::state::GameState {
        let mut state = state_with(vec![
            player_at(Point::new(0, 0)),
            enemy_at("enemy-1", Point::new(1, 0)),
        ]);
        state.mode = Mode::Combat;
        state.turn = Turn::Player;
        state
    }

    #[test]
    fn out_of_range_attack_changes_nothing() {
        let mut state = state_with(vec![
            player_at(Point::new(0, 0)),
            enemy_at("enemy-1", Point::new(4, 0)),
        ]);
        state.mode = Mode::Combat;
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert_eq!(events, vec![GameEvent::Log("Too far to attack!".into())]);
        assert_eq!(state.player().ap, 10);
        assert_eq!(state.entity(&"enemy-1".into()).unwrap().hp, 40);
    }

    #[test]
    fn insufficient_ap_is_rejected_without_state_change() {
        let mut state = combat_state();
        state.player_mut().ap = 3; // unarmed costs 4
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Log("Not enough AP to attack!".into())]
        );
        assert_eq!(state.entity(&"enemy-1".into()).unwrap().hp, 40);
    }

    #[test]
    fn unarmed_hit_spends_four_ap_and_deals_one_to_three_damage() {
        let mut state = combat_state();
        let config = GameConfig::default();
        // hit_chance(10, 2) = 76; a roll of 50 hits.
        let rng = FixedRng(50);
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert_eq!(state.player().ap, 6);
        let enemy_hp = state.entity(&"enemy-1".into()).unwrap().hp;
        let dealt = 40 - enemy_hp;
        assert!((1..=3).contains(&dealt));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EffectTriggered {
                kind: EffectKind::Impact,
                ..
            }
        )));
        assert_eq!(state.shake_intensity, 10);
    }

    #[test]
    fn a_miss_still_costs_ap() {
        let mut state = combat_state();
        let config = GameConfig::default();
        // Roll 99 > any clamped chance: guaranteed miss.
        let rng = FixedRng(99);
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert_eq!(state.player().ap, 6);
        assert_eq!(state.entity(&"enemy-1".into()).unwrap().hp, 40);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EffectTriggered {
                kind: EffectKind::Miss,
                ..
            }
        )));
    }

    #[test]
    fn killing_the_last_enemy_ends_combat_in_the_same_step() {
        let mut state = combat_state();
        state.entity_mut(&"enemy-1".into()).unwrap().hp = 1;
        let config = GameConfig::default();
        let rng = FixedRng(0); // guaranteed hit
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert!(state.entity(&"enemy-1".into()).is_none());
        assert_eq!(state.mode, Mode::Wander);
        assert!(events.contains(&GameEvent::EntityDied("enemy-1".into())));
        assert!(events.contains(&GameEvent::CombatEnded));
    }

    #[test]
    fn player_kill_awards_exp_to_the_killer() {
        let mut state = combat_state();
        state.entity_mut(&"enemy-1".into()).unwrap().hp = 1;
        let config = GameConfig::default();
        let rng = FixedRng(0);
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        let progression = state.player().progression.unwrap();
        assert_eq!(progression.exp, 120);
    }

    #[test]
    fn big_exp_value_levels_up_within_the_resolution() {
        let mut state = combat_state();
        {
            let enemy = state.entity_mut(&"enemy-1".into()).unwrap();
            enemy.hp = 1;
            enemy.exp_value = Some(1200);
        }
        let config = GameConfig::default();
        let rng = FixedRng(0);
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine
            .resolve_attack(&EntityId::player(), &"enemy-1".into())
            .unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::LevelUp {
                level: 2,
                skill_points: 3
            }
        )));
    }

    #[test]
    fn unknown_target_is_a_programmer_error() {
        let mut state = combat_state();
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let result = engine.resolve_attack(&EntityId::player(), &"enemy-404".into());
        assert_eq!(
            result,
            Err(EngineError::UnknownEntity("enemy-404".into()))
        );
    }
}
