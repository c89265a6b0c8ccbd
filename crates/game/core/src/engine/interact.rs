//! Door and map-object interaction.

use super::{EngineError, GameEngine};
use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::rng::compute_seed;
use crate::state::DoorAction;

/// Salt for the picklock roll.
const SALT_PICKLOCK: u32 = 2;

impl GameEngine<'_> {
    /// Applies a [`DoorAction`] to the named map object.
    ///
    /// A locked door refuses to open, an open door refuses to lock, and a
    /// failed picklock leaves the lock in place. Each outcome lands in the
    /// log; only an unknown id is an error.
    pub fn door_action(
        &mut self,
        object_id: &str,
        action: DoorAction,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        let object = self
            .state
            .objects
            .iter()
            .find(|o| o.id == object_id)
            .ok_or_else(|| EngineError::UnknownObject(object_id.to_owned()))?;
        let name = object.name.clone();
        let is_open = object.is_open;
        let is_locked = object.is_locked;

        match action {
            DoorAction::Toggle => {
                if is_locked && !is_open {
                    self.log(&mut sink, format!("{name} is locked."));
                    return Ok(sink.into_events());
                }
                let object = self
                    .state
                    .objects
                    .iter_mut()
                    .find(|o| o.id == object_id)
                    .expect("resolved above");
                object.is_open = !is_open;
                let verb = if object.is_open { "opened" } else { "closed" };
                self.log(&mut sink, format!("{name} {verb}."));
            }
            DoorAction::Lock => {
                if is_open {
                    self.log(&mut sink, format!("Cannot lock {name} while it's open."));
                    return Ok(sink.into_events());
                }
                let object = self
                    .state
                    .objects
                    .iter_mut()
                    .find(|o| o.id == object_id)
                    .expect("resolved above");
                object.is_locked = !is_locked;
                let verb = if object.is_locked { "locked" } else { "unlocked" };
                self.log(&mut sink, format!("{name} {verb}."));
            }
            DoorAction::Picklock => {
                if !is_locked {
                    self.log(&mut sink, format!("{name} is not locked."));
                    return Ok(sink.into_events());
                }
                let nonce = self.state.next_nonce();
                let seed = compute_seed(self.state.game_seed, nonce, SALT_PICKLOCK);
                let roll = self.rng.roll_percent(seed);
                if roll < GameConfig::PICKLOCK_CHANCE {
                    let object = self
                        .state
                        .objects
                        .iter_mut()
                        .find(|o| o.id == object_id)
                        .expect("resolved above");
                    object.is_locked = false;
                    self.log(&mut sink, format!("Picked the lock on {name}!"));
                } else {
                    self.log(&mut sink, format!("Failed to pick the lock on {name}."));
                }
            }
        }
        Ok(sink.into_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{player_at, state_with};
    use crate::rng::{PcgRng, RngOracle};
    use crate::state::{GameState, MapObject, Point};

    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn state_with_door(is_open: bool, is_locked: bool) -> GameState {
        let mut state = state_with(vec![player_at(Point::new(0, 0))]);
        state.objects.push(MapObject {
            id: "door-1".into(),
            pos: Point::new(10, 7),
            is_open,
            is_locked,
            name: "Vault Door".into(),
        });
        state
    }

    #[test]
    fn toggling_an_unlocked_door_opens_and_closes_it() {
        let mut state = state_with_door(false, false);
        let config = GameConfig::default();
        let rng = PcgRng;

        let mut engine = GameEngine::new(&mut state, &config, &rng);
        let events = engine.door_action("door-1", DoorAction::Toggle).unwrap();
        assert_eq!(events, vec![GameEvent::Log("Vault Door opened.".into())]);
        assert!(state.objects[0].is_open);

        let mut engine = GameEngine::new(&mut state, &config, &rng);
        engine.door_action("door-1", DoorAction::Toggle).unwrap();
        assert!(!state.objects[0].is_open);
    }

    #[test]
    fn a_locked_door_refuses_to_open() {
        let mut state = state_with_door(false, true);
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine.door_action("door-1", DoorAction::Toggle).unwrap();
        assert_eq!(events, vec![GameEvent::Log("Vault Door is locked.".into())]);
        assert!(!state.objects[0].is_open);
    }

    #[test]
    fn an_open_door_cannot_be_locked() {
        let mut state = state_with_door(true, false);
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine.door_action("door-1", DoorAction::Lock).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Log(
                "Cannot lock Vault Door while it's open.".into()
            )]
        );
        assert!(!state.objects[0].is_locked);
    }

    #[test]
    fn lock_toggles_on_a_closed_door() {
        let mut state = state_with_door(false, false);
        let config = GameConfig::default();
        let rng = PcgRng;

        let mut engine = GameEngine::new(&mut state, &config, &rng);
        engine.door_action("door-1", DoorAction::Lock).unwrap();
        assert!(state.objects[0].is_locked);

        let mut engine = GameEngine::new(&mut state, &config, &rng);
        let events = engine.door_action("door-1", DoorAction::Lock).unwrap();
        assert!(!state.objects[0].is_locked);
        assert_eq!(events, vec![GameEvent::Log("Vault Door unlocked.".into())]);
    }

    #[test]
    fn successful_picklock_clears_the_lock() {
        let mut state = state_with_door(false, true);
        let config = GameConfig::default();
        let rng = FixedRng(10); // below the 60% threshold
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine.door_action("door-1", DoorAction::Picklock).unwrap();
        assert!(!state.objects[0].is_locked);
        assert_eq!(
            events,
            vec![GameEvent::Log("Picked the lock on Vault Door!".into())]
        );
    }

    #[test]
    fn failed_picklock_leaves_the_lock_in_place() {
        let mut state = state_with_door(false, true);
        let config = GameConfig::default();
        let rng = FixedRng(90);
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let events = engine.door_action("door-1", DoorAction::Picklock).unwrap();
        assert!(state.objects[0].is_locked);
        assert_eq!(
            events,
            vec![GameEvent::Log("Failed to pick the lock on Vault Door.".into())]
        );
    }

    #[test]
    fn unknown_object_is_a_programmer_error() {
        let mut state = state_with_door(false, false);
        let config = GameConfig::default();
        let rng = PcgRng;
        let mut engine = GameEngine::new(&mut state, &config, &rng);

        let result = engine.door_action("door-404", DoorAction::Toggle);
        assert_eq!(
            result,
            Err(EngineError::UnknownObject("door-404".into()))
        );
    }
}
