//! Movement planning and per-tile stepping.
//!
//! Movement is split in two so the runtime can animate: `plan_move` validates
//! a whole route (and, in combat, pays for it atomically), then the runtime
//! feeds the returned path back one tile at a time through `apply_step` on a
//! fixed timer.

use super::{EngineError, GameEngine};
use crate::events::{EventSink, GameEvent};
use crate::path::find_path;
use crate::state::{EntityId, Facing, Mode, Point, Turn};

/// A validated route plus the events produced while planning it.
///
/// An empty path is not an error: the destination was unreachable, the route
/// was unaffordable, or it simply was not this actor's turn.
#[derive(Clone, Debug, PartialEq)]
pub struct MovePlan {
    pub path: Vec<Point>,
    pub events: Vec<GameEvent>,
}

impl MovePlan {
    fn rejected(events: Vec<GameEvent>) -> Self {
        Self {
            path: Vec::new(),
            events,
        }
    }
}

impl GameEngine<'_> {
    /// Plans a player move to `dest` against the current obstacle set.
    ///
    /// In wander mode the path is free. In combat each step costs 1 AP and
    /// the whole path is rejected atomically when it exceeds the remaining
    /// budget; on success the AP is deducted up front and the walk animation
    /// merely replays the committed route.
    pub fn plan_move(&mut self, dest: Point) -> Result<MovePlan, EngineError> {
        let mut sink = EventSink::new();
        let start = self.state.player().pos;
        let path = find_path(start, dest, &self.state.obstacles(), self.config.grid_size);

        match self.state.mode {
            Mode::Wander => Ok(MovePlan {
                path,
                events: sink.into_events(),
            }),
            Mode::Combat => {
                if self.state.turn != Turn::Player {
                    return Ok(MovePlan::rejected(sink.into_events()));
                }
                let ap_cost = path.len() as u32;
                if ap_cost > self.state.player().ap {
                    self.log(&mut sink, "Not enough AP to move that far!");
                    return Ok(MovePlan::rejected(sink.into_events()));
                }
                self.state.player_mut().spend_ap(ap_cost);
                self.state.path_preview.clear();
                Ok(MovePlan {
                    path,
                    events: sink.into_events(),
                })
            }
        }
    }

    /// Commits one tile of a planned walk: position, facing, detection.
    ///
    /// Detection runs after every wander-mode step, so an enemy noticing the
    /// player interrupts the rest of the walk (the runtime drops the stale
    /// path when it sees `CombatStarted`).
    pub fn apply_step(
        &mut self,
        id: &EntityId,
        next: Point,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        {
            let entity = self
                .state
                .entity_mut(id)
                .ok_or_else(|| EngineError::UnknownEntity(id.clone()))?;
            let dx = next.x - entity.pos.x;
            let dy = next.y - entity.pos.y;
            if let Some(facing) = Facing::from_step(dx, dy) {
                entity.facing = Some(facing);
            }
            entity.pos = next;
            entity.is_moving = true;
        }
        sink.push(GameEvent::Moved {
            entity: id.clone(),
            to: next,
        });

        if self.state.mode == Mode::Wander {
            self.check_detection(&mut sink);
        }

        Ok(sink.into_events())
    }

    /// Clears the walk-animation flag once a path is exhausted or cancelled.
    pub fn finish_walk(&mut self, id: &EntityId) -> Result<(), EngineError> {
        let entity = self
            .state
            .entity_mut(id)
            .ok_or_else(|| EngineError::UnknownEntity(id.clone()))?;
        entity.is_moving = false;
        Ok(())
    }

    /// Updates the hover preview: selected tile plus the route to it.
    pub fn preview_path(&mut self, hover: Option<Point>) {
        match hover {
            Some(point) => {
                let start = self.state.player().pos;
                let path = find_path(start, point, &self.state.obstacles(), self.config.grid_size);
                self.state.selected_tile = Some(point);
                self.state.path_preview = path;
            }
            None => {
                self.state.selected_tile = None;
                self.state.path_preview.clear();
            }
        }
    }
}
