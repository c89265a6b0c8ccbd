//! Experience accumulation and level-up allocation.

use crate::config::GameConfig;
use crate::state::{Entity, Progression};

/// Outcome of an experience award.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpAward {
    /// Levels gained by this award (multi-level jumps are possible).
    pub levels_gained: u32,
    pub new_level: u32,
    pub skill_points: u32,
}

/// Adds `amount` exp to the entity, resolving any level-ups.
///
/// The threshold loop supports crossing several levels from one large award:
/// each level gained raises `next_level_exp` to `level * (level + 1) * 500`
/// and grants three skill points.
///
/// Entities without progression (most enemies) absorb the award silently.
pub fn award_exp(entity: &mut Entity, amount: u64) -> ExpAward {
    let Some(progression) = entity.progression.as_mut() else {
        return ExpAward {
            levels_gained: 0,
            new_level: 0,
            skill_points: 0,
        };
    };

    progression.exp += amount;
    let mut levels_gained = 0;
    while progression.exp >= progression.next_level_exp {
        progression.level += 1;
        progression.skill_points += GameConfig::SKILL_POINTS_PER_LEVEL;
        progression.next_level_exp = Progression::threshold(progression.level);
        levels_gained += 1;
    }

    ExpAward {
        levels_gained,
        new_level: progression.level,
        skill_points: progression.skill_points,
    }
}

/// Discrete bonuses a skill point converts into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusKind {
    /// +10 max HP (and current HP).
    Hp,
    /// +1 max AP (and current AP).
    Ap,
    /// +2 armor class.
    Ac,
}

/// Provisional level-up allocation.
///
/// Points convert 1:1 into discrete bonuses but nothing touches the entity
/// until [`confirm`](Self::confirm); the allocation UI can reset or abandon
/// the buffer freely. Confirming with unspent points is allowed — the
/// remainder is written back to the entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpAllocation {
    remaining: u32,
    hp_bonus: u32,
    ap_bonus: u32,
    ac_bonus: i32,
}

impl LevelUpAllocation {
    /// Starts an allocation session from the entity's unspent points.
    pub fn begin(entity: &Entity) -> Self {
        let remaining = entity
            .progression
            .as_ref()
            .map(|p| p.skill_points)
            .unwrap_or(0);
        Self {
            remaining,
            hp_bonus: 0,
            ap_bonus: 0,
            ac_bonus: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Spends one point on `kind`. No-op when no points remain.
    pub fn allocate(&mut self, kind: BonusKind) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        match kind {
            BonusKind::Hp => self.hp_bonus += 10,
            BonusKind::Ap => self.ap_bonus += 1,
            BonusKind::Ac => self.ac_bonus += 2,
        }
    }

    /// Discards pending bonuses and restores the point budget.
    pub fn reset(&mut self, entity: &Entity) {
        *self = Self::begin(entity);
    }

    /// Applies all pending deltas atomically and writes back the unspent
    /// point count.
    pub fn confirm(self, entity: &mut Entity) {
        entity.max_hp += self.hp_bonus;
        entity.hp += self.hp_bonus;
        entity.max_ap += self.ap_bonus;
        entity.ap += self.ap_bonus;
        entity.ac += self.ac_bonus;
        if let Some(progression) = entity.progression.as_mut() {
            progression.skill_points = self.remaining;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, EntityKind, Equipment, Point};

    fn player() -> Entity {
        Entity {
            id: EntityId::player(),
            kind: EntityKind::Player,
            name: "Vault Dweller".into(),
            pos: Point::ORIGIN,
            facing: None,
            is_moving: false,
            hp: 100,
            max_hp: 100,
            ap: 10,
            max_ap: 10,
            ac: 5,
            progression: Some(Progression::new()),
            exp_value: None,
            detection_range: None,
            equipment: Equipment::default(),
            inventory: None,
        }
    }

    #[test]
    fn single_threshold_grants_one_level() {
        let mut entity = player();
        let award = award_exp(&mut entity, 1000);
        assert_eq!(award.levels_gained, 1);
        assert_eq!(award.new_level, 2);
        assert_eq!(award.skill_points, 3);
        let progression = entity.progression.unwrap();
        assert_eq!(progression.next_level_exp, 3000);
    }

    #[test]
    fn one_award_can_cross_two_thresholds() {
        let mut entity = player();
        // 3000 exp crosses both the 1000 and 3000 thresholds.
        let award = award_exp(&mut entity, 3000);
        assert_eq!(award.levels_gained, 2);
        assert_eq!(award.new_level, 3);
        assert_eq!(award.skill_points, 6);
        assert_eq!(entity.progression.unwrap().next_level_exp, 6000);
    }

    #[test]
    fn awards_accumulate_across_calls() {
        let mut entity = player();
        award_exp(&mut entity, 400);
        let award = award_exp(&mut entity, 600);
        assert_eq!(award.levels_gained, 1);
        assert_eq!(entity.progression.unwrap().exp, 1000);
    }

    #[test]
    fn entities_without_progression_ignore_awards() {
        let mut entity = player();
        entity.progression = None;
        let award = award_exp(&mut entity, 5000);
        assert_eq!(award.levels_gained, 0);
    }

    #[test]
    fn allocation_applies_atomically_on_confirm() {
        let mut entity = player();
        entity.progression.as_mut().unwrap().skill_points = 3;

        let mut alloc = LevelUpAllocation::begin(&entity);
        alloc.allocate(BonusKind::Hp);
        alloc.allocate(BonusKind::Ap);
        alloc.allocate(BonusKind::Ac);
        alloc.allocate(BonusKind::Hp); // out of points, no-op
        assert_eq!(alloc.remaining(), 0);

        // Nothing applied yet.
        assert_eq!(entity.max_hp, 100);

        alloc.confirm(&mut entity);
        assert_eq!(entity.max_hp, 110);
        assert_eq!(entity.hp, 110);
        assert_eq!(entity.max_ap, 11);
        assert_eq!(entity.ap, 11);
        assert_eq!(entity.ac, 7);
        assert_eq!(entity.progression.unwrap().skill_points, 0);
    }

    #[test]
    fn confirming_with_unspent_points_keeps_the_remainder() {
        let mut entity = player();
        entity.progression.as_mut().unwrap().skill_points = 3;

        let mut alloc = LevelUpAllocation::begin(&entity);
        alloc.allocate(BonusKind::Ac);
        alloc.confirm(&mut entity);

        assert_eq!(entity.ac, 7);
        assert_eq!(entity.progression.unwrap().skill_points, 2);
    }

    #[test]
    fn reset_restores_the_budget() {
        let mut entity = player();
        entity.progression.as_mut().unwrap().skill_points = 2;

        let mut alloc = LevelUpAllocation::begin(&entity);
        alloc.allocate(BonusKind::Hp);
        alloc.reset(&entity);
        assert_eq!(alloc.remaining(), 2);

        alloc.confirm(&mut entity);
        assert_eq!(entity.max_hp, 100);
    }
}
