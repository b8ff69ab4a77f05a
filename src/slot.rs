use crate::host::{ArenaWorld, AvatarHandle};
use crate::types::{PlayerColor, PlayerData, SlotSnapshot};

/// One participant's persistent state for the lifetime of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub player_number: u8,
    pub color: PlayerColor,
    pub is_computer: bool,
    pub control_index: u8,
    /// `None` before spawning, after a failed spawn, and after release.
    pub avatar: Option<AvatarHandle>,
    wins: u32,
}

impl PlayerSlot {
    pub fn new(player_number: u8, data: &PlayerData) -> Self {
        Self {
            player_number,
            color: data.color,
            is_computer: data.is_computer,
            control_index: data.control_index,
            avatar: None,
            wins: 0,
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Win counts only ever go up within a game.
    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    /// Rich-text label used in every status message.
    pub fn colored_label(&self) -> String {
        format!(
            "<color=#{}>PLAYER {}</color>",
            self.color.to_html_rgb(),
            self.player_number
        )
    }

    pub fn to_snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            player_number: self.player_number,
            color: format!("#{}", self.color.to_html_rgb()),
            is_computer: self.is_computer,
            spawned: self.avatar.is_some(),
            wins: self.wins,
        }
    }
}

/// Has an avatar and that avatar is still in play.
pub fn is_eligible(slot: &PlayerSlot, world: &dyn ArenaWorld) -> bool {
    slot.avatar.is_some_and(|avatar| world.is_active(avatar))
}

pub fn count_active(slots: &[PlayerSlot], world: &dyn ArenaWorld) -> usize {
    slots
        .iter()
        .filter(|slot| is_eligible(slot, world))
        .count()
}

/// Roster index of the first slot still in play.
pub fn first_active(slots: &[PlayerSlot], world: &dyn ArenaWorld) -> Option<usize> {
    slots.iter().position(|slot| is_eligible(slot, world))
}

/// Roster index of the first slot whose wins equal `threshold`.
pub fn first_at_threshold(slots: &[PlayerSlot], threshold: u32) -> Option<usize> {
    slots.iter().position(|slot| slot.wins == threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWorld;

    fn slots(count: u8) -> Vec<PlayerSlot> {
        (1..=count)
            .map(|n| {
                let data = PlayerData {
                    is_computer: false,
                    color: PlayerColor::new(n * 40, 0, 0),
                    template: "tank".to_string(),
                    control_index: n,
                };
                let mut slot = PlayerSlot::new(n, &data);
                slot.avatar = Some(AvatarHandle(n as u32 * 10));
                slot
            })
            .collect()
    }

    #[test]
    fn label_uses_color_hex_and_player_number() {
        let slots = slots(2);

        assert_eq!(slots[1].colored_label(), "<color=#500000>PLAYER 2</color>");
    }

    #[test]
    fn missing_avatar_is_never_eligible() {
        let world = FakeWorld::new();
        let mut slots = slots(3);
        for slot in &slots {
            world.add_avatar(slot.avatar.unwrap(), true);
        }
        slots[0].avatar = None;

        assert!(!is_eligible(&slots[0], &world));
        assert_eq!(count_active(&slots, &world), 2);
        assert_eq!(first_active(&slots, &world), Some(1));
    }

    #[test]
    fn first_active_follows_roster_order() {
        let world = FakeWorld::new();
        let slots = slots(4);
        world.add_avatar(AvatarHandle(10), false);
        world.add_avatar(AvatarHandle(20), false);
        world.add_avatar(AvatarHandle(30), true);
        world.add_avatar(AvatarHandle(40), true);

        assert_eq!(count_active(&slots, &world), 2);
        assert_eq!(first_active(&slots, &world), Some(2));
    }

    #[test]
    fn nobody_active_yields_none() {
        let world = FakeWorld::new();
        let slots = slots(2);
        world.add_avatar(AvatarHandle(10), false);
        world.add_avatar(AvatarHandle(20), false);

        assert_eq!(count_active(&slots, &world), 0);
        assert_eq!(first_active(&slots, &world), None);
    }

    #[test]
    fn threshold_tie_breaks_to_lowest_index() {
        let mut slots = slots(3);
        for _ in 0..3 {
            slots[1].record_win();
            slots[2].record_win();
        }
        slots[0].record_win();

        assert_eq!(first_at_threshold(&slots, 3), Some(1));
        assert_eq!(first_at_threshold(&slots, 4), None);
    }
}
