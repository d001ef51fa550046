//! Villager chat encounters.
//!
//! Encounters are one-sided: the villager who rolls the chance stops to talk
//! and records a partner; the partner carries on with whatever it was doing.
//! Everything about the rule lives here so it can change in one place.

use pastorale_core::AgentId;
use rand::rngs::StdRng;

use super::Activity;
use crate::decision::{self, Span};

/// How long a chat lasts.
pub const CHAT_SPAN: Span = Span::new(5.0, 10.0);

/// A villager as seen by its peers at the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerView {
    /// Who.
    pub id: AgentId,
    /// Horizontal position.
    pub x: f32,
    /// What they were doing.
    pub activity: Activity,
}

/// A chat that has just started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encounter {
    /// The peer being talked to.
    pub partner: AgentId,
    /// Chat duration.
    pub duration: f32,
}

/// Look for someone to chat with. Peers are scanned in order; each one that
/// is not `me`, not working and closer than `radius` gets a `chance_pct`
/// roll, and the first success wins.
pub fn resolve_encounter(
    me: AgentId,
    x: f32,
    peers: &[PeerView],
    radius: f32,
    chance_pct: u32,
    rng: &mut StdRng,
) -> Option<Encounter> {
    peers
        .iter()
        .filter(|p| p.id != me && p.activity != Activity::Working)
        .filter(|p| (x - p.x).abs() < radius)
        .find(|_| decision::percent(rng, chance_pct))
        .map(|p| Encounter {
            partner: p.id,
            duration: CHAT_SPAN.sample(rng),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn peer(id: u32, x: f32, activity: Activity) -> PeerView {
        PeerView {
            id: AgentId(id),
            x,
            activity,
        }
    }

    #[test]
    fn certain_chance_picks_first_eligible() {
        let mut rng = StdRng::seed_from_u64(1);
        let peers = [
            peer(0, 10.0, Activity::Walking),
            peer(1, 11.0, Activity::Working),
            peer(2, 12.0, Activity::Idle),
            peer(3, 11.5, Activity::Walking),
        ];
        let hit = resolve_encounter(AgentId(0), 10.0, &peers, 3.0, 100, &mut rng).unwrap();
        assert_eq!(hit.partner, AgentId(2));
        assert!(CHAT_SPAN.contains(hit.duration));
    }

    #[test]
    fn nobody_close_enough() {
        let mut rng = StdRng::seed_from_u64(2);
        let peers = [peer(0, 0.0, Activity::Walking), peer(1, 3.0, Activity::Idle)];
        // Exactly at the radius does not count
        assert!(resolve_encounter(AgentId(0), 0.0, &peers, 3.0, 100, &mut rng).is_none());
    }

    #[test]
    fn working_peers_and_self_skipped() {
        let mut rng = StdRng::seed_from_u64(3);
        let peers = [peer(0, 0.0, Activity::Walking), peer(1, 0.5, Activity::Working)];
        assert!(resolve_encounter(AgentId(0), 0.0, &peers, 3.0, 100, &mut rng).is_none());
    }

    #[test]
    fn sleeping_and_chatting_peers_are_fair_game() {
        let mut rng = StdRng::seed_from_u64(4);
        let peers = [peer(1, 1.0, Activity::Socializing)];
        assert!(resolve_encounter(AgentId(0), 0.0, &peers, 3.0, 100, &mut rng).is_some());
        let peers = [peer(1, 1.0, Activity::Sleeping)];
        assert!(resolve_encounter(AgentId(0), 0.0, &peers, 3.0, 100, &mut rng).is_some());
    }

    #[test]
    fn zero_chance_never_chats() {
        let mut rng = StdRng::seed_from_u64(5);
        let peers = [peer(1, 1.0, Activity::Idle)];
        for _ in 0..500 {
            assert!(resolve_encounter(AgentId(0), 0.0, &peers, 3.0, 0, &mut rng).is_none());
        }
    }
}
