//! Tierlist module - one categorization of members into tiers

use crate::member::{Member, MemberId};
use crate::tier::{IntoTier, Tier};

/// A categorization of members into the fixed tiers
///
/// Invariant: a member id appears in at most one tier. Within a tier,
/// members keep their insertion order, which is also their grid order when
/// rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tierlist {
    // Indexed by `Tier::rank`.
    tiers: [Vec<(MemberId, Member)>; Tier::COUNT],
}

impl Tierlist {
    /// Create an empty tierlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a member in a tier, moving them out of any tier they were in
    ///
    /// Returns `false` and leaves the list untouched if `target_tier` does
    /// not name one of the fixed tiers. Re-adding a member to the tier they
    /// are already in moves them to the end of that tier.
    pub fn add_member(&mut self, id: MemberId, data: Member, target_tier: impl IntoTier) -> bool {
        let Some(tier) = target_tier.into_tier() else {
            return false;
        };

        self.take(id);
        self.tiers[tier.rank()].push((id, data));
        true
    }

    /// Remove a member from whichever tier holds them
    ///
    /// Returns `false` if the member is not in the list.
    pub fn remove_member(&mut self, id: MemberId) -> bool {
        self.take(id).is_some()
    }

    /// Members of one tier in insertion order
    pub fn members(&self, tier: Tier) -> &[(MemberId, Member)] {
        &self.tiers[tier.rank()]
    }

    /// Tier currently holding `id`
    pub fn tier_of(&self, id: MemberId) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| self.tiers[tier.rank()].iter().any(|(m, _)| *m == id))
    }

    /// Look up a member's snapshot
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.tiers
            .iter()
            .flatten()
            .find(|(m, _)| *m == id)
            .map(|(_, member)| member)
    }

    /// Total number of members across all tiers
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    /// True when no tier has members
    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }

    /// Every tier with its members, in [`Tier::ALL`] order (empty tiers included)
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[(MemberId, Member)])> {
        Tier::ALL
            .into_iter()
            .map(move |tier| (tier, self.tiers[tier.rank()].as_slice()))
    }

    /// Freeze the current state for rendering
    pub fn snapshot(&self, name: impl Into<String>) -> RenderSnapshot {
        RenderSnapshot {
            name: name.into(),
            tierlist: self.clone(),
        }
    }

    fn take(&mut self, id: MemberId) -> Option<(MemberId, Member)> {
        // At most one tier can match, so stop at the first hit.
        for members in self.tiers.iter_mut() {
            if let Some(pos) = members.iter().position(|(m, _)| *m == id) {
                return Some(members.remove(pos));
            }
        }
        None
    }
}

/// Read-only copy of a tierlist taken at render time
///
/// Later mutations of the source list do not affect a snapshot, so it can
/// be sent to another task while commands keep arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    name: String,
    tierlist: Tierlist,
}

impl RenderSnapshot {
    /// Name of the list the snapshot was taken from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The frozen tierlist
    pub fn tierlist(&self) -> &Tierlist {
        &self.tierlist
    }

    /// Members of one tier in grid order
    pub fn members(&self, tier: Tier) -> &[(MemberId, Member)] {
        self.tierlist.members(tier)
    }

    /// Every tier with its members, best first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[(MemberId, Member)])> {
        self.tierlist.iter()
    }

    /// (id, avatar URI) pairs for every member, in render order
    pub fn avatar_requests(&self) -> Vec<(MemberId, String)> {
        self.iter()
            .flat_map(|(_, members)| members.iter())
            .map(|(id, member)| (*id, member.avatar_url.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> Member {
        Member::new(name, format!("https://cdn.example/{}.png", name))
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = Tierlist::new();
        assert!(list.is_empty());

        assert!(list.add_member(MemberId(1), member("alice"), Tier::S));
        assert!(list.add_member(MemberId(2), member("bob"), Tier::F));
        assert_eq!(list.len(), 2);
        assert_eq!(list.tier_of(MemberId(1)), Some(Tier::S));
        assert_eq!(list.get(MemberId(2)).unwrap().name, "bob");

        assert!(list.remove_member(MemberId(1)));
        assert!(!list.remove_member(MemberId(1)));
        assert_eq!(list.tier_of(MemberId(1)), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_move_between_tiers() {
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), member("alice"), Tier::S);
        list.add_member(MemberId(1), member("alice"), Tier::C);

        assert!(list.members(Tier::S).is_empty());
        assert_eq!(list.members(Tier::C).len(), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_readd_same_tier_moves_to_end() {
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), member("alice"), Tier::A);
        list.add_member(MemberId(2), member("bob"), Tier::A);
        list.add_member(MemberId(1), member("alice2"), Tier::A);

        let ids: Vec<_> = list.members(Tier::A).iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![MemberId(2), MemberId(1)]);
        assert_eq!(list.get(MemberId(1)).unwrap().name, "alice2");
    }

    #[test]
    fn test_invalid_tier_does_not_mutate() {
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), member("alice"), Tier::B);
        let before = list.clone();

        assert!(!list.add_member(MemberId(1), member("alice"), "Q"));
        assert!(!list.add_member(MemberId(2), member("bob"), 9u8));
        assert_eq!(list, before);
    }

    #[test]
    fn test_iter_follows_tier_order() {
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), member("alice"), Tier::F);
        list.add_member(MemberId(2), member("bob"), Tier::S);

        let order: Vec<_> = list.iter().map(|(tier, _)| tier).collect();
        assert_eq!(order, Tier::ALL.to_vec());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), member("alice"), Tier::S);
        let snapshot = list.snapshot("test");

        list.remove_member(MemberId(1));
        assert_eq!(snapshot.name(), "test");
        assert_eq!(snapshot.members(Tier::S).len(), 1);
        assert_eq!(
            snapshot.avatar_requests(),
            vec![(MemberId(1), "https://cdn.example/alice.png".to_string())]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn tier_strategy() -> impl Strategy<Value = Tier> {
        (0usize..Tier::COUNT).prop_map(|rank| Tier::ALL[rank])
    }

    proptest! {
        /// Property: after moving a member, only the last tier holds them
        #[test]
        fn test_member_in_exactly_one_tier(id: u64, first in tier_strategy(), second in tier_strategy()) {
            let mut list = Tierlist::new();
            let id = MemberId(id);
            list.add_member(id, Member::new("m", "uri"), first);
            list.add_member(id, Member::new("m", "uri"), second);

            for (tier, members) in list.iter() {
                let count = members.iter().filter(|(m, _)| *m == id).count();
                prop_assert_eq!(count, usize::from(tier == second));
            }
        }

        /// Property: arbitrary add sequences never duplicate a member
        #[test]
        fn test_uniqueness_under_random_adds(ops in proptest::collection::vec((0u64..8, tier_strategy()), 0..64)) {
            let mut list = Tierlist::new();
            let mut distinct = std::collections::HashSet::new();
            for (id, tier) in ops {
                list.add_member(MemberId(id), Member::new("m", "uri"), tier);
                distinct.insert(id);
            }

            prop_assert_eq!(list.len(), distinct.len());
        }
    }
}
