//! Quest progress evaluation and claiming.
//!
//! Progress for collect, realm and sect quests is re-derived from the live
//! character and ledger on every sync. Kill quests are the only accumulated
//! kind, since kills leave no other trace.

use super::types::{Quest, QuestKind, QuestStatus};
use crate::character::types::{Character, Realm};
use crate::core::error::GameError;
use crate::economy::resources::{ResourceKind, Resources};
use crate::economy::rewards::RewardBundle;

/// Count `kills` of `monster_name` toward matching kill quests.
/// Returns the ids of quests this call completed.
pub fn record_kill(quests: &mut [Quest], monster_name: &str, kills: u64) -> Vec<u32> {
    let mut completed = Vec::new();
    for quest in quests
        .iter_mut()
        .filter(|q| q.is_in_progress() && q.kind == QuestKind::Kill && q.target == monster_name)
    {
        if quest.set_progress(quest.progress.saturating_add(kills)) {
            completed.push(quest.id);
        }
    }
    completed
}

/// Re-derive progress of every in-progress collect, realm and sect quest.
/// Returns the ids of quests this call completed.
///
/// Collect quests mirror the current balance: spending lowers displayed
/// progress until completion, after which the quest stays completed.
pub fn sync(quests: &mut [Quest], character: &Character, resources: &Resources) -> Vec<u32> {
    let mut completed = Vec::new();
    for quest in quests.iter_mut().filter(|q| q.is_in_progress()) {
        let progress = match quest.kind {
            QuestKind::Kill => continue,
            QuestKind::Collect => match ResourceKind::from_key(&quest.target) {
                Some(kind) => resources.get(kind),
                None => {
                    tracing::debug!(quest = quest.id, target = %quest.target, "unknown collect target");
                    continue;
                }
            },
            QuestKind::ReachRealm => match Realm::from_name(&quest.target) {
                Some(target) if character.realm >= target => quest.goal,
                Some(_) => 0,
                None => {
                    tracing::debug!(quest = quest.id, target = %quest.target, "unknown realm target");
                    continue;
                }
            },
            QuestKind::JoinSect => {
                if character.has_sect() {
                    quest.goal
                } else {
                    0
                }
            }
        };
        if quest.set_progress(progress) {
            completed.push(quest.id);
        }
    }
    completed
}

/// `completed → claimed`, handing back the rewards to apply. Any other
/// status is rejected so a quest pays out at most once.
pub fn claim(quests: &mut [Quest], id: u32) -> Result<RewardBundle, GameError> {
    let quest = quests
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or(GameError::QuestNotFound(id))?;
    if quest.status != QuestStatus::Completed {
        return Err(GameError::QuestNotClaimable(id));
    }
    quest.status = QuestStatus::Claimed;
    Ok(quest.rewards.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::{Profession, Talent};
    use crate::content::quests::initial_quests;

    fn hero() -> Character {
        Character::new("萧炎", Profession::Fire, Talent::Normal).unwrap()
    }

    #[test]
    fn test_kill_quest_counts_only_its_target() {
        let mut quests = initial_quests();
        assert!(record_kill(&mut quests, "野狼", 1).is_empty());
        assert_eq!(quests[0].progress, 0);

        record_kill(&mut quests, "山妖", 1);
        record_kill(&mut quests, "山妖", 1);
        assert_eq!(quests[0].progress, 2);
        assert_eq!(record_kill(&mut quests, "山妖", 1), vec![1]);
        assert_eq!(quests[0].status, QuestStatus::Completed);

        // further kills change nothing
        assert!(record_kill(&mut quests, "山妖", 5).is_empty());
        assert_eq!(quests[0].progress, 3);
    }

    #[test]
    fn test_collect_quest_mirrors_balance() {
        let mut quests = initial_quests();
        let c = hero();
        let mut r = Resources::empty();
        r.currency = 60;
        sync(&mut quests, &c, &r);
        assert_eq!(quests[1].progress, 60);

        // spending lowers in-progress collect quests
        r.currency = 20;
        sync(&mut quests, &c, &r);
        assert_eq!(quests[1].progress, 20);

        r.currency = 150;
        assert_eq!(sync(&mut quests, &c, &r), vec![2]);
        assert_eq!(quests[1].progress, 100);

        // completed stays completed
        r.currency = 0;
        sync(&mut quests, &c, &r);
        assert_eq!(quests[1].status, QuestStatus::Completed);
        assert_eq!(quests[1].progress, 100);
    }

    #[test]
    fn test_starting_balance_completes_collect_quest() {
        let mut quests = initial_quests();
        let completed = sync(&mut quests, &hero(), &Resources::starting());
        assert_eq!(completed, vec![2]);
    }

    #[test]
    fn test_realm_quest_completes_at_or_above_target() {
        let mut quests = initial_quests();
        let mut c = hero();
        let r = Resources::empty();
        c.realm = Realm::QiRefining;
        sync(&mut quests, &c, &r);
        assert!(quests[2].is_in_progress());

        c.realm = Realm::FoundationBuilding;
        assert_eq!(sync(&mut quests, &c, &r), vec![3]);
        assert_eq!(quests[2].progress, 1);
    }

    #[test]
    fn test_sect_quest() {
        let mut quests = initial_quests();
        let mut c = hero();
        let r = Resources::empty();
        sync(&mut quests, &c, &r);
        assert!(quests[3].is_in_progress());
        c.sect = Some("青云门".to_string());
        assert_eq!(sync(&mut quests, &c, &r), vec![4]);
    }

    #[test]
    fn test_claim_only_once() {
        let mut quests = initial_quests();
        assert!(matches!(
            claim(&mut quests, 1),
            Err(GameError::QuestNotClaimable(1))
        ));
        record_kill(&mut quests, "山妖", 3);

        let rewards = claim(&mut quests, 1).unwrap();
        assert_eq!(rewards.experience, 50);
        assert_eq!(rewards.currency, 100);
        assert_eq!(quests[0].status, QuestStatus::Claimed);

        assert!(matches!(
            claim(&mut quests, 1),
            Err(GameError::QuestNotClaimable(1))
        ));
        assert!(matches!(
            claim(&mut quests, 42),
            Err(GameError::QuestNotFound(42))
        ));
    }
}
