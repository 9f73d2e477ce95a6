//! Sect cultivation: cooldown-gated practice paid in rare currency.

use crate::character::types::Character;
use crate::content::sects::{get_technique, Technique};
use crate::core::error::GameError;
use crate::economy::resources::{ResourceKind, Resources};
use crate::economy::rewards::RewardEffects;
use std::collections::HashMap;

/// Per-technique time at which practice is allowed again, in session ms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cooldowns {
    ready_at: HashMap<String, u64>,
}

impl Cooldowns {
    pub fn remaining(&self, technique_id: &str, now: u64) -> u64 {
        self.ready_at
            .get(technique_id)
            .map_or(0, |ready| ready.saturating_sub(now))
    }

    pub fn start(&mut self, technique_id: &str, now: u64, duration_ms: u64) {
        self.ready_at
            .insert(technique_id.to_string(), now.saturating_add(duration_ms));
    }

    pub fn clear(&mut self) {
        self.ready_at.clear();
    }
}

/// Practice `technique_id`. Checks run in order: technique known, sect
/// membership, cooldown, cost. Nothing changes unless all pass.
pub fn practice(
    technique_id: &str,
    character: &mut Character,
    resources: &mut Resources,
    cooldowns: &mut Cooldowns,
    now: u64,
) -> Result<(&'static Technique, RewardEffects), GameError> {
    let technique =
        get_technique(technique_id).ok_or_else(|| GameError::UnknownTechnique(technique_id.to_string()))?;

    if character.sect.as_deref() != Some(technique.sect) {
        return Err(GameError::NotInSect);
    }

    let remaining = cooldowns.remaining(technique.id, now);
    if remaining > 0 {
        return Err(GameError::CooldownActive {
            technique: technique.name.to_string(),
            remaining_ms: remaining,
        });
    }

    resources.spend(ResourceKind::RareCurrency, technique.rare_currency_cost)?;
    cooldowns.start(technique.id, now, technique.cooldown_ms);
    let effects = technique.rewards.apply(character, resources);
    Ok((technique, effects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::{Profession, Talent};

    fn disciple() -> Character {
        let mut c = Character::new("陆雪琪", Profession::Ice, Talent::Normal).unwrap();
        c.sect = Some("青云门".to_string());
        c
    }

    #[test]
    fn test_practice_spends_and_rewards() {
        let mut c = disciple();
        let mut r = Resources::starting();
        let mut cd = Cooldowns::default();
        let (technique, _) = practice("qingyun_breathing", &mut c, &mut r, &mut cd, 0).unwrap();
        assert_eq!(technique.name, "青云吐纳诀");
        assert_eq!(r.rare_currency, 7);
        assert_eq!(c.experience, 80);
        assert_eq!(cd.remaining("qingyun_breathing", 10_000), 20_000);
    }

    #[test]
    fn test_cooldown_rejects_with_remaining_time() {
        let mut c = disciple();
        let mut r = Resources::starting();
        let mut cd = Cooldowns::default();
        practice("qingyun_breathing", &mut c, &mut r, &mut cd, 0).unwrap();

        let err = practice("qingyun_breathing", &mut c, &mut r, &mut cd, 12_000).unwrap_err();
        assert!(matches!(
            err,
            GameError::CooldownActive { remaining_ms: 18_000, .. }
        ));
        assert_eq!(r.rare_currency, 7);
        assert_eq!(c.experience, 80);

        assert!(practice("qingyun_breathing", &mut c, &mut r, &mut cd, 30_000).is_ok());
    }

    #[test]
    fn test_requires_matching_sect() {
        let mut c = Character::new("散修", Profession::Body, Talent::Normal).unwrap();
        let mut r = Resources::starting();
        let mut cd = Cooldowns::default();
        assert!(matches!(
            practice("qingyun_breathing", &mut c, &mut r, &mut cd, 0),
            Err(GameError::NotInSect)
        ));
        c.sect = Some("天剑宗".to_string());
        assert!(matches!(
            practice("qingyun_breathing", &mut c, &mut r, &mut cd, 0),
            Err(GameError::NotInSect)
        ));
        assert_eq!(r, Resources::starting());
    }

    #[test]
    fn test_insufficient_rare_currency_leaves_no_cooldown() {
        let mut c = disciple();
        let mut r = Resources::starting();
        r.rare_currency = 2;
        let mut cd = Cooldowns::default();
        assert!(matches!(
            practice("qingyun_breathing", &mut c, &mut r, &mut cd, 0),
            Err(GameError::InsufficientResources { .. })
        ));
        assert_eq!(cd.remaining("qingyun_breathing", 0), 0);
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn test_unknown_technique() {
        let mut c = disciple();
        let mut r = Resources::starting();
        assert!(matches!(
            practice("nine_suns", &mut c, &mut r, &mut Cooldowns::default(), 0),
            Err(GameError::UnknownTechnique(_))
        ));
    }

    #[test]
    fn test_hp_technique_raises_max_and_current() {
        let mut c = disciple();
        c.attributes.hp = 40;
        let mut r = Resources::starting();
        practice("qingyun_guard", &mut c, &mut r, &mut Cooldowns::default(), 0).unwrap();
        assert_eq!(c.attributes.max_hp, 120);
        assert_eq!(c.attributes.hp, 60);
    }
}
