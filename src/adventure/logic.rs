use crate::content::adventures::{drawable_adventures, get_adventure, Adventure, AdventureOutcome};
use crate::core::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform draw from the random-event pool.
pub fn draw_adventure(rng: &mut impl Rng) -> Option<&'static Adventure> {
    drawable_adventures().choose(rng).copied()
}

/// Look up the outcome of `option_id` on the pending adventure.
pub fn resolve_option(
    pending: Option<u32>,
    option_id: u32,
) -> Result<(&'static Adventure, &'static AdventureOutcome), GameError> {
    let adventure = pending
        .and_then(get_adventure)
        .ok_or(GameError::NoPendingAdventure)?;
    let option = adventure
        .option(option_id)
        .ok_or(GameError::UnknownAdventureOption(option_id))?;
    Ok((adventure, &option.outcome))
}

/// Notification title for an outcome.
pub fn outcome_title(outcome: &AdventureOutcome) -> &'static str {
    if outcome.succeeds {
        "奇遇结果"
    } else {
        "探索结果"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::adventures::SECT_RECRUITMENT_ADVENTURE_ID;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_draw_never_yields_recruitment() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..200 {
            let a = draw_adventure(&mut rng).unwrap();
            assert_ne!(a.id, SECT_RECRUITMENT_ADVENTURE_ID);
        }
    }

    #[test]
    fn test_resolve_requires_pending() {
        assert!(matches!(
            resolve_option(None, 1),
            Err(GameError::NoPendingAdventure)
        ));
        assert!(matches!(
            resolve_option(Some(1), 9),
            Err(GameError::UnknownAdventureOption(9))
        ));
    }

    #[test]
    fn test_resolve_outcome() {
        let (adventure, outcome) = resolve_option(Some(3), 1).unwrap();
        assert_eq!(adventure.title, "灵兽幼崽");
        assert!(outcome.succeeds);
        assert_eq!(outcome_title(outcome), "奇遇结果");

        let (_, declined) = resolve_option(Some(3), 2).unwrap();
        assert_eq!(outcome_title(declined), "探索结果");
    }
}
