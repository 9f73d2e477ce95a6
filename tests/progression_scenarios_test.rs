//! Integration test: progression through real encounters
//!
//! Drives a session with a deterministic random source and checks the
//! experience, breakthrough, defeat and aging rules end to end.

use rand::rngs::mock::StepRng;
use xianxia::character::progression::resolve_victory;
use xianxia::character::types::{Character, Profession, Realm, Talent};
use xianxia::core::game_state::GameState;
use xianxia::economy::resources::Resources;
use xianxia::{GameConfig, GameSession, TickEvent};

fn character() -> Character {
    Character::new("韩立", Profession::Sword, Talent::Normal).unwrap()
}

/// StepRng(0, 0) always faces 山妖, always crits and always drops.
fn session_with(state: GameState) -> GameSession<StepRng> {
    GameSession::new(state, GameConfig::default(), StepRng::new(0, 0))
}

/// Advance in half-second steps until the current encounter resolves.
fn fight(session: &mut GameSession<StepRng>) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for _ in 0..100 {
        events.extend(session.advance(500));
        if session.encounter().is_none() {
            break;
        }
    }
    assert!(session.encounter().is_none(), "encounter never resolved");
    events
}

#[test]
fn test_first_victory_worth_100_exp_levels_without_breakthrough() {
    let resolution = resolve_victory(&character(), 100);
    assert_eq!(resolution.character.experience, 100);
    assert_eq!(resolution.character.level, 2);
    assert!(resolution.leveled_up);
    assert_eq!(resolution.character.realm, Realm::BodyTempering);
    assert!(resolution.breakthrough.is_none());
}

#[test]
fn test_reaching_200_exp_breaks_through_once() {
    let mut c = character();
    c.gain_experience(190);
    let mut session = session_with(GameState::new(c));

    session.start_encounter().unwrap();
    let mut breakthrough_notifications = 0;
    let mut events = Vec::new();
    for _ in 0..100 {
        let step = session.advance(500);
        if step
            .iter()
            .any(|e| matches!(e, TickEvent::Breakthrough { .. }))
        {
            breakthrough_notifications = session
                .notifications()
                .iter()
                .filter(|n| n.title == "境界突破")
                .count();
        }
        events.extend(step);
        if session.encounter().is_none() {
            break;
        }
    }

    let c = session.character();
    assert_eq!(c.experience, 200);
    assert_eq!(c.realm, Realm::QiRefining);
    assert_eq!(c.attributes.attack, 15);
    assert_eq!(c.attributes.defense, 8);
    assert_eq!(c.attributes.max_hp, 150);
    assert_eq!(c.age_limit, 100 + 70);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, TickEvent::Breakthrough { .. }))
            .count(),
        1
    );
    assert_eq!(breakthrough_notifications, 1);
    assert_eq!(session.state().stats.breakthroughs, 1);
    assert_eq!(session.state().stats.highest_realm, Realm::QiRefining);
}

#[test]
fn test_large_gain_moves_only_one_realm() {
    let resolution = resolve_victory(&character(), 2_000);
    assert_eq!(resolution.character.realm, Realm::QiRefining);

    let next = resolve_victory(&resolution.character, 0);
    assert_eq!(next.character.realm, Realm::FoundationBuilding);
}

#[test]
fn test_victory_pays_out_and_ages() {
    let mut session = session_with(GameState::new(character()));
    session.start_encounter().unwrap();
    let events = fight(&mut session);

    assert!(events.contains(&TickEvent::Victory {
        monster: "山妖",
        experience: 10,
        currency: 5,
        rare_currency: 1,
        consumables: 1,
    }));
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::LootDropped { .. })));
    assert_eq!(session.resources().currency, 105);
    assert_eq!(session.resources().rare_currency, 11);
    assert_eq!(session.resources().consumables, 6);
    assert_eq!(session.inventory().len(), 1);
    assert_eq!(session.character().age, 17);

    let kill_quest = session.quests().iter().find(|q| q.id == 1).unwrap();
    assert_eq!(kill_quest.progress, 1);
}

#[test]
fn test_defeat_restores_half_hp_and_keeps_resources() {
    let mut c = character();
    c.attributes.attack = 1;
    c.attributes.hp = 1;
    let state = GameState::new(c);
    let resources_before: Resources = state.resources.clone();
    let mut session = session_with(state);

    session.start_encounter().unwrap();
    let events = fight(&mut session);

    assert!(events.contains(&TickEvent::Defeat {
        monster: "山妖",
        hp_restored: 50,
    }));
    assert_eq!(session.character().attributes.hp, 50);
    assert_eq!(session.resources(), &resources_before);
    assert_eq!(session.character().age, 17);
    assert_eq!(session.character().experience, 0);
    assert_eq!(session.state().stats.defeats, 1);
}
