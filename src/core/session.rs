//! Session controller.
//!
//! Owns the game state, the random source and a virtual clock. Every command
//! runs to completion against the state; combat pacing is expressed as tasks
//! on the [`Scheduler`] and only advances when the host calls
//! [`GameSession::advance`]. Rejected actions leave state untouched and show
//! up as a notification instead.

use super::config::GameConfig;
use super::error::GameError;
use super::game_state::GameState;
use super::scheduler::{Scheduler, Task};
use super::tick::TickEvent;
use crate::adventure::logic::{draw_adventure, outcome_title, resolve_option};
use crate::character::derived_stats::DerivedStats;
use crate::character::progression::{self, Resolution};
use crate::character::summary::GameSummary;
use crate::character::types::{Character, Profession, Talent};
use crate::combat::logic::{
    apply_defeat, begin_encounter, monster_strike, player_strike, roll_victory_loot,
};
use crate::combat::types::{CombatOutcome, Encounter, EncounterPhase};
use crate::content::adventures::{get_adventure, Adventure, SECT_RECRUITMENT_ADVENTURE_ID};
use crate::content::monsters::Monster;
use crate::core::constants::{CONSUMABLE_EXP, VICTORY_HP_RECOVERY};
use crate::cultivation::practice::practice;
use crate::economy::resources::{ResourceKind, Resources};
use crate::economy::rewards::{RewardBundle, RewardEffects};
use crate::items::shop;
use crate::items::types::{EquipmentItem, EquipmentSlot};
use crate::notifications::queue::NotificationQueue;
use crate::persistence::codec::{decode, export_file_name, SaveDocument};
use crate::quests::tracker;
use crate::quests::types::Quest;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use uuid::Uuid;

pub struct GameSession<R: Rng = StdRng> {
    state: GameState,
    config: GameConfig,
    rng: R,
    scheduler: Scheduler,
    notifications: NotificationQueue,
    now_ms: u64,
    /// Bumped whenever the state is replaced; tasks from older generations
    /// are dropped when they fire.
    generation: u64,
    next_encounter_id: u64,
    save_due_at: Option<u64>,
    events: Vec<TickEvent>,
}

impl<R: Rng> GameSession<R> {
    /// Resume `state`, e.g. from a loaded save.
    pub fn new(state: GameState, config: GameConfig, rng: R) -> Self {
        let config = config.normalized();
        let mut session = Self {
            notifications: NotificationQueue::new(config.notification_ttl_ms),
            state,
            config,
            rng,
            scheduler: Scheduler::default(),
            now_ms: 0,
            generation: 1,
            next_encounter_id: 1,
            save_due_at: None,
            events: Vec::new(),
        };
        if progression::is_game_over(&session.state.character) {
            session.state.game_over = Some(session.capture_summary());
        }
        session.resume_auto_play();
        session
    }

    /// Create a fresh character and start a new run.
    pub fn start(
        name: &str,
        profession: Profession,
        talent: Talent,
        config: GameConfig,
        rng: R,
    ) -> Result<Self, GameError> {
        let character = Character::new(name, profession, talent)?;
        let mut session = Self::new(GameState::new(character), config, rng);
        session.welcome();
        Ok(session)
    }

    // ── Snapshots ───────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn character(&self) -> &Character {
        &self.state.character
    }

    pub fn resources(&self) -> &Resources {
        &self.state.resources
    }

    pub fn quests(&self) -> &[Quest] {
        &self.state.quests
    }

    pub fn inventory(&self) -> &[EquipmentItem] {
        &self.state.inventory
    }

    pub fn derived_stats(&self) -> DerivedStats {
        self.state.derived_stats()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.state.encounter.as_ref()
    }

    pub fn pending_adventure(&self) -> Option<&'static Adventure> {
        self.state.pending_adventure.and_then(get_adventure)
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn combat_log(&self) -> impl Iterator<Item = &str> {
        self.state.combat_log.lines()
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.state.game_over.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Earliest virtual time at which `advance` has something to do.
    pub fn next_wakeup(&self) -> Option<u64> {
        [
            self.scheduler.next_due(),
            self.save_due_at,
            self.notifications.next_expiry(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Events produced by commands since the last drain.
    pub fn take_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Clock ───────────────────────────────────────────────────

    /// Move the virtual clock forward, running every task that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TickEvent> {
        let target = self.now_ms.saturating_add(elapsed_ms);
        while let Some((due, task)) = self.scheduler.pop_due(target) {
            self.now_ms = self.now_ms.max(due);
            self.notifications.expire(self.now_ms);
            self.run_task(task);
        }
        self.now_ms = target;
        self.notifications.expire(self.now_ms);

        if self.save_due_at.is_some_and(|due| due <= self.now_ms) {
            self.save_due_at = None;
            self.events.push(TickEvent::SaveRequested);
        }
        self.take_events()
    }

    fn run_task(&mut self, task: Task) {
        if task.generation() != self.generation {
            tracing::debug!(?task, generation = self.generation, "dropping superseded task");
            return;
        }
        let result = match task {
            Task::CombatRound { encounter_id, .. } => self.combat_round(encounter_id),
            Task::MonsterStrike { encounter_id, .. } => self.monster_round(encounter_id),
            Task::Resolve { encounter_id, .. } => self.resolve_encounter(encounter_id),
            Task::AutoPlayStart { .. } => self.auto_play_start(),
            Task::SectOffer { .. } => self.offer_sect(),
        };
        if let Err(err) = result {
            self.report(&err);
        }
    }

    // ── Encounter lifecycle ─────────────────────────────────────

    /// Begin an encounter. `Ok(false)` when one is already running.
    pub fn start_encounter(&mut self) -> Result<bool, GameError> {
        let result = self.try_start_encounter();
        self.surface(result)
    }

    fn try_start_encounter(&mut self) -> Result<bool, GameError> {
        self.ensure_running()?;
        if self.state.battle_in_progress() {
            tracing::debug!("encounter already in progress");
            return Ok(false);
        }

        let id = self.next_encounter_id;
        let encounter = begin_encounter(id, self.state.character.level, &mut self.rng)?;
        self.next_encounter_id += 1;

        let monster = encounter.monster;
        tracing::info!(encounter = id, monster = monster.name, level = monster.level, "encounter started");
        self.state
            .combat_log
            .push(format!("遭遇 {} (Lv.{})", monster.name, monster.level));
        self.events.push(TickEvent::EncounterStarted {
            encounter_id: id,
            monster: monster.name,
            level: monster.level,
        });
        self.state.encounter = Some(encounter);
        self.schedule_in(self.config.tick_interval_ms, |generation| Task::CombatRound {
            generation,
            encounter_id: id,
        });
        Ok(true)
    }

    fn check_engaged(&self, encounter_id: u64) -> Result<(), GameError> {
        match &self.state.encounter {
            Some(e) if e.id == encounter_id && e.is_engaged() => Ok(()),
            _ => Err(GameError::StaleEncounterCallback { encounter_id }),
        }
    }

    fn combat_round(&mut self, encounter_id: u64) -> Result<(), GameError> {
        self.check_engaged(encounter_id)?;
        let stats = self.state.derived_stats();
        let Some(encounter) = self.state.encounter.as_mut() else {
            return Err(GameError::StaleEncounterCallback { encounter_id });
        };

        if !self.state.character.attributes.is_alive() {
            encounter.phase = EncounterPhase::Resolving(CombatOutcome::Defeat);
            self.schedule_resolve(encounter_id);
            return Ok(());
        }

        let strike = player_strike(encounter, &stats, &mut self.rng);
        let enemy_hp = encounter.enemy_hp;
        let name = encounter.monster.name;

        let crit = if strike.crit { "暴击！" } else { "" };
        self.state
            .combat_log
            .push(format!("{}你对{}造成{}点伤害", crit, name, strike.damage));
        self.events.push(TickEvent::PlayerStrike {
            damage: strike.damage,
            crit: strike.crit,
            enemy_hp,
        });

        if strike.lethal {
            self.schedule_resolve(encounter_id);
        } else {
            self.schedule_in(self.config.strike_delay_ms, |generation| Task::MonsterStrike {
                generation,
                encounter_id,
            });
        }
        Ok(())
    }

    fn monster_round(&mut self, encounter_id: u64) -> Result<(), GameError> {
        self.check_engaged(encounter_id)?;
        let stats = self.state.derived_stats();
        let Some(encounter) = self.state.encounter.as_mut() else {
            return Err(GameError::StaleEncounterCallback { encounter_id });
        };

        let strike = monster_strike(encounter, &mut self.state.character, &stats);
        let name = encounter.monster.name;
        let player_hp = self.state.character.attributes.hp;

        self.state
            .combat_log
            .push(format!("{}对你造成{}点伤害", name, strike.damage));
        self.events.push(TickEvent::MonsterStrike {
            damage: strike.damage,
            player_hp,
        });

        if strike.lethal {
            self.schedule_resolve(encounter_id);
        } else {
            let gap = self.config.tick_interval_ms - self.config.strike_delay_ms;
            self.schedule_in(gap, |generation| Task::CombatRound {
                generation,
                encounter_id,
            });
        }
        Ok(())
    }

    fn schedule_resolve(&mut self, encounter_id: u64) {
        self.schedule_in(self.config.resolve_delay_ms, |generation| Task::Resolve {
            generation,
            encounter_id,
        });
    }

    fn resolve_encounter(&mut self, encounter_id: u64) -> Result<(), GameError> {
        let outcome = match &self.state.encounter {
            Some(Encounter {
                id,
                phase: EncounterPhase::Resolving(outcome),
                ..
            }) if *id == encounter_id => *outcome,
            _ => return Err(GameError::StaleEncounterCallback { encounter_id }),
        };
        let Some(encounter) = self.state.encounter.take() else {
            return Err(GameError::StaleEncounterCallback { encounter_id });
        };

        self.state.stats.total_battles += 1;
        let monster = encounter.monster;
        tracing::info!(
            encounter = encounter_id,
            monster = monster.name,
            rounds = encounter.rounds,
            ?outcome,
            "encounter resolved"
        );

        match outcome {
            CombatOutcome::Victory => self.resolve_victory(monster),
            CombatOutcome::Defeat => self.resolve_defeat(monster),
        }

        let completed = tracker::sync(
            &mut self.state.quests,
            &self.state.character,
            &self.state.resources,
        );
        self.announce_quests(completed);
        self.request_save();

        if !self.state.is_game_over() && self.state.auto_play {
            self.schedule_in(self.config.auto_play_delay_ms, |generation| {
                Task::AutoPlayStart { generation }
            });
        }
        Ok(())
    }

    fn resolve_victory(&mut self, monster: &'static Monster) {
        let serial = self.state.take_item_serial();
        let loot = roll_victory_loot(monster, self.state.character.realm, serial, &mut self.rng);

        let resources = &mut self.state.resources;
        resources.add(ResourceKind::Currency, loot.currency);
        resources.add(ResourceKind::RareCurrency, loot.rare_currency);
        resources.add(ResourceKind::Consumables, loot.consumables);

        let stats = &mut self.state.stats;
        stats.victories += 1;
        stats.monsters_killed += 1;
        stats.currency_earned += loot.currency;
        stats.rare_currency_earned += loot.rare_currency;
        stats.consumables_earned += loot.consumables;

        let mut message = format!(
            "击败{}，获得{}修为，{}金币",
            monster.name, loot.experience, loot.currency
        );
        if loot.rare_currency > 0 {
            message.push_str(&format!("，{}灵石", loot.rare_currency));
        }
        if loot.consumables > 0 {
            message.push_str(&format!("，{}丹药", loot.consumables));
        }
        self.state.combat_log.push(message.clone());
        self.notify("战斗胜利", message);
        self.events.push(TickEvent::Victory {
            monster: monster.name,
            experience: loot.experience,
            currency: loot.currency,
            rare_currency: loot.rare_currency,
            consumables: loot.consumables,
        });

        if let Some(item) = loot.equipment {
            self.notify("获得装备", item.display_name());
            self.events.push(TickEvent::LootDropped {
                item_name: item.name.to_string(),
                quality: item.quality,
            });
            self.state.inventory.push(item);
        }

        let mut resolution = progression::resolve_victory(&self.state.character, loot.experience);
        resolution.character.attributes.heal(VICTORY_HP_RECOVERY);

        let completed = tracker::record_kill(&mut self.state.quests, monster.name, 1);
        self.announce_quests(completed);
        self.apply_resolution(resolution);
    }

    fn resolve_defeat(&mut self, monster: &'static Monster) {
        let mut resolution = progression::resolve_defeat(&self.state.character);
        apply_defeat(&mut resolution.character);
        let hp_restored = resolution.character.attributes.hp;

        self.state.stats.defeats += 1;
        let message = format!("不敌{}，气血恢复至{}", monster.name, hp_restored);
        self.state.combat_log.push(message.clone());
        self.notify("战斗失败", message);
        self.events.push(TickEvent::Defeat {
            monster: monster.name,
            hp_restored,
        });
        self.apply_resolution(resolution);
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        self.state.character = resolution.character;

        if resolution.leveled_up {
            self.events.push(TickEvent::LeveledUp {
                level: self.state.character.level,
            });
        }

        if let Some(breakthrough) = resolution.breakthrough {
            self.state.stats.breakthroughs += 1;
            self.state.stats.record_realm(breakthrough.to);
            tracing::info!(from = %breakthrough.from, to = %breakthrough.to, "breakthrough");
            self.state.record_history(
                "境界突破",
                format!("从{}境突破到{}境", breakthrough.from, breakthrough.to),
            );
            self.notify(
                "境界突破",
                format!(
                    "突破至{}境！攻击+5 防御+3 生命+50，寿元+{}",
                    breakthrough.to, breakthrough.age_limit_gain
                ),
            );
            self.events.push(TickEvent::Breakthrough {
                from: breakthrough.from,
                to: breakthrough.to,
                age_limit_gain: breakthrough.age_limit_gain,
            });
            if !self.state.character.has_sect() && self.state.pending_adventure.is_none() {
                self.schedule_in(self.config.sect_offer_delay_ms, |generation| Task::SectOffer {
                    generation,
                });
            }
        }

        if resolution.game_over {
            self.end_game();
        }
    }

    fn capture_summary(&self) -> GameSummary {
        GameSummary::capture(
            &self.state.character,
            &self.state.resources,
            &self.state.stats,
            &self.state.history,
        )
    }

    fn end_game(&mut self) {
        let character = &self.state.character;
        let details = format!("享年{}岁，止步{}境", character.age, character.realm);
        self.state.record_history("寿元已尽", details);
        let summary = self.capture_summary();
        tracing::info!(
            name = %summary.name,
            realm = %summary.realm,
            age = summary.age,
            "age limit reached"
        );
        self.scheduler.clear();
        self.state.game_over = Some(summary.clone());
        self.notify(
            "修仙结束",
            format!("寿元已尽，享年{}岁，止步{}境", summary.age, summary.realm),
        );
        self.events.push(TickEvent::GameOver {
            summary: Box::new(summary),
        });
    }

    // ── Auto-play ───────────────────────────────────────────────

    /// Pausing stops new encounters; one already running still resolves.
    pub fn set_auto_play(&mut self, enabled: bool) -> Result<(), GameError> {
        if enabled {
            let running = self.ensure_running();
            self.surface(running)?;
        }
        self.state.auto_play = enabled;
        if enabled {
            self.resume_auto_play();
        } else {
            let cancelled = self
                .scheduler
                .cancel_where(|t| matches!(t, Task::AutoPlayStart { .. }));
            tracing::debug!(cancelled, "auto-play stopped");
        }
        self.request_save();
        Ok(())
    }

    fn resume_auto_play(&mut self) {
        if !self.state.auto_play || self.state.is_game_over() || self.state.battle_in_progress() {
            return;
        }
        if self
            .scheduler
            .contains(|t| matches!(t, Task::AutoPlayStart { .. }))
        {
            return;
        }
        self.schedule_in(self.config.auto_play_delay_ms, |generation| {
            Task::AutoPlayStart { generation }
        });
    }

    fn auto_play_start(&mut self) -> Result<(), GameError> {
        if !self.state.auto_play || self.state.is_game_over() {
            return Ok(());
        }
        self.try_start_encounter().map(|_| ())
    }

    // ── Adventures ──────────────────────────────────────────────

    /// Draw a random adventure. An unresolved one is returned as-is.
    pub fn trigger_adventure(&mut self) -> Result<&'static Adventure, GameError> {
        let result = self.try_trigger_adventure();
        self.surface(result)
    }

    fn try_trigger_adventure(&mut self) -> Result<&'static Adventure, GameError> {
        self.ensure_running()?;
        if let Some(pending) = self.pending_adventure() {
            return Ok(pending);
        }
        let adventure = draw_adventure(&mut self.rng).ok_or(GameError::NoPendingAdventure)?;
        self.offer_adventure(adventure);
        Ok(adventure)
    }

    fn offer_adventure(&mut self, adventure: &'static Adventure) {
        self.state.pending_adventure = Some(adventure.id);
        self.notify(adventure.title, adventure.prompt);
        self.events.push(TickEvent::AdventureOffered {
            adventure_id: adventure.id,
            title: adventure.title,
        });
    }

    fn offer_sect(&mut self) -> Result<(), GameError> {
        if self.state.is_game_over()
            || self.state.character.has_sect()
            || self.state.pending_adventure.is_some()
        {
            return Ok(());
        }
        let adventure = get_adventure(SECT_RECRUITMENT_ADVENTURE_ID).ok_or(GameError::NoPendingAdventure)?;
        self.offer_adventure(adventure);
        Ok(())
    }

    /// Choose an option of the pending adventure. Returns whether the
    /// outcome succeeded.
    pub fn select_adventure_option(&mut self, option_id: u32) -> Result<bool, GameError> {
        let result = self.try_select_adventure_option(option_id);
        self.surface(result)
    }

    fn try_select_adventure_option(&mut self, option_id: u32) -> Result<bool, GameError> {
        self.ensure_running()?;
        let (adventure, outcome) = resolve_option(self.state.pending_adventure, option_id)?;
        self.state.pending_adventure = None;
        tracing::info!(adventure = adventure.id, option = option_id, succeeds = outcome.succeeds, "adventure resolved");

        let mut message = outcome.message.to_string();
        if let Some(rewards) = &outcome.rewards {
            self.grant(rewards);
            let gained = rewards.describe();
            if !gained.is_empty() {
                message.push_str(&format!("（{}）", gained));
            }
        }
        self.notify(outcome_title(outcome), message);
        self.sync_quests();
        self.request_save();
        Ok(outcome.succeeds)
    }

    // ── Quests ──────────────────────────────────────────────────

    /// Claim a completed quest. A second claim is rejected.
    pub fn claim_quest(&mut self, quest_id: u32) -> Result<RewardBundle, GameError> {
        let result = self.try_claim_quest(quest_id);
        self.surface(result)
    }

    fn try_claim_quest(&mut self, quest_id: u32) -> Result<RewardBundle, GameError> {
        self.ensure_running()?;
        let rewards = tracker::claim(&mut self.state.quests, quest_id)?;
        self.grant(&rewards);

        let name = self
            .state
            .quests
            .iter()
            .find(|q| q.id == quest_id)
            .map(|q| q.name.to_string())
            .unwrap_or_default();
        self.notify("领取奖励", format!("{}: {}", name, rewards.describe()));
        self.sync_quests();
        self.request_save();
        Ok(rewards)
    }

    fn sync_quests(&mut self) {
        let completed = tracker::sync(
            &mut self.state.quests,
            &self.state.character,
            &self.state.resources,
        );
        self.announce_quests(completed);
    }

    fn announce_quests(&mut self, completed: Vec<u32>) {
        for id in completed {
            let Some(quest) = self.state.quests.iter().find(|q| q.id == id) else {
                continue;
            };
            let name = quest.name.to_string();
            self.state.stats.quests_completed += 1;
            tracing::info!(quest = id, name = %name, "quest completed");
            self.notify("任务完成", format!("{}已完成，可领取奖励", name));
            self.events.push(TickEvent::QuestCompleted { quest_id: id, name });
        }
    }

    // ── Consumables and cultivation ─────────────────────────────

    /// Consume one pill for a flat experience gain.
    pub fn use_consumable(&mut self) -> Result<(), GameError> {
        let result = self.try_use_consumable();
        self.surface(result)
    }

    fn try_use_consumable(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        self.state.resources.spend(ResourceKind::Consumables, 1)?;
        self.state.stats.consumables_used += 1;
        let effects = RewardBundle::experience(CONSUMABLE_EXP)
            .apply(&mut self.state.character, &mut self.state.resources);
        self.report_effects(&effects);
        self.notify("服用丹药", format!("修为 +{}", CONSUMABLE_EXP));
        self.sync_quests();
        self.request_save();
        Ok(())
    }

    pub fn practice_cultivation(&mut self, technique_id: &str) -> Result<(), GameError> {
        let result = self.try_practice(technique_id);
        self.surface(result)
    }

    fn try_practice(&mut self, technique_id: &str) -> Result<(), GameError> {
        self.ensure_running()?;
        let (technique, effects) = practice(
            technique_id,
            &mut self.state.character,
            &mut self.state.resources,
            &mut self.state.cooldowns,
            self.now_ms,
        )?;
        self.credit(&technique.rewards);
        self.report_effects(&effects);
        self.notify(
            "修炼",
            format!("{}: {}", technique.name, technique.rewards.describe()),
        );
        self.sync_quests();
        self.request_save();
        Ok(())
    }

    // ── Equipment ───────────────────────────────────────────────

    pub fn buy(&mut self, template_id: &str) -> Result<EquipmentItem, GameError> {
        let result = self.try_buy(template_id);
        self.surface(result)
    }

    fn try_buy(&mut self, template_id: &str) -> Result<EquipmentItem, GameError> {
        self.ensure_running()?;
        let serial = self.state.next_item_serial;
        let item = shop::buy(
            template_id,
            serial,
            &mut self.state.resources,
            &mut self.state.inventory,
            &mut self.rng,
        )?;
        self.state.next_item_serial += 1;
        self.notify("购买成功", format!("获得{}", item.display_name()));
        self.sync_quests();
        self.request_save();
        Ok(item)
    }

    /// Sell an inventory item for half its price.
    pub fn sell(&mut self, instance_id: Uuid) -> Result<u64, GameError> {
        let result = self.try_sell(instance_id);
        self.surface(result)
    }

    fn try_sell(&mut self, instance_id: Uuid) -> Result<u64, GameError> {
        self.ensure_running()?;
        let price = shop::sell(instance_id, &mut self.state.resources, &mut self.state.inventory)?;
        self.notify("出售成功", format!("获得{}金币", price));
        self.sync_quests();
        self.request_save();
        Ok(price)
    }

    pub fn equip(&mut self, instance_id: Uuid) -> Result<(), GameError> {
        let result = self.try_equip(instance_id);
        self.surface(result)
    }

    fn try_equip(&mut self, instance_id: Uuid) -> Result<(), GameError> {
        self.ensure_running()?;
        shop::equip(instance_id, &mut self.state.inventory, &mut self.state.equipment)?;
        self.request_save();
        Ok(())
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), GameError> {
        let result = self.try_unequip(slot);
        self.surface(result)
    }

    fn try_unequip(&mut self, slot: EquipmentSlot) -> Result<(), GameError> {
        self.ensure_running()?;
        shop::unequip(slot, &mut self.state.inventory, &mut self.state.equipment)?;
        self.request_save();
        Ok(())
    }

    // ── Notifications ───────────────────────────────────────────

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn expand_notification(&mut self, id: u64) -> bool {
        self.notifications.expand(id, self.now_ms)
    }

    pub fn collapse_notification(&mut self, id: u64) -> bool {
        self.notifications.collapse(id)
    }

    // ── Run lifecycle and persistence ───────────────────────────

    /// Abandon the current run and start over with a new character.
    pub fn new_game(&mut self, name: &str, profession: Profession, talent: Talent) -> Result<(), GameError> {
        let character = Character::new(name, profession, talent);
        let character = self.surface(character)?;
        self.replace_state(GameState::new(character));
        self.welcome();
        Ok(())
    }

    /// Restart with the current character's name, profession and talent.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let character = &self.state.character;
        let (name, profession, talent) = (character.name.clone(), character.profession, character.talent);
        self.new_game(&name, profession, talent)
    }

    /// The persisted subset of the state.
    pub fn save_document(&self) -> SaveDocument {
        SaveDocument::from_state(&self.state)
    }

    /// The save document stamped with the current wall-clock time.
    pub fn export_document(&self) -> SaveDocument {
        SaveDocument::for_export(&self.state, Utc::now())
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(&self.state.character, Utc::now().timestamp_millis())
    }

    /// Replace the whole state from an exported document. On failure the
    /// current state is kept unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), GameError> {
        match decode(json) {
            Ok(document) => {
                self.replace_state(document.into_state());
                if progression::is_game_over(&self.state.character) {
                    self.state.game_over = Some(self.capture_summary());
                }
                tracing::info!(name = %self.state.character.name, "save imported");
                self.notify(
                    "导入成功",
                    format!("{}的存档已载入", self.state.character.name),
                );
                self.sync_quests();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "import rejected");
                self.surface(Err(err))
            }
        }
    }

    fn replace_state(&mut self, state: GameState) {
        self.scheduler.clear();
        self.generation += 1;
        self.state = state;
        self.request_save();
        self.resume_auto_play();
    }

    fn welcome(&mut self) {
        let character = &self.state.character;
        let message = format!(
            "{}（{}·{}）踏上了修仙之路",
            character.name,
            character.profession.name(),
            character.talent.name()
        );
        self.notify("踏入仙途", message);
        self.sync_quests();
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.is_game_over() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn schedule_in(&mut self, delay_ms: u64, task: impl FnOnce(u64) -> Task) {
        let due = self.now_ms.saturating_add(delay_ms);
        self.scheduler.schedule(due, task(self.generation));
    }

    fn request_save(&mut self) {
        self.save_due_at = Some(self.now_ms.saturating_add(self.config.autosave_debounce_ms));
    }

    fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        let (title, message) = (title.into(), message.into());
        let id = self
            .notifications
            .push(title.clone(), message.clone(), self.now_ms);
        self.events.push(TickEvent::Notified { id, title, message });
        id
    }

    /// Apply a reward bundle and track it in the statistics.
    fn grant(&mut self, rewards: &RewardBundle) {
        let effects = rewards.apply(&mut self.state.character, &mut self.state.resources);
        self.credit(rewards);
        self.report_effects(&effects);
    }

    fn credit(&mut self, rewards: &RewardBundle) {
        let stats = &mut self.state.stats;
        stats.currency_earned += rewards.currency;
        stats.rare_currency_earned += rewards.rare_currency;
        stats.consumables_earned += rewards.consumables;
    }

    fn report_effects(&mut self, effects: &RewardEffects) {
        if effects.leveled_up {
            self.events.push(TickEvent::LeveledUp {
                level: self.state.character.level,
            });
        }
        if let Some(sect) = &effects.joined_sect {
            tracing::info!(sect = %sect, "joined sect");
            self.state.record_history("加入门派", format!("拜入{}", sect));
        }
    }

    fn report(&mut self, err: &GameError) {
        match err.notification() {
            Some((title, message)) => {
                tracing::debug!(error = %err, "action rejected");
                self.notify(title, message);
            }
            None => tracing::debug!(error = %err, "ignored"),
        }
    }

    /// Surface an error as a notification and hand the result back.
    fn surface<T>(&mut self, result: Result<T, GameError>) -> Result<T, GameError> {
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }
}
