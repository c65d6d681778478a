mod common;

use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{
    ActionError, ActionRequest, ActionResult, CombatAction, CombatConfig, CombatEvent,
    CombatSession, Combatant, ItemId, LootDrop, ParticipantId, ScriptedRng, SessionError,
    SessionId, SessionStatus, Side, Victor,
};
use runtime::{
    FileSessionRepository, LootProvider, NarrativeGenerator, RoundStatus, RuntimeConfig,
    RuntimeError, SessionFormat, SessionManager, SessionRepository, WaitActionProvider,
};

use common::{duel, fighter};

#[tokio::test]
async fn initiate_tracks_an_active_session() {
    let manager = SessionManager::default();
    let (players, enemies) = duel();

    let session = manager.initiate(players, enemies, None).await.unwrap();

    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.round, 1);
    assert!(session.active.is_some());
    assert_eq!(manager.active_sessions().await, vec![session.id]);
    assert_eq!(manager.session(session.id).await.unwrap(), session);
}

#[tokio::test]
async fn out_of_turn_action_is_rejected_without_change() {
    let manager = SessionManager::default();
    let (players, enemies) = duel();
    let before = manager.initiate(players, enemies, None).await.unwrap();

    let active = before.active.unwrap();
    let idle = before
        .participants
        .iter()
        .find(|p| p.id != active)
        .unwrap()
        .id;

    let outcome = manager
        .submit_action(before.id, CombatAction::attack(idle, active))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(ActionError::NotActorsTurn { .. })));
    assert!(outcome.log_entries.is_empty());
    assert_eq!(manager.session(before.id).await.unwrap(), before);
}

#[tokio::test]
async fn accepted_action_commits_the_next_session() {
    let manager = SessionManager::default();
    let (players, enemies) = duel();
    let before = manager.initiate(players, enemies, None).await.unwrap();
    let active = before.active.unwrap();

    let outcome = manager
        .submit_action(before.id, CombatAction::defend(active))
        .await
        .unwrap();

    assert!(outcome.success);
    assert!(!outcome.log_entries.is_empty());
    assert_eq!(outcome.session.nonce, before.nonce + 1);
    assert_ne!(outcome.session.active, Some(active));
    assert_eq!(manager.session(before.id).await.unwrap(), outcome.session);
}

#[tokio::test]
async fn unknown_action_kind_fails_the_call() {
    let manager = SessionManager::default();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();
    let active = session.active.unwrap();

    let err = manager
        .submit_request(session.id, ActionRequest::new(active.0, "dance"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Action(ActionError::UnknownActionKind(ref kind)) if kind == "dance"
    ));

    let missing = manager
        .submit_request(session.id, ActionRequest::new(active.0, "attack"))
        .await
        .unwrap();
    assert!(!missing.success);
    assert!(matches!(missing.error, Some(ActionError::MissingField { .. })));
}

#[tokio::test]
async fn unknown_session_is_a_lookup_error() {
    let manager = SessionManager::default();
    let err = manager
        .submit_action(SessionId(404), CombatAction::wait(ParticipantId(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::SessionNotFound(SessionId(404))));
}

#[tokio::test]
async fn round_waits_for_a_player_without_provider() {
    let manager = SessionManager::builder()
        .rng(ScriptedRng::new([20, 1]))
        .build();
    let session = manager
        .initiate(
            vec![Combatant::player(fighter(1, "Aria", 30))],
            vec![Combatant::ai(fighter(2, "Goblin", 30))],
            None,
        )
        .await
        .unwrap();
    let hero = ParticipantId(1);
    assert_eq!(session.active, Some(hero));

    let round = manager.resolve_round(session.id).await.unwrap();
    assert_eq!(round.status, RoundStatus::AwaitingPlayer(hero));
    assert!(round.results.is_empty());

    manager
        .submit_action(session.id, CombatAction::defend(hero))
        .await
        .unwrap();

    let round = manager.resolve_round(session.id).await.unwrap();
    assert_eq!(round.round, 1);
    assert_eq!(round.results.len(), 1);
    assert_eq!(round.results[0].actor, ParticipantId(2));
    assert_eq!(round.status, RoundStatus::Completed);
    assert_eq!(round.session.round, 2);
    assert_eq!(round.session.active, Some(hero));
}

#[tokio::test]
async fn round_limit_ends_in_a_draw_without_experience() {
    let manager = SessionManager::builder()
        .combat_config(CombatConfig::default().with_max_rounds(3))
        .ai_provider(WaitActionProvider)
        .build();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();

    let ended = manager.run_to_end(session.id).await.unwrap();
    assert_eq!(ended.victor, Some(Victor::Draw));

    let outcome = manager.end_combat(session.id).await.unwrap();
    assert_eq!(outcome.victor, Victor::Draw);
    assert_eq!(outcome.experience_gained, 0);
    assert_eq!(outcome.survivors.len(), 2);
    assert!(manager.active_sessions().await.is_empty());
}

#[tokio::test]
async fn end_combat_requires_an_ended_session() {
    let manager = SessionManager::default();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();

    let err = manager.end_combat(session.id).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Session(SessionError::NotEnded(SessionStatus::Active))
    ));
    assert_eq!(manager.active_sessions().await, vec![session.id]);
}

struct TrophyLoot;

#[async_trait]
impl LootProvider for TrophyLoot {
    async fn loot_for(&self, session: &CombatSession) -> Vec<LootDrop> {
        session
            .participants
            .iter()
            .filter(|p| p.side == Side::Enemies && !p.is_alive())
            .map(|p| LootDrop {
                item: ItemId(100),
                name: format!("{}'s ear", p.name()),
                quantity: 1,
                dropped_by: p.id,
            })
            .collect()
    }
}

#[tokio::test]
async fn players_victory_awards_experience_and_loot() {
    let manager = SessionManager::builder().loot(TrophyLoot).build();
    let players = vec![
        Combatant::ai(fighter(1, "Aria", 40)),
        Combatant::ai(fighter(2, "Brann", 40)),
        Combatant::ai(fighter(3, "Corvin", 40)),
    ];
    let enemies = vec![Combatant::ai(fighter(4, "Rat", 1))];
    let session = manager.initiate(players, enemies, None).await.unwrap();

    let ended = manager.run_to_end(session.id).await.unwrap();
    assert_eq!(ended.victor, Some(Victor::Players));

    let outcome = manager.end_combat(session.id).await.unwrap();
    assert_eq!(outcome.experience_gained, 100);
    assert_eq!(outcome.casualties, vec![ParticipantId(4)]);
    assert_eq!(outcome.loot_dropped.len(), 1);
    assert_eq!(outcome.loot_dropped[0].name, "Rat's ear");
    assert!(outcome.summary.contains("Rat's ear"));
}

struct Bard;

#[async_trait]
impl NarrativeGenerator for Bard {
    async fn narrate(&self, result: &ActionResult, _session: &CombatSession) -> Option<String> {
        Some(format!("And lo, {}", result.description))
    }
}

#[tokio::test]
async fn narrator_adds_flavor_text() {
    let manager = SessionManager::builder().narrator(Bard).build();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();
    let active = session.active.unwrap();

    let outcome = manager
        .submit_action(session.id, CombatAction::wait(active))
        .await
        .unwrap();
    let narrative = outcome.narrative.unwrap();
    assert!(narrative.starts_with("And lo, "));
    assert!(narrative.ends_with("waits"));
}

#[tokio::test]
async fn subscribers_receive_session_events() {
    let manager = SessionManager::default();
    let mut events = manager.subscribe();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();

    let first = events.recv().await.unwrap();
    assert_eq!(first.session, session.id);
    assert!(matches!(first.event, CombatEvent::SessionStarted { .. }));
}

#[tokio::test]
async fn sessions_resolve_independently_in_parallel() {
    let manager = Arc::new(SessionManager::default());
    let (p1, e1) = duel();
    let (p2, e2) = duel();
    let a = manager.initiate_seeded(1, p1, e1, None).await.unwrap();
    let b = manager.initiate_seeded(2, p2, e2, None).await.unwrap();
    assert_ne!(a.id, b.id);

    let (left, right) = {
        let (ma, mb) = (Arc::clone(&manager), Arc::clone(&manager));
        tokio::join!(
            tokio::spawn(async move { ma.run_to_end(a.id).await }),
            tokio::spawn(async move { mb.run_to_end(b.id).await }),
        )
    };
    let left = left.unwrap().unwrap();
    let right = right.unwrap().unwrap();
    assert!(left.is_ended());
    assert!(right.is_ended());
    assert_eq!(manager.active_sessions().await.len(), 2);
}

#[tokio::test]
async fn concluded_session_is_saved_with_its_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SessionManager::builder()
        .config(RuntimeConfig {
            combat: CombatConfig::default().with_max_rounds(2),
            ..RuntimeConfig::default()
        })
        .ai_provider(WaitActionProvider)
        .repository(FileSessionRepository::new(dir.path(), SessionFormat::Json).unwrap())
        .build();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();
    manager.run_to_end(session.id).await.unwrap();
    let outcome = manager.end_combat(session.id).await.unwrap();

    let store = FileSessionRepository::new(dir.path(), SessionFormat::Json).unwrap();
    let record = store.load(session.id).unwrap().unwrap();
    assert!(record.session.is_ended());
    assert_eq!(record.outcome, Some(outcome));

    // concluded sessions come back read-only
    let reloaded = manager.load(session.id).await.unwrap();
    assert_eq!(reloaded, record.session);
    assert!(manager.active_sessions().await.is_empty());
}

#[tokio::test]
async fn another_manager_can_pick_up_a_saved_session() {
    let dir = tempfile::tempdir().unwrap();
    let first = SessionManager::builder()
        .repository(FileSessionRepository::new(dir.path(), SessionFormat::Bincode).unwrap())
        .build();
    let (players, enemies) = duel();
    let session = first.initiate_seeded(77, players, enemies, None).await.unwrap();

    let second = SessionManager::builder()
        .repository(FileSessionRepository::new(dir.path(), SessionFormat::Bincode).unwrap())
        .build();
    let loaded = second.load(session.id).await.unwrap();
    assert_eq!(loaded, session);
    assert_eq!(second.active_sessions().await, vec![session.id]);

    let active = loaded.active.unwrap();
    let a = first
        .submit_action(session.id, CombatAction::defend(active))
        .await
        .unwrap();
    let b = second
        .submit_action(session.id, CombatAction::defend(active))
        .await
        .unwrap();
    assert_eq!(a.session, b.session);
}

#[tokio::test]
async fn bundled_skirmish_runs_to_completion() {
    let content = combat_content::ContentFactory::bundled();
    let encounter = content.load_encounter("skirmish").unwrap();

    let manager = SessionManager::builder()
        .combat_config(content.load_config().unwrap())
        .effect_catalog(content.load_effects().unwrap())
        .items(content.load_items().unwrap())
        .player_provider(runtime::AggressiveAiProvider::new())
        .build();
    let session = manager
        .initiate_seeded(
            2024,
            encounter.players,
            encounter.enemies,
            Some(encounter.environment),
        )
        .await
        .unwrap();

    let ended = manager.run_to_end(session.id).await.unwrap();
    assert!(ended.is_ended());
    assert!(ended.round <= 31);

    let outcome = manager.end_combat(session.id).await.unwrap();
    assert_eq!(outcome.victor, ended.victor.unwrap());
    assert!(!outcome.summary.is_empty());
}

#[tokio::test]
async fn invalid_scripted_action_falls_back_to_waiting() {
    let hero = ParticipantId(1);
    let script = runtime::ScriptedActionProvider::new([CombatAction::attack(
        hero,
        ParticipantId(9),
    )]);
    let manager = SessionManager::builder()
        .rng(ScriptedRng::new([20, 1]))
        .player_provider(script)
        .build();
    let session = manager
        .initiate(
            vec![Combatant::player(fighter(1, "Aria", 30))],
            vec![Combatant::ai(fighter(2, "Goblin", 30))],
            None,
        )
        .await
        .unwrap();

    let round = manager.resolve_round(session.id).await.unwrap();
    assert_eq!(round.status, RoundStatus::Completed);
    assert_eq!(round.results.len(), 2);
    assert_eq!(round.results[0].actor, hero);
    assert_eq!(round.results[0].description, "Aria waits");
    assert_eq!(round.results[1].actor, ParticipantId(2));
}

/// Waits once, then fails every later call.
#[derive(Default)]
struct FlakyProvider {
    calls: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl runtime::ActionProvider for FlakyProvider {
    async fn provide_action(
        &self,
        actor: ParticipantId,
        _session: &CombatSession,
    ) -> runtime::Result<CombatAction> {
        match self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) {
            0 => Ok(CombatAction::wait(actor)),
            _ => Err(RuntimeError::ProviderNotSet {
                kind: runtime::ProviderKind::Ai,
            }),
        }
    }
}

#[tokio::test]
async fn provider_failure_mid_round_keeps_resolved_actions_visible() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SessionManager::builder()
        .ai_provider(FlakyProvider::default())
        .repository(FileSessionRepository::new(dir.path(), SessionFormat::Json).unwrap())
        .build();
    let (players, enemies) = duel();
    let session = manager.initiate(players, enemies, None).await.unwrap();
    let mut events = manager.subscribe();

    let err = manager.resolve_round(session.id).await.unwrap_err();
    assert!(matches!(err, RuntimeError::ProviderNotSet { .. }));

    let live = manager.session(session.id).await.unwrap();
    assert_eq!(live.nonce, session.nonce + 1);

    let store = FileSessionRepository::new(dir.path(), SessionFormat::Json).unwrap();
    let saved = store.load(session.id).unwrap().unwrap();
    assert_eq!(saved.session, live);

    let mut resolved = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event.event, CombatEvent::ActionResolved { .. }) {
            resolved += 1;
        }
    }
    assert_eq!(resolved, 1);
}
