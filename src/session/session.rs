//! The game session: orchestration of every engine component.
//!
//! `GameSession` owns the item pool, roster, per-user boards and tile state,
//! timers, the message log, and the terminal result. All operations are
//! synchronous and transactional: an `Err` return means nothing changed.
//! Sessions are fully isolated; nothing here is shared between instances.
//!
//! ## Lifecycle
//!
//! Items are curated (and suggestions voted in) before `start`. Starting
//! validates the pool size, generates one board per player, and anchors the
//! item timers. Players then claim tiles and vote on each other's claims;
//! every claim and approval re-evaluates the win conditions, and the first
//! satisfied condition freezes the session for good.

use rustc_hash::FxHashMap;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::board::{generate_board, Board};
use crate::claims::TileBoard;
use crate::core::{EngineError, EngineResult, PlayerId, SessionConfig, SessionId};
use crate::items::{min_items_required, ItemId, ItemRegistry, SuggestionId};
use crate::timer::TimerTracker;
use crate::win::{self, SessionResult};

use super::message::{MessageLog, MessagePayload};
use super::roster::{Role, Roster};
use super::snapshot::{Snapshot, SnapshotStore};

/// One isolated game session.
pub struct GameSession {
    id: SessionId,
    config: SessionConfig,
    roster: Roster,
    registry: ItemRegistry,
    boards: FxHashMap<PlayerId, Board>,
    tiles: FxHashMap<PlayerId, TileBoard>,
    timers: TimerTracker,
    log: MessageLog,
    result: Option<SessionResult>,
    started: bool,
}

impl GameSession {
    /// Create a session with only its creator on the roster.
    #[must_use]
    pub fn new(id: SessionId, config: SessionConfig, creator: impl Into<String>) -> Self {
        Self {
            id,
            config,
            roster: Roster::new(creator),
            registry: ItemRegistry::new(),
            boards: FxHashMap::default(),
            tiles: FxHashMap::default(),
            timers: TimerTracker::new(),
            log: MessageLog::new(),
            result: None,
            started: false,
        }
    }

    // === Accessors ===

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Membership table.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Item pool and pending suggestions.
    #[must_use]
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// A player's board, once generated.
    #[must_use]
    pub fn board(&self, user: PlayerId) -> Option<&Board> {
        self.boards.get(&user)
    }

    /// A player's tile state, once generated.
    #[must_use]
    pub fn tiles(&self, user: PlayerId) -> Option<&TileBoard> {
        self.tiles.get(&user)
    }

    /// Countdown state for the session's timed items.
    #[must_use]
    pub fn timers(&self) -> &TimerTracker {
        &self.timers
    }

    /// The message log for the chat/notification collaborator.
    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    /// The terminal result, once a win condition fired.
    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Whether boards have been generated and timers started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The text of an item as `viewer` should see it: masked when the item
    /// is hidden from them.
    pub fn item_text(&self, viewer: PlayerId, item: ItemId) -> EngineResult<&str> {
        let viewer_name = self.roster.username_of(viewer)?;
        let item = self
            .registry
            .get(item)
            .ok_or_else(|| EngineError::NotFound(format!("{item}")))?;
        Ok(item.display_text_for(viewer_name))
    }

    // === Authorization helpers ===

    fn ensure_creator(&self, actor: PlayerId, action: &str) -> EngineResult<()> {
        self.roster.username_of(actor)?;
        if !self.roster.is_creator(actor) {
            return Err(EngineError::Authorization(format!(
                "only the session creator may {action}"
            )));
        }
        Ok(())
    }

    fn ensure_started(&self) -> EngineResult<()> {
        if !self.started {
            return Err(EngineError::Validation(
                "session has not started".to_string(),
            ));
        }
        Ok(())
    }

    // === Item curation ===

    /// Add an item to the pool. Creator only.
    ///
    /// Allowed after start as well; boards are generated once, so new items
    /// only reach boards of players who join later.
    pub fn add_item(
        &mut self,
        actor: PlayerId,
        text: &str,
        hidden_from: &[&str],
        timer_minutes: u32,
        now: OffsetDateTime,
    ) -> EngineResult<ItemId> {
        self.ensure_creator(actor, "add items")?;
        let id = self.registry.add_item(text, hidden_from, timer_minutes)?;

        let actor_name = self.roster.username_of(actor)?.to_string();
        self.log.push(
            now,
            format!("{actor_name} added an item"),
            MessagePayload::ItemAdded { item: id },
        );
        Ok(id)
    }

    /// Replace an item's text and metadata. Creator only, and only before
    /// the session starts (items are immutable afterwards).
    pub fn update_item(
        &mut self,
        actor: PlayerId,
        id: ItemId,
        text: &str,
        hidden_from: &[&str],
        timer_minutes: u32,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        self.ensure_creator(actor, "edit items")?;
        if self.started {
            return Err(EngineError::Validation(
                "items are immutable once the session starts".to_string(),
            ));
        }
        self.registry
            .update_item(id, text, hidden_from, timer_minutes)?;

        self.log.push(
            now,
            "An item was edited".to_string(),
            MessagePayload::ItemUpdated { item: id },
        );
        Ok(())
    }

    /// Remove an item from the pool. Creator only; a no-op if absent.
    ///
    /// Already-generated boards keep their cached layout regardless.
    pub fn remove_item(
        &mut self,
        actor: PlayerId,
        id: ItemId,
        now: OffsetDateTime,
    ) -> EngineResult<bool> {
        self.ensure_creator(actor, "remove items")?;
        let removed = self.registry.remove_item(id);
        if removed {
            self.log.push(
                now,
                "An item was removed from the pool".to_string(),
                MessagePayload::ItemRemoved { item: id },
            );
        }
        Ok(removed)
    }

    /// Propose an item for creator approval. Any player.
    pub fn propose_suggestion(
        &mut self,
        actor: PlayerId,
        text: &str,
        hidden_from: &[&str],
        timer_minutes: u32,
        now: OffsetDateTime,
    ) -> EngineResult<SuggestionId> {
        let actor_name = self.roster.username_of(actor)?.to_string();
        let id = self
            .registry
            .propose_suggestion(text, &actor_name, hidden_from, timer_minutes)?;

        self.log.push(
            now,
            format!("{actor_name} suggested an item"),
            MessagePayload::SuggestionMade { suggestion: id, by: actor },
        );
        Ok(id)
    }

    /// Approve a suggestion into the pool. Creator only - the admin flag
    /// never grants this.
    pub fn approve_suggestion(
        &mut self,
        actor: PlayerId,
        id: SuggestionId,
        now: OffsetDateTime,
    ) -> EngineResult<ItemId> {
        self.ensure_creator(actor, "approve suggestions")?;
        let item_id = self.registry.approve_suggestion(id)?;

        self.log.push(
            now,
            "A suggestion was approved".to_string(),
            MessagePayload::SuggestionApproved { item: item_id },
        );
        Ok(item_id)
    }

    /// Discard a suggestion. Creator only.
    pub fn reject_suggestion(
        &mut self,
        actor: PlayerId,
        id: SuggestionId,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        self.ensure_creator(actor, "reject suggestions")?;
        self.registry.reject_suggestion(id)?;

        self.log.push(
            now,
            "A suggestion was rejected".to_string(),
            MessagePayload::SuggestionRejected { suggestion: id },
        );
        Ok(())
    }

    // === Roster ===

    /// Add a player to the session.
    ///
    /// Mid-session joiners get a board immediately; the approval threshold
    /// rises with the roster automatically since it is computed live.
    pub fn add_player(
        &mut self,
        username: impl Into<String>,
        now: OffsetDateTime,
    ) -> EngineResult<PlayerId> {
        let username = username.into();
        let id = self.roster.add_player(username.clone(), Role::Player)?;

        if self.started {
            self.materialize_board(id, &username);
        }

        self.log.push(
            now,
            format!("{username} joined the game"),
            MessagePayload::PlayerJoined { player: id },
        );
        Ok(id)
    }

    fn materialize_board(&mut self, player: PlayerId, username: &str) {
        let board = generate_board(
            username,
            &self.registry,
            self.config.rows,
            self.config.columns,
            self.config.seed,
        );
        self.tiles.insert(player, TileBoard::new(board.len()));
        self.boards.insert(player, board);
        debug!(%player, username, "generated board");
    }

    // === Lifecycle ===

    /// Start the session: validate the pool, generate boards, anchor timers.
    ///
    /// Players restored from snapshots keep their persisted boards; only
    /// players without one get a fresh board.
    pub fn start(&mut self, now: OffsetDateTime) -> EngineResult<()> {
        if self.started {
            return Err(EngineError::Validation(
                "session already started".to_string(),
            ));
        }
        if self.config.win_conditions.is_empty() {
            return Err(EngineError::Validation(
                "no win condition is enabled".to_string(),
            ));
        }

        let needed = min_items_required(self.config.rows, self.config.columns);
        let have = self.registry.len();
        if have < needed {
            return Err(EngineError::InsufficientItems { have, needed });
        }

        let pending: Vec<(PlayerId, String)> = self
            .roster
            .iter()
            .filter(|p| !self.boards.contains_key(&p.id))
            .map(|p| (p.id, p.username.clone()))
            .collect();
        for (id, username) in pending {
            self.materialize_board(id, &username);
        }

        self.timers.start(self.registry.iter(), now);
        self.started = true;

        info!(session = %self.id, players = self.roster.player_count(), "session started");
        self.log
            .push(now, "The game has started!", MessagePayload::SessionStarted);
        Ok(())
    }

    /// Advance the item timers to `now`, emitting a message per expiry.
    ///
    /// Driven at 1-second granularity by `crate::timer::SessionTicker` (or
    /// directly by a host/test).
    pub fn tick(&mut self, now: OffsetDateTime) {
        let expired = self.timers.tick(now);
        for item in expired {
            self.log.push(
                now,
                "Time is up for a timed item",
                MessagePayload::TimerExpired { item },
            );
        }
    }

    // === Claim workflow ===

    /// Claim a tile on the caller's own board, with optional proof.
    ///
    /// Rejected with `TileLocked` when the tile is already claimed, hidden
    /// from the caller, its timer has expired, or the session is already
    /// won. The claim immediately re-evaluates the win conditions.
    pub fn claim_tile(
        &mut self,
        user: PlayerId,
        tile_index: usize,
        photo: Option<String>,
        note: Option<String>,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        self.ensure_started()?;
        if self.result.is_some() {
            return Err(EngineError::TileLocked);
        }
        self.tick(now);

        let username = self.roster.username_of(user)?.to_string();
        let board = self
            .boards
            .get(&user)
            .ok_or_else(|| EngineError::NotFound(format!("no board for {user}")))?;
        if !board.in_bounds(tile_index) {
            return Err(EngineError::NotFound(format!("tile {tile_index}")));
        }

        let item_id = board
            .cell(tile_index)
            .ok_or_else(|| EngineError::NotFound(format!("tile {tile_index} is empty")))?;
        if let Some(item) = self.registry.get(item_id) {
            if item.is_hidden_from(&username) {
                return Err(EngineError::TileLocked);
            }
        }
        if self.timers.is_expired(item_id) {
            return Err(EngineError::TileLocked);
        }

        let tile = self
            .tiles
            .get_mut(&user)
            .and_then(|t| t.get_mut(tile_index))
            .ok_or_else(|| EngineError::NotFound(format!("tile {tile_index}")))?;
        if tile.claimed {
            return Err(EngineError::TileLocked);
        }
        tile.claim(photo, note);

        debug!(player = %user, tile = tile_index, "tile claimed");
        self.log.push(
            now,
            format!("{username} claimed tile {}", tile_index + 1),
            MessagePayload::TileClaimed { player: user, tile: tile_index },
        );

        self.evaluate_win(user, now);
        Ok(())
    }

    /// Attach a note to a tile without claiming it.
    ///
    /// Needs no approval and never triggers a win check.
    pub fn add_note(
        &mut self,
        user: PlayerId,
        tile_index: usize,
        note: impl Into<String>,
    ) -> EngineResult<()> {
        self.ensure_started()?;
        self.roster.username_of(user)?;

        let tile = self
            .tiles
            .get_mut(&user)
            .and_then(|t| t.get_mut(tile_index))
            .ok_or_else(|| EngineError::NotFound(format!("tile {tile_index}")))?;
        tile.set_note(note);
        Ok(())
    }

    /// Vote on another player's claim.
    ///
    /// Re-votes replace the earlier vote; a voter is never in both sets. The
    /// claimant's own vote is ignored. An approval re-evaluates the win
    /// conditions against the threshold for the *current* player count.
    pub fn vote(
        &mut self,
        voter: PlayerId,
        owner: PlayerId,
        tile_index: usize,
        approve: bool,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        self.ensure_started()?;
        if self.result.is_some() {
            return Err(EngineError::TileLocked);
        }

        let voter_name = self.roster.username_of(voter)?.to_string();
        let owner_name = self.roster.username_of(owner)?.to_string();
        if voter == owner {
            // The claimant never votes on their own claim.
            return Ok(());
        }

        let tile = self
            .tiles
            .get_mut(&owner)
            .and_then(|t| t.get_mut(tile_index))
            .ok_or_else(|| EngineError::NotFound(format!("tile {tile_index}")))?;
        if !tile.claimed {
            return Err(EngineError::NotFound(format!(
                "no claim on tile {tile_index}"
            )));
        }
        tile.record_vote(voter, approve);

        let verb = if approve { "approved" } else { "denied" };
        debug!(%voter, %owner, tile = tile_index, verb, "vote cast");
        self.log.push(
            now,
            format!("{voter_name} {verb} {owner_name}'s tile {}", tile_index + 1),
            MessagePayload::VoteCast { voter, owner, tile: tile_index, approved: approve },
        );

        if approve {
            self.evaluate_win(owner, now);
        }
        Ok(())
    }

    // === Win evaluation ===

    fn evaluate_win(&mut self, owner: PlayerId, now: OffsetDateTime) {
        if self.result.is_some() {
            return;
        }
        let line = match (self.boards.get(&owner), self.tiles.get(&owner)) {
            (Some(board), Some(tiles)) => win::evaluate(
                board,
                tiles,
                &self.config.win_conditions,
                self.roster.required_approvals(),
            ),
            _ => None,
        };

        if let Some(line) = line {
            self.result = Some(SessionResult { line, winner: owner });

            let winner_name = self
                .roster
                .username_of(owner)
                .unwrap_or("unknown")
                .to_string();
            info!(session = %self.id, winner = %owner, %line, "win declared");
            self.log.push(
                now,
                format!("{winner_name} wins: {line}"),
                MessagePayload::WinDeclared { winner: owner, line },
            );
        }
    }

    // === Persistence ===

    /// Capture one player's board and tile state for the snapshot store.
    pub fn snapshot_for(&self, user: PlayerId) -> EngineResult<Snapshot> {
        let board = self
            .boards
            .get(&user)
            .ok_or_else(|| EngineError::NotFound(format!("no board for {user}")))?;
        let tiles = self
            .tiles
            .get(&user)
            .ok_or_else(|| EngineError::NotFound(format!("no tiles for {user}")))?;
        Ok(Snapshot::capture(board, tiles, self.started))
    }

    /// Install a persisted board and tile state for one player.
    ///
    /// A restored board is never re-derived: `start` skips board generation
    /// for this player. When the snapshot was captured after start, the
    /// session is marked started and timers are re-anchored at `now`.
    pub fn restore_player(
        &mut self,
        user: PlayerId,
        snapshot: &Snapshot,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        self.roster.username_of(user)?;
        let (board, tiles) = snapshot.restore()?;
        self.boards.insert(user, board);
        self.tiles.insert(user, tiles);

        if snapshot.game_started && !self.started {
            self.started = true;
            self.timers.start(self.registry.iter(), now);
        }
        Ok(())
    }

    /// Save every player's snapshot to the store.
    pub fn save_players(&self, store: &mut dyn SnapshotStore) -> EngineResult<()> {
        for profile in self.roster.iter() {
            if self.boards.contains_key(&profile.id) {
                let snapshot = self.snapshot_for(profile.id)?;
                store.save(self.id, profile.id, &snapshot)?;
            }
        }
        Ok(())
    }

    /// Load any persisted snapshots for the current roster.
    ///
    /// Players without a snapshot are left untouched (fresh start).
    pub fn load_players(
        &mut self,
        store: &dyn SnapshotStore,
        now: OffsetDateTime,
    ) -> EngineResult<()> {
        let ids: Vec<PlayerId> = self.roster.iter().map(|p| p.id).collect();
        for id in ids {
            if let Some(snapshot) = store.load(self.id, id)? {
                self.restore_player(id, &snapshot, now)?;
            }
        }
        Ok(())
    }
}
