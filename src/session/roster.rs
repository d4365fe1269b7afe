//! Session membership and roles.
//!
//! The roster is the authority on who is in the session and what they may
//! do. Authorization checks go through roles here rather than comparing raw
//! username strings at call sites. `Role::Admin` exists for collaborators
//! that surface an admin flag, but item curation is creator-only: the
//! creator's role is the sole approval authority, admin or not.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, PlayerId};

/// A player's standing within the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The player who created the session. Sole item-curation authority.
    Creator,
    /// Elevated by the identity collaborator; no extra engine powers.
    Admin,
    /// Regular player.
    Player,
}

/// One roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Roster index.
    pub id: PlayerId,
    /// Display/identity name; unique within the session.
    pub username: String,
    /// Standing within the session.
    pub role: Role,
}

/// The session membership table.
///
/// Players may join mid-session; IDs are assigned in join order and the
/// creator is always `PlayerId(0)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<PlayerProfile>,
}

impl Roster {
    /// Create a roster containing only the session creator.
    #[must_use]
    pub fn new(creator: impl Into<String>) -> Self {
        Self {
            players: vec![PlayerProfile {
                id: PlayerId::new(0),
                username: creator.into(),
                role: Role::Creator,
            }],
        }
    }

    /// Add a player, returning their assigned ID.
    ///
    /// Rejects empty usernames and duplicates.
    pub fn add_player(&mut self, username: impl Into<String>, role: Role) -> EngineResult<PlayerId> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(EngineError::Validation("username is empty".to_string()));
        }
        if self.by_username(&username).is_some() {
            return Err(EngineError::Validation(format!(
                "username already in session: {username}"
            )));
        }
        if self.players.len() >= 255 {
            return Err(EngineError::Validation("session is full".to_string()));
        }

        let id = PlayerId::new(self.players.len() as u8);
        self.players.push(PlayerProfile {
            id,
            username,
            role,
        });
        Ok(id)
    }

    /// Look up a profile by ID.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.players.get(id.index())
    }

    /// Look up a profile by username.
    #[must_use]
    pub fn by_username(&self, username: &str) -> Option<&PlayerProfile> {
        self.players.iter().find(|p| p.username == username)
    }

    /// The ID for a username, if present.
    #[must_use]
    pub fn id_of(&self, username: &str) -> Option<PlayerId> {
        self.by_username(username).map(|p| p.id)
    }

    /// The username for an ID, or an error naming the missing player.
    pub fn username_of(&self, id: PlayerId) -> EngineResult<&str> {
        self.get(id)
            .map(|p| p.username.as_str())
            .ok_or_else(|| EngineError::NotFound(format!("{id}")))
    }

    /// The session creator's profile.
    #[must_use]
    pub fn creator(&self) -> &PlayerProfile {
        // Constructed with the creator at index 0; roles never change.
        &self.players[0]
    }

    /// Whether this player is the session creator.
    #[must_use]
    pub fn is_creator(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.role == Role::Creator)
    }

    /// Number of players currently in the session.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Approvals needed for a claim to count, at the current player count:
    /// a majority of the claimant's peers, `ceil((players - 1) / 2)`.
    ///
    /// Computed live rather than frozen at start so players joining
    /// mid-session are counted.
    #[must_use]
    pub fn required_approvals(&self) -> usize {
        (self.player_count().saturating_sub(1)).div_ceil(2)
    }

    /// Iterate over profiles in join order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.players.iter()
    }
}
