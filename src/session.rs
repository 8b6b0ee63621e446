use crate::cards::{self, CardId};
use crate::history::{HistoryLog, ScoreEntry};
use crate::scoring::{classify, MissPolicy, Outcome};
use crate::stats::StatsDb;
use std::collections::{HashMap, HashSet};

/// Participant context a card is attempted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Scope {
    #[strum(serialize = "solo")]
    Solo,
    #[strum(serialize = "team A")]
    TeamA,
    #[strum(serialize = "team B")]
    TeamB,
}

/// Session type tag; its display string is what score entries persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Solo,
    Quick,
    Team,
    All,
    Random,
}

/// Ordered outcomes plus completion flag for one (scope, card) pair
#[derive(Debug, Clone, Default)]
pub struct AttemptRecord {
    pub history: Vec<Outcome>,
    pub done: bool,
}

/// One dealt set of cards with its attempt state. Starting a new
/// session means building a fresh `Session`; nothing carries over.
pub struct Session {
    mode: Mode,
    policy: MissPolicy,
    deal: HashMap<Scope, Vec<CardId>>,
    attempts: HashMap<(Scope, CardId), AttemptRecord>,
    saved_scopes: HashSet<Scope>,
    pub stats_db: Option<StatsDb>,
}

impl Session {
    /// Deal a new session for `mode`. No stats database is attached;
    /// callers that want tallies and the recent-drills log inject one
    /// with [`attach_stats`](Self::attach_stats).
    pub fn new(mode: Mode, policy: MissPolicy) -> Self {
        let mut deal = HashMap::new();
        match mode {
            Mode::Solo => {
                deal.insert(Scope::Solo, cards::deal(5));
            }
            Mode::Quick => {
                deal.insert(Scope::Solo, cards::deal(3));
            }
            Mode::Team => {
                let dealt = cards::deal(10);
                deal.insert(Scope::TeamA, dealt[..5].to_vec());
                deal.insert(Scope::TeamB, dealt[5..].to_vec());
            }
            Mode::All => {
                deal.insert(Scope::Solo, cards::all_cards());
            }
            Mode::Random => {
                deal.insert(Scope::Solo, cards::deal(1));
            }
        }

        Self {
            mode,
            policy,
            deal,
            attempts: HashMap::new(),
            saved_scopes: HashSet::new(),
            stats_db: None,
        }
    }

    /// Attach a stats database; `record_attempt` feeds it from then on.
    pub fn attach_stats(&mut self, db: StatsDb) {
        self.stats_db = Some(db);
    }

    /// New session under the user's configured scoring policy
    pub fn from_config(mode: Mode, cfg: &crate::config::Config) -> Self {
        Self::new(mode, cfg.miss_policy)
    }

    /// Session with an explicit deal and no stats database. Used by
    /// tests and by callers replaying a chosen set of cards.
    pub fn with_deal(mode: Mode, policy: MissPolicy, scope: Scope, dealt: Vec<CardId>) -> Self {
        let mut deal = HashMap::new();
        deal.insert(scope, dealt);
        Self {
            mode,
            policy,
            deal,
            attempts: HashMap::new(),
            saved_scopes: HashSet::new(),
            stats_db: None,
        }
    }

    /// Add a dealt set for another scope (team sessions built by hand)
    pub fn deal_to(&mut self, scope: Scope, dealt: Vec<CardId>) {
        self.deal.insert(scope, dealt);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn policy(&self) -> MissPolicy {
        self.policy
    }

    pub fn deal_for(&self, scope: Scope) -> &[CardId] {
        self.deal.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append an outcome unless the card is already done, then let the
    /// classifier decide whether the card just closed. Feeds the per-card
    /// tally and the recent-drills log as side effects.
    pub fn record_attempt(&mut self, scope: Scope, id: CardId, outcome: Outcome) {
        let record = self.attempts.entry((scope, id)).or_default();
        if record.done {
            return;
        }

        record.history.push(outcome);
        record.done = classify(id, &record.history, self.policy).done;

        if let Some(ref db) = self.stats_db {
            let _ = db.record_outcome(id, outcome);
            let _ = db.touch_recent(id, &self.mode.to_string());
        }
    }

    /// Abandon a card: force done without appending an outcome. Its
    /// score stays whatever the history so far classifies to.
    pub fn mark_done(&mut self, scope: Scope, id: CardId) {
        self.attempts.entry((scope, id)).or_default().done = true;
    }

    /// Read-only snapshot; cards never attempted report an empty,
    /// not-done record.
    pub fn record(&self, scope: Scope, id: CardId) -> AttemptRecord {
        self.attempts
            .get(&(scope, id))
            .cloned()
            .unwrap_or_default()
    }

    /// Live score of a single card under this session's policy
    pub fn card_score(&self, scope: Scope, id: CardId) -> i32 {
        let record = self.record(scope, id);
        classify(id, &record.history, self.policy).score
    }

    /// Sum of card scores over the cards dealt to a scope, recomputed
    /// from history on every call.
    pub fn total_for(&self, scope: Scope) -> i32 {
        self.deal_for(scope)
            .iter()
            .map(|&id| self.card_score(scope, id))
            .sum()
    }

    /// True once every dealt card in the scope is done. An empty deal
    /// never completes.
    pub fn is_complete(&self, scope: Scope) -> bool {
        let dealt = self.deal_for(scope);
        !dealt.is_empty()
            && dealt
                .iter()
                .all(|&id| self.attempts.get(&(scope, id)).is_some_and(|r| r.done))
    }

    /// Append this scope's total to the score log, at most once per
    /// scope for the lifetime of the session. Returns whether an entry
    /// was written.
    pub fn persist_score(&mut self, scope: Scope, name: &str, log: &mut HistoryLog) -> bool {
        if !self.saved_scopes.insert(scope) {
            return false;
        }
        log.append(ScoreEntry::new(
            name,
            &self.mode.to_string(),
            self.total_for(scope),
        ));
        true
    }

    /// Solo auto-save: persists once the solo deal completes. Safe to
    /// call after every recorded attempt.
    pub fn autosave_solo(&mut self, name: &str, log: &mut HistoryLog) -> bool {
        if self.mode == Mode::Team || !self.is_complete(Scope::Solo) {
            return false;
        }
        self.persist_score(Scope::Solo, name, log)
    }

    /// Team match wrap-up: one entry per team, regardless of whether
    /// every card was played out.
    pub fn finish_team_match(&mut self, team_a: &str, team_b: &str, log: &mut HistoryLog) {
        self.persist_score(Scope::TeamA, team_a, log);
        self.persist_score(Scope::TeamB, team_b, log);
    }
}
