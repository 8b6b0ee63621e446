use crate::cards::{is_special, value_of, CardId};
use serde::{Deserialize, Serialize};

/// One recorded result of an attempt at a card. The last four variants
/// belong to the shot-count card (#49) only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Outcome {
    Make,
    Miss,
    Scratch,
    ThreeShots,
    FourShots,
    OverFour,
    ScratchSpecial,
}

/// How a first-attempt miss on an ordinary card is treated. The drill
/// sheets in circulation disagree; both readings stay supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum MissPolicy {
    /// A first miss scores nothing but the card stays open.
    #[default]
    Continue,
    /// A first miss ends the card at zero.
    Terminal,
}

/// Classifier output for one attempt history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub done: bool,
    pub score: i32,
}

impl Verdict {
    fn done(score: i32) -> Self {
        Self { done: true, score }
    }

    fn open(score: i32) -> Self {
        Self { done: false, score }
    }
}

/// Decide whether an attempt history is complete and what it scores.
/// Pure function of (card id, ordered outcomes, policy).
pub fn classify(id: CardId, history: &[Outcome], policy: MissPolicy) -> Verdict {
    if is_special(id) {
        return classify_special(history);
    }

    let value = value_of(id) as i32;

    // A scratch ends the card wherever it lands.
    if history.contains(&Outcome::Scratch) {
        return Verdict::done(-value);
    }

    use Outcome::{Make, Miss};
    match history {
        [] => Verdict::open(0),
        [Make] => Verdict::open(value),
        [Miss] => match policy {
            MissPolicy::Continue => Verdict::open(0),
            MissPolicy::Terminal => Verdict::done(0),
        },
        // Only 5-point cards earn a shot at a third make.
        [Make, Make] if value == 5 => Verdict::open(2 * value),
        [Make, Make] => Verdict::done(2 * value),
        [Make, Miss] => Verdict::done(-value),
        [Miss, Make] => Verdict::done(value),
        [Miss, Miss] => Verdict::done(0),
        // Three-attempt histories only exist for 5-point cards; two
        // makes already closed anything bigger.
        [Make, Make, Make] if value == 5 => Verdict::done(3 * value),
        [Make, Make, Miss] if value == 5 => Verdict::done(-(3 * value)),
        _ => Verdict::done(0),
    }
}

// Drill #49: the first recorded outcome is the whole verdict.
fn classify_special(history: &[Outcome]) -> Verdict {
    match history.first() {
        None => Verdict::open(0),
        Some(Outcome::ThreeShots) => Verdict::done(25),
        Some(Outcome::FourShots) => Verdict::done(20),
        Some(Outcome::OverFour) => Verdict::done(-10),
        Some(Outcome::ScratchSpecial) => Verdict::done(-25),
        Some(_) => Verdict::done(0),
    }
}
