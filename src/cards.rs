use rand::seq::SliceRandom;

pub type CardId = u32;

pub const DECK_SIZE: u32 = 52;

/// Drill #49 is scored on shot count, not make/miss attempts.
pub const SPECIAL_CARD: CardId = 49;

/// Point value for a drill card. Ids outside 1..=52 fall back to the
/// lowest tier and behave like ordinary cards everywhere else.
pub fn value_of(id: CardId) -> u32 {
    match id {
        1..=11 => 5,
        12..=22 => 10,
        23..=31 => 15,
        32..=43 => 20,
        44..=52 => 25,
        _ => 5,
    }
}

pub fn is_special(id: CardId) -> bool {
    id == SPECIAL_CARD
}

/// Every card id in deck order.
pub fn all_cards() -> Vec<CardId> {
    (1..=DECK_SIZE).collect()
}

/// Draw `n` distinct random card ids from the deck.
pub fn deal(n: usize) -> Vec<CardId> {
    let mut ids = all_cards();
    let rng = &mut rand::thread_rng();
    ids.shuffle(rng);
    ids.truncate(n);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bands() {
        assert_eq!(value_of(1), 5);
        assert_eq!(value_of(12), 10);
        assert_eq!(value_of(23), 15);
        assert_eq!(value_of(32), 20);
        assert_eq!(value_of(44), 25);
        assert_eq!(value_of(52), 25);
    }

    #[test]
    fn test_value_band_boundaries() {
        assert_eq!(value_of(11), 5);
        assert_eq!(value_of(12), 10);
        assert_eq!(value_of(22), 10);
        assert_eq!(value_of(23), 15);
        assert_eq!(value_of(31), 15);
        assert_eq!(value_of(32), 20);
        assert_eq!(value_of(43), 20);
        assert_eq!(value_of(44), 25);
    }

    #[test]
    fn test_value_out_of_range_defaults_to_lowest_tier() {
        assert_eq!(value_of(0), 5);
        assert_eq!(value_of(53), 5);
        assert_eq!(value_of(1000), 5);
    }

    #[test]
    fn test_special_card_flag() {
        assert!(is_special(49));
        assert!(!is_special(48));
        assert!(!is_special(50));
        assert!(!is_special(0));
    }

    #[test]
    fn test_all_cards_covers_deck() {
        let cards = all_cards();
        assert_eq!(cards.len(), 52);
        assert_eq!(cards.first(), Some(&1));
        assert_eq!(cards.last(), Some(&52));
    }

    #[test]
    fn test_deal_returns_distinct_ids_in_range() {
        let dealt = deal(10);
        assert_eq!(dealt.len(), 10);
        for id in &dealt {
            assert!((1..=52).contains(id));
        }
        let mut unique = dealt.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), dealt.len());
    }

    #[test]
    fn test_deal_more_than_deck_caps_at_deck_size() {
        assert_eq!(deal(100).len(), 52);
    }
}
