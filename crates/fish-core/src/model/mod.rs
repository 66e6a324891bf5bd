pub mod call;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod half_suit;
pub mod hand;
pub mod player;

/// Seats at the table; seat 0 is always the agent.
pub const PLAYER_COUNT: usize = 6;
/// Cards in a full Fish deck (two jokers included).
pub const CARD_COUNT: usize = 54;
pub const HALF_SUIT_COUNT: usize = 9;
pub const HALF_SUIT_SIZE: usize = 6;
/// Cards dealt to each player at the start of a match.
pub const HAND_SIZE: usize = 9;
