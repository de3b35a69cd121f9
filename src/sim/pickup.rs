//! Coin pickup and scoring
//!
//! Coins are removed by id, never by index, and each removal is paired with
//! exactly one score increment and one `CoinCollected` event.

use super::aabb::Aabb;
use super::state::{Coin, GameEvent};

/// Collect every alive coin touching `actor_box`. Returns the number collected.
pub fn collect_coins(
    coins: &mut Vec<Coin>,
    actor_box: &Aabb,
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) -> usize {
    let hits: Vec<Coin> = coins
        .iter()
        .filter(|c| actor_box.intersects(&c.bounds()))
        .copied()
        .collect();
    if hits.is_empty() {
        return 0;
    }

    coins.retain(|c| !hits.iter().any(|h| h.id == c.id));
    for coin in &hits {
        *score += 1;
        events.push(GameEvent::CoinCollected {
            coin_id: coin.id,
            position: coin.position,
        });
        log::debug!("Coin {} collected, score {}", coin.id, score);
    }
    hits.len()
}
