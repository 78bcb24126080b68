//! Проверки действий игроков. Только чтение: ни одна функция здесь не меняет игру.

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::hand::{HoleCards, Round};
use crate::domain::{PlayerId, Timestamp, TokenId};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Game;
use crate::engine::AssetRegistry;

/// Достать карманные карты NFT, проверив, что вызывающий им владеет.
pub fn resolve_hole_cards<A: AssetRegistry + ?Sized>(
    assets: &A,
    caller: PlayerId,
    token_id: TokenId,
) -> Result<HoleCards, EngineError> {
    let owner = assets
        .owner_of(token_id)
        .ok_or(EngineError::UnknownToken(token_id))?;
    if owner != caller {
        return Err(EngineError::NotTokenOwner {
            caller,
            token: token_id,
        });
    }
    let hand_id = assets
        .token_hand_id(token_id)
        .ok_or(EngineError::UnknownToken(token_id))?;
    let (c1, c2) = assets
        .hand_card_ids(hand_id)
        .ok_or(EngineError::UnknownToken(token_id))?;
    if !c1.is_valid() || !c2.is_valid() || c1 == c2 {
        return Err(EngineError::UnknownToken(token_id));
    }
    Ok(HoleCards {
        hand_id,
        cards: [c1, c2],
    })
}

/// Проверка `add_nft_flop` / `add_nft_turn`.
pub fn validate_submission<A: AssetRegistry + ?Sized>(
    game: &Game,
    assets: &A,
    caller: PlayerId,
    token_id: TokenId,
    round: Round,
    payment: Chips,
    now: Timestamp,
) -> Result<HoleCards, EngineError> {
    game.ensure_playable()?;
    game.ensure_round_open(round, now)?;

    let price = game
        .params
        .price(round)
        .ok_or(EngineError::WrongRound(game.status))?;
    if payment != price {
        return Err(EngineError::IncorrectPayment {
            expected: price.0,
            got: payment.0,
        });
    }

    let hole = resolve_hole_cards(assets, caller, token_id)?;
    if hole.intersects(&game.community) {
        return Err(EngineError::HoleCardDealt);
    }

    let already = game.token_used(round, token_id)
        || game
            .record(caller)
            .map_or(false, |r| r.has_submitted(round, token_id));
    if already {
        return Err(EngineError::TokenAlreadySubmitted(token_id));
    }

    if round == Round::Turn {
        let in_flop = game
            .record(caller)
            .map_or(false, |r| r.has_submitted(Round::Flop, token_id));
        if !in_flop {
            return Err(EngineError::TokenNotSubmitted {
                token: token_id,
                round: Round::Flop,
            });
        }
    }

    Ok(hole)
}

/// Проверка `play_final_hand`. Возвращает 5 карт: 2 карманные + 3 выбранные.
pub fn validate_final_hand<A: AssetRegistry + ?Sized>(
    game: &Game,
    assets: &A,
    caller: PlayerId,
    token_id: TokenId,
    chosen: [CardId; 3],
    now: Timestamp,
) -> Result<[CardId; 5], EngineError> {
    game.ensure_playable()?;
    game.ensure_round_open(Round::River, now)?;

    let record = game.record(caller).ok_or(EngineError::TokenNotSubmitted {
        token: token_id,
        round: Round::Turn,
    })?;
    if !record.has_submitted(Round::Turn, token_id) {
        return Err(EngineError::TokenNotSubmitted {
            token: token_id,
            round: Round::Turn,
        });
    }
    if record.final_hand.is_some() {
        return Err(EngineError::FinalHandAlreadyPlayed(caller));
    }

    let distinct = chosen[0] != chosen[1] && chosen[0] != chosen[2] && chosen[1] != chosen[2];
    if !distinct || !chosen.iter().all(|c| game.community.contains(c)) {
        return Err(EngineError::InvalidCommunityCards);
    }

    // Пересечение с любой общей картой (включая ривер) запрещено.
    let hole = resolve_hole_cards(assets, caller, token_id)?;
    if hole.intersects(&game.community) {
        return Err(EngineError::HoleCardDealt);
    }

    Ok([
        hole.cards[0],
        hole.cards[1],
        chosen[0],
        chosen[1],
        chosen[2],
    ])
}
