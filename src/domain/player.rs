use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::{FinalHand, Round};
use crate::domain::{PlayerId, TokenId};

/// Что игрок сделал в конкретной игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRoundRecord {
    pub player_id: PlayerId,
    /// Последний раунд, в котором игрок отправил NFT.
    pub last_round: Option<Round>,
    /// Сколько всего внёс в этой игре (обнуляется при возврате).
    pub paid_in: Chips,
    /// NFT, отправленные во флопе.
    pub flop_tokens: BTreeSet<TokenId>,
    /// NFT, отправленные в тёрне.
    pub turn_tokens: BTreeSet<TokenId>,
    /// Итоговая рука, если игрок её сыграл.
    pub final_hand: Option<FinalHand>,
}

impl PlayerRoundRecord {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            last_round: None,
            paid_in: Chips::ZERO,
            flop_tokens: BTreeSet::new(),
            turn_tokens: BTreeSet::new(),
            final_hand: None,
        }
    }

    pub fn tokens(&self, round: Round) -> Option<&BTreeSet<TokenId>> {
        match round {
            Round::Flop => Some(&self.flop_tokens),
            Round::Turn => Some(&self.turn_tokens),
            Round::River => None,
        }
    }

    pub fn has_submitted(&self, round: Round, token: TokenId) -> bool {
        self.tokens(round).map_or(false, |set| set.contains(&token))
    }

    /// Записать отправку NFT и оплату.
    pub fn record_submission(&mut self, round: Round, token: TokenId, fee: Chips) {
        match round {
            Round::Flop => {
                self.flop_tokens.insert(token);
            }
            Round::Turn => {
                self.turn_tokens.insert(token);
            }
            Round::River => {}
        }
        self.last_round = Some(round);
        self.paid_in += fee;
    }
}
