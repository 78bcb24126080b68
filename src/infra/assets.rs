use std::collections::HashMap;

use crate::domain::card::CardId;
use crate::domain::{HandId, PlayerId, TokenId};
use crate::engine::AssetRegistry;
use crate::infra::ids::IdGenerator;

/// In-memory реестр NFT-рук для тестов и симуляций.
///
/// Хранит только то, что нужно арене: владельца токена,
/// руку токена и пару карт руки.
#[derive(Debug, Default)]
pub struct InMemoryAssetRegistry {
    owners: HashMap<TokenId, PlayerId>,
    token_hands: HashMap<TokenId, HandId>,
    hands: HashMap<HandId, (CardId, CardId)>,
    ids: IdGenerator,
}

impl InMemoryAssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выпустить токен с рукой `(c1, c2)` на имя `owner`. HandId = TokenId.
    pub fn mint_hand(&mut self, owner: PlayerId, c1: CardId, c2: CardId) -> TokenId {
        let token_id = self.ids.next_token_id();
        self.owners.insert(token_id, owner);
        self.token_hands.insert(token_id, token_id);
        self.hands.insert(token_id, (c1, c2));
        token_id
    }

    /// Передать токен. false – токена нет.
    pub fn transfer(&mut self, token_id: TokenId, to: PlayerId) -> bool {
        match self.owners.get_mut(&token_id) {
            Some(owner) => {
                *owner = to;
                true
            }
            None => false,
        }
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn owner_of(&self, token_id: TokenId) -> Option<PlayerId> {
        self.owners.get(&token_id).copied()
    }

    fn token_hand_id(&self, token_id: TokenId) -> Option<HandId> {
        self.token_hands.get(&token_id).copied()
    }

    fn hand_card_ids(&self, hand_id: HandId) -> Option<(CardId, CardId)> {
        self.hands.get(&hand_id).copied()
    }
}
