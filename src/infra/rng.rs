use std::collections::BTreeMap;

use crate::domain::chips::Chips;
use crate::domain::RequestId;
use crate::engine::{RandomnessClient, RandomnessError};
use crate::infra::rng_seed::RngSeed;

/// Запрос, принятый координатором и ещё не исполненный.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VrfRequest {
    pub request_id: RequestId,
    pub key_hash: [u8; 32],
    pub fee: Chips,
    pub seed: RngSeed,
}

/// Локальный координатор случайности для тестов, симуляций и оффчейн-запуска.
///
/// Запрос только регистрируется; значение выдаёт `next_value`, а доставить
/// его в арену (`fulfill_randomness`) должен сам вызывающий, когда захочет.
#[derive(Clone, Debug)]
pub struct MockVrfCoordinator {
    #[cfg(not(target_arch = "wasm32"))]
    inner: rand::rngs::StdRng,
    #[cfg(target_arch = "wasm32")]
    state: u128,
    next_id: RequestId,
    min_fee: Chips,
    pending: BTreeMap<RequestId, VrfRequest>,
}

impl MockVrfCoordinator {
    /// Детерминированный координатор: одинаковый seed – одинаковые раздачи.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
            next_id: 1,
            min_fee: Chips::ZERO,
            pending: BTreeMap::new(),
        }
    }

    /// На wasm нет rand: простой LCG-поток от seed.
    #[cfg(target_arch = "wasm32")]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: seed as u128,
            next_id: 1,
            min_fee: Chips::ZERO,
            pending: BTreeMap::new(),
        }
    }

    /// Требовать минимальную плату за запрос.
    pub fn with_min_fee(mut self, min_fee: Chips) -> Self {
        self.min_fee = min_fee;
        self
    }

    pub fn pending(&self) -> impl Iterator<Item = &VrfRequest> {
        self.pending.values()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Последний принятый запрос.
    pub fn last_request(&self) -> Option<RequestId> {
        self.pending.keys().next_back().copied()
    }

    /// Снять запрос с ожидания (он ушёл в арену или потерян).
    pub fn take(&mut self, request_id: RequestId) -> Option<VrfRequest> {
        self.pending.remove(&request_id)
    }

    /// Исполнить последний запрос: снять его с ожидания и выдать значение.
    pub fn deliver_last(&mut self) -> Option<(RequestId, u128)> {
        let (request_id, _) = self.pending.pop_last()?;
        Some((request_id, self.next_value()))
    }

    /// Следующее случайное значение.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn next_value(&mut self) -> u128 {
        use rand::Rng;
        self.inner.gen()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn next_value(&mut self) -> u128 {
        self.state = self
            .state
            .wrapping_mul(0x2360_ED05_1FC6_5DA4_4385_DF64_9FCC_F645)
            .wrapping_add(0x5851_F42D_4C95_7F2D_1405_7B7E_F767_814F);
        self.state
    }
}

impl RandomnessClient for MockVrfCoordinator {
    fn request_randomness(
        &mut self,
        key_hash: [u8; 32],
        fee: Chips,
        seed: &RngSeed,
    ) -> Result<RequestId, RandomnessError> {
        if fee < self.min_fee {
            return Err(RandomnessError::InsufficientFee);
        }
        let request_id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            request_id,
            VrfRequest {
                request_id,
                key_hash,
                fee,
                seed: seed.clone(),
            },
        );
        tracing::debug!(request_id, "vrf request accepted");
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hand::Round;

    fn request(vrf: &mut MockVrfCoordinator, fee: u64) -> Result<RequestId, RandomnessError> {
        let seed = RngSeed::for_request(1, Round::Flop, 0);
        vrf.request_randomness([0u8; 32], Chips(fee), &seed)
    }

    #[test]
    fn delivered_requests_leave_the_pending_set() {
        let mut vrf = MockVrfCoordinator::from_seed(11).with_min_fee(Chips(2));
        assert_eq!(request(&mut vrf, 1), Err(RandomnessError::InsufficientFee));
        assert_eq!(vrf.pending_count(), 0);

        assert_eq!(request(&mut vrf, 2), Ok(1));
        assert_eq!(request(&mut vrf, 5), Ok(2));
        assert_eq!(vrf.pending_count(), 2);

        let (id, _) = vrf.deliver_last().unwrap();
        assert_eq!(id, 2);
        assert_eq!(vrf.last_request(), Some(1));
        assert!(vrf.take(1).is_some());
        assert_eq!(vrf.pending_count(), 0);
        assert_eq!(vrf.deliver_last(), None);
    }
}
