use linera_sdk::views::{linera_views, MapView, RegisterView, RootView, ViewStorageContext};
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::config::ArenaConfig;
use crate::domain::{GameId, PlayerId, RequestId};
use crate::engine::events::EventLog;
use crate::engine::game_loop::Game;
use crate::engine::game_registry::PendingDeal;
use crate::engine::settlement::Ledger;

/// Снапшот арены: всё изменяемое состояние, кроме эвалюатора и внешних клиентов.
/// Из него `PokerArena::restore` поднимает арену обратно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArenaSnapshot {
    pub self_id: PlayerId,
    pub owner: PlayerId,
    pub config: ArenaConfig,
    pub games: Vec<Game>,
    pub pending_requests: Vec<(RequestId, PendingDeal)>,
    /// Id, который получит следующая игра.
    pub next_game_id: GameId,
    pub ledger: Ledger,
    pub dealers: Vec<PlayerId>,
    pub events: EventLog,
    pub request_nonce: u64,
}

/// Глобальное состояние арены на Linera.
///
/// Важное:
/// - НЕ вкладываем RegisterView внутрь MapView.
/// - Игры храним целиком (`Game` – обычная serde-структура).
#[derive(RootView)]
#[view(context = ViewStorageContext)]
pub struct PokerArenaState {
    /// Конфиг арены (лимиты, цены, делёж, оракул).
    #[view(register)]
    pub config: RegisterView<ArenaConfig>,

    #[view(register)]
    pub owner: RegisterView<PlayerId>,

    /// Живые игры. Ключ: GameId.
    #[view(map)]
    pub games: MapView<GameId, Game>,

    /// Неисполненные запросы случайности: RequestId -> (игра, раунд).
    #[view(map)]
    pub pending_requests: MapView<RequestId, PendingDeal>,

    /// Балансы к выводу по игрокам.
    #[view(map)]
    pub balances: MapView<PlayerId, Chips>,

    /// Накопленная доля дома.
    #[view(register)]
    pub house_balance: RegisterView<Chips>,

    /// Адреса с ролью дилера.
    #[view(map)]
    pub dealers: MapView<PlayerId, ()>,

    #[view(register)]
    pub next_game_id: RegisterView<GameId>,

    #[view(register)]
    pub request_nonce: RegisterView<u64>,
}
