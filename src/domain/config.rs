//! Конфигурация арены: лимиты, цены раундов, делёж банка, параметры оракула.
//!
//! Конфиг – обычная serde-структура: его можно собрать в коде, взять
//! `ArenaConfig::default()` или прочитать из JSON (`ArenaConfig::from_json`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::engine::events::DEFAULT_EVENT_LOG_CAPACITY;

/// Ошибки валидации конфига.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_games must be positive")]
    ZeroMaxGames,

    #[error("round_seconds must be positive")]
    ZeroRoundSeconds,

    #[error("round prices must be positive")]
    ZeroPrice,

    #[error("house cut {0} bps exceeds 10000")]
    HouseCutTooLarge(u32),

    #[error("winner {winner}% + runner-up {runner_up}% exceeds 100%")]
    SplitTooLarge { winner: u8, runner_up: u8 },

    #[error("event_log_capacity must be positive")]
    ZeroEventLogCapacity,

    #[error("config parse error: {0}")]
    Parse(String),
}

/// Как делится банк после шоудауна.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitConfig {
    /// Комиссия дома в базисных пунктах (1/10000).
    pub house_cut_bps: u32,
    /// Доля победителей (в процентах от банка после комиссии).
    pub winner_pct: u8,
    /// Доля остальных игроков лидерборда.
    pub runner_up_pct: u8,
}

impl SplitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.house_cut_bps > 10_000 {
            return Err(ConfigError::HouseCutTooLarge(self.house_cut_bps));
        }
        if self.winner_pct as u16 + self.runner_up_pct as u16 > 100 {
            return Err(ConfigError::SplitTooLarge {
                winner: self.winner_pct,
                runner_up: self.runner_up_pct,
            });
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            house_cut_bps: 500,
            winner_pct: 80,
            runner_up_pct: 20,
        }
    }
}

/// Параметры внешнего источника случайности.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OracleConfig {
    /// Ключ, под которым оракул подписывает значения.
    pub key_hash: [u8; 32],
    /// Плата оракулу за один запрос.
    pub fee: Chips,
    /// Единственный адрес, которому разрешён `fulfill_randomness`.
    pub coordinator: PlayerId,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            key_hash: [0u8; 32],
            fee: Chips::ZERO,
            coordinator: 0,
        }
    }
}

/// Общий конфиг арены.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Максимум одновременно живых игр.
    pub max_games: u32,
    /// Длина раунда по умолчанию (секунды) для `start`.
    pub round_seconds: u64,
    /// Взнос за NFT в раунде флопа.
    pub flop_price: Chips,
    /// Взнос за NFT в раунде тёрна.
    pub turn_price: Chips,
    /// Сколько секунд после дедлайна раунда игра ещё не считается зависшей.
    ///
    /// Между концом раунда и `request_deal` дилера игра законно стоит;
    /// без запаса любой мог бы перевести её в возвраты в этом окне.
    /// 0 = зависла сразу по дедлайну.
    pub stale_grace_seconds: u64,
    pub split: SplitConfig,
    pub oracle: OracleConfig,
    /// Сколько последних уведомлений хранит журнал событий (и снапшот).
    #[serde(default = "default_event_log_capacity")]
    pub event_log_capacity: usize,
}

fn default_event_log_capacity() -> usize {
    DEFAULT_EVENT_LOG_CAPACITY
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            max_games: 5,
            round_seconds: 600,
            flop_price: Chips(10_000),
            turn_price: Chips(20_000),
            stale_grace_seconds: 3_600,
            split: SplitConfig::default(),
            oracle: OracleConfig::default(),
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_games == 0 {
            return Err(ConfigError::ZeroMaxGames);
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::ZeroRoundSeconds);
        }
        if self.flop_price.is_zero() || self.turn_price.is_zero() {
            return Err(ConfigError::ZeroPrice);
        }
        if self.event_log_capacity == 0 {
            return Err(ConfigError::ZeroEventLogCapacity);
        }
        self.split.validate()
    }

    /// Прочитать и провалидировать конфиг из JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ArenaConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> String {
        // Сериализация plain-структуры без map-ключей не может упасть.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
