// src/time_ctrl/mod.rs
//! Контроль времени раундов.
//!
//! Здесь собираем:
//! - правила (`TimeRules`);
//! - дедлайн раунда (`RoundClock`) и его фазы (`RoundPhase`).
//!
//! Часов внутри нет: текущее время всегда передаёт вызывающий (`now`),
//! так движок остаётся детерминированным.

pub mod clock;
pub mod time_rules;

pub use clock::{RoundClock, RoundPhase};
pub use time_rules::TimeRules;
