//! Загрузка таблиц эвалюатора батчами.
//!
//! Каждая таблица заливается батчами фиксированного размера; номер батча
//! обязан совпасть со следующим ожидаемым. Заполненная таблица закрывается
//! навсегда: повторная загрузка отклоняется. `finish` отдаёт неизменяемые
//! `EvaluatorTables`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

use super::errors::EvalError;
use super::lookup_tables::{EvaluatorTables, TableKind};

/// Один батч значений таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableBatch {
    pub kind: TableKind,
    pub batch_id: u32,
    pub values: Vec<u32>,
}

/// Состояние загрузки одной таблицы.
#[derive(Clone, Debug)]
struct TableSlot {
    kind: TableKind,
    batch_size: usize,
    next_batch: u32,
    data: Vec<u32>,
}

impl TableSlot {
    fn new(kind: TableKind, batch_size: usize) -> Self {
        Self {
            kind,
            batch_size,
            next_batch: 0,
            data: Vec::with_capacity(kind.len()),
        }
    }

    fn total_batches(&self) -> u32 {
        self.kind.len().div_ceil(self.batch_size) as u32
    }

    fn is_complete(&self) -> bool {
        self.next_batch == self.total_batches()
    }

    /// Сколько значений должно быть в батче `batch_id`.
    fn expected_len(&self, batch_id: u32) -> usize {
        let start = batch_id as usize * self.batch_size;
        self.batch_size.min(self.kind.len() - start)
    }
}

/// Загрузчик всех четырёх таблиц.
#[derive(Clone, Debug)]
pub struct TableUpload {
    owner: PlayerId,
    slots: HashMap<TableKind, TableSlot>,
}

impl TableUpload {
    /// `batch_size` – одинаковый для всех таблиц, минимум 1.
    pub fn new(owner: PlayerId, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        let slots = TableKind::ALL
            .iter()
            .map(|&kind| (kind, TableSlot::new(kind, batch_size)))
            .collect();
        Self { owner, slots }
    }

    /// Следующий ожидаемый номер батча для таблицы.
    pub fn next_batch(&self, kind: TableKind) -> u32 {
        self.slots.get(&kind).map_or(0, |s| s.next_batch)
    }

    pub fn is_complete(&self, kind: TableKind) -> bool {
        self.slots.get(&kind).map_or(false, |s| s.is_complete())
    }

    pub fn upload_batch(&mut self, caller: PlayerId, batch: TableBatch) -> Result<(), EvalError> {
        if caller != self.owner {
            return Err(EvalError::NotOwner);
        }
        let slot = self
            .slots
            .get_mut(&batch.kind)
            .ok_or(EvalError::TableIncomplete(batch.kind))?;

        if slot.is_complete() {
            return Err(EvalError::TableAlreadyLoaded(batch.kind));
        }
        if batch.batch_id != slot.next_batch {
            return Err(EvalError::BatchOutOfOrder {
                kind: batch.kind,
                expected: slot.next_batch,
                got: batch.batch_id,
            });
        }
        let expected = slot.expected_len(batch.batch_id);
        if batch.values.len() != expected {
            return Err(EvalError::BatchSizeMismatch {
                kind: batch.kind,
                batch_id: batch.batch_id,
                expected,
                got: batch.values.len(),
            });
        }

        slot.data.extend_from_slice(&batch.values);
        slot.next_batch += 1;
        tracing::debug!(
            table = ?batch.kind,
            batch_id = batch.batch_id,
            complete = slot.is_complete(),
            "evaluator table batch accepted"
        );
        Ok(())
    }

    /// Закрыть загрузку. Все таблицы должны быть заполнены.
    pub fn finish(mut self) -> Result<EvaluatorTables, EvalError> {
        for kind in TableKind::ALL {
            if !self.is_complete(kind) {
                return Err(EvalError::TableIncomplete(kind));
            }
        }
        let mut take = |kind: TableKind| {
            self.slots
                .remove(&kind)
                .map(|s| s.data)
                .unwrap_or_default()
        };
        let suits = take(TableKind::Suits);
        let flush = take(TableKind::Flush);
        let noflush = take(TableKind::NoFlush);
        let dp = take(TableKind::Dp);
        EvaluatorTables::from_raw(suits, flush, noflush, dp)
    }
}

impl EvaluatorTables {
    /// Разрезать таблицу на батчи для `TableUpload`.
    pub fn batches(&self, kind: TableKind, batch_size: usize) -> Vec<TableBatch> {
        let batch_size = batch_size.max(1);
        self.raw(kind)
            .chunks(batch_size)
            .enumerate()
            .map(|(i, chunk)| TableBatch {
                kind,
                batch_id: i as u32,
                values: chunk.to_vec(),
            })
            .collect()
    }
}
