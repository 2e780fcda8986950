use crate::core::validator::QualityValidator;
use crate::domain::model::{Piece, QualityStatistics};
use std::collections::BTreeMap;

const FIRST_PIECE_NUMBER: u32 = 1;

/// In-memory register of inspected pieces, in registration order.
#[derive(Debug, Clone)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
    next_piece_number: u32,
}

impl Default for PieceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            next_piece_number: FIRST_PIECE_NUMBER,
        }
    }

    /// Registers and validates a piece, returning a copy of it.
    ///
    /// Without `custom_id` an id `P001`, `P002`, ... is generated. The
    /// sequence only advances on generated ids and never reuses a number,
    /// even after removals. Custom ids are not checked for uniqueness.
    pub fn register(
        &mut self,
        weight: f64,
        color: &str,
        length: f64,
        custom_id: Option<&str>,
    ) -> Piece {
        let id = match custom_id {
            Some(id) => {
                if self.get_by_id(id).is_some() {
                    tracing::warn!(piece_id = %id, "Duplicate piece id registered");
                }
                id.to_string()
            }
            None => {
                let id = format!("P{:03}", self.next_piece_number);
                self.next_piece_number += 1;
                id
            }
        };

        let mut piece = Piece::new(id, weight, color, length);
        QualityValidator::apply_validation(&mut piece);

        tracing::debug!(
            piece_id = %piece.id,
            status = %piece.status,
            "Piece registered"
        );

        self.pieces.push(piece.clone());
        piece
    }

    /// Removes the first piece with the given id.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.pieces.iter().position(|p| p.id == id) {
            Some(index) => {
                self.pieces.remove(index);
                tracing::debug!(piece_id = %id, "Piece removed");
                true
            }
            None => false,
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn list_all(&self) -> Vec<Piece> {
        self.pieces.clone()
    }

    pub fn list_approved(&self) -> Vec<Piece> {
        self.pieces.iter().filter(|p| p.is_approved()).cloned().collect()
    }

    pub fn list_rejected(&self) -> Vec<Piece> {
        self.pieces.iter().filter(|p| p.is_rejected()).cloned().collect()
    }

    pub fn statistics(&self) -> QualityStatistics {
        let total = self.pieces.len();
        let approved_count = self.pieces.iter().filter(|p| p.is_approved()).count();

        let mut rejected_count = 0;
        let mut rejection_reason_counts = BTreeMap::new();
        for piece in self.pieces.iter().filter(|p| p.is_rejected()) {
            rejected_count += 1;
            for reason in piece.rejection_reasons() {
                *rejection_reason_counts.entry(reason.clone()).or_insert(0) += 1;
            }
        }

        let approval_rate_percent = if total == 0 {
            0.0
        } else {
            approved_count as f64 / total as f64 * 100.0
        };

        QualityStatistics {
            total,
            approved_count,
            rejected_count,
            rejection_reason_counts,
            approval_rate_percent,
        }
    }

    /// Drops every piece and restarts the id sequence at `P001`.
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.next_piece_number = FIRST_PIECE_NUMBER;
        tracing::info!("Piece registry cleared");
    }
}
