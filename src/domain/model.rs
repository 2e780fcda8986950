use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_BOX_CAPACITY: usize = 10;

/// Inspection outcome of a piece. Rejected pieces always carry at least one reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceStatus {
    Pending,
    Approved,
    Rejected(Vec<String>),
}

impl PieceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PieceStatus::Pending => "pendente",
            PieceStatus::Approved => "aprovada",
            PieceStatus::Rejected(_) => "reprovada",
        }
    }
}

impl fmt::Display for PieceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub weight: f64,
    pub color: String,
    pub length: f64,
    pub status: PieceStatus,
}

impl Piece {
    /// Creates a pending piece. The color is stored lowercased.
    pub fn new(id: impl Into<String>, weight: f64, color: &str, length: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            color: color.to_lowercase(),
            length,
            status: PieceStatus::Pending,
        }
    }

    pub fn approve(&mut self) {
        self.status = PieceStatus::Approved;
    }

    /// Marks the piece rejected. An empty reason list is ignored so a
    /// rejected piece can never be reason-less.
    pub fn reject(&mut self, reasons: Vec<String>) {
        if reasons.is_empty() {
            return;
        }
        self.status = PieceStatus::Rejected(reasons);
    }

    pub fn is_approved(&self) -> bool {
        matches!(self.status, PieceStatus::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.status, PieceStatus::Rejected(_))
    }

    pub fn rejection_reasons(&self) -> &[String] {
        match &self.status {
            PieceStatus::Rejected(reasons) => reasons,
            _ => &[],
        }
    }

    /// Reasons joined with `"; "`, or `None` when the piece is not rejected.
    pub fn rejection_reason(&self) -> Option<String> {
        match &self.status {
            PieceStatus::Rejected(reasons) => Some(reasons.join("; ")),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}g, {}, {}cm - {}",
            self.id,
            self.weight,
            self.color,
            self.length,
            self.status.label().to_uppercase()
        )?;
        if let Some(reason) = self.rejection_reason() {
            write!(f, " - {}", reason)?;
        }
        Ok(())
    }
}

/// Fixed-capacity container of approved pieces. Closing is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageBox {
    id: u32,
    capacity: usize,
    pieces: Vec<Piece>,
    closed: bool,
}

impl StorageBox {
    pub fn new(id: u32, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            pieces: Vec::new(),
            closed: false,
        }
    }

    /// Appends an approved piece. Closes the box once it reaches capacity.
    /// Returns `false` without changes if the box is full, closed, or the
    /// piece is not approved.
    pub fn add(&mut self, piece: Piece) -> bool {
        if self.is_full() || self.closed || !piece.is_approved() {
            return false;
        }

        self.pieces.push(piece);

        if self.is_full() {
            self.close();
        }

        true
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_full(&self) -> bool {
        self.pieces.len() >= self.capacity
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn available_space(&self) -> usize {
        self.capacity.saturating_sub(self.pieces.len())
    }
}

impl fmt::Display for StorageBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.closed { "FECHADA" } else { "ABERTA" };
        write!(
            f,
            "Caixa #{}: {}/{} peças - {}",
            self.id,
            self.pieces.len(),
            self.capacity,
            status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStatistics {
    pub total: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub rejection_reason_counts: BTreeMap<String, usize>,
    pub approval_rate_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStatistics {
    pub total_boxes: usize,
    pub closed_boxes: usize,
    pub open_boxes: usize,
    pub total_stored_pieces: usize,
    pub current_box_fill: usize,
    pub current_box_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved(id: &str) -> Piece {
        let mut piece = Piece::new(id, 100.0, "verde", 15.0);
        piece.approve();
        piece
    }

    #[test]
    fn test_piece_creation_normalizes_color() {
        let piece = Piece::new("P001", 100.0, "AZUL", 15.0);
        assert_eq!(piece.id, "P001");
        assert_eq!(piece.color, "azul");
        assert_eq!(piece.status, PieceStatus::Pending);
        assert!(!piece.is_approved());
        assert!(!piece.is_rejected());
    }

    #[test]
    fn test_reject_then_approve_clears_reasons() {
        let mut piece = Piece::new("P001", 200.0, "azul", 15.0);
        piece.reject(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(piece.rejection_reason().as_deref(), Some("a; b"));

        piece.approve();
        assert!(piece.rejection_reasons().is_empty());
        assert!(piece.rejection_reason().is_none());
    }

    #[test]
    fn test_reject_with_no_reasons_is_ignored() {
        let mut piece = Piece::new("P001", 100.0, "azul", 15.0);
        piece.reject(Vec::new());
        assert_eq!(piece.status, PieceStatus::Pending);
    }

    #[test]
    fn test_piece_display() {
        let piece = approved("P007");
        assert_eq!(piece.to_string(), "[P007] 100g, verde, 15cm - APROVADA");

        let mut bad = Piece::new("P008", 100.5, "roxo", 15.0);
        bad.reject(vec!["Cor inválida".to_string()]);
        assert_eq!(
            bad.to_string(),
            "[P008] 100.5g, roxo, 15cm - REPROVADA - Cor inválida"
        );
    }

    #[test]
    fn test_box_auto_closes_at_capacity() {
        let mut storage_box = StorageBox::new(1, 3);
        for i in 1..=3 {
            assert!(!storage_box.is_closed());
            assert!(storage_box.add(approved(&format!("P{:03}", i))));
        }
        assert!(storage_box.is_full());
        assert!(storage_box.is_closed());
        assert_eq!(storage_box.available_space(), 0);
        assert!(!storage_box.add(approved("P004")));
        assert_eq!(storage_box.piece_count(), 3);
    }

    #[test]
    fn test_box_rejects_unapproved_piece() {
        let mut storage_box = StorageBox::new(1, 3);
        assert!(!storage_box.add(Piece::new("P001", 100.0, "azul", 15.0)));
        assert_eq!(storage_box.piece_count(), 0);
    }

    #[test]
    fn test_closed_box_refuses_pieces() {
        let mut storage_box = StorageBox::new(2, 5);
        assert!(storage_box.add(approved("P001")));
        storage_box.close();
        assert!(!storage_box.add(approved("P002")));
        assert_eq!(storage_box.piece_count(), 1);
        assert_eq!(storage_box.to_string(), "Caixa #2: 1/5 peças - FECHADA");
    }
}
