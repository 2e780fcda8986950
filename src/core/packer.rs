use crate::domain::model::{Piece, StorageBox, StorageStatistics, DEFAULT_BOX_CAPACITY};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;

const FIRST_BOX_ID: u32 = 1;

/// Packs approved pieces, in arrival order, into fixed-capacity boxes.
///
/// There is at most one current box. When it fills up it closes itself and
/// a fresh box becomes current straight away, so `current_box()` after a
/// fill points at an empty open box.
#[derive(Debug, Clone)]
pub struct BoxPacker {
    box_capacity: usize,
    boxes: Vec<StorageBox>,
    current: Option<usize>,
    next_box_id: u32,
}

impl Default for BoxPacker {
    fn default() -> Self {
        Self::unchecked(DEFAULT_BOX_CAPACITY)
    }
}

impl BoxPacker {
    pub fn new(box_capacity: usize) -> Result<Self> {
        validate_positive_number("storage.box_capacity", box_capacity, 1)?;
        Ok(Self::unchecked(box_capacity))
    }

    fn unchecked(box_capacity: usize) -> Self {
        Self {
            box_capacity,
            boxes: Vec::new(),
            current: None,
            next_box_id: FIRST_BOX_ID,
        }
    }

    pub fn box_capacity(&self) -> usize {
        self.box_capacity
    }

    /// Stores an approved piece. Returns `false` with no state change when
    /// the piece is not approved or the current box refuses it.
    pub fn store(&mut self, piece: &Piece) -> bool {
        self.place(piece).is_some()
    }

    /// Like [`store`](Self::store) but reports the id of the box the piece
    /// landed in.
    pub fn place(&mut self, piece: &Piece) -> Option<u32> {
        if !piece.is_approved() {
            return None;
        }

        let index = match self.current {
            Some(index) => index,
            None => self.open_new_box(),
        };

        let target = &mut self.boxes[index];
        if !target.add(piece.clone()) {
            return None;
        }

        let box_id = target.id();
        if target.is_full() {
            tracing::info!(box_id, pieces = target.piece_count(), "Box closed (full)");
            self.open_new_box();
        }

        Some(box_id)
    }

    /// Seals a partially filled current box and opens a new current box.
    /// Returns the sealed box id, or `None` when there is nothing to seal.
    pub fn close_current_box(&mut self) -> Option<u32> {
        let index = self.current?;
        let current = &mut self.boxes[index];
        if current.piece_count() == 0 || current.is_closed() {
            return None;
        }

        current.close();
        let box_id = current.id();
        tracing::info!(box_id, pieces = current.piece_count(), "Box closed manually");
        self.open_new_box();
        Some(box_id)
    }

    fn open_new_box(&mut self) -> usize {
        let new_box = StorageBox::new(self.next_box_id, self.box_capacity);
        tracing::info!(box_id = new_box.id(), capacity = self.box_capacity, "Box opened");
        self.next_box_id += 1;
        self.boxes.push(new_box);

        let index = self.boxes.len() - 1;
        self.current = Some(index);
        index
    }

    pub fn closed_boxes(&self) -> Vec<StorageBox> {
        self.boxes.iter().filter(|b| b.is_closed()).cloned().collect()
    }

    pub fn open_boxes(&self) -> Vec<StorageBox> {
        self.boxes.iter().filter(|b| !b.is_closed()).cloned().collect()
    }

    pub fn all_boxes(&self) -> Vec<StorageBox> {
        self.boxes.clone()
    }

    pub fn box_by_id(&self, id: u32) -> Option<&StorageBox> {
        self.boxes.iter().find(|b| b.id() == id)
    }

    pub fn current_box(&self) -> Option<&StorageBox> {
        self.current.map(|index| &self.boxes[index])
    }

    pub fn total_stored_pieces(&self) -> usize {
        self.boxes.iter().map(StorageBox::piece_count).sum()
    }

    pub fn statistics(&self) -> StorageStatistics {
        let closed_boxes = self.boxes.iter().filter(|b| b.is_closed()).count();
        let (current_box_fill, current_box_capacity) = self
            .current_box()
            .map(|b| (b.piece_count(), b.capacity()))
            .unwrap_or((0, 0));

        StorageStatistics {
            total_boxes: self.boxes.len(),
            closed_boxes,
            open_boxes: self.boxes.len() - closed_boxes,
            total_stored_pieces: self.total_stored_pieces(),
            current_box_fill,
            current_box_capacity,
        }
    }

    /// Drops every box and restarts box numbering at 1.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.current = None;
        self.next_box_id = FIRST_BOX_ID;
        tracing::info!("Box storage cleared");
    }
}
