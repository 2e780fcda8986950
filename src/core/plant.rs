use crate::core::packer::BoxPacker;
use crate::core::registry::PieceRegistry;
use crate::domain::model::Piece;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// Where an approved piece ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub box_id: u32,
    pub fill: usize,
    pub capacity: usize,
    pub box_closed: bool,
}

#[derive(Debug, Clone)]
pub struct Inspection {
    pub piece: Piece,
    pub placement: Option<Placement>,
}

/// Quality station and storage line working together: every registered
/// piece is inspected and approved ones go straight into a box.
#[derive(Debug, Clone, Default)]
pub struct Plant {
    registry: PieceRegistry,
    packer: BoxPacker,
}

impl Plant {
    pub fn new(box_capacity: usize) -> Result<Self> {
        Ok(Self {
            registry: PieceRegistry::new(),
            packer: BoxPacker::new(box_capacity)?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.box_capacity())
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PieceRegistry {
        &mut self.registry
    }

    pub fn packer(&self) -> &BoxPacker {
        &self.packer
    }

    pub fn packer_mut(&mut self) -> &mut BoxPacker {
        &mut self.packer
    }

    pub fn inspect(
        &mut self,
        weight: f64,
        color: &str,
        length: f64,
        custom_id: Option<&str>,
    ) -> Inspection {
        let piece = self.registry.register(weight, color, length, custom_id);

        let placement = self.packer.place(&piece).and_then(|box_id| {
            self.packer.box_by_id(box_id).map(|b| Placement {
                box_id,
                fill: b.piece_count(),
                capacity: b.capacity(),
                box_closed: b.is_closed(),
            })
        });

        Inspection { piece, placement }
    }

    pub fn clear(&mut self) {
        self.registry.clear();
        self.packer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_piece_is_not_stored() {
        let mut plant = Plant::new(3).unwrap();
        let inspection = plant.inspect(200.0, "azul", 5.0, None);
        assert!(inspection.piece.is_rejected());
        assert!(inspection.placement.is_none());
        assert_eq!(plant.packer().total_stored_pieces(), 0);
    }

    #[test]
    fn test_placement_reports_the_box_that_closed() {
        let mut plant = Plant::new(2).unwrap();
        let first = plant.inspect(100.0, "azul", 15.0, None);
        assert_eq!(
            first.placement,
            Some(Placement {
                box_id: 1,
                fill: 1,
                capacity: 2,
                box_closed: false
            })
        );

        let second = plant.inspect(100.0, "verde", 15.0, None);
        assert_eq!(
            second.placement,
            Some(Placement {
                box_id: 1,
                fill: 2,
                capacity: 2,
                box_closed: true
            })
        );
        assert_eq!(plant.packer().current_box().unwrap().id(), 2);
    }

    #[test]
    fn test_removal_keeps_boxed_copy() {
        let mut plant = Plant::new(5).unwrap();
        plant.inspect(100.0, "azul", 15.0, None);
        assert!(plant.registry_mut().remove("P001"));
        assert_eq!(plant.packer().total_stored_pieces(), 1);
        assert_eq!(plant.packer().all_boxes()[0].pieces()[0].id, "P001");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut plant = Plant::new(1).unwrap();
        plant.inspect(100.0, "azul", 15.0, None);
        plant.clear();
        assert!(plant.registry().is_empty());
        assert!(plant.packer().all_boxes().is_empty());
        let again = plant.inspect(100.0, "azul", 15.0, None);
        assert_eq!(again.piece.id, "P001");
        assert_eq!(again.placement.unwrap().box_id, 1);
    }
}
