use crate::domain::model::Piece;

pub const MIN_WEIGHT: f64 = 95.0;
pub const MAX_WEIGHT: f64 = 105.0;
pub const MIN_LENGTH: f64 = 10.0;
pub const MAX_LENGTH: f64 = 20.0;
/// Accepted colors, kept sorted for the rejection message.
pub const VALID_COLORS: [&str; 2] = ["azul", "verde"];

/// Result of checking one set of measurements against the quality rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub reasons: Vec<String>,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Fixed tolerance rules for weight (g), color and length (cm).
///
/// Every rule is checked; failing rules are reported in the order
/// weight, color, length.
pub struct QualityValidator;

impl QualityValidator {
    pub fn validate(weight: f64, color: &str, length: f64) -> Verdict {
        let mut reasons = Vec::new();

        if !Self::weight_ok(weight) {
            reasons.push(format!(
                "Peso fora do padrão ({}g - permitido: {}g a {}g)",
                weight, MIN_WEIGHT, MAX_WEIGHT
            ));
        }

        if !Self::color_ok(color) {
            reasons.push(format!(
                "Cor inválida ('{}' - permitidas: {})",
                color,
                VALID_COLORS.join(", ")
            ));
        }

        if !Self::length_ok(length) {
            reasons.push(format!(
                "Comprimento fora do padrão ({}cm - permitido: {}cm a {}cm)",
                length, MIN_LENGTH, MAX_LENGTH
            ));
        }

        Verdict { reasons }
    }

    /// Validates the piece and records the outcome on it.
    pub fn apply_validation(piece: &mut Piece) {
        let verdict = Self::validate(piece.weight, &piece.color, piece.length);

        if verdict.is_approved() {
            piece.approve();
        } else {
            tracing::info!(
                piece_id = %piece.id,
                reasons = %verdict.reasons.join("; "),
                "Piece rejected"
            );
            piece.reject(verdict.reasons);
        }
    }

    fn weight_ok(weight: f64) -> bool {
        (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
    }

    fn color_ok(color: &str) -> bool {
        let color = color.to_lowercase();
        VALID_COLORS.contains(&color.as_str())
    }

    fn length_ok(length: f64) -> bool {
        (MIN_LENGTH..=MAX_LENGTH).contains(&length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PieceStatus;
    use proptest::prelude::*;

    #[test]
    fn test_uppercase_color_is_approved() {
        let verdict = QualityValidator::validate(100.0, "AZUL", 15.0);
        assert!(verdict.is_approved());
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(QualityValidator::validate(95.0, "verde", 10.0).is_approved());
        assert!(QualityValidator::validate(105.0, "verde", 20.0).is_approved());
        assert!(!QualityValidator::validate(94.99, "verde", 15.0).is_approved());
        assert!(!QualityValidator::validate(100.0, "verde", 20.01).is_approved());
    }

    #[test]
    fn test_weight_and_length_failures_skip_valid_color() {
        let verdict = QualityValidator::validate(200.0, "azul", 5.0);
        assert_eq!(
            verdict.reasons,
            vec![
                "Peso fora do padrão (200g - permitido: 95g a 105g)".to_string(),
                "Comprimento fora do padrão (5cm - permitido: 10cm a 20cm)".to_string(),
            ]
        );
    }

    #[test]
    fn test_all_rules_fail_in_fixed_order() {
        let verdict = QualityValidator::validate(50.5, "Vermelho", 25.0);
        assert_eq!(verdict.reasons.len(), 3);
        assert!(verdict.reasons[0].starts_with("Peso fora do padrão (50.5g"));
        assert_eq!(
            verdict.reasons[1],
            "Cor inválida ('Vermelho' - permitidas: azul, verde)"
        );
        assert!(verdict.reasons[2].starts_with("Comprimento fora do padrão (25cm"));
    }

    #[test]
    fn test_nan_measurements_are_rejected() {
        let verdict = QualityValidator::validate(f64::NAN, "azul", f64::NAN);
        assert_eq!(verdict.reasons.len(), 2);
    }

    #[test]
    fn test_apply_validation_sets_status() {
        let mut good = Piece::new("P001", 100.0, "verde", 12.0);
        QualityValidator::apply_validation(&mut good);
        assert_eq!(good.status, PieceStatus::Approved);

        let mut bad = Piece::new("P002", 100.0, "amarelo", 12.0);
        QualityValidator::apply_validation(&mut bad);
        assert!(bad.is_rejected());
        assert_eq!(
            bad.rejection_reason().as_deref(),
            Some("Cor inválida ('amarelo' - permitidas: azul, verde)")
        );
    }

    #[test]
    fn test_apply_validation_clears_stale_reasons() {
        let mut piece = Piece::new("P001", 100.0, "azul", 15.0);
        piece.reject(vec!["stale".to_string()]);
        QualityValidator::apply_validation(&mut piece);
        assert!(piece.is_approved());
        assert!(piece.rejection_reasons().is_empty());
    }

    fn valid_color() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["azul", "verde", "AZUL", "Verde", "vErDe", "Azul"])
            .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn in_range_measurements_are_approved(
            weight in 95.0f64..=105.0,
            color in valid_color(),
            length in 10.0f64..=20.0,
        ) {
            prop_assert!(QualityValidator::validate(weight, &color, length).is_approved());
        }

        #[test]
        fn each_broken_rule_adds_one_reason(
            bad_weight in any::<bool>(),
            bad_color in any::<bool>(),
            bad_length in any::<bool>(),
            weight_offset in 0.5f64..500.0,
            length_offset in 0.5f64..500.0,
        ) {
            let weight = if bad_weight { MAX_WEIGHT + weight_offset } else { 100.0 };
            let color = if bad_color { "preto" } else { "verde" };
            let length = if bad_length { MIN_LENGTH - length_offset } else { 15.0 };

            let verdict = QualityValidator::validate(weight, color, length);
            let expected = [bad_weight, bad_color, bad_length].iter().filter(|b| **b).count();
            prop_assert_eq!(verdict.reasons.len(), expected);

            let mut idx = 0;
            if bad_weight {
                prop_assert!(verdict.reasons[idx].starts_with("Peso"));
                idx += 1;
            }
            if bad_color {
                prop_assert!(verdict.reasons[idx].starts_with("Cor"));
                idx += 1;
            }
            if bad_length {
                prop_assert!(verdict.reasons[idx].starts_with("Comprimento"));
            }
        }
    }
}
