use crate::core::plant::Plant;
use crate::domain::model::{Piece, QualityStatistics, StorageStatistics};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

const RULE: &str = "============================================================";

#[derive(Debug, Clone, Serialize)]
pub struct PieceLists {
    pub approved: Vec<Piece>,
    pub rejected: Vec<Piece>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsolidatedData {
    pub generated_at: DateTime<Utc>,
    pub quality: QualityStatistics,
    pub storage: StorageStatistics,
    pub pieces: PieceLists,
}

/// Read-only view over a plant that renders the final report.
pub struct ReportGenerator<'a> {
    plant: &'a Plant,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(plant: &'a Plant) -> Self {
        Self { plant }
    }

    pub fn summary_report(&self) -> String {
        let quality = self.plant.registry().statistics();
        let storage = self.plant.packer().statistics();

        let rejection_rate = if quality.total == 0 {
            0.0
        } else {
            quality.rejected_count as f64 / quality.total as f64 * 100.0
        };

        let mut lines = vec![
            RULE.to_string(),
            "RELATÓRIO FINAL - FACTORYSENSE".to_string(),
            "Sistema de Controle de Qualidade e Armazenamento".to_string(),
            RULE.to_string(),
            String::new(),
            "RESUMO DE PEÇAS:".to_string(),
            format!("  • Total de peças cadastradas: {}", quality.total),
            format!(
                "  • Peças aprovadas: {} ({:.1}%)",
                quality.approved_count, quality.approval_rate_percent
            ),
            format!(
                "  • Peças reprovadas: {} ({:.1}%)",
                quality.rejected_count, rejection_rate
            ),
            String::new(),
        ];

        if !quality.rejection_reason_counts.is_empty() {
            lines.push("MOTIVOS DE REPROVAÇÃO:".to_string());
            let mut reasons: Vec<_> = quality.rejection_reason_counts.iter().collect();
            // Most frequent first; ties by text so the output is stable.
            reasons.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (reason, count) in reasons {
                lines.push(format!("  • {}: {} peça(s)", reason, count));
            }
            lines.push(String::new());
        }

        lines.extend([
            "ARMAZENAMENTO:".to_string(),
            format!("  • Total de caixas utilizadas: {}", storage.total_boxes),
            format!("  • Caixas fechadas: {}", storage.closed_boxes),
            format!("  • Caixas abertas: {}", storage.open_boxes),
            format!(
                "  • Total de peças armazenadas: {}",
                storage.total_stored_pieces
            ),
        ]);

        if storage.current_box_fill > 0 {
            lines.push(format!(
                "  • Caixa atual: {}/{} peças",
                storage.current_box_fill, storage.current_box_capacity
            ));
        }

        lines.extend([String::new(), RULE.to_string()]);
        lines.join("\n")
    }

    pub fn consolidated_data(&self) -> ConsolidatedData {
        let registry = self.plant.registry();
        ConsolidatedData {
            generated_at: Utc::now(),
            quality: registry.statistics(),
            storage: self.plant.packer().statistics(),
            pieces: PieceLists {
                approved: registry.list_approved(),
                rejected: registry.list_rejected(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.consolidated_data())?)
    }

    /// Writes the consolidated data as pretty JSON, creating parent directories.
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!("Report exported to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plant() -> Plant {
        let mut plant = Plant::new(10).unwrap();
        plant.inspect(100.0, "azul", 15.0, None);
        plant.inspect(200.0, "vermelho", 5.0, None);
        plant.inspect(200.0, "azul", 15.0, None);
        plant
    }

    #[test]
    fn test_summary_report_sections() {
        let plant = sample_plant();
        let report = ReportGenerator::new(&plant).summary_report();

        assert!(report.contains("RELATÓRIO FINAL"));
        assert!(report.contains("RESUMO DE PEÇAS"));
        assert!(report.contains("  • Total de peças cadastradas: 3"));
        assert!(report.contains("  • Peças aprovadas: 1 (33.3%)"));
        assert!(report.contains("  • Peças reprovadas: 2 (66.7%)"));
        assert!(report.contains("  • Caixa atual: 1/10 peças"));
    }

    #[test]
    fn test_reasons_sorted_by_frequency() {
        let plant = sample_plant();
        let report = ReportGenerator::new(&plant).summary_report();

        let weight = report
            .find("Peso fora do padrão (200g - permitido: 95g a 105g): 2 peça(s)")
            .unwrap();
        let color = report.find("Cor inválida").unwrap();
        assert!(weight < color);
    }

    #[test]
    fn test_empty_plant_report() {
        let plant = Plant::default();
        let report = ReportGenerator::new(&plant).summary_report();
        assert!(report.contains("  • Peças aprovadas: 0 (0.0%)"));
        assert!(report.contains("  • Peças reprovadas: 0 (0.0%)"));
        assert!(!report.contains("MOTIVOS DE REPROVAÇÃO"));
        assert!(!report.contains("Caixa atual"));
    }

    #[test]
    fn test_json_export() {
        let plant = sample_plant();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("relatorio.json");

        ReportGenerator::new(&plant).export_json(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["quality"]["total"], 3);
        assert_eq!(value["storage"]["total_stored_pieces"], 1);
        assert_eq!(value["pieces"]["approved"][0]["id"], "P001");
        assert_eq!(value["pieces"]["rejected"].as_array().unwrap().len(), 2);
        assert!(value["generated_at"].is_string());
    }
}
