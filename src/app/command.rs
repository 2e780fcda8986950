use crate::utils::error::{FactoryError, Result};
use std::str::FromStr;

/// One menu choice, parsed before anything reaches the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Register,
    ListApproved,
    ListRejected,
    Remove,
    ListClosedBoxes,
    CurrentBoxStatus,
    Report,
    Exit,
    CloseCurrentBox,
    Export,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 10] = [
        MenuCommand::Register,
        MenuCommand::ListApproved,
        MenuCommand::ListRejected,
        MenuCommand::Remove,
        MenuCommand::ListClosedBoxes,
        MenuCommand::CurrentBoxStatus,
        MenuCommand::Report,
        MenuCommand::Exit,
        MenuCommand::CloseCurrentBox,
        MenuCommand::Export,
    ];

    pub fn key(self) -> char {
        match self {
            MenuCommand::Register => '1',
            MenuCommand::ListApproved => '2',
            MenuCommand::ListRejected => '3',
            MenuCommand::Remove => '4',
            MenuCommand::ListClosedBoxes => '5',
            MenuCommand::CurrentBoxStatus => '6',
            MenuCommand::Report => '7',
            MenuCommand::Exit => '8',
            MenuCommand::CloseCurrentBox => '9',
            MenuCommand::Export => '0',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Register => "Cadastrar nova peça",
            MenuCommand::ListApproved => "Listar peças aprovadas",
            MenuCommand::ListRejected => "Listar peças reprovadas",
            MenuCommand::Remove => "Remover peça",
            MenuCommand::ListClosedBoxes => "Listar caixas fechadas",
            MenuCommand::CurrentBoxStatus => "Status da caixa atual",
            MenuCommand::Report => "Gerar relatório final",
            MenuCommand::Exit => "Sair",
            MenuCommand::CloseCurrentBox => "Fechar caixa atual",
            MenuCommand::Export => "Exportar dados (JSON)",
        }
    }
}

impl FromStr for MenuCommand {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        MenuCommand::ALL
            .iter()
            .copied()
            .find(|cmd| {
                let mut chars = trimmed.chars();
                chars.next() == Some(cmd.key()) && chars.next().is_none()
            })
            .ok_or_else(|| FactoryError::InvalidCommand {
                input: trimmed.to_string(),
            })
    }
}

/// Parses a weight or length typed by the operator. A decimal comma is accepted.
pub fn parse_measurement(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FactoryError::InputError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Entrada não pode ser vazia".to_string(),
        });
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| FactoryError::InputError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Digite um número válido".to_string(),
        })?;

    if !value.is_finite() {
        return Err(FactoryError::InputError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Digite um número finito".to_string(),
        });
    }

    Ok(value)
}

pub fn parse_required_text(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FactoryError::InputError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Entrada não pode ser vazia".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Empty means "generate an id".
pub fn parse_custom_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_command_key() {
        for cmd in MenuCommand::ALL {
            let parsed: MenuCommand = cmd.key().to_string().parse().unwrap();
            assert_eq!(parsed, cmd);
        }
        assert_eq!(" 7 \n".parse::<MenuCommand>().unwrap(), MenuCommand::Report);
    }

    #[test]
    fn test_unknown_commands() {
        for raw in ["", "10", "x", "11", "-1"] {
            assert!(matches!(
                raw.parse::<MenuCommand>(),
                Err(FactoryError::InvalidCommand { .. })
            ));
        }
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("peso", "100").unwrap(), 100.0);
        assert_eq!(parse_measurement("peso", " 99.5 ").unwrap(), 99.5);
        assert_eq!(parse_measurement("peso", "12,25").unwrap(), 12.25);
        assert!(parse_measurement("peso", "").is_err());
        assert!(parse_measurement("peso", "abc").is_err());
        assert!(parse_measurement("peso", "inf").is_err());
        assert!(parse_measurement("peso", "NaN").is_err());
    }

    #[test]
    fn test_parse_text_fields() {
        assert_eq!(parse_required_text("cor", "  Azul ").unwrap(), "Azul");
        assert!(parse_required_text("cor", "   ").is_err());
        assert_eq!(parse_custom_id(" X-1 "), Some("X-1".to_string()));
        assert_eq!(parse_custom_id(""), None);
    }
}
