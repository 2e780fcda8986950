use crate::app::command::{parse_custom_id, parse_measurement, parse_required_text, MenuCommand};
use crate::app::report::ReportGenerator;
use crate::core::plant::Plant;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::io::{BufRead, Write};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";
const BOX_PREVIEW: usize = 5;

/// Blocking request/response loop over any line-based input and output.
///
/// End of input is treated like choosing "Sair".
pub struct Menu<R: BufRead, W: Write> {
    plant: Plant,
    input: R,
    output: W,
    export_path: Option<String>,
    running: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(plant: Plant, input: R, output: W) -> Self {
        Self {
            plant,
            input,
            output,
            export_path: None,
            running: true,
        }
    }

    pub fn with_export_path(mut self, path: Option<String>) -> Self {
        self.export_path = path;
        self
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn into_plant(self) -> Plant {
        self.plant
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "FACTORYSENSE - Sistema de Controle de Qualidade")?;
        writeln!(self.output, "{}", RULE)?;

        while self.running {
            self.display_menu()?;

            let choice = match self.read_line("Escolha uma opção: ")? {
                Some(choice) => choice,
                None => {
                    self.exit_system()?;
                    break;
                }
            };
            if choice.trim().is_empty() {
                continue;
            }

            match choice.parse::<MenuCommand>() {
                Ok(command) => self.dispatch(command)?,
                Err(e) => {
                    tracing::debug!("Rejected menu input: {}", e);
                    writeln!(self.output, "  ⚠ {}", e.user_friendly_message())?;
                }
            }
        }

        Ok(())
    }

    pub fn dispatch(&mut self, command: MenuCommand) -> Result<()> {
        match command {
            MenuCommand::Register => self.register_piece(),
            MenuCommand::ListApproved => self.list_approved_pieces(),
            MenuCommand::ListRejected => self.list_rejected_pieces(),
            MenuCommand::Remove => self.remove_piece(),
            MenuCommand::ListClosedBoxes => self.list_closed_boxes(),
            MenuCommand::CurrentBoxStatus => self.show_current_box_status(),
            MenuCommand::Report => self.generate_final_report(),
            MenuCommand::Exit => self.exit_system(),
            MenuCommand::CloseCurrentBox => self.close_current_box(),
            MenuCommand::Export => self.export_data(),
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nMENU PRINCIPAL:")?;
        for command in MenuCommand::ALL {
            writeln!(self.output, "  {}. {}", command.key(), command.label())?;
        }
        writeln!(self.output, "{}", THIN_RULE)?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "\n{}", THIN_RULE)?;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}", THIN_RULE)?;
        Ok(())
    }

    /// Prints the prompt and reads one line. `None` on end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until `parse` accepts the line. `None` on end of input.
    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(line.as_str()) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(
                    self.output,
                    "  ⚠ {}. {}.",
                    e.user_friendly_message(),
                    e.recovery_suggestion()
                )?,
            }
        }
    }

    fn register_piece(&mut self) -> Result<()> {
        self.section("CADASTRAR NOVA PEÇA")?;

        let Some(raw_id) =
            self.read_line("  ID da peça (deixe vazio para gerar automaticamente): ")?
        else {
            return Ok(());
        };
        let custom_id = parse_custom_id(&raw_id);

        let Some(weight) =
            self.prompt_until("  Peso (em gramas): ", |s| parse_measurement("peso", s))?
        else {
            return Ok(());
        };
        let Some(color) = self.prompt_until("  Cor: ", |s| parse_required_text("cor", s))? else {
            return Ok(());
        };
        let Some(length) = self.prompt_until("  Comprimento (em cm): ", |s| {
            parse_measurement("comprimento", s)
        })?
        else {
            return Ok(());
        };

        let inspection = self
            .plant
            .inspect(weight, &color, length, custom_id.as_deref());
        let piece = &inspection.piece;

        writeln!(self.output, "\n  ✓ Peça {} cadastrada com sucesso!", piece.id)?;
        writeln!(self.output, "  Status: {}", piece.status.label().to_uppercase())?;

        if let Some(reason) = piece.rejection_reason() {
            writeln!(self.output, "  Motivo: {}", reason)?;
        } else if let Some(placement) = &inspection.placement {
            writeln!(
                self.output,
                "  ✓ Peça armazenada na caixa #{}",
                placement.box_id
            )?;
            writeln!(
                self.output,
                "  Ocupação: {}/{}",
                placement.fill, placement.capacity
            )?;
            if placement.box_closed {
                writeln!(
                    self.output,
                    "  ✓ Caixa #{} foi fechada (completa)!",
                    placement.box_id
                )?;
            }
        }

        Ok(())
    }

    fn list_approved_pieces(&mut self) -> Result<()> {
        self.section("PEÇAS APROVADAS")?;

        let approved = self.plant.registry().list_approved();
        if approved.is_empty() {
            writeln!(self.output, "  Nenhuma peça aprovada registrada.")?;
            return Ok(());
        }

        writeln!(self.output, "\n  Total: {} peça(s)\n", approved.len())?;
        for piece in &approved {
            writeln!(self.output, "  • {}", piece)?;
        }
        Ok(())
    }

    fn list_rejected_pieces(&mut self) -> Result<()> {
        self.section("PEÇAS REPROVADAS")?;

        let rejected = self.plant.registry().list_rejected();
        if rejected.is_empty() {
            writeln!(self.output, "  Nenhuma peça reprovada registrada.")?;
            return Ok(());
        }

        writeln!(self.output, "\n  Total: {} peça(s)\n", rejected.len())?;
        for piece in &rejected {
            writeln!(self.output, "  • {}", piece)?;
        }
        Ok(())
    }

    fn remove_piece(&mut self) -> Result<()> {
        self.section("REMOVER PEÇA")?;

        let all = self.plant.registry().list_all();
        if all.is_empty() {
            writeln!(self.output, "  Nenhuma peça registrada no sistema.")?;
            return Ok(());
        }

        writeln!(self.output, "\n  Peças cadastradas:")?;
        for piece in &all {
            writeln!(self.output, "  • {} - {}", piece.id, piece.status)?;
        }

        let Some(id) = self.prompt_until("\n  Digite o ID da peça a remover: ", |s| {
            parse_required_text("id", s)
        })?
        else {
            return Ok(());
        };

        if self.plant.registry_mut().remove(&id) {
            writeln!(self.output, "  ✓ Peça {} removida com sucesso!", id)?;
        } else {
            writeln!(self.output, "  ✗ Peça {} não encontrada.", id)?;
        }
        Ok(())
    }

    fn list_closed_boxes(&mut self) -> Result<()> {
        self.section("CAIXAS FECHADAS")?;

        let closed = self.plant.packer().closed_boxes();
        if closed.is_empty() {
            writeln!(self.output, "  Nenhuma caixa fechada no momento.")?;
            return Ok(());
        }

        writeln!(self.output, "\n  Total: {} caixa(s)\n", closed.len())?;
        for storage_box in &closed {
            writeln!(self.output, "  • {}", storage_box)?;
            let pieces = storage_box.pieces();
            if pieces.is_empty() {
                continue;
            }
            let preview: Vec<&str> = pieces
                .iter()
                .take(BOX_PREVIEW)
                .map(|p| p.id.as_str())
                .collect();
            write!(self.output, "    Peças: {}", preview.join(", "))?;
            if pieces.len() > BOX_PREVIEW {
                write!(self.output, " ... (+{})", pieces.len() - BOX_PREVIEW)?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn show_current_box_status(&mut self) -> Result<()> {
        self.section("STATUS DA CAIXA ATUAL")?;

        let Some(current) = self.plant.packer().current_box().cloned() else {
            writeln!(self.output, "  Nenhuma caixa em uso no momento.")?;
            return Ok(());
        };

        let status = if current.is_closed() { "FECHADA" } else { "ABERTA" };
        writeln!(self.output, "\n  Caixa: #{}", current.id())?;
        writeln!(self.output, "  Status: {}", status)?;
        writeln!(
            self.output,
            "  Ocupação: {}/{} peças",
            current.piece_count(),
            current.capacity()
        )?;
        writeln!(
            self.output,
            "  Espaço disponível: {} peça(s)",
            current.available_space()
        )?;

        if !current.pieces().is_empty() {
            writeln!(self.output, "\n  Peças armazenadas:")?;
            for piece in current.pieces() {
                writeln!(self.output, "    • {}", piece.id)?;
            }
        }
        Ok(())
    }

    fn close_current_box(&mut self) -> Result<()> {
        self.section("FECHAR CAIXA ATUAL")?;

        match self.plant.packer_mut().close_current_box() {
            Some(box_id) => writeln!(self.output, "  ✓ Caixa #{} fechada.", box_id)?,
            None => writeln!(self.output, "  Nenhuma caixa com peças para fechar.")?,
        }
        Ok(())
    }

    fn generate_final_report(&mut self) -> Result<()> {
        let report = ReportGenerator::new(&self.plant).summary_report();
        writeln!(self.output, "\n\n{}", report)?;
        Ok(())
    }

    fn export_data(&mut self) -> Result<()> {
        self.section("EXPORTAR DADOS")?;

        let path = match validate_required_field("report.export_path", &self.export_path) {
            Ok(path) => path.clone(),
            Err(e) => {
                writeln!(self.output, "  ✗ {}", e.user_friendly_message())?;
                return Ok(());
            }
        };

        match ReportGenerator::new(&self.plant).export_json(&path) {
            Ok(()) => writeln!(self.output, "  ✓ Dados exportados para {}", path)?,
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                writeln!(self.output, "  ✗ {}", e.user_friendly_message())?;
            }
        }
        Ok(())
    }

    fn exit_system(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "Encerrando FactorySense...")?;
        writeln!(self.output, "Obrigado por usar nosso sistema!")?;
        writeln!(self.output, "{}\n", RULE)?;
        self.running = false;
        Ok(())
    }
}
