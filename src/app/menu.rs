use crate::core::clinic::Clinic;
use crate::core::persistence::{ExportOutcome, ImportOutcome};
use crate::domain::ports::{PersistenceConfig, Storage};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const SEPARATOR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RegisterPet,
    RegisterVisit,
    ListPets,
    ShowHistory,
    Export,
    Import,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::RegisterPet),
            "2" => Ok(MenuChoice::RegisterVisit),
            "3" => Ok(MenuChoice::ListPets),
            "4" => Ok(MenuChoice::ShowHistory),
            "5" => Ok(MenuChoice::Export),
            "6" => Ok(MenuChoice::Import),
            "7" => Ok(MenuChoice::Exit),
            other => Err(other.to_string()),
        }
    }
}

/// 文字選單；輸入結束 (EOF) 視為離開，但不做匯出
pub struct Menu<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run<S: Storage, C: PersistenceConfig>(
        &mut self,
        clinic: &mut Clinic<S, C>,
    ) -> io::Result<()> {
        tracing::info!("Application started");

        loop {
            self.print_options()?;
            let Some(line) = self.prompt("Select an option: ")? else {
                tracing::info!("Input closed, leaving without export");
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(other) => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    tracing::warn!("Invalid menu option selected: {}", other);
                    continue;
                }
            };

            let keep_going = match choice {
                MenuChoice::RegisterPet => self.register_pet(clinic)?,
                MenuChoice::RegisterVisit => self.register_visit(clinic)?,
                MenuChoice::ListPets => {
                    self.list_pets(clinic)?;
                    true
                }
                MenuChoice::ShowHistory => self.show_history(clinic)?,
                MenuChoice::Export => {
                    self.export(clinic)?;
                    true
                }
                MenuChoice::Import => {
                    self.import(clinic)?;
                    true
                }
                MenuChoice::Exit => {
                    self.export(clinic)?;
                    writeln!(self.output, "Thank you for using Amigos Peludos!")?;
                    tracing::info!("Application closed");
                    return Ok(());
                }
            };

            if !keep_going {
                tracing::info!("Input closed, leaving without export");
                return Ok(());
            }
        }
    }

    fn print_options(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Veterinary Clinic 'Amigos Peludos'")?;
        writeln!(self.output, "1. Register pet")?;
        writeln!(self.output, "2. Register visit")?;
        writeln!(self.output, "3. List pets")?;
        writeln!(self.output, "4. Show visit history")?;
        writeln!(self.output, "5. Export data")?;
        writeln!(self.output, "6. Import data")?;
        writeln!(self.output, "7. Exit")
    }

    /// 讀一行輸入，去掉行尾換行；`None` 表示輸入已結束
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// 依序讀取多個欄位，中途遇到 EOF 回傳 `None`
    fn prompt_all<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(N);
        for label in labels {
            match self.prompt(label)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn register_pet<S: Storage, C: PersistenceConfig>(
        &mut self,
        clinic: &mut Clinic<S, C>,
    ) -> io::Result<bool> {
        writeln!(self.output, "\n--- Register New Pet ---")?;
        let Some(pet) = self.prompt_all(["Pet name: ", "Species: ", "Breed: ", "Age: "])? else {
            return Ok(false);
        };

        let age = match pet[3].trim().parse::<i64>() {
            Ok(age) => age,
            Err(e) => {
                writeln!(self.output, "Error: age must be a whole number.")?;
                tracing::error!("Failed to register pet '{}': invalid age '{}': {}", pet[0], pet[3], e);
                return Ok(true);
            }
        };
        if age < 0 {
            writeln!(self.output, "Error: Age cannot be negative.")?;
            tracing::error!("Failed to register pet '{}': negative age {}", pet[0], age);
            return Ok(true);
        }

        writeln!(self.output, "\n--- Owner Details ---")?;
        let Some(owner) = self.prompt_all(["Owner name: ", "Phone: ", "Address: "])? else {
            return Ok(false);
        };

        match clinic.register_pet(&pet[0], &pet[1], &pet[2], age, &owner[0], &owner[1], &owner[2]) {
            Ok(registered) => {
                writeln!(self.output, "\nPet '{}' registered successfully.", registered.name())?
            }
            Err(e) => writeln!(self.output, "Error: {}", e.user_friendly_message())?,
        }
        Ok(true)
    }

    fn register_visit<S: Storage, C: PersistenceConfig>(
        &mut self,
        clinic: &mut Clinic<S, C>,
    ) -> io::Result<bool> {
        writeln!(self.output, "\n--- Register Visit ---")?;
        let Some(pet_name) = self.prompt("Pet name: ")? else {
            return Ok(false);
        };

        // 先確認寵物存在再詢問其餘欄位
        if clinic.find_pet(&pet_name).is_err() {
            writeln!(self.output, "Error: pet not found.")?;
            return Ok(true);
        }

        let Some(visit) =
            self.prompt_all(["Visit date (DD/MM/YYYY): ", "Reason for visit: ", "Diagnosis: "])?
        else {
            return Ok(false);
        };

        match clinic.register_visit(&pet_name, &visit[0], &visit[1], &visit[2]) {
            Ok(()) => writeln!(self.output, "\nVisit registered for {}.", pet_name)?,
            Err(e) => writeln!(self.output, "Error: {}", e.user_friendly_message())?,
        }
        Ok(true)
    }

    fn list_pets<S: Storage, C: PersistenceConfig>(&mut self, clinic: &Clinic<S, C>) -> io::Result<()> {
        writeln!(self.output, "\n--- Registered Pets ---")?;
        let pets = clinic.list_pets();
        if pets.is_empty() {
            return writeln!(self.output, "No pets registered.");
        }

        for pet in pets {
            writeln!(self.output, "{}", pet)?;
            writeln!(self.output, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    fn show_history<S: Storage, C: PersistenceConfig>(
        &mut self,
        clinic: &Clinic<S, C>,
    ) -> io::Result<bool> {
        writeln!(self.output, "\n--- Visit History ---")?;
        let Some(pet_name) = self.prompt("Pet name: ")? else {
            return Ok(false);
        };

        match clinic.get_history(&pet_name) {
            Ok(history) => writeln!(self.output, "{}", history)?,
            Err(_) => writeln!(self.output, "Error: pet not found.")?,
        }
        Ok(true)
    }

    fn export<S: Storage, C: PersistenceConfig>(&mut self, clinic: &Clinic<S, C>) -> io::Result<()> {
        match clinic.export_data() {
            ExportOutcome::Success(summary) => writeln!(
                self.output,
                "Data saved: {} pets to '{}' and '{}'.",
                summary.pets,
                summary.pets_path.display(),
                summary.visits_path.display()
            ),
            ExportOutcome::Failure { .. } => writeln!(self.output, "Error saving data."),
        }
    }

    fn import<S: Storage, C: PersistenceConfig>(&mut self, clinic: &mut Clinic<S, C>) -> io::Result<()> {
        match clinic.import_data() {
            ImportOutcome::Loaded(summary) => {
                writeln!(self.output, "Data loaded: {} pets.", summary.pets)?;
                if summary.skipped_rows > 0 {
                    writeln!(self.output, "{} invalid rows were skipped.", summary.skipped_rows)?;
                }
                Ok(())
            }
            ImportOutcome::NoPriorData => {
                writeln!(self.output, "No previous data files were found.")
            }
            ImportOutcome::Failure { .. } => writeln!(self.output, "Error loading data."),
        }
    }
}
