use clap::Parser;
use vet_clinic::core::PersistenceConfig;
use vet_clinic::utils::{logger, validation::Validate};
use vet_clinic::{CliConfig, Clinic, ImportOutcome, LocalStorage, Menu};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 先驗證配置，日誌路徑不合法時不會建立任何檔案
    if let Err(e) = settings.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // 初始化日誌
    match &settings.log_file {
        Some(path) => logger::init_file_logger(path, settings.verbose)?,
        None => logger::init_cli_logger(settings.verbose),
    }

    tracing::info!("Starting vet-clinic");
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(settings.data_dir());
    let mut clinic = Clinic::new(storage, settings);

    // 啟動時載入先前匯出的資料
    match clinic.import_data() {
        ImportOutcome::Loaded(summary) => println!("{} pets loaded from previous data.", summary.pets),
        ImportOutcome::NoPriorData => println!("No previous data files were found."),
        ImportOutcome::Failure { reason } => eprintln!("❌ Error loading previous data: {}", reason),
    }

    let stdin = std::io::stdin();
    let mut menu = Menu::new(stdin.lock(), std::io::stdout());
    menu.run(&mut clinic)?;

    Ok(())
}
