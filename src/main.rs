/// DatasetTagger entry point: a terminal session over stdin/stdout.
///
/// Usage: `dataset-tagger [BASE_FOLDER [IMAGE_FOLDER]]`
fn main() {
    use dataset_tagger::config::AppConfig;

    let mut config = AppConfig::load_from_default_path().unwrap_or_default();

    // RUST_LOG overrides the configured level
    let _ = env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
    log::debug!(
        "Configured log level: {}",
        config.preferences.log_level.name()
    );

    if let Err(e) = run(&mut config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.save_to_default_path() {
        log::warn!("Failed to save configuration: {}", e);
    }
}

fn run(config: &mut dataset_tagger::config::AppConfig) -> std::io::Result<()> {
    use std::io::IsTerminal;
    use std::path::PathBuf;

    use dataset_tagger::Session;
    use dataset_tagger::shell::{Command, Shell};

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let base = args.next();
    let images = args.next();

    let prefs = &config.preferences;
    if base.is_none() && !prefs.last_base_folder.as_os_str().is_empty() {
        println!("last base folder: {}", prefs.last_base_folder.display());
    }
    if images.is_none() && !prefs.last_image_folder.as_os_str().is_empty() {
        println!("last image folder: {}", prefs.last_image_folder.display());
    }

    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut shell = Shell::new(Session::new(), stdout.lock(), color);

    shell.execute(Command::Help)?;
    if let Some(base) = base {
        shell.execute(Command::Base(Some(base)))?;
    }
    if let Some(images) = images {
        shell.execute(Command::Images(images))?;
    }

    shell.run(std::io::stdin().lock())?;

    let session = shell.session();
    if !session.base_folder().as_os_str().is_empty() {
        config.preferences.last_base_folder = session.base_folder().to_path_buf();
    }
    if !session.image_folder().as_os_str().is_empty() {
        config.preferences.last_image_folder = session.image_folder().to_path_buf();
    }
    Ok(())
}
