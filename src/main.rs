use clap::Parser;
use seqrip::{
    Cli, OutputFormatter, OutputMode, SeqRip, SeqRipError, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let seqrip = match SeqRip::from_cli(&cli) {
        Ok(seqrip) => seqrip,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&seqrip);
    }

    match seqrip.rip_all() {
        Ok(report) => {
            seqrip.output_formatter().print_batch_report(&report);
            0
        }
        Err(e) => {
            seqrip.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &SeqRipError) -> i32 {
    match error {
        SeqRipError::Cancelled => 130, // Interrupted (SIGINT)
        SeqRipError::InputNotFound { .. } => 3,
        SeqRipError::InputUnreadable { .. } => 4,
        SeqRipError::OutputNotWritable { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "seqrip.toml".to_string());

    match SeqRip::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  seqrip --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(seqrip: &SeqRip) -> i32 {
    let formatter = seqrip.output_formatter();
    let config = seqrip.config();

    formatter.print_header("DRY RUN - no files will be read or written");

    let entries = match config.batch_entries() {
        Ok(entries) => entries,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };

    if formatter.mode() == OutputMode::Json {
        let plan = serde_json::json!({
            "type": "plan",
            "scan": config.scan,
            "entries": entries,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).unwrap_or_else(|_| "{}".to_string())
        );
        return 0;
    }

    println!("  Minimum length: {}", config.scan.min_length);
    println!("  Suffix:         {}", config.scan.suffix);
    if let Some(ref dir) = config.batch.output_directory {
        println!("  Output dir:     {}", dir.display());
    }
    formatter.print_separator();

    for entry in &entries {
        let marker = if entry.input.exists() { " " } else { "?" };
        println!(
            "{} {} -> {}",
            marker,
            entry.input.display(),
            entry.output.display()
        );
    }

    formatter.print_separator();
    0
}

fn print_startup_error(cli: &Cli, error: &SeqRipError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}
