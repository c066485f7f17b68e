//! husk-submit CLI - Submit USD scenes to Deadline as husk render jobs
//!
//! Usage: husk-submit <COMMAND>
//!
//! Commands:
//!   submit   Submit one job per USD file
//!   inspect  Show passes, settings and outputs of a scene
//!   render   Render one task on a worker
//!   options  Write the plugin .param/.options files
//!   install  Install the plugin files into the farm repository

use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Submit(_) => "submit",
        Commands::Inspect { .. } => "inspect",
        Commands::Render { .. } => "render",
        Commands::Options { .. } => "options",
        Commands::Install => "install",
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let verbose = cli.verbose;
    let config = cli.config.as_deref();
    let name = command_name(&cli.command);

    let result = match cli.command {
        Commands::Submit(args) => commands::submit::cmd_submit(args, config, json, verbose),
        Commands::Inspect {
            file,
            pass,
            settings,
            output,
            frames,
        } => commands::inspect::cmd_inspect(
            &file,
            pass.as_deref(),
            settings.as_deref(),
            output.as_deref(),
            frames,
            config,
            json,
            verbose,
        ),
        Commands::Render {
            plugin_info,
            start,
            end,
            gpus,
        } => commands::render::cmd_render(plugin_info, start, end, gpus, config, json, verbose),
        Commands::Options { output_dir } => {
            commands::options::cmd_options(&output_dir, config, json, verbose)
        }
        Commands::Install => commands::options::cmd_install(config, json, verbose),
    };

    if let Err(err) = result {
        ui::error::print_error(&err, name, json);
        std::process::exit(1);
    }
}
