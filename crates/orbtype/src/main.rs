use clap::{Parser, Subcommand};
use orbtype::config;
use orbtype::layout::PathId;
use orbtype::render;
use orbtype::showcase::Showcase;
use orbtype::sys::{SOCKET_PATH, runtime};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "orbtype", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render every path and the specimen sheet once.
    Render {
        /// Output directory (overrides `output_dir` from the config)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Render, then re-render on control commands and config changes.
    Watch {
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Send a control command to a running `watch`, e.g. `send weight path1 700`.
    Send {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Print radius, circumference, angle and weight readouts.
    Readout {
        /// Only this path
        path: Option<PathId>,
    },
    /// Write the default config file if none exists.
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    match cli.command {
        Commands::Render { out } => {
            let (showcase, out) = load(&config_path, out)?;
            let written = render::write_outputs(&showcase, &out, &showcase.all_dirty())?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Watch { out } => {
            let (showcase, out) = load(&config_path, out)?;
            render::write_outputs(&showcase, &out, &showcase.all_dirty())?;
            log::info!("Writing to {}", out.display());
            runtime::run(showcase, config_path, out)?;
            Ok(())
        }
        Commands::Send { command } => send_command(&command.join(" ")),
        Commands::Readout { path } => {
            let (showcase, _) = load(&config_path, None)?;
            print_readouts(&showcase, path);
            Ok(())
        }
        Commands::Init => {
            let path = config::write_default_config(&config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load(config_path: &Path, out: Option<PathBuf>) -> anyhow::Result<(Showcase, PathBuf)> {
    let config = config::load_or_default(config_path)?;
    let out = out.unwrap_or_else(|| config.output_dir.clone());
    Ok((Showcase::from_config(&config), out))
}

fn print_readouts(showcase: &Showcase, only: Option<PathId>) {
    for id in PathId::iter().filter(|id| only.is_none_or(|o| o == *id)) {
        let Some(layout) = showcase.layout_path(id) else {
            continue;
        };
        let control = showcase
            .weights
            .slider(id)
            .map(|s| s.value().to_string())
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{}: {} ({}), weight control {}, viewport {}",
            id,
            layout.weight,
            layout.weight.value(),
            control,
            layout.size
        );
        for (i, group) in layout.groups.iter().enumerate() {
            let r = group.readout;
            println!(
                "  group {}: radius {}, circumference {:.2}, angles {}..{}, {} glyphs",
                i + 1,
                r.radius,
                r.circumference,
                r.start_angle,
                r.end_angle,
                group.layout.glyphs.len()
            );
        }
    }

    if only.is_some() {
        return;
    }
    for specimen in &showcase.specimens {
        let languages: Vec<String> = showcase
            .translations
            .languages(&specimen.id)
            .iter()
            .map(|l| l.to_string())
            .collect();
        let alternates: Vec<String> = showcase
            .alternates
            .get(&specimen.element())
            .map(|set| set.iter().map(|a| a.to_string()).collect())
            .unwrap_or_default();
        println!(
            "{}: {} ({}), language {} of [{}], alternates [{}]",
            specimen.id,
            specimen.weight(),
            specimen.weight().value(),
            specimen.language.as_ref().map_or("-", |l| l.as_str()),
            languages.join(", "),
            alternates.join(", ")
        );
    }
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    // reject locally what the server would only log
    if let Err(e) = cmd.parse::<orbtype::events::AppEvent>() {
        anyhow::bail!("Invalid command '{}': {}", cmd, e);
    }

    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbtype at {}: {}. Is `orbtype watch` running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
