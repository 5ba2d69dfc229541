//! TOAW CLI - Command-line tool for TOAW scenario files.
//!
//! Decodes a scenario (or a previously exported JSON document) and renders
//! it, exports it or prints a summary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use toaw::prelude::*;

/// TOAW - scenario map renderer and exporter
#[derive(Parser)]
#[command(name = "toaw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario file, or a JSON document ending in .json
    #[arg(short, long, env = "TOAW_INPUT")]
    input: PathBuf,

    /// Output file (defaults to output.png or output.json)
    #[arg(short, long, env = "TOAW_OUTPUT")]
    output: Option<PathBuf>,

    /// What to do with the scenario
    #[arg(short, long, value_enum, default_value_t = Mode::Draw)]
    mode: Mode,

    /// TrueType/OpenType font for location names (markers without one)
    #[arg(long, env = "TOAW_FONT")]
    font: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Render the map to a PNG image
    Draw,
    /// Export the decoded scenario as JSON
    #[value(name = "exportjson")]
    ExportJson,
    /// Print the header, grid size and teams
    Info,
}

impl Mode {
    fn default_output(self) -> Option<&'static str> {
        match self {
            Mode::Draw => Some("output.png"),
            Mode::ExportJson => Some("output.json"),
            Mode::Info => None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let scenario = load(&cli.input)?;
    let output = cli
        .output
        .or_else(|| cli.mode.default_output().map(PathBuf::from));

    match (cli.mode, output) {
        (Mode::Draw, Some(output)) => cmd_draw(&scenario, &output, cli.font.as_deref())?,
        (Mode::ExportJson, Some(output)) => cmd_export_json(&scenario, &output)?,
        _ => print_info(&scenario),
    }

    Ok(())
}

fn is_json_input(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load(input: &Path) -> Result<Scenario> {
    let start = Instant::now();

    let scenario = if is_json_input(input) {
        println!("Importing JSON: {}", input.display());
        import_json(input)
            .with_context(|| format!("Failed to import JSON document {}", input.display()))?
    } else {
        println!("Reading scenario: {}", input.display());
        Scenario::open(input)
            .with_context(|| format!("Failed to decode scenario {}", input.display()))?
    };

    info!(
        layout = ?scenario.layout,
        version = %format!("{:#x}", scenario.version),
        elapsed = ?start.elapsed(),
        "loaded scenario"
    );
    Ok(scenario)
}

fn render_options(font: Option<&Path>) -> Result<RenderOptions> {
    let font = font
        .map(|path| {
            LabelFont::from_file(path)
                .with_context(|| format!("Failed to load font {}", path.display()))
        })
        .transpose()?;

    Ok(RenderOptions {
        font,
        ..RenderOptions::default()
    })
}

fn cmd_draw(scenario: &Scenario, output: &Path, font: Option<&Path>) -> Result<()> {
    let options = render_options(font)?;

    println!(
        "Rendering map: {}x{} tiles",
        scenario.width(),
        scenario.height()
    );

    let start = Instant::now();
    render_to_file(scenario, &options, output)
        .with_context(|| format!("Failed to render map to {}", output.display()))?;

    print_groups(scenario);
    info!(path = %output.display(), elapsed = ?start.elapsed(), "saved image");
    Ok(())
}

fn cmd_export_json(scenario: &Scenario, output: &Path) -> Result<()> {
    export_json(scenario, output)
        .with_context(|| format!("Failed to export JSON to {}", output.display()))?;

    info!(path = %output.display(), "exported scenario");
    Ok(())
}

fn print_info(scenario: &Scenario) {
    let header = &scenario.header;

    println!("Signature: {}", header.magic_text());
    println!("Version: {:#x}", scenario.version);
    println!("Map title: {}", header.title());
    println!("Map description: {}", header.description());
    println!("Team 1 victory: {}", header.team1_victory());
    println!("Team 1 victory (alt): {}", header.team1_victory_alt());
    println!("Draw: {}", header.draw());
    println!("Team 2 victory: {}", header.team2_victory());
    println!("Draw (alt): {}", header.draw_alt());
    println!("Team goes first: {}", header.team_goes_first);
    println!("Map size: {}x{}", scenario.width(), scenario.height());
    println!(
        "Units: {} ({} placed)",
        scenario.units.len(),
        scenario.placed_units().count()
    );
    println!(
        "Locations: {} ({} placed)",
        scenario.locations.len(),
        scenario.placed_locations().count()
    );

    if let Some(teams) = &scenario.teams {
        for (index, team) in teams.iter().enumerate() {
            println!(
                "Team {}: {} / {} (proficiency {}, supply {}, flag {})",
                index + 1,
                team.country(),
                team.force(),
                team.proficiency,
                team.supply,
                team.flag_id
            );
        }
    }

    print_groups(scenario);
}

fn print_groups(scenario: &Scenario) {
    let groups = scenario.units_by_team();
    if groups.is_empty() {
        return;
    }

    println!("Team data:");
    for (team, units) in groups {
        println!("Group {}: {} units", team, units.len());
        for (index, unit) in units.iter().enumerate() {
            println!("  {}. {} (type: {})", index + 1, unit.name(), unit.type_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_modes() {
        let cli = Cli::try_parse_from(["toaw", "-i", "Kursk.sce"]).unwrap();
        assert_eq!(cli.mode, Mode::Draw);
        assert_eq!(cli.output, None);

        let cli =
            Cli::try_parse_from(["toaw", "--input", "a.sce", "--mode", "exportjson", "-o", "a.json"])
                .unwrap();
        assert_eq!(cli.mode, Mode::ExportJson);
        assert_eq!(cli.output, Some(PathBuf::from("a.json")));

        assert!(Cli::try_parse_from(["toaw", "-i", "a.sce", "-m", "bogus"]).is_err());

        let cli = Cli::try_parse_from(["toaw", "-i", "a.sce", "--font", "DejaVuSans.ttf"]).unwrap();
        assert_eq!(cli.font, Some(PathBuf::from("DejaVuSans.ttf")));
    }

    #[test]
    fn test_render_options_font() {
        assert!(render_options(None).unwrap().font.is_none());

        let dir = tempfile::tempdir().unwrap();
        let err = render_options(Some(dir.path().join("missing.ttf").as_path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load font"));
    }

    #[test]
    fn test_default_outputs() {
        assert_eq!(Mode::Draw.default_output(), Some("output.png"));
        assert_eq!(Mode::ExportJson.default_output(), Some("output.json"));
        assert_eq!(Mode::Info.default_output(), None);
    }

    #[test]
    fn test_json_input_detection() {
        assert!(is_json_input(Path::new("cache/kursk.json")));
        assert!(is_json_input(Path::new("KURSK.JSON")));
        assert!(!is_json_input(Path::new("kursk.sce")));
        assert!(!is_json_input(Path::new("json")));
    }
}
