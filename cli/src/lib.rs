use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use huewheel_lib::{Palette, PaletteRenderer, nearest_color_name};
use serde::Serialize;
use tracing::info;

const FALLBACK_NAME: &str = "Custom Color";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "huewheel-cli",
    author,
    version,
    about = "Generate harmonic color palettes from a single seed color",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the twelve-color palette for a seed, optionally rendering it
    Generate(GenerateArgs),
    /// Print the closest CSS color name for a hex color
    Name {
        /// Color as `#rrggbb` or `rrggbb`
        hex: String,
    },
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Seed color: `#rrggbb` or a CSS color name such as `teal`
    pub seed: String,

    /// Also render the palette to a PNG in the output directory
    #[arg(long)]
    pub render: bool,

    /// Directory that receives rendered palette images
    #[arg(long, value_name = "DIR", default_value = "static/palettes")]
    pub output_dir: PathBuf,

    /// Print the palette as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PaletteReport {
    seed: String,
    colors: Vec<ReportEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ReportEntry {
    hex: String,
    name: &'static str,
    description: &'static str,
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    run_with_output(cli, &mut stdout.lock())
}

pub fn run_with_output(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate(args, out),
        Command::Name { hex } => {
            let name = nearest_color_name(&hex)
                .ok_or_else(|| anyhow!("'{hex}' is not a 6-digit hex color"))?;
            writeln!(out, "{name}")?;
            Ok(())
        }
    }
}

fn generate(args: GenerateArgs, out: &mut impl Write) -> Result<()> {
    let palette = Palette::from_seed(&args.seed)
        .with_context(|| format!("cannot build a palette from '{}'", args.seed))?;

    let image = if args.render {
        let renderer = PaletteRenderer::new(&args.output_dir);
        let path = renderer.render_palette(&palette).with_context(|| {
            format!(
                "failed to render palette into '{}'",
                args.output_dir.display()
            )
        })?;
        Some(path)
    } else {
        None
    };

    let report = PaletteReport {
        seed: args.seed,
        colors: palette
            .iter()
            .map(|(position, color)| ReportEntry {
                hex: color.to_hex(),
                name: nearest_color_name(&color.to_hex()).unwrap_or(FALLBACK_NAME),
                description: position.description(),
            })
            .collect(),
        image,
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for entry in &report.colors {
            writeln!(
                out,
                "{:<28} {}  {}",
                entry.description, entry.hex, entry.name
            )?;
        }
        if let Some(path) = &report.image {
            writeln!(out, "image: {}", path.display())?;
        }
    }

    info!(
        target: "huewheel::cli",
        seed = %report.seed,
        rendered = report.image.is_some(),
        "palette generated"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use clap::CommandFactory;

    fn run_to_string(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run_with_output(cli, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_prints_twelve_rows() {
        let output = run_to_string(&["huewheel", "generate", "#ff0000"]).expect("generate");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("Base Color"));
        assert!(lines[0].contains("#ff0000  red"));
        assert!(lines[2].contains("#ff007f"));
        assert!(lines[11].starts_with("Bright Tint (+40%)"));
    }

    #[test]
    fn generate_json_includes_names() {
        let output =
            run_to_string(&["huewheel", "generate", "teal", "--json"]).expect("generate json");
        let value: serde_json::Value = serde_json::from_str(&output).expect("parse json");

        assert_eq!(value["seed"], "teal");
        assert_eq!(value["colors"][0]["hex"], "#008080");
        assert_eq!(value["colors"][0]["name"], "teal");
        assert!(value.get("image").is_none());
    }

    #[test]
    fn generate_rejects_unknown_seed() {
        let err = run_to_string(&["huewheel", "generate", "notacolor"]).expect_err("unknown seed");
        assert!(err.to_string().contains("notacolor"));
    }

    #[test]
    fn generate_renders_into_output_dir() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let output_dir = temp.child("out/palettes");

        let output = run_to_string(&[
            "huewheel",
            "generate",
            "#3498db",
            "--render",
            "--json",
            "--output-dir",
            output_dir.path().to_str().expect("utf-8 path"),
        ])
        .expect("generate and render");

        let value: serde_json::Value = serde_json::from_str(&output).expect("parse json");
        let image_path = PathBuf::from(value["image"].as_str().expect("image path"));
        assert!(image_path.starts_with(output_dir.path()));

        let image = image::open(&image_path).expect("decode png");
        assert_eq!((image.width(), image.height()), (800, 400));
    }

    #[test]
    fn name_prints_closest_keyword() {
        let output = run_to_string(&["huewheel", "name", "#fe0000"]).expect("name");
        assert_eq!(output.trim(), "red");

        assert!(run_to_string(&["huewheel", "name", "#fe00"]).is_err());
    }
}
