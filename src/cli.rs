//! Command-line surface: parses flags and turns each subcommand into a
//! [`Job`] for the pipeline.

use crate::ai::mime::extension_for_format;
use crate::ai::InputImage;
use crate::config::{Config, Settings, VALID_KEYS};
use crate::output::{render_json, GenerationResult, Params};
use crate::pipeline::{Job, Numbering, Pipeline, WorkUnit};
use crate::prompts::{self, DiagramOptions, IconOptions, PatternOptions};
use crate::{Error, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "naba", version)]
#[command(about = "Generate, edit, and transform images using Google Gemini")]
pub struct Cli {
    /// Output structured JSON instead of `Saved:` lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Output file path or directory
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the Gemini model
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an image from a text prompt
    Generate(GenerateArgs),
    /// Edit an existing image with instructions
    Edit {
        file: PathBuf,
        prompt: String,
    },
    /// Restore or enhance an existing image
    Restore {
        file: PathBuf,
        prompt: Option<String>,
    },
    /// Generate app icons
    Icon(IconArgs),
    /// Generate seamless patterns and textures
    Pattern(PatternArgs),
    /// Generate a sequential image series
    Story(StoryArgs),
    /// Generate technical diagrams
    Diagram(DiagramArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    pub prompt: String,
    /// Art style (photorealistic, watercolor, sketch, pixel-art, anime, ...)
    #[arg(short, long)]
    pub style: Option<String>,
    /// Number of images to request (1-8)
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u32,
    /// Variation types (lighting, angle, color-palette, composition, mood, ...)
    #[arg(long = "variation", value_name = "TYPE")]
    pub variations: Vec<String>,
}

#[derive(Debug, Args)]
pub struct IconArgs {
    pub prompt: String,
    /// Visual style (flat, skeuomorphic, minimal, modern)
    #[arg(long, default_value = "modern")]
    pub style: String,
    /// Icon sizes in px (repeatable)
    #[arg(long = "size", default_values_t = [256])]
    pub sizes: Vec<u32>,
    /// Output format (png, jpeg)
    #[arg(long, default_value = "png")]
    pub format: String,
    /// Background (transparent, white, black, or a color name)
    #[arg(long, default_value = "transparent")]
    pub background: String,
    /// Corner style (rounded, sharp)
    #[arg(long, default_value = "rounded")]
    pub corners: String,
}

#[derive(Debug, Args)]
pub struct PatternArgs {
    pub prompt: String,
    /// Pattern style (geometric, organic, abstract, floral, tech)
    #[arg(long, default_value = "abstract")]
    pub style: String,
    /// Color scheme (mono, duotone, colorful)
    #[arg(long, default_value = "colorful")]
    pub colors: String,
    /// Element density (sparse, medium, dense)
    #[arg(long, default_value = "medium")]
    pub density: String,
    /// Pattern tile size
    #[arg(long, default_value = "256x256")]
    pub tile_size: String,
    /// Tiling method (tile, mirror)
    #[arg(long, default_value = "tile")]
    pub repeat: String,
}

#[derive(Debug, Args)]
pub struct StoryArgs {
    pub prompt: String,
    /// Number of frames (2-8)
    #[arg(long, default_value_t = 4)]
    pub steps: u32,
    /// Visual consistency (consistent, evolving)
    #[arg(long, default_value = "consistent")]
    pub style: String,
    /// Transition style (smooth, dramatic, fade)
    #[arg(long, default_value = "smooth")]
    pub transition: String,
}

#[derive(Debug, Args)]
pub struct DiagramArgs {
    pub prompt: String,
    /// Diagram type (flowchart, architecture, network, database, wireframe, mindmap, sequence)
    #[arg(long = "type", default_value = "flowchart")]
    pub kind: String,
    /// Visual style (professional, clean, hand-drawn, technical)
    #[arg(long, default_value = "professional")]
    pub style: String,
    /// Layout (horizontal, vertical, hierarchical, circular)
    #[arg(long, default_value = "hierarchical")]
    pub layout: String,
    /// Detail level (simple, detailed, comprehensive)
    #[arg(long, default_value = "detailed")]
    pub complexity: String,
    /// Color scheme (mono, accent, categorical)
    #[arg(long, default_value = "accent")]
    pub colors: String,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}

/// Flags shared by every generation command, resolved once.
#[derive(Debug, Clone)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

impl OutputMode {
    pub fn detect(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            quiet: cli.quiet,
        }
    }
}

fn params<const N: usize>(pairs: [(&str, serde_json::Value); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Range checks that need neither credentials nor the filesystem.
pub fn validate(command: &Command) -> Result<()> {
    match command {
        Command::Generate(args) if !(1..=8).contains(&args.count) => {
            Err(Error::Usage("count must be between 1 and 8".to_string()))
        }
        Command::Story(args) if !(2..=8).contains(&args.steps) => {
            Err(Error::Usage("steps must be between 2 and 8".to_string()))
        }
        _ => Ok(()),
    }
}

/// Translate a generation subcommand into a job.
///
/// Returns `None` for commands that do not talk to the API.
pub fn build_job(command: &Command, output: Option<&Path>) -> Result<Option<Job>> {
    validate(command)?;
    let output = output.map(Path::to_path_buf);

    let job = match command {
        Command::Generate(args) => {
            let prompt = prompts::generate(&args.prompt, args.style.as_deref(), &args.variations);
            let mut job = Job::new("generate", &args.prompt, Numbering::Continuous);
            for i in 1..=args.count {
                let mut p = Params::new();
                if let Some(style) = &args.style {
                    p.insert("style".to_string(), style.as_str().into());
                }
                if !args.variations.is_empty() {
                    p.insert("variations".to_string(), args.variations.clone().into());
                }
                if args.count > 1 {
                    p.insert("index".to_string(), i.into());
                    p.insert("count".to_string(), args.count.into());
                }
                let label = if args.count > 1 {
                    format!("Generating image {}/{}...", i, args.count)
                } else {
                    "Generating image...".to_string()
                };
                job = job.with_unit(WorkUnit {
                    prompt: prompt.clone(),
                    input: None,
                    label,
                    output: output.clone(),
                    params: p,
                });
            }
            job
        }
        Command::Edit { file, prompt } => {
            let input = InputImage::load(file)?;
            Job::new("edit", prompt, Numbering::Continuous).with_unit(WorkUnit {
                prompt: prompts::edit(prompt),
                input: Some(input),
                label: "Editing image...".to_string(),
                output,
                params: params([("input", file.display().to_string().into())]),
            })
        }
        Command::Restore { file, prompt } => {
            let input = InputImage::load(file)?;
            let original = prompt.clone().unwrap_or_default();
            Job::new("restore", &original, Numbering::Continuous).with_unit(WorkUnit {
                prompt: prompts::restore(prompt.as_deref()),
                input: Some(input),
                label: "Restoring image...".to_string(),
                output,
                params: params([("input", file.display().to_string().into())]),
            })
        }
        Command::Icon(args) => {
            let mut job = Job::new("icon", &args.prompt, Numbering::PerUnit);
            for &size in &args.sizes {
                let target = match &output {
                    None => PathBuf::from(format!(
                        "icon-{}{}",
                        size,
                        extension_for_format(&args.format)
                    )),
                    Some(path) if args.sizes.len() > 1 => {
                        crate::output::writer::with_suffix(path, size as usize)
                    }
                    Some(path) => path.clone(),
                };
                let opts = IconOptions {
                    style: &args.style,
                    size,
                    background: &args.background,
                    corners: &args.corners,
                };
                job = job.with_unit(WorkUnit {
                    prompt: prompts::icon(&args.prompt, &opts),
                    input: None,
                    label: format!("Generating {}x{} icon...", size, size),
                    output: Some(target),
                    params: params([
                        ("size", size.into()),
                        ("style", args.style.as_str().into()),
                        ("format", args.format.as_str().into()),
                        ("background", args.background.as_str().into()),
                        ("corners", args.corners.as_str().into()),
                    ]),
                });
            }
            job
        }
        Command::Pattern(args) => {
            let opts = PatternOptions {
                style: &args.style,
                colors: &args.colors,
                density: &args.density,
                tile_size: &args.tile_size,
                repeat: &args.repeat,
            };
            Job::new("pattern", &args.prompt, Numbering::Continuous).with_unit(WorkUnit {
                prompt: prompts::pattern(&args.prompt, &opts),
                input: None,
                label: "Generating pattern...".to_string(),
                output,
                params: params([
                    ("style", args.style.as_str().into()),
                    ("colors", args.colors.as_str().into()),
                    ("density", args.density.as_str().into()),
                    ("tile_size", args.tile_size.as_str().into()),
                    ("repeat", args.repeat.as_str().into()),
                ]),
            })
        }
        Command::Story(args) => {
            let mut job = Job::new("story", &args.prompt, Numbering::Continuous);
            for step in 1..=args.steps {
                job = job.with_unit(WorkUnit {
                    prompt: prompts::story_frame(
                        &args.prompt,
                        step,
                        args.steps,
                        &args.style,
                        &args.transition,
                    ),
                    input: None,
                    label: format!("Generating frame {}/{}...", step, args.steps),
                    output: output.clone(),
                    params: params([
                        ("step", step.into()),
                        ("total", args.steps.into()),
                        ("style", args.style.as_str().into()),
                        ("transition", args.transition.as_str().into()),
                    ]),
                });
            }
            job
        }
        Command::Diagram(args) => {
            let opts = DiagramOptions {
                kind: &args.kind,
                style: &args.style,
                layout: &args.layout,
                complexity: &args.complexity,
                colors: &args.colors,
            };
            Job::new("diagram", &args.prompt, Numbering::Continuous).with_unit(WorkUnit {
                prompt: prompts::diagram(&args.prompt, &opts),
                input: None,
                label: "Generating diagram...".to_string(),
                output,
                params: params([
                    ("type", args.kind.as_str().into()),
                    ("style", args.style.as_str().into()),
                    ("layout", args.layout.as_str().into()),
                    ("complexity", args.complexity.as_str().into()),
                    ("colors", args.colors.as_str().into()),
                ]),
            })
        }
        Command::Config { .. } | Command::Version => return Ok(None),
    };

    Ok(Some(job))
}

fn run_config(action: &ConfigAction, quiet: bool) -> Result<()> {
    let valid = VALID_KEYS.join(", ");
    let mut settings = Settings::load()?;

    match action {
        ConfigAction::Get { key } => {
            let value = settings.get(key).ok_or_else(|| {
                Error::Config(format!("key {:?} is not set\n\nValid keys: {}", key, valid))
            })?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            if !settings.set(key, value) {
                return Err(Error::Usage(format!(
                    "unknown key {:?}\n\nValid keys: {}",
                    key, valid
                )));
            }
            settings.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
    }

    Ok(())
}

fn print_results(
    results: &[GenerationResult],
    mode: &OutputMode,
    always_array: bool,
) -> Result<()> {
    if mode.json {
        println!("{}", render_json(results, always_array)?);
    }
    Ok(())
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let mode = OutputMode::detect(&cli);

    match &cli.command {
        Command::Version => {
            println!("naba {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Config { action } => return run_config(action, cli.quiet),
        _ => {}
    }

    // Bad arguments are reported before a missing API key; input images are
    // only read once credentials resolve.
    validate(&cli.command)?;
    let config = Config::from_env(cli.model.as_deref())?;
    let Some(job) = build_job(&cli.command, cli.output.as_deref())? else {
        return Ok(());
    };

    let pipeline =
        Pipeline::from_config(&config).with_reporting(!mode.quiet, !mode.json && !mode.quiet);
    let results = pipeline.run(&job).await?;

    print_results(&results, &mode, matches!(cli.command, Command::Story(_)))
}
