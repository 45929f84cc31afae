//! Runs generation units one after another and writes what they return.

use crate::ai::{GeminiImageClient, ImageGenerator, InputImage};
use crate::config::Config;
use crate::output::{GenerationResult, OutputWriter, Params};
use crate::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// One request/response round trip and the files it produces.
#[derive(Debug, Clone, Default)]
pub struct WorkUnit {
    /// Enriched text sent to the model.
    pub prompt: String,
    pub input: Option<InputImage>,
    /// Progress line shown before the request goes out.
    pub label: String,
    /// Requested output path for this unit's images.
    pub output: Option<PathBuf>,
    pub params: Params,
}

/// How the writer index advances across units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// One running index over every image of the job.
    Continuous,
    /// Restart at 0 for each unit (units carry distinct output paths).
    PerUnit,
}

/// A command invocation: the user's prompt and the units it expands into.
#[derive(Debug, Clone)]
pub struct Job {
    pub command: String,
    pub prompt: String,
    pub units: Vec<WorkUnit>,
    pub numbering: Numbering,
}

impl Job {
    pub fn new(command: &str, prompt: &str, numbering: Numbering) -> Self {
        Self {
            command: command.to_string(),
            prompt: prompt.to_string(),
            units: Vec::new(),
            numbering,
        }
    }

    pub fn with_unit(mut self, unit: WorkUnit) -> Self {
        self.units.push(unit);
        self
    }
}

/// Drives the generator and the writer for a [`Job`].
pub struct Pipeline {
    generator: Box<dyn ImageGenerator>,
    writer: OutputWriter,
    show_progress: bool,
    announce_saved: bool,
}

impl Pipeline {
    /// Build a pipeline from concrete dependencies.
    ///
    /// Tests and harnesses use this to inject a mock generator.
    pub fn new(generator: Box<dyn ImageGenerator>, writer: OutputWriter) -> Self {
        Self {
            generator,
            writer,
            show_progress: false,
            announce_saved: false,
        }
    }

    /// Pipeline talking to Gemini as described by `config`.
    pub fn from_config(config: &Config) -> Self {
        info!("Image provider: Gemini (model: {})", config.model);
        let http_client = reqwest::Client::new();
        let generator = GeminiImageClient::new_with_client(
            config.api_key.clone(),
            config.model.clone(),
            http_client,
        )
        .with_base_url(config.base_url.clone())
        .with_timeout(config.timeout);

        Self::new(
            Box::new(generator),
            OutputWriter::new(config.default_output_dir.clone()),
        )
    }

    /// `progress` prints unit labels to stderr; `saved` prints each written
    /// path to stdout.
    pub fn with_reporting(mut self, progress: bool, saved: bool) -> Self {
        self.show_progress = progress;
        self.announce_saved = saved;
        self
    }

    /// Run every unit in order. The first failure aborts the rest.
    pub async fn run(&self, job: &Job) -> Result<Vec<GenerationResult>> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut next_index = 0;

        for (unit_number, unit) in job.units.iter().enumerate() {
            if self.show_progress && !unit.label.is_empty() {
                eprintln!("{}", unit.label);
            }
            debug!(
                "{} unit {}/{}: {}",
                job.command,
                unit_number + 1,
                job.units.len(),
                unit.prompt
            );

            let images = self.generator.generate(&unit.prompt, unit.input.as_ref()).await?;

            for (position, image) in images.into_iter().enumerate() {
                let index = match job.numbering {
                    Numbering::Continuous => next_index,
                    Numbering::PerUnit => position,
                };
                next_index += 1;

                let path = self.writer.write_image(
                    &image.data,
                    &image.mime_type,
                    unit.output.as_deref(),
                    &job.command,
                    index,
                )?;

                if self.announce_saved {
                    println!("Saved: {}", path.display());
                }

                results.push(
                    GenerationResult::new(path, &job.command, &job.prompt, start)
                        .with_params(unit.params.clone()),
                );
            }
        }

        info!("{} wrote {} image(s)", job.command, results.len());
        Ok(results)
    }
}
