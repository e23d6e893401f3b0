//! Configuration-driven pipeline
//!
//! Stages run in a fixed order: download, preprocess, build panel, save
//! panel, then the optional analysis tasks. Which stages run is decided by
//! [`PipelineConfig`]; what each stage does is supplied by the project
//! through [`PipelineStages`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{Params, PipelineConfig};
use crate::error::Result;
use crate::utils::directories::DataDirectories;
use crate::utils::files::{LatestFileQuery, timestamp_file};
use crate::utils::logging::{log_artifact, log_complete, log_stage_start};

/// Base name of the panel dataset in the clean data directory
pub const PANEL_FILE_NAME: &str = "panel.parquet";

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Download,
    Preprocess,
    BuildPanel,
    SavePanel,
    Simulations,
    MainRegressions,
}

impl Stage {
    /// Message logged when the stage starts
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Download => "Downloading data",
            Self::Preprocess => "Preprocessing data",
            Self::BuildPanel => "Building panel data",
            Self::SavePanel => "Saving panel data",
            Self::Simulations => "Running simulation",
            Self::MainRegressions => "Running regression analysis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What every stage gets to work with
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub dirs: &'a DataDirectories,
    pub params: &'a Params,
}

/// Project-specific stage implementations
///
/// All methods default to doing nothing, so a fresh project runs end to
/// end before any stage is written.
pub trait PipelineStages {
    fn download(&mut self, _ctx: &StageContext<'_>) -> Result<()> {
        Ok(())
    }

    fn preprocess(&mut self, _ctx: &StageContext<'_>) -> Result<()> {
        Ok(())
    }

    fn build_panel(&mut self, _ctx: &StageContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Persist the panel to `path`, a freshly timestamped name in the clean directory
    fn save_panel(&mut self, _ctx: &StageContext<'_>, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// `panel` is the latest saved panel, if any
    fn simulations(&mut self, _ctx: &StageContext<'_>, _panel: Option<&Path>) -> Result<()> {
        Ok(())
    }

    /// `panel` is the latest saved panel, if any
    fn main_regressions(&mut self, _ctx: &StageContext<'_>, _panel: Option<&Path>) -> Result<()> {
        Ok(())
    }
}

/// Stages that only log
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStages;

impl PipelineStages for NoopStages {}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Stages that ran, in order
    pub stages: Vec<Stage>,
    /// Timestamped path handed to the save-panel stage
    pub saved_panel: Option<PathBuf>,
    /// Latest panel handed to the analysis stages
    pub analysed_panel: Option<PathBuf>,
    pub elapsed: Duration,
}

/// A configured pipeline over a data directory layout
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    dirs: DataDirectories,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig, dirs: DataDirectories) -> Self {
        Self { config, dirs }
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Untimestamped panel path, `<clean>/panel.parquet`
    #[must_use]
    pub fn panel_path(&self) -> PathBuf {
        self.dirs.clean.join(PANEL_FILE_NAME)
    }

    /// Latest saved panel, or `None` if nothing has been saved yet
    pub fn latest_panel(&self) -> Result<Option<PathBuf>> {
        LatestFileQuery::new().file(self.panel_path()).resolve()
    }

    /// Run every enabled stage in order, stopping at the first error
    pub fn run<S: PipelineStages + ?Sized>(&self, stages: &mut S) -> Result<PipelineReport> {
        let start = Instant::now();
        let ctx = StageContext {
            dirs: &self.dirs,
            params: &self.config.params,
        };
        let mut report = PipelineReport::default();
        let data = &self.config.data;

        if data.download {
            enter(&mut report, Stage::Download);
            stages.download(&ctx)?;
        }
        if data.preprocess {
            enter(&mut report, Stage::Preprocess);
            stages.preprocess(&ctx)?;
        }
        if data.build_panel {
            enter(&mut report, Stage::BuildPanel);
            stages.build_panel(&ctx)?;
        }
        if data.save_panel {
            enter(&mut report, Stage::SavePanel);
            let panel_file = timestamp_file(&self.panel_path());
            stages.save_panel(&ctx, &panel_file)?;
            log_artifact("Panel saved to", Some(&panel_file));
            report.saved_panel = Some(panel_file);
        }

        let tasks = &self.config.tasks;
        if tasks.simulations || tasks.main_regressions {
            let panel = self.latest_panel()?;
            log_artifact("Using panel", panel.as_deref());

            if tasks.simulations {
                enter(&mut report, Stage::Simulations);
                stages.simulations(&ctx, panel.as_deref())?;
            }
            if tasks.main_regressions {
                enter(&mut report, Stage::MainRegressions);
                stages.main_regressions(&ctx, panel.as_deref())?;
            }
            report.analysed_panel = panel;
        }

        report.elapsed = start.elapsed();
        log_complete(report.elapsed);
        Ok(report)
    }
}

fn enter(report: &mut PipelineReport, stage: Stage) {
    log_stage_start(stage.description());
    report.stages.push(stage);
}
