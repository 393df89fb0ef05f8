// Sat Oct 17 2026 - Alex

use super::args::{Args, Command, ConfigArgs, RunArgs};
use super::demo::DoublingJob;
use crate::config::SchedulerConfig;
use crate::scheduler::{Scheduler, SchedulerError};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;

        let base = self.load_config(args.config.as_deref())?;

        match args.command {
            Command::Run(run_args) => self.handle_run(base, run_args, args.quiet),
            Command::Config(config_args) => self.handle_config(base, config_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn load_config(&self, path: Option<&Path>) -> anyhow::Result<SchedulerConfig> {
        match path {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                SchedulerConfig::load(path)
                    .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))
            }
            None => Ok(SchedulerConfig::default()),
        }
    }

    fn handle_run(&self, base: SchedulerConfig, args: RunArgs, quiet: bool) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = run_config(base, &args);
        let job = DoublingJob {
            delay: Duration::from_millis(args.delay_ms),
            fail_every: args.fail_every,
        };

        if !quiet {
            println!(
                "{} Scheduling {} tasks on {} workers (queue capacity {})",
                "[*]".blue(),
                args.tasks,
                config.max_concurrency,
                config.queue_capacity
            );
        }

        let started = Instant::now();
        let scheduler: Scheduler<u64> = Scheduler::from_config(config)?;

        // Blocks whenever the queue is full; results pile up in the store
        // until collected below.
        let ids = (1..=args.tasks)
            .map(|input| scheduler.submit_with(input, move |x| job.run(x)))
            .collect::<Result<Vec<_>, SchedulerError>>()?;
        log::debug!("submitted {} tasks in {:?}", ids.len(), started.elapsed());

        let progress = if quiet || args.no_progress {
            None
        } else {
            let pb = ProgressBar::new(ids.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        };

        let mut lines = Vec::with_capacity(ids.len());
        for (input, id) in (1..=args.tasks).zip(ids) {
            let line = match scheduler.await_result(id) {
                Ok(output) => format!("{} {} ({}) -> {}", "[+]".green(), id, input, output),
                Err(e) if e.task_id().is_some() => format!("{} {}", "[!]".red(), e),
                Err(e) => return Err(e.into()),
            };
            lines.push(line);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        scheduler.shutdown();
        let stats = scheduler.stats();

        if !quiet {
            for line in &lines {
                println!("{}", line);
            }
            println!();
            println!(
                "{} {} completed, {} failed, peak {} workers, {:.0}% success in {:?}",
                "[*]".blue(),
                stats.completed,
                stats.failed,
                stats.peak_active,
                stats.success_rate() * 100.0,
                started.elapsed()
            );
        }

        Ok(())
    }

    fn handle_config(&self, base: SchedulerConfig, args: ConfigArgs) -> anyhow::Result<()> {
        let mut config = base;
        if let Some(workers) = args.workers {
            config.max_concurrency = workers;
        }
        if let Some(capacity) = args.capacity {
            config.queue_capacity = capacity;
        }
        config.validate()?;

        println!("{}", config.to_json()?);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn run_config(base: SchedulerConfig, args: &RunArgs) -> SchedulerConfig {
    let mut config = base;
    if let Some(workers) = args.workers {
        config.max_concurrency = workers;
    }
    if let Some(capacity) = args.capacity {
        config.queue_capacity = capacity;
    }
    if let Some(timeout) = args.timeout_ms {
        config.fetch_timeout_ms = Some(timeout);
    }
    config
}
