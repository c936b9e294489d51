//! Main worker loop: fetch, generate, snapshot, submit, repeat.

use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::sync::watch;

use golfplex_core::work::{FetchWorkResponse, WorkUnit};
use golfplex_ollama::{prompts, OllamaClient};

use crate::api_client::ApiClient;
use crate::config::WorkerConfig;
use crate::snapshot;

/// Timing for one completed work unit, kept for the shutdown summary.
#[derive(Debug)]
struct UnitTiming {
    destination: String,
    language: String,
    total: Duration,
}

pub struct Runner {
    config: WorkerConfig,
    api: ApiClient,
    ollama: OllamaClient,
    timings: Vec<UnitTiming>,
    failures: u64,
}

impl Runner {
    pub fn new(config: WorkerConfig) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api_url, &config.worker_id)
            .context("Failed to build API client")?;
        let ollama = OllamaClient::new(&config.ollama_url, &config.model)
            .context("Failed to build Ollama client")?;
        Ok(Self {
            config,
            api,
            ollama,
            timings: Vec::new(),
            failures: 0,
        })
    }

    /// Process work units until the queue drains, `MAX_ITEMS` is reached,
    /// or Ctrl+C arrives. Failures are logged and skipped, not fatal.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.ollama
            .check_connection()
            .await
            .context("Ollama is unreachable")?;

        // One signal handler for the whole run. A Ctrl+C during generation
        // is latched here and honoured at the next unit boundary.
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    let _ = shutdown_tx.send(true);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                    // Keep the sender alive so the loop never sees a
                    // spurious channel closure.
                    std::future::pending::<()>().await;
                }
            }
        });

        self.run_until(shutdown_rx).await
    }

    async fn run_until(&mut self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let started = Instant::now();
        self.log_work_status().await;

        let mut processed: u64 = 0;
        loop {
            if *shutdown.borrow() {
                tracing::info!("Received Ctrl+C, stopping");
                break;
            }
            if let Some(max) = self.config.max_items {
                if processed >= max {
                    tracing::info!(processed, "Reached MAX_ITEMS, stopping");
                    break;
                }
            }

            let unit = tokio::select! {
                fetched = self.api.fetch_work() => match fetched? {
                    FetchWorkResponse::WorkAvailable(unit) => unit,
                    FetchWorkResponse::NoWork { message } => {
                        tracing::info!(%message, "Queue drained");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    tracing::info!("Received Ctrl+C, stopping");
                    break;
                }
            };

            match self.process_unit(&unit).await {
                Ok(()) => processed += 1,
                Err(e) => {
                    self.failures += 1;
                    tracing::warn!(
                        destination_id = unit.destination.id,
                        language = %unit.target_language,
                        error = %e,
                        "Work unit failed, continuing",
                    );
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)) => {}
                _ = shutdown.changed() => {
                    tracing::info!("Received Ctrl+C, stopping");
                    break;
                }
            }
        }

        tracing::info!(
            processed,
            failures = self.failures,
            uptime_secs = started.elapsed().as_secs(),
            "Worker finished",
        );
        self.log_timing_summary();
        self.log_work_status().await;
        Ok(())
    }

    /// Generate or translate one guide and submit it.
    async fn process_unit(&mut self, unit: &WorkUnit) -> anyhow::Result<()> {
        let started = Instant::now();
        let destination = &unit.destination;
        tracing::info!(
            destination_id = destination.id,
            city = %destination.city,
            country = %destination.country,
            language = %unit.target_language,
            is_translation = unit.is_translation,
            "Processing work unit",
        );

        let content = if unit.is_translation {
            let english = unit
                .existing_guides
                .get(golfplex_core::language::SOURCE_LANGUAGE)
                .map(|g| g.content.as_str())
                .context("Translation unit without an English guide")?;
            self.ollama
                .generate(
                    &prompts::translation_prompt(english, &unit.language_name, destination),
                    Some(&prompts::translation_system_prompt(&unit.language_name)),
                )
                .await?
        } else {
            self.ollama
                .generate(
                    &prompts::guide_prompt(destination),
                    Some(prompts::GUIDE_SYSTEM_PROMPT),
                )
                .await?
        };

        let generation = started.elapsed();
        tracing::info!(
            chars = content.chars().count(),
            secs = generation.as_secs_f64(),
            "Generation complete",
        );

        // Snapshot before submitting, so a rejected submission is recoverable.
        let path = snapshot::write_snapshot(
            &self.config.output_dir,
            destination,
            &unit.target_language,
            &content,
        )
        .context("Failed to write snapshot")?;
        tracing::debug!(path = %path.display(), "Snapshot written");

        let result = self
            .api
            .submit_work(destination.id, &unit.target_language, &content)
            .await?;
        tracing::info!(
            action = ?result.guide.action,
            language = %result.guide.language_name,
            content_length = result.guide.content_length,
            "Submitted work",
        );

        self.timings.push(UnitTiming {
            destination: format!("{}, {}", destination.city, destination.country),
            language: unit.target_language.clone(),
            total: started.elapsed(),
        });
        Ok(())
    }

    fn log_timing_summary(&self) {
        if self.timings.is_empty() {
            return;
        }
        let total: Duration = self.timings.iter().map(|t| t.total).sum();
        let avg = total / self.timings.len() as u32;
        let fastest = self.timings.iter().min_by_key(|t| t.total);
        let slowest = self.timings.iter().max_by_key(|t| t.total);
        if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
            let fastest_unit = format!("{} [{}]", fastest.destination, fastest.language);
            let slowest_unit = format!("{} [{}]", slowest.destination, slowest.language);
            tracing::info!(
                avg_secs = avg.as_secs_f64(),
                fastest_secs = fastest.total.as_secs_f64(),
                fastest_unit = %fastest_unit,
                slowest_secs = slowest.total.as_secs_f64(),
                slowest_unit = %slowest_unit,
                "Timing summary",
            );
        }
    }

    /// Log the aggregate queue state. Failures here are not fatal; status is
    /// informational only.
    async fn log_work_status(&self) {
        match self.api.work_status().await {
            Ok(status) => {
                let overview = &status["overview"];
                tracing::info!(
                    total_destinations = overview["total_destinations"].as_i64(),
                    total_guides = overview["total_guides"].as_i64(),
                    completion_percentage = overview["completion_percentage"].as_f64(),
                    "Work status",
                );
            }
            Err(e) => tracing::warn!(error = %e, "Could not fetch work status"),
        }
    }
}
