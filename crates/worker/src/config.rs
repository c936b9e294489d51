use std::path::PathBuf;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the GolfPlex API.
    pub api_url: String,
    /// Base URL of the Ollama instance.
    pub ollama_url: String,
    /// Ollama model to generate with.
    pub model: String,
    /// Directory for pre-submission JSON snapshots.
    pub output_dir: PathBuf,
    /// Seconds to wait between work units.
    pub poll_interval_secs: u64,
    /// Stop after this many successful units, if set.
    pub max_items: Option<u64>,
    /// Identifier reported with each claim and submission.
    pub worker_id: String,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                   |
    /// |----------------------|---------------------------|
    /// | `API_URL`            | `http://localhost:8000`   |
    /// | `OLLAMA_URL`         | `http://localhost:11434`  |
    /// | `OLLAMA_MODEL`       | `llama3.1`                |
    /// | `OUTPUT_DIR`         | `generated_content`       |
    /// | `POLL_INTERVAL_SECS` | `5`                       |
    /// | `MAX_ITEMS`          | unlimited                 |
    /// | `WORKER_ID`          | `worker-<random uuid>`    |
    pub fn from_env() -> Self {
        let api_url = std::env::var("API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .trim_end_matches('/')
            .to_string();

        let ollama_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());

        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1".into());

        let output_dir =
            PathBuf::from(std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "generated_content".into()));

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        let max_items: Option<u64> = std::env::var("MAX_ITEMS")
            .ok()
            .map(|v| v.parse().expect("MAX_ITEMS must be a valid u64"));

        let worker_id = std::env::var("WORKER_ID")
            .unwrap_or_else(|_| format!("worker-{}", uuid::Uuid::new_v4()));

        Self {
            api_url,
            ollama_url,
            model,
            output_dir,
            poll_interval_secs,
            max_items,
            worker_id,
        }
    }
}
