use crossterm::style::Stylize;
use lda_core::report::{format_assignment_trace, format_doc_detail, format_doc_keys, format_topic_keys};
use lda_core::{
    save_to_disk, LdaSampler, Result, SamplerConfig, Tokenizer, WhitespaceTokenizer,
    DEFAULT_DOC_KEY_THRESHOLD, DEFAULT_NUM_DISPLAYED,
};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Demo run settings, optionally read from a JSON file given as the first argument.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DriverConfig {
    documents: Vec<String>,
    sampler: SamplerConfig,
    iterations: usize,
    seed: Option<u64>,
    num_displayed: usize,
    threshold: f64,
    detail_document: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            documents: vec!["cat cat cat".to_string(), "cat dog rabbit".to_string()],
            sampler: SamplerConfig::new(2, 0.5, 0.5),
            iterations: 10,
            seed: None,
            num_displayed: DEFAULT_NUM_DISPLAYED,
            threshold: DEFAULT_DOC_KEY_THRESHOLD,
            detail_document: 0,
        }
    }
}

impl DriverConfig {
    fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => DriverConfig::load(Path::new(&path))?,
        None => DriverConfig::default(),
    };
    let snapshot_path = args.next().map(PathBuf::from);

    let docs = WhitespaceTokenizer.tokenize_all(&config.documents);
    println!("{:?}", docs);

    let mut lda = match config.seed {
        Some(seed) => LdaSampler::with_seed(docs, config.sampler.clone(), seed)?,
        None => LdaSampler::from_entropy(docs, config.sampler.clone())?,
    };

    heading(&format!(
        "topic assignments for each of {} iterations of sampling:",
        config.iterations
    ));
    for _ in 0..config.iterations {
        println!("{}", format_assignment_trace(lda.assignments(), 4));
        lda.sweep();
    }

    heading("words ordered by probability for each topic:");
    print!("{}", format_topic_keys(&lda.topic_keys(config.num_displayed)));

    heading("document keys:");
    let doc_keys = lda.doc_keys(config.num_displayed, config.threshold);
    print!("{}", format_doc_keys(&config.documents, &doc_keys));

    heading(&format!(
        "topic assigned to each word of document {} in the final iteration:",
        config.detail_document
    ));
    print!("{}", format_doc_detail(&lda.doc_detail(config.detail_document)?));

    if let Some(path) = snapshot_path {
        save_to_disk(&lda, &path)?;
        info!("snapshot written to {}", path.display());
    }
    Ok(())
}

fn heading(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
}
