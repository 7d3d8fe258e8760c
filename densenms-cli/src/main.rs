use clap::Parser;
use densenms::io::load_activation_image;
use densenms::{
    adaptive_nms, adaptive_nms_points, ActivationPoint, AdaptiveNmsConfig, BBox, CentroidInit,
    Detections, KMeansConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Density-adaptive NMS (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum InitConfig {
    FarthestPoint,
    KmeansPlusPlus,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NmsConfigJson {
    base_thresh: f32,
    n_clusters: usize,
    max_iters: usize,
    init: InitConfig,
    seed: u64,
    parallel: bool,
}

impl Default for NmsConfigJson {
    fn default() -> Self {
        let cfg = AdaptiveNmsConfig::default();
        Self {
            base_thresh: cfg.base_thresh,
            n_clusters: cfg.n_clusters,
            max_iters: cfg.kmeans.max_iters,
            init: InitConfig::FarthestPoint,
            seed: 0,
            parallel: cfg.parallel,
        }
    }
}

impl From<&NmsConfigJson> for AdaptiveNmsConfig {
    fn from(value: &NmsConfigJson) -> Self {
        let init = match value.init {
            InitConfig::FarthestPoint => CentroidInit::FarthestPoint,
            InitConfig::KmeansPlusPlus => CentroidInit::KMeansPlusPlus { seed: value.seed },
        };
        Self {
            base_thresh: value.base_thresh,
            n_clusters: value.n_clusters,
            kmeans: KMeansConfig {
                max_iters: value.max_iters,
                init,
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    heatmap_path: Option<String>,
    heatmap_threshold: u8,
    activations: Vec<[usize; 2]>,
    output_path: Option<String>,
    nms: NmsConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boxes: Vec::new(),
            scores: Vec::new(),
            heatmap_path: None,
            heatmap_threshold: 128,
            activations: Vec::new(),
            output_path: None,
            nms: NmsConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    index: usize,
    #[serde(rename = "box")]
    bbox: [f32; 4],
    score: f32,
}

#[derive(Debug, Serialize)]
struct RegionRecord {
    #[serde(rename = "box")]
    bbox: [f32; 4],
    density: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    keep: Vec<usize>,
    detections: Vec<DetectionRecord>,
    regions: Vec<RegionRecord>,
}

impl From<Detections> for Output {
    fn from(value: Detections) -> Self {
        let detections = value
            .iter()
            .map(|(index, bbox, score)| DetectionRecord {
                index,
                bbox: bbox.to_array(),
                score,
            })
            .collect();
        let regions = value
            .regions
            .iter()
            .map(|region| RegionRecord {
                bbox: region.bbox.to_array(),
                density: region.density,
            })
            .collect();
        Self {
            keep: value.keep,
            detections,
            regions,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("densenms=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.boxes.is_empty() {
        return Err("boxes must be set in the config".into());
    }

    let boxes: Vec<BBox> = config.boxes.iter().copied().map(BBox::from).collect();
    let nms_cfg = AdaptiveNmsConfig::from(&config.nms);

    let detections = match &config.heatmap_path {
        Some(path) => {
            let mask = load_activation_image(path, config.heatmap_threshold)?;
            adaptive_nms(&boxes, &config.scores, mask.view(), &nms_cfg)?
        }
        None => {
            let points: Vec<ActivationPoint> = config
                .activations
                .iter()
                .map(|&[x, y]| ActivationPoint::new(x, y))
                .collect();
            adaptive_nms_points(&boxes, &config.scores, &points, &nms_cfg)?
        }
    };

    let output = Output::from(detections);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
