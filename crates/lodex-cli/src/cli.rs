use std::path::PathBuf;

use clap::Parser;
use lodex_object::{DecoderConfig, SizePolicy};
use lodex_store::StoreConfig;

#[derive(Parser)]
#[command(
    name = "lodex",
    about = "Decode a loose git object and print its contents",
    version
)]
pub struct Cli {
    /// Object identifier, 40 hex characters
    pub object: String,

    /// The objects directory holding the loose object fan-out [default: .git/objects]
    #[arg(long, env = "LODEX_OBJECTS_DIR")]
    pub objects_dir: Option<PathBuf>,

    /// Repository directory whose `objects` subdirectory is read; takes
    /// precedence over --objects-dir
    #[arg(long)]
    pub git_dir: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Print the inflated record instead of decoding it
    #[arg(long)]
    pub raw: bool,

    /// Warn instead of failing when a body disagrees with its declared size
    #[arg(long)]
    pub lenient_size: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        match (&self.git_dir, &self.objects_dir) {
            (Some(git_dir), _) => StoreConfig::for_git_dir(git_dir),
            (None, Some(objects_dir)) => StoreConfig::new(objects_dir),
            (None, None) => StoreConfig::default(),
        }
    }

    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            size_policy: if self.lenient_size {
                SizePolicy::Warn
            } else {
                SizePolicy::Strict
            },
        }
    }
}
