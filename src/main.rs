use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn, Level};

use txannot::config::DeriveConfig;
use txannot::ensembl::Reader;
use txannot::fasta::FastaReader;
use txannot::models::{Catalog, CatalogSource};
use txannot::{protein, splice};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print debug log messages
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Nearest upstream splice acceptor of proximate genes for every transcript
    SpliceAcceptors {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Amino acid sequence of every coding transcript
    Proteins {
        #[command(flatten)]
        common: CommonArgs,

        /// Reference genome in fasta format, a `.fai` index is used if present
        #[arg(short, long, value_name = "FASTA")]
        fasta: PathBuf,

        /// Fasta index, defaults to `<FASTA>.fai`
        #[arg(long, value_name = "FAI")]
        fai: Option<PathBuf>,

        /// Abort if a transcript can not be translated, instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Gene table (comma separated, with header)
    #[arg(short, long, value_name = "PATH")]
    genes: PathBuf,

    /// Transcript and exon table (comma separated, with header)
    #[arg(long, value_name = "PATH")]
    transcripts: PathBuf,

    /// TOML configuration file. Command line options take precedence
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Bases to extend each gene upstream when searching for proximate genes
    #[arg(short, long, value_name = "BASES")]
    promoter_distance: Option<u32>,

    /// Only annotate canonical transcripts
    #[arg(long)]
    canonical_only: bool,

    /// Only annotate these genes
    #[arg(long, value_name = "IDS", value_delimiter = ',', num_args = 1..)]
    gene_ids: Option<Vec<String>>,

    /// Number of threads, 0 uses all available cores
    #[arg(short, long, value_name = "THREADS")]
    threads: Option<usize>,

    /// Output file (tab separated)
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
}

impl CommonArgs {
    fn config(&self) -> Result<DeriveConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => DeriveConfig::from_file(path)?,
            None => DeriveConfig::default(),
        };
        if let Some(distance) = self.promoter_distance {
            config.promoter_distance = distance;
        }
        if self.canonical_only {
            config.canonical_only = true;
        }
        if let Some(ids) = &self.gene_ids {
            config.gene_ids = Some(ids.clone());
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        Ok(config)
    }

    fn catalog(&self) -> Result<Catalog, Box<dyn Error>> {
        info!(
            "Reading catalog from {} and {}",
            self.genes.display(),
            self.transcripts.display()
        );
        Ok(Reader::from_files(&self.genes, &self.transcripts)?.catalog()?)
    }
}

fn splice_acceptors(common: &CommonArgs) -> Result<(), Box<dyn Error>> {
    let config = common.config()?;
    let catalog = common.catalog()?;
    let pool = config.thread_pool()?;
    let records = pool.install(|| splice::locate(&catalog, &config));

    let mut writer = splice::Writer::from_file(&common.output)?;
    writer.write_records(&records)?;
    writer.flush()?;
    info!(
        "Wrote {} records to {}",
        records.len(),
        common.output.display()
    );
    Ok(())
}

fn proteins(
    common: &CommonArgs,
    fasta: &Path,
    fai: Option<&Path>,
    strict: bool,
) -> Result<(), Box<dyn Error>> {
    let config = common.config()?;
    let catalog = common.catalog()?;
    let reference = match fai {
        Some(fai) => FastaReader::from_file_with_index(fasta, fai)?,
        None => FastaReader::from_file(fasta)?,
    };
    let pool = config.thread_pool()?;
    let results = pool.install(|| protein::derive_proteins(&catalog, &reference, &config));

    let mut records = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(err) if strict => return Err(err.into()),
            Err(err) => warn!("Skipping transcript: {}", err),
        }
    }

    let mut writer = protein::Writer::from_file(&common.output)?;
    writer.write_records(&records)?;
    writer.flush()?;
    info!(
        "Wrote {} protein sequences to {}",
        records.len(),
        common.output.display()
    );
    Ok(())
}

fn main() {
    let start = std::time::Instant::now();
    let cli = Cli::parse();

    let level = if cli.verbose { Level::Debug } else { Level::Info };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("Unable to initialize logging: {}", err);
        std::process::exit(1);
    }

    let res = match &cli.command {
        Command::SpliceAcceptors { common } => splice_acceptors(common),
        Command::Proteins {
            common,
            fasta,
            fai,
            strict,
        } => proteins(common, fasta, fai.as_deref(), *strict),
    };
    res.unwrap_or_else(|err| {
        error!("{}", err);
        std::process::exit(1);
    });

    info!("Elapsed time: {:.3?}", start.elapsed());
}
