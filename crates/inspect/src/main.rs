//! Sovereignty cache inspector.
//!
//! Seeds an in-memory store from a TOML file, bulk-loads a cache from it, runs one read
//! query, and prints the result as JSON.

mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sov_cache::{CacheConfig, MemoryStore, SovereigntyCache};
use sov_primitives::{AllianceId, ClaimId, StructureId, SystemId};
use tracing::info;

use crate::seed::SeedFile;

/// Inspector command line arguments.
#[derive(Parser, Debug)]
#[command(name = "sov-inspect")]
#[command(about = "Query a sovereignty cache loaded from a seed file")]
struct Args {
	/// Seed file with `[[claims]]` rows
	#[arg(short, long, value_name = "PATH")]
	seed: PathBuf,

	/// Cache configuration (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	#[command(subcommand)]
	query: Query,
}

#[derive(Subcommand, Debug)]
enum Query {
	/// Index sizes
	Info,
	/// Sovereignty of one solar system
	System { id: u32 },
	/// Full record for a claim id
	Claim { id: u32 },
	/// Systems and beacons held by an alliance
	Alliance { id: u32 },
	/// Records under a region, constellation, or system id
	Location { id: u32 },
	/// Every holding alliance with its systems
	Holdings,
}

#[derive(Serialize)]
struct AllianceReport {
	systems: Vec<SystemId>,
	beacons: Vec<StructureId>,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let config = match &args.config {
		Some(path) => CacheConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => CacheConfig::default(),
	};
	let seed = SeedFile::load(&args.seed)?;
	info!(seed = %args.seed.display(), rows = seed.claims.len(), "loaded seed");

	let store = Arc::new(MemoryStore::from_records(seed.claims));
	let cache = SovereigntyCache::with_config(store, config);
	cache.initialize()?;

	let output = match args.query {
		Query::Info => serde_json::to_string_pretty(&cache.info())?,
		Query::System { id } => serde_json::to_string_pretty(&cache.get_system_sovereignty(SystemId(id))?)?,
		Query::Claim { id } => serde_json::to_string_pretty(&cache.get_claim(ClaimId(id))?)?,
		Query::Alliance { id } => serde_json::to_string_pretty(&AllianceReport {
			systems: cache.get_alliance_systems(AllianceId(id)),
			beacons: cache.get_alliance_beacons(AllianceId(id)),
		})?,
		Query::Location { id } => serde_json::to_string_pretty(&cache.get_current_sov_data(id))?,
		Query::Holdings => serde_json::to_string_pretty(&cache.alliance_holdings())?,
	};
	println!("{output}");

	cache.close();
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("sov_cache=debug,sov_inspect=debug,info")
		} else {
			EnvFilter::new("sov_cache=info,sov_inspect=info,warn")
		}
	});

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
		.init();
}
