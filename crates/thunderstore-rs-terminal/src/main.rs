use thunderstore_rs::installation::{Downloader, DownloadEvent, ItemStatus};
use thunderstore_rs::installation::content::ArchiveExtractor;
use thunderstore_rs::installation::fetch::Fetcher;
use thunderstore_rs::profile::{InstalledPackages, ProfileModList};
use thunderstore_rs::{Catalog, Combo, Config};

#[tokio::main]
async fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",         "Show help");
		opts.optflag( "v", "verbose",      "Increased vebosity");
		opts.optflag( "",  "ignore-cache", "Download packages even when they are already cached");
		opts.optopt(  "",  "mod-root",     "Directory holding the download cache", "DIR");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let default_level = if parsed_options.opt_present("v") { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

	let mut config = Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		Config::default()
	});
	if let Some(mod_root) = parsed_options.opt_str("mod-root") {
		config.set_mod_root(mod_root.into());
	}
	if parsed_options.opt_present("ignore-cache") {
		config.set_ignore_cache(true);
	}

	let downloader = match Downloader::from_config(&config) {
		Ok(d) => d,
		Err(e) => { log::error!("Failed to create HTTP client: {}", e); return },
	};

	let free = &parsed_options.free;
	let result = match free.first().map(String::as_str) {
		Some("install") => install(&downloader, &free[1..]).await,
		Some("update") => update(&downloader, &free[1..]).await,
		Some("import") => import(&downloader, &free[1..]).await,
		Some(other) => Err(Error::UnknownCommand(other.to_string())),
		None => { eprintln!("{}", opts.usage(USAGE)); return },
	};

	if let Err(e) = result {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

const USAGE: &str = "Usage:
	thunderstore-rs-terminal install <catalog.json> <profile.json> <Namespace-Name> [version]
	thunderstore-rs-terminal update <catalog.json> <profile.json>
	thunderstore-rs-terminal import <catalog.json> <export.json>";

fn argument<'a>(args: &'a [String], index: usize, name: &'static str) -> Result<&'a str, Error> {
	args.get(index).map(String::as_str).ok_or(Error::MissingArgument(name))
}

async fn install(downloader: &Downloader<impl Fetcher, impl ArchiveExtractor>, args: &[String]) -> Result<(), Error> {
	let catalog = Catalog::load_from_file(argument(args, 0, "catalog")?)?;
	let profile = ProfileModList::new(argument(args, 1, "profile")?);
	let full_name = argument(args, 2, "package")?;

	let package = catalog.get_package(full_name).ok_or_else(|| Error::UnknownPackage(full_name.to_string()))?;
	let version = match args.get(3) {
		Some(v) => package.get_version(&v.parse()?),
		None => package.latest(),
	}.ok_or_else(|| Error::UnknownPackage(format!("{}-{}", full_name, args.get(3).map(String::as_str).unwrap_or("latest"))))?;

	let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
	let download = async {
		let tx = tx;
		downloader.download(&catalog, &profile, Combo::new(package, version), &tx).await;
	};
	let ((), completed) = tokio::join!(download, print_progress(rx));
	report(completed)
}

async fn update(downloader: &Downloader<impl Fetcher, impl ArchiveExtractor>, args: &[String]) -> Result<(), Error> {
	let catalog = Catalog::load_from_file(argument(args, 0, "catalog")?)?;
	let installed = ProfileModList::new(argument(args, 1, "profile")?).installed_packages()?;

	let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
	let download = async {
		let tx = tx;
		downloader.download_latest_of_all(&catalog, &installed, &tx).await;
	};
	let ((), completed) = tokio::join!(download, print_progress(rx));
	report(completed)
}

async fn import(downloader: &Downloader<impl Fetcher, impl ArchiveExtractor>, args: &[String]) -> Result<(), Error> {
	let catalog = Catalog::load_from_file(argument(args, 0, "catalog")?)?;
	let mods = ProfileModList::new(argument(args, 1, "export")?).installed_packages()?;

	let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
	let download = async {
		let tx = tx;
		downloader.download_imported(&catalog, &mods, &tx).await;
	};
	let ((), completed) = tokio::join!(download, print_progress(rx));
	report(completed)
}

/// Prints events until the downloader is done.
///
/// Returns the completed packages, or `None` if a package failed.
async fn print_progress(mut events: tokio::sync::mpsc::UnboundedReceiver<DownloadEvent<'_>>) -> Option<Vec<String>> {
	let mut completed = None;
	while let Some(event) = events.recv().await {
		match event {
			DownloadEvent::Progress(progress) => match progress.status {
				ItemStatus::Pending => log::debug!("[{:>5.1}%] {}", progress.percent, progress.label),
				ItemStatus::Success => println!("[{:>5.1}%] {} done", progress.percent, progress.label),
				ItemStatus::Failure(e) => eprintln!("[{:>5.1}%] {} failed: {}", progress.percent, progress.label, e),
			},
			DownloadEvent::Complete(combos) => {
				completed = Some(combos.iter().map(|c| c.to_string()).collect());
			},
		}
	}
	completed
}

fn report(completed: Option<Vec<String>>) -> Result<(), Error> {
	let completed = completed.ok_or(Error::Download)?;
	println!("Downloaded {} packages:", completed.len());
	for name in &completed {
		println!("\t{}", name);
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("thunderstore-rs error: {0}")]
	ThunderstoreRs(#[from] thunderstore_rs::Error),
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("Unknown command: {0}")]
	UnknownCommand(String),
	#[error("Package not found in catalog: {0}")]
	UnknownPackage(String),
	#[error("Download failed")]
	Download,
}
