mod args;
mod config;
mod controller;
mod entity;
mod fmt;
mod runtime;
mod shell;
mod symbol;
mod syntax;
mod term;
#[cfg(test)]
mod tests;

use std::io::{self, Write};

use term::color;

use args::{Args, Command};
use config::Config;
use controller::DryRun;
use shell::Shell;


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let result = match command {
		Command::Run(args) => run(args),
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			std::process::exit(0)
		},
	};

	let exit_code = match result {
		Ok(code) => code,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			1
		}
	};

	std::process::exit(exit_code)
}


fn run(args: Args) -> Result<i32, Box<dyn std::error::Error>> {
	let mut config = Config::load(args.config.as_deref())?
		.with_env(|name| std::env::var(name).ok());

	if let Some(api_url) = args.api_url.clone() {
		config.api_url = api_url;
	}

	if args.verbose {
		config.log = "debug".into();
	}

	init_logging(&config.log);

	let stdin = io::stdin();
	let interactive = args.script.is_none() && termion::is_tty(&stdin);

	color::set_enabled(config.color && termion::is_tty(&io::stderr()));

	tracing::debug!(api_url = %config.api_url, start_path = %config.start_path, "starting");

	let controller = DryRun::new(config.api_url, config.start_path, io::stdout());
	let mut shell = Shell::new(controller, io::stderr());
	shell.check = args.check;
	shell.print_ast = args.print_ast;

	let code = match &args.script {
		Some(path) => shell.run_file(path)?,

		None => shell.interactive(
			stdin.lock(),
			|path| {
				if !interactive {
					return Ok(());
				}

				let mut stdout = io::stdout();
				write!(stdout, "{} ", color::Fg(color::Green, format!("{}>", path)))?;
				stdout.flush()
			}
		)?,
	};

	Ok(code)
}


/// Log to stderr, filtered by the given directives.
fn init_logging(filter: &str) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}
