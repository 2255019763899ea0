use std::{ffi::OsString, path::PathBuf};

use clap::{clap_app, crate_authors, crate_version, crate_description};


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Args {
	/// Script to run. Commands are read from stdin when absent.
	pub script: Option<PathBuf>,
	/// Configuration file.
	pub config: Option<PathBuf>,
	/// Overrides the configured API URL.
	pub api_url: Option<String>,
	/// Parse the input, but don't run it.
	pub check: bool,
	/// Print the AST of each line.
	pub print_ast: bool,
	/// Log debug events.
	pub verbose: bool,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		ocli =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@arg script: "Script file to run")
			(@arg conf: --conf +takes_value "Configuration file")
			(@arg api_url: --("api-url") +takes_value "Base URL of the inventory API")
			(@arg check: --check "Parse only, reporting syntax errors")
			(@arg ast: --ast "Print the AST")
			(@arg verbose: -v --verbose "Log debug events")
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => Ok(
			Command::Run(
				Args {
					script: matches.value_of_os("script").map(PathBuf::from),
					config: matches.value_of_os("conf").map(PathBuf::from),
					api_url: matches.value_of("api_url").map(String::from),
					check: matches.is_present("check"),
					print_ast: matches.is_present("ast"),
					verbose: matches.is_present("verbose"),
				}
			)
		),

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}


#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;


	#[test]
	fn test_script_and_flags() {
		assert_matches!(
			parse(&["ocli", "setup.ocli", "--check", "--api-url", "http://api"]),
			Ok(Command::Run(args)) => {
				assert_eq!(args.script, Some(PathBuf::from("setup.ocli")));
				assert_eq!(args.api_url.as_deref(), Some("http://api"));
				assert!(args.check);
				assert!(!args.print_ast);
			}
		);
	}


	#[test]
	fn test_interactive() {
		assert_matches!(
			parse(&["ocli", "-v"]),
			Ok(Command::Run(Args { script: None, verbose: true, .. }))
		);
	}


	#[test]
	fn test_help() {
		assert_matches!(parse(&["ocli", "--help"]), Ok(Command::Help(_)));
	}
}
