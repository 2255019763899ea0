use std::{
	fmt::{self, Display},
	fs,
	io,
	path::{Path, PathBuf},
};

use serde::Deserialize;


/// The file loaded when no configuration path is given, if present.
pub const DEFAULT_FILE: &str = "ocli.toml";


/// Shell configuration.
/// Layering: defaults, then the configuration file, then the environment, then the
/// command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Base URL of the inventory API.
	pub api_url: String,
	/// The current path when the shell starts.
	pub start_path: String,
	/// Log filter, in the `tracing_subscriber::EnvFilter` syntax.
	pub log: String,
	/// Colored prompt and diagnostics, when the terminal supports it.
	pub color: bool,
}


impl Default for Config {
	fn default() -> Self {
		Self {
			api_url: "http://localhost:3001".into(),
			start_path: "/".into(),
			log: "warn".into(),
			color: true,
		}
	}
}


#[derive(Debug)]
pub enum Error {
	Io {
		path: PathBuf,
		error: io::Error,
	},
	Parse {
		path: PathBuf,
		error: toml::de::Error,
	},
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io { path, error } => write!(f, "{}: {}", path.display(), error),
			Self::Parse { path, error } => write!(f, "{}: {}", path.display(), error),
		}
	}
}


impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { error, .. } => Some(error),
			Self::Parse { error, .. } => Some(error),
		}
	}
}


impl Config {
	/// Parse a configuration file's contents. Missing keys keep their defaults.
	pub fn from_toml(path: &Path, contents: &str) -> Result<Self, Error> {
		toml::from_str(contents)
			.map_err(|error| Error::Parse { path: path.to_owned(), error })
	}


	/// Load the configuration file. Without an explicit path, the default file is used if it
	/// exists, and the defaults otherwise.
	pub fn load(path: Option<&Path>) -> Result<Self, Error> {
		let (path, required) = match path {
			Some(path) => (path, true),
			None => (Path::new(DEFAULT_FILE), false),
		};

		match fs::read_to_string(path) {
			Ok(contents) => Self::from_toml(path, &contents),

			Err(error) if !required && error.kind() == io::ErrorKind::NotFound => {
				Ok(Self::default())
			}

			Err(error) => Err(Error::Io { path: path.to_owned(), error }),
		}
	}


	/// Override settings from environment variables: `OCLI_API_URL` and `OCLI_LOG`.
	pub fn with_env<F>(mut self, var: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(api_url) = var("OCLI_API_URL") {
			self.api_url = api_url;
		}

		if let Some(log) = var("OCLI_LOG") {
			self.log = log;
		}

		self
	}
}


#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;


	#[test]
	fn test_partial_file() {
		let config = Config::from_toml(
			Path::new("ocli.toml"),
			"api_url = \"https://ogree.example\"\ncolor = false\n"
		);

		assert_eq!(
			config.ok(),
			Some(
				Config {
					api_url: "https://ogree.example".into(),
					color: false,
					..Config::default()
				}
			)
		);
	}


	#[test]
	fn test_unknown_key() {
		let config = Config::from_toml(Path::new("ocli.toml"), "api = 1\n");
		assert!(matches!(config, Err(Error::Parse { .. })));
	}


	#[test]
	fn test_load() -> Result<(), Box<dyn std::error::Error>> {
		let mut file = tempfile::NamedTempFile::new()?;
		writeln!(file, "start_path = \"/Physical\"")?;

		let config = Config::load(Some(file.path()))?;
		assert_eq!(config.start_path, "/Physical");

		let missing = Config::load(Some(Path::new("/nonexistent/ocli.toml")));
		assert!(matches!(missing, Err(Error::Io { .. })));

		Ok(())
	}


	#[test]
	fn test_env_overrides() {
		let config = Config::default().with_env(
			|name| match name {
				"OCLI_LOG" => Some("debug".to_owned()),
				_ => None,
			}
		);

		assert_eq!(config.log, "debug");
		assert_eq!(config.api_url, Config::default().api_url);
	}
}
