use std::{
	fs::{self, File},
	io,
	path::{Path, PathBuf},
};


/// Extension of the script files in data directories.
const SCRIPT_EXTENSION: &str = "ocli";


/// Run `test` on every script under `dir`, relative to the crate root. Subdirectories are
/// walked too, and files are visited in name order so that failures are reproducible.
pub fn test_dir<P, F>(dir: P, mut test: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Path, File) -> io::Result<()>,
{
	let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
	let mut pending = vec![root];

	while let Some(dir) = pending.pop() {
		let mut entries = fs::read_dir(&dir)?
			.map(|entry| entry.map(|entry| entry.path()))
			.collect::<io::Result<Vec<PathBuf>>>()?;

		entries.sort();

		for path in entries {
			if path.is_dir() {
				pending.push(path);
			} else if path.extension().map_or(false, |ext| ext == SCRIPT_EXTENSION) {
				test(&path, File::open(&path)?)?;
			}
		}
	}

	Ok(())
}
