use crate::entity::PathMode;


/// The path that stands for the current selection, passed as is to the controller.
pub const SELECTION: &str = "_";


/// Complete a path according to its mode, and clean it.
/// Relative paths are relative to the current path in the standard mode, and to the mode's
/// root otherwise.
pub fn resolve(path: &str, mode: PathMode, current: &str) -> String {
	if path == SELECTION {
		return path.to_owned();
	}

	if path.starts_with('/') {
		return clean(path);
	}

	let base = mode.root().unwrap_or(current);

	clean(&format!("{}/{}", base, path))
}


/// Lexically clean a path: repeated slashes and `.` segments are removed, and `..` removes
/// the previous segment. Absolute paths stay absolute, and `..` at the root is dropped.
pub fn clean(path: &str) -> String {
	let absolute = path.starts_with('/');
	let mut segments: Vec<&str> = Vec::new();

	for segment in path.split('/') {
		match segment {
			"" | "." => (),

			".." => match segments.last() {
				Some(&last) if last != ".." => {
					segments.pop();
				}
				_ if absolute => (),
				_ => segments.push(".."),
			},

			segment => segments.push(segment),
		}
	}

	let joined = segments.join("/");

	match (absolute, joined.is_empty()) {
		(true, _) => format!("/{}", joined),
		(false, true) => ".".to_owned(),
		(false, false) => joined,
	}
}
