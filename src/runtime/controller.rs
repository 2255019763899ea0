use std::io;

use crate::{entity::EntityKind, syntax::ast::Arguments};


/// Object attributes, as sent to the API.
pub type Attributes = serde_json::Map<String, serde_json::Value>;


/// The collaborator that executes commands over the inventory.
/// Paths are resolved and cleaned before being handed to the controller. Failures are
/// reported by the controller itself, and don't abort evaluation.
pub trait Controller {
	/// The current path, used to complete relative paths.
	fn current_path(&self) -> String;

	fn post_obj(&mut self, kind: EntityKind, path: &str, attributes: Attributes);

	fn get_object(&mut self, path: &str);

	fn update_obj(&mut self, path: &str, attributes: Attributes);

	fn delete_obj(&mut self, path: &str);

	fn search_objects(&mut self, kind: EntityKind, path: &str, filters: &Arguments);

	fn ls(&mut self, path: &str, args: &Arguments);

	fn cd(&mut self, path: &str);

	fn tree(&mut self, path: &str, depth: u32);

	/// Replace the selection. An empty list clears it.
	fn select(&mut self, paths: &[String]);

	fn clear(&mut self);

	fn exit(&mut self);

	/// Write text to the shell's output.
	fn write(&mut self, text: &str) -> io::Result<()>;
}
