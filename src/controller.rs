use std::io::{self, Write};

use serde::Serialize;

use crate::{
	entity::EntityKind,
	runtime::{Attributes, Controller},
	syntax::ast::Arguments,
};


/// How many of the latest requests a dry run keeps.
const REQUEST_HISTORY: usize = 256;


/// A request that would be sent to the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
	pub method: &'static str,
	pub url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<serde_json::Value>,
}


/// A controller that doesn't talk to the API. Each request is printed as the JSON it would
/// send, and the current path and selection are kept in memory.
#[derive(Debug)]
pub struct DryRun<W> {
	api_url: String,
	current: String,
	selection: Vec<String>,
	requests: Vec<Request>,
	exited: bool,
	output: W,
}


impl<W: Write> DryRun<W> {
	pub fn new<U, P>(api_url: U, start_path: P, output: W) -> Self
	where
		U: Into<String>,
		P: Into<String>,
	{
		Self {
			api_url: api_url.into().trim_end_matches('/').to_owned(),
			current: start_path.into(),
			selection: Vec::new(),
			requests: Vec::new(),
			exited: false,
			output,
		}
	}


	/// The latest requests, oldest first.
	pub fn requests(&self) -> &[Request] {
		&self.requests
	}


	pub fn selection(&self) -> &[String] {
		&self.selection
	}


	pub fn exited(&self) -> bool {
		self.exited
	}


	pub fn output(&self) -> &W {
		&self.output
	}


	fn url(&self, endpoint: &str) -> String {
		format!("{}/api{}", self.api_url, endpoint)
	}


	/// Record and print a request. Output failures are logged, as the controller has no way
	/// to report them.
	fn request(&mut self, method: &'static str, url: String, body: Option<serde_json::Value>) {
		let request = Request { method, url, body };

		tracing::debug!(method, url = %request.url, "request");

		let printed = serde_json::to_string(&request)
			.map_err(io::Error::from)
			.and_then(|json| writeln!(self.output, "{}", json));

		if let Err(error) = printed {
			tracing::error!(%error, "failed to print request");
		}

		if self.requests.len() == REQUEST_HISTORY {
			self.requests.remove(0);
		}

		self.requests.push(request);
	}
}


/// Split a path into the parent path and the object name.
fn split_path(path: &str) -> (&str, &str) {
	match path.rfind('/') {
		Some(0) => ("/", &path[1 ..]),
		Some(ix) => (&path[.. ix], &path[ix + 1 ..]),
		None => ("", path),
	}
}


/// Encode arguments as a query string, in name order.
fn query(args: &Arguments) -> String {
	args
		.iter()
		.map(
			|(name, value)| if value.is_empty() {
				name.to_string()
			} else {
				format!("{}={}", name, value)
			}
		)
		.collect::<Vec<_>>()
		.join("&")
}


impl<W: Write> Controller for DryRun<W> {
	fn current_path(&self) -> String {
		self.current.clone()
	}


	fn post_obj(&mut self, kind: EntityKind, path: &str, attributes: Attributes) {
		let (parent, name) = split_path(path);

		let body = serde_json::json!({
			"category": kind.name(),
			"name": name,
			"parent": parent,
			"attributes": attributes,
		});

		let url = self.url(&format!("/{}s", kind.name()));
		self.request("POST", url, Some(body));
	}


	fn get_object(&mut self, path: &str) {
		let url = self.url(&format!("/hierarchy{}", path));
		self.request("GET", url, None);
	}


	fn update_obj(&mut self, path: &str, attributes: Attributes) {
		let targets = if path == crate::runtime::path::SELECTION {
			self.selection.clone()
		} else {
			vec![path.to_owned()]
		};

		for target in targets {
			let url = self.url(&format!("/hierarchy{}", target));
			let body = serde_json::json!({ "attributes": attributes });
			self.request("PATCH", url, Some(body));
		}
	}


	fn delete_obj(&mut self, path: &str) {
		let url = self.url(&format!("/hierarchy{}", path));
		self.request("DELETE", url, None);
	}


	fn search_objects(&mut self, kind: EntityKind, path: &str, filters: &Arguments) {
		let mut url = self.url(&format!("/{}s?parent={}", kind.name(), path));

		if !filters.is_empty() {
			url.push('&');
			url.push_str(&query(filters));
		}

		self.request("GET", url, None);
	}


	fn ls(&mut self, path: &str, args: &Arguments) {
		let mut url = self.url(&format!("/hierarchy{}/children", path));

		if !args.is_empty() {
			url.push('?');
			url.push_str(&query(args));
		}

		self.request("GET", url, None);
	}


	fn cd(&mut self, path: &str) {
		tracing::debug!(from = %self.current, to = path, "changing path");
		self.current = path.to_owned();
	}


	fn tree(&mut self, path: &str, depth: u32) {
		let url = self.url(&format!("/hierarchy{}?depth={}", path, depth));
		self.request("GET", url, None);
	}


	fn select(&mut self, paths: &[String]) {
		self.selection = paths.to_vec();
		tracing::debug!(count = paths.len(), "selection replaced");
	}


	fn clear(&mut self) {
		let cleared = write!(self.output, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1));

		if let Err(error) = cleared {
			tracing::error!(%error, "failed to clear the screen");
		}
	}


	fn exit(&mut self) {
		self.exited = true;
	}


	fn write(&mut self, text: &str) -> io::Result<()> {
		self.output.write_all(text.as_bytes())?;
		self.output.flush()
	}
}


#[cfg(test)]
mod tests {
	use super::*;


	fn dry_run() -> DryRun<Vec<u8>> {
		DryRun::new("http://localhost:3001/", "/Physical", Vec::new())
	}


	#[test]
	fn test_post() {
		let mut controller = dry_run();
		let mut attributes = Attributes::new();
		attributes.insert("color".into(), "red".into());

		controller.post_obj(EntityKind::Tenant, "/Physical/demo", attributes);

		assert_eq!(
			controller.requests(),
			&[
				Request {
					method: "POST",
					url: "http://localhost:3001/api/tenants".into(),
					body: Some(serde_json::json!({
						"category": "tenant",
						"name": "demo",
						"parent": "/Physical",
						"attributes": { "color": "red" },
					})),
				}
			]
		);

		let output = String::from_utf8_lossy(controller.output());
		assert!(output.starts_with("{\"method\":\"POST\""));
	}


	#[test]
	fn test_update_selection() {
		let mut controller = dry_run();
		controller.select(&["/Physical/A".to_owned(), "/Physical/B".to_owned()]);
		controller.update_obj("_", Attributes::new());

		let urls: Vec<_> = controller
			.requests()
			.iter()
			.map(|request| request.url.as_str())
			.collect();

		assert_eq!(
			urls,
			[
				"http://localhost:3001/api/hierarchy/Physical/A",
				"http://localhost:3001/api/hierarchy/Physical/B",
			]
		);
	}


	#[test]
	fn test_listing_query() {
		let mut controller = dry_run();
		let mut args = Arguments::new();
		args.insert("s".into(), "height".into());
		args.insert("r".into(), "".into());

		controller.search_objects(EntityKind::Rack, "/Physical/SI", &args);
		controller.cd("/Physical/SI");

		assert_eq!(
			controller.requests()[0].url,
			"http://localhost:3001/api/racks?parent=/Physical/SI&r&s=height"
		);
		assert_eq!(controller.current_path(), "/Physical/SI");
	}


	#[test]
	fn test_request_history() {
		let mut controller = dry_run();

		for ix in 0 ..= REQUEST_HISTORY {
			controller.delete_obj(&format!("/Physical/R{}", ix));
		}

		assert_eq!(controller.requests().len(), REQUEST_HISTORY);
		assert_eq!(controller.requests()[0].url, "http://localhost:3001/api/hierarchy/Physical/R1");
	}


	#[test]
	fn test_split_path() {
		assert_eq!(split_path("/Physical/SI/R1"), ("/Physical/SI", "R1"));
		assert_eq!(split_path("/R1"), ("/", "R1"));
		assert_eq!(split_path("_"), ("", "_"));
	}
}
