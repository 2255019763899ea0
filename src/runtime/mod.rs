mod controller;
mod env;
pub mod format;
mod ops;
mod panic;
pub mod path;
#[cfg(test)]
mod tests;
pub mod value;

use std::path::Path;

use crate::{
	fmt::{self, Display},
	symbol,
	syntax::{self, ast, parser, source, SourcePos},
};
pub use controller::{Attributes, Controller};
pub use env::{Environment, SlotId};
pub use panic::Panic;
pub use value::{Array, Dict, Float, Str, Value};


/// Maximum nesting of function calls and scripts.
const MAX_DEPTH: usize = 256;

/// Depth for `tree` when none is given.
const DEFAULT_TREE_DEPTH: u32 = 1;


/// The failure of a logical line.
#[derive(Debug)]
pub enum Error {
	/// The line was rejected, nothing was executed.
	Syntax {
		line: Box<str>,
		errors: Box<[syntax::Error]>,
	},
	/// Evaluation was aborted.
	Panic {
		line: Box<str>,
		panic: Panic,
	},
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Syntax { errors, .. } => {
				for (ix, error) in errors.iter().enumerate() {
					if ix > 0 {
						f.write_str("\n\n")?;
					}

					write!(f, "{}", error)?;
				}

				Ok(())
			}

			Self::Panic { line, panic } => {
				source::highlight(f, line, panic.pos())?;
				write!(f, "\n{}", fmt::Show(panic, context))
			}
		}
	}
}


/// The tree walking evaluator. The environment lives for the whole session, so that
/// variables and functions survive across lines.
pub struct Runtime<C> {
	env: Environment,
	interner: symbol::Interner,
	controller: C,
	/// Nesting of function calls and scripts.
	depth: usize,
	exited: bool,
}


impl<C: Controller> Runtime<C> {
	pub fn new(controller: C) -> Self {
		Self {
			env: Environment::new(),
			interner: symbol::Interner::new(),
			controller,
			depth: 0,
			exited: false,
		}
	}


	pub fn interner(&self) -> &symbol::Interner {
		&self.interner
	}


	pub fn environment(&self) -> &Environment {
		&self.env
	}


	pub fn controller(&self) -> &C {
		&self.controller
	}


	/// Whether the `exit` command was executed.
	pub fn exit_requested(&self) -> bool {
		self.exited
	}


	/// Parse a logical line, without executing it.
	pub fn analyze(&mut self, line: &str) -> syntax::Analysis {
		syntax::Analysis::analyze(line, &mut self.interner)
	}


	/// Parse and execute a logical line. Lines with syntax errors are not executed at all.
	pub fn run_line(&mut self, line: &str) -> Result<Value, Error> {
		let analysis = self.analyze(line);

		if !analysis.is_ok() {
			return Err(Error::Syntax { line: line.into(), errors: analysis.errors });
		}

		self
			.eval(&analysis.block)
			.map_err(|panic| Error::Panic { line: line.into(), panic })
	}


	/// Run every line of a script. The first failure aborts the script.
	pub fn run_source(&mut self, source: &syntax::Source) -> Result<(), Panic> {
		self.run_script(source, SourcePos::default())
	}


	/// Evaluate a block in the session's environment.
	pub fn eval(&mut self, block: &ast::Block) -> Result<Value, Panic> {
		self.eval_block(block)
	}


	fn run_script(&mut self, source: &syntax::Source, pos: SourcePos) -> Result<(), Panic> {
		tracing::debug!(path = %source.path.display(), lines = source.lines.len(), "running script");

		self.nested(
			pos,
			|runtime| {
				for line in source.lines.iter() {
					if runtime.exited {
						break;
					}

					runtime
						.run_line(&line.text)
						.map_err(
							|error| Panic::Script {
								path: source.path.clone(),
								line: line.number,
								error: Box::new(error),
								pos,
							}
						)?;
				}

				Ok(())
			}
		)
	}


	/// Run a nested evaluation, like a function call, guarding the nesting depth.
	fn nested<T, F>(&mut self, pos: SourcePos, f: F) -> Result<T, Panic>
	where
		F: FnOnce(&mut Self) -> Result<T, Panic>,
	{
		if self.depth >= MAX_DEPTH {
			return Err(Panic::stack_overflow(pos));
		}

		self.depth += 1;
		let result = f(self);
		self.depth -= 1;

		result
	}


	/// Evaluate the statements in order, producing the value of the last one.
	fn eval_block(&mut self, block: &ast::Block) -> Result<Value, Panic> {
		let mut value = Value::Nil;

		for statement in block.iter() {
			if self.exited {
				break;
			}

			value = self.eval_statement(statement)?;
		}

		Ok(value)
	}


	/// Evaluate a condition, which must produce a boolean.
	fn eval_condition(&mut self, condition: &ast::Expr) -> Result<bool, Panic> {
		match self.eval_expr(condition)? {
			Value::Bool(b) => Ok(b),
			value => Err(Panic::invalid_condition(value, condition.pos())),
		}
	}


	fn eval_expr(&mut self, expr: &ast::Expr) -> Result<Value, Panic> {
		match expr {
			ast::Expr::Literal { literal, .. } => Ok(
				match literal {
					ast::Literal::Bool(b) => (*b).into(),
					ast::Literal::Int(int) => (*int).into(),
					ast::Literal::Float(float) => (*float).into(),
					ast::Literal::String(string) => Value::from(&**string),
				}
			),

			ast::Expr::Array { items, .. } => {
				let mut array = Vec::with_capacity(items.len());

				for item in items.iter() {
					array.push(self.eval_expr(item)?);
				}

				Ok(array.into())
			}

			ast::Expr::Dict { entries, .. } => {
				let dict = Dict::default();

				for (key, value) in entries.iter() {
					dict.insert(&**key, self.eval_expr(value)?);
				}

				Ok(dict.into())
			}

			ast::Expr::Arithmetic { op, left, right, pos } => {
				let left = self.eval_expr(left)?;
				let right = self.eval_expr(right)?;

				ops::arithmetic(*op, left, right, *pos)
			}

			ast::Expr::Comparison { op, left, right, pos } => {
				let left = self.eval_expr(left)?;
				let right = self.eval_expr(right)?;

				ops::comparison(*op, left, right, *pos)
			}

			// Short circuit.
			ast::Expr::Logical { op, left, right, .. } => {
				let left = match self.eval_expr(left)? {
					Value::Bool(b) => b,
					value => return Err(Panic::invalid_logical_operand(value, left.pos())),
				};

				match (op, left) {
					(ast::LogicalOp::And, false) => return Ok(false.into()),
					(ast::LogicalOp::Or, true) => return Ok(true.into()),
					_ => (),
				}

				match self.eval_expr(right)? {
					Value::Bool(b) => Ok(b.into()),
					value => Err(Panic::invalid_logical_operand(value, right.pos())),
				}
			}

			ast::Expr::Not { operand, .. } => {
				let value = self.eval_expr(operand)?;
				Ok(ops::not(value))
			}

			ast::Expr::Negate { operand, .. } => {
				let value = self.eval_expr(operand)?;
				ops::negate(value, operand.pos())
			}

			ast::Expr::Path { path, mode, .. } => {
				let value = self.eval_expr(path)?;
				let text = match &value {
					Value::String(string) => string.copy(),
					_ => return Err(Panic::type_error(value, "path string", path.pos())),
				};

				let current = self.controller.current_path();

				Ok(path::resolve(&text, *mode, &current).into())
			}

			ast::Expr::Format { template, args, pos } => {
				let mut values = Vec::with_capacity(args.len());

				for arg in args.iter() {
					values.push(self.eval_expr(arg)?);
				}

				format::format(template, &values)
					.map(Value::from)
					.map_err(|error| Panic::format(error, *pos))
			}

			ast::Expr::Symbol { symbol, pos } => self
				.env
				.fetch(*symbol)
				.ok_or_else(|| Panic::undefined_variable(*symbol, *pos)),

		}
	}


	fn eval_statement(&mut self, statement: &ast::Statement) -> Result<Value, Panic> {
		match statement {
			// The slot is bound before evaluating the value.
			ast::Statement::Assign { target, value, .. } => {
				let slot = self.env.resolve(*target);

				match value {
					Some(expr) => {
						let value = self.eval_expr(expr)?;
						self.env.store(slot, value.copy());
						Ok(value)
					}

					None => Ok(Value::Nil),
				}
			}

			ast::Statement::If { condition, then, elifs, otherwise, .. } => {
				if self.eval_condition(condition)? {
					return self.eval_block(then);
				}

				for (condition, block) in elifs.iter() {
					if self.eval_condition(condition)? {
						return self.eval_block(block);
					}
				}

				match otherwise {
					Some(block) => self.eval_block(block),
					None => Ok(Value::Nil),
				}
			}

			ast::Statement::While { condition, body, .. } => {
				while !self.exited && self.eval_condition(condition)? {
					self.eval_block(body)?;
				}

				Ok(Value::Nil)
			}

			ast::Statement::For { init, condition, increment, body, .. } => {
				self.eval_statement(init)?;

				while !self.exited && self.eval_condition(condition)? {
					self.eval_block(body)?;
					self.eval_statement(increment)?;
				}

				Ok(Value::Nil)
			}

			ast::Statement::ForIn { variable, array, body, .. } => {
				let value = self.eval_expr(array)?;
				let items = match &value {
					Value::Array(items) => items.snapshot(),
					_ => return Err(Panic::type_error(value, "array", array.pos())),
				};

				for item in items {
					if self.exited {
						break;
					}

					self.env.assign(*variable, Some(item));
					self.eval_block(body)?;
				}

				Ok(Value::Nil)
			}

			ast::Statement::ForRange { variable, start, end, body, .. } => {
				for ix in *start ..= *end {
					if self.exited {
						break;
					}

					self.env.assign(*variable, Some(ix.into()));
					self.eval_block(body)?;
				}

				Ok(Value::Nil)
			}

			ast::Statement::Block(block) => self.eval_block(block),

			ast::Statement::FunctionDecl { name, body, .. } => {
				self.env.declare_function(*name, body.clone());
				Ok(Value::Nil)
			}

			ast::Statement::FunctionCall { name, pos } => {
				let body = self
					.env
					.function(*name)
					.ok_or_else(|| Panic::undefined_function(*name, *pos))?;

				self.nested(*pos, |runtime| runtime.eval_block(&body))
			}

			ast::Statement::Unset { mode, name, .. } => {
				match mode {
					ast::UnsetMode::Variable => self.env.unset_variable(*name),
					ast::UnsetMode::Function => self.env.unset_function(*name),
				};

				Ok(Value::Nil)
			}

			ast::Statement::Print { value, pos } => {
				let value = self.eval_expr(value)?;
				self.write(&format!("{}\n", value.text()), *pos)?;
				Ok(Value::Nil)
			}

			ast::Statement::Printf { format, args, pos } => {
				let value = self.eval_expr(format)?;
				let template = match &value {
					Value::String(string) => string.copy(),
					_ => return Err(Panic::type_error(value, "format string", format.pos())),
				};

				let mut values = Vec::with_capacity(args.len());

				for arg in args.iter() {
					values.push(self.eval_expr(arg)?);
				}

				let output = format::format(&template, &values)
					.map_err(|error| Panic::format(error, *pos))?;

				self.write(&format!("{}\n", output), *pos)?;

				Ok(Value::Nil)
			}

			ast::Statement::Command { command, pos } => {
				self.eval_command(command, *pos)?;
				Ok(Value::Nil)
			}

			ast::Statement::IllFormed => unreachable!("ill-formed statement evaluated"),
		}
	}


	/// Evaluate the operands of a command, and hand it to the controller.
	fn eval_command(&mut self, command: &ast::Command, pos: SourcePos) -> Result<(), Panic> {
		match command {
			ast::Command::Ls { path, args } => {
				let path = self.eval_optional_path(path.as_ref())?;
				self.controller.ls(&path, args);
			}

			ast::Command::Cd { path } => {
				let path = match path {
					Some(path) => self.eval_path(path)?,
					None => "/".to_owned(),
				};

				self.controller.cd(&path);
			}

			ast::Command::Pwd => {
				let current = self.controller.current_path();
				self.write(&format!("{}\n", current), pos)?;
			}

			ast::Command::Tree { path, depth } => {
				let path = self.eval_optional_path(path.as_ref())?;

				let depth = match depth {
					Some(expr) => match self.eval_expr(expr)? {
						Value::Int(int) if int >= 0 && int <= u32::MAX as i64 => int as u32,
						value => return Err(Panic::type_error(value, "non-negative int", expr.pos())),
					},

					None => DEFAULT_TREE_DEPTH,
				};

				self.controller.tree(&path, depth);
			}

			ast::Command::Get { path } => {
				let path = self.eval_path(path)?;
				self.controller.get_object(&path);
			}

			ast::Command::Search { kind, path, args } => {
				let path = self.eval_optional_path(path.as_ref())?;
				self.controller.search_objects(*kind, &path, args);
			}

			ast::Command::Create { kind, path, attributes } => {
				let path = self.eval_path(path)?;
				let attributes = self.eval_attributes(attributes)?;
				self.controller.post_obj(*kind, &path, attributes);
			}

			ast::Command::Update { path, attributes } => {
				let path = self.eval_path(path)?;
				let attributes = self.eval_attributes(attributes)?;
				self.controller.update_obj(&path, attributes);
			}

			ast::Command::Delete { path } => {
				let path = self.eval_path(path)?;
				self.controller.delete_obj(&path);
			}

			ast::Command::Select { paths } => {
				let mut resolved = Vec::with_capacity(paths.len());

				for path in paths.iter() {
					resolved.push(self.eval_path(path)?);
				}

				self.controller.select(&resolved);
			}

			ast::Command::RunScript { path } => {
				let value = self.eval_expr(path)?;
				let file = match &value {
					Value::String(string) => string.copy(),
					_ => return Err(Panic::type_error(value, "script path", path.pos())),
				};

				let source = syntax::Source::from_path(Path::new(file.as_str()))
					.map_err(|error| Panic::io(error, path.pos()))?;

				self.run_script(&source, pos)?;
			}

			ast::Command::Man { topic } => {
				let text = parser::manual(topic.as_deref())
					.ok_or_else(
						|| Panic::NoManual {
							topic: topic.clone().unwrap_or_default(),
							pos,
						}
					)?;

				self.write(&format!("{}\n", text), pos)?;
			}

			ast::Command::Clear => self.controller.clear(),

			ast::Command::Env => {
				let mut output = String::new();

				for (name, value) in self.env.variables() {
					output.push_str(&format!("{} = {}\n", fmt::Show(name, &self.interner), value));
				}

				for name in self.env.functions() {
					output.push_str(&format!("{}()\n", fmt::Show(name, &self.interner)));
				}

				self.write(&output, pos)?;
			}

			ast::Command::Exit => {
				self.exited = true;
				self.controller.exit();
			}
		}

		Ok(())
	}


	/// Evaluate a path expression, which resolves to a clean path string.
	fn eval_path(&mut self, expr: &ast::Expr) -> Result<String, Panic> {
		let value = self.eval_expr(expr)?;

		match &value {
			Value::String(string) => Ok(string.as_str().to_owned()),
			_ => Err(Panic::type_error(value, "path string", expr.pos())),
		}
	}


	/// Evaluate an optional path, defaulting to the current one.
	fn eval_optional_path(&mut self, expr: Option<&ast::Expr>) -> Result<String, Panic> {
		match expr {
			Some(expr) => self.eval_path(expr),
			None => Ok(self.controller.current_path()),
		}
	}


	fn eval_attributes(&mut self, attributes: &[ast::Attribute]) -> Result<Attributes, Panic> {
		let mut map = Attributes::new();

		for attribute in attributes {
			let value = self.eval_expr(&attribute.value)?;
			map.insert(attribute.name.to_string(), value.to_json());
		}

		Ok(map)
	}


	fn write(&mut self, text: &str, pos: SourcePos) -> Result<(), Panic> {
		self.controller
			.write(text)
			.map_err(|error| Panic::io(error, pos))
	}
}
