use std::{
	io::{self, BufRead, Write},
	path::Path,
};

use crate::{
	fmt,
	runtime::{self, Controller, Runtime},
	syntax::{self, ast, source},
	term::color,
};


/// Exit code for input with syntax errors.
pub const SYNTAX_ERROR: i32 = 2;

/// Exit code for evaluation failures.
pub const RUNTIME_ERROR: i32 = 1;


/// Drives the runtime over scripts or interactive input, reporting errors.
pub struct Shell<C, E> {
	runtime: Runtime<C>,
	/// Diagnostics output.
	errors: E,
	/// Print the AST of each line.
	pub print_ast: bool,
	/// Parse only.
	pub check: bool,
}


impl<C, E> Shell<C, E>
where
	C: Controller,
	E: Write,
{
	pub fn new(controller: C, errors: E) -> Self {
		Self {
			runtime: Runtime::new(controller),
			errors,
			print_ast: false,
			check: false,
		}
	}


	pub fn runtime(&self) -> &Runtime<C> {
		&self.runtime
	}


	/// Run a script file, returning the exit code.
	pub fn run_file(&mut self, path: &Path) -> io::Result<i32> {
		let source = syntax::Source::from_path(path)?;
		self.run_source(&source)
	}


	/// Run a script, returning the exit code. In check mode, every line is parsed and all
	/// errors are reported. Otherwise, the first failure aborts the script.
	pub fn run_source(&mut self, source: &syntax::Source) -> io::Result<i32> {
		if self.check || self.print_ast {
			let mut failed = false;

			for line in source.lines.iter() {
				let analysis = self.runtime.analyze(&line.text);
				failed |= !analysis.is_ok();
				self.report_analysis(&analysis)?;
			}

			if failed {
				return Ok(SYNTAX_ERROR);
			}

			if self.check {
				return Ok(0);
			}
		}

		match self.runtime.run_source(source) {
			Ok(()) => Ok(0),

			Err(panic) => {
				let code = match &panic {
					runtime::Panic::Script { error, .. } if matches!(**error, runtime::Error::Syntax { .. }) => {
						SYNTAX_ERROR
					}
					_ => RUNTIME_ERROR,
				};

				writeln!(
					self.errors,
					"{}: {}",
					color::Fg(color::Red, "Error"),
					fmt::Show(&panic, self.runtime.interner())
				)?;

				Ok(code)
			}
		}
	}


	/// Read commands line by line until the end of input or the exit command. A trailing
	/// backslash continues the command on the next line.
	pub fn interactive<R, P>(&mut self, input: R, mut prompt: P) -> io::Result<i32>
	where
		R: BufRead,
		P: FnMut(&str) -> io::Result<()>,
	{
		let mut pending = String::new();
		let mut lines = input.lines();

		loop {
			if pending.is_empty() {
				prompt(&self.runtime.controller().current_path())?;
			}

			let line = match lines.next() {
				Some(line) => line?,
				None => break,
			};

			pending.push_str(&line);
			pending.push('\n');

			if line.trim_end().ends_with('\\') {
				continue;
			}

			for line in source::logical_lines(&pending) {
				self.run_line(&line.text)?;

				if self.runtime.exit_requested() {
					return Ok(0);
				}
			}

			pending.clear();
		}

		Ok(0)
	}


	/// Run a single logical line, reporting errors. Returns whether it succeeded.
	pub fn run_line(&mut self, line: &str) -> io::Result<bool> {
		if self.print_ast || self.check {
			let analysis = self.runtime.analyze(line);
			self.report_analysis(&analysis)?;

			if self.check {
				return Ok(analysis.is_ok());
			}
		}

		match self.runtime.run_line(line) {
			Ok(_) => Ok(true),

			Err(error) => {
				writeln!(
					self.errors,
					"{}: {}",
					color::Fg(color::Red, "Error"),
					fmt::Show(&error, self.runtime.interner())
				)?;

				Ok(false)
			}
		}
	}


	fn report_analysis(&mut self, analysis: &syntax::Analysis) -> io::Result<()> {
		for error in analysis.errors.iter() {
			writeln!(self.errors, "{}: {}", color::Fg(color::Red, "Error"), error)?;
		}

		if self.print_ast && analysis.is_ok() {
			writeln!(
				self.errors,
				"{}",
				fmt::Show(&analysis.block, ast::Context::from(self.runtime.interner()))
			)?;
		}

		Ok(())
	}
}


#[cfg(test)]
mod tests {
	use serial_test::serial;

	use super::*;
	use crate::controller::DryRun;


	fn shell() -> Shell<DryRun<Vec<u8>>, Vec<u8>> {
		Shell::new(DryRun::new("http://api", "/", Vec::new()), Vec::new())
	}


	fn output(shell: &Shell<DryRun<Vec<u8>>, Vec<u8>>) -> String {
		String::from_utf8_lossy(shell.runtime().controller().output()).into_owned()
	}


	#[test]
	#[serial]
	fn test_interactive_continuation() -> io::Result<()> {
		let mut shell = shell();
		let mut prompts = 0;

		let input = "print 1 + \\\n  2\n.var:x=3 // three\nprint ${x}\n";
		let code = shell.interactive(input.as_bytes(), |_| { prompts += 1; Ok(()) })?;

		assert_eq!(code, 0);
		assert_eq!(prompts, 4);
		assert_eq!(output(&shell), "3\n3\n");

		Ok(())
	}


	#[test]
	#[serial]
	fn test_exit_stops_input() -> io::Result<()> {
		let mut shell = shell();

		shell.interactive("print a\nexit\nprint b\n".as_bytes(), |_| Ok(()))?;

		assert_eq!(output(&shell), "a\n");
		assert!(shell.runtime().controller().exited());

		Ok(())
	}


	#[test]
	#[serial]
	fn test_errors_keep_session() -> io::Result<()> {
		let mut shell = shell();

		assert!(!shell.run_line("print 1 / 0")?);
		assert!(!shell.run_line("bogus")?);
		assert!(shell.run_line("print ok")?);

		let errors = String::from_utf8_lossy(&shell.errors).into_owned();
		assert!(errors.contains("division by zero"));
		assert!(errors.contains("command not processed"));
		assert_eq!(output(&shell), "ok\n");

		Ok(())
	}


	#[test]
	#[serial]
	fn test_check_mode() -> io::Result<()> {
		let mut shell = shell();
		shell.check = true;

		let source = syntax::Source::from_str(
			Path::new("<test>"),
			"print 1\n+xx:bad\nprint 2\n"
		);

		assert_eq!(shell.run_source(&source)?, SYNTAX_ERROR);
		assert_eq!(output(&shell), "");

		Ok(())
	}


	#[test]
	#[serial]
	fn test_script_failure() -> io::Result<()> {
		let mut shell = shell();

		let source = syntax::Source::from_str(
			Path::new("<test>"),
			"print 1\nprint ${missing}\nprint 2\n"
		);

		assert_eq!(shell.run_source(&source)?, RUNTIME_ERROR);
		assert_eq!(output(&shell), "1\n");

		let errors = String::from_utf8_lossy(&shell.errors).into_owned();
		assert!(errors.contains("line 2"));
		assert!(errors.contains("undefined variable missing"));

		Ok(())
	}
}
