use std::{
	io::{self, Write},
	path::Path,
};

use assert_matches::assert_matches;
use serial_test::serial;

use crate::{
	entity::EntityKind,
	fmt::FmtString,
	syntax::{self, ast::Arguments},
	tests,
};
use super::{Attributes, Controller, Error, Panic, Runtime, Value};


/// A controller that records every call.
#[derive(Debug)]
struct Recorder {
	current: String,
	calls: Vec<String>,
	output: String,
}


impl Default for Recorder {
	fn default() -> Self {
		Self {
			current: "/Physical".into(),
			calls: Vec::new(),
			output: String::new(),
		}
	}
}


impl Controller for Recorder {
	fn current_path(&self) -> String {
		self.current.clone()
	}

	fn post_obj(&mut self, kind: EntityKind, path: &str, attributes: Attributes) {
		let attributes = serde_json::Value::Object(attributes);
		self.calls.push(format!("post {} {} {}", kind, path, attributes));
	}

	fn get_object(&mut self, path: &str) {
		self.calls.push(format!("get {}", path));
	}

	fn update_obj(&mut self, path: &str, attributes: Attributes) {
		let attributes = serde_json::Value::Object(attributes);
		self.calls.push(format!("update {} {}", path, attributes));
	}

	fn delete_obj(&mut self, path: &str) {
		self.calls.push(format!("delete {}", path));
	}

	fn search_objects(&mut self, kind: EntityKind, path: &str, filters: &Arguments) {
		self.calls.push(format!("search {} {} {:?}", kind, path, filters));
	}

	fn ls(&mut self, path: &str, args: &Arguments) {
		self.calls.push(format!("ls {} {:?}", path, args));
	}

	fn cd(&mut self, path: &str) {
		self.current = path.to_owned();
		self.calls.push(format!("cd {}", path));
	}

	fn tree(&mut self, path: &str, depth: u32) {
		self.calls.push(format!("tree {} {}", path, depth));
	}

	fn select(&mut self, paths: &[String]) {
		self.calls.push(format!("select {:?}", paths));
	}

	fn clear(&mut self) {
		self.calls.push("clear".into());
	}

	fn exit(&mut self) {
		self.calls.push("exit".into());
	}

	fn write(&mut self, text: &str) -> io::Result<()> {
		self.output.push_str(text);
		Ok(())
	}
}


fn runtime() -> Runtime<Recorder> {
	Runtime::new(Recorder::default())
}


/// Run the lines in a fresh runtime, stopping at the first failure.
fn run(script: &str) -> (Runtime<Recorder>, Result<(), Error>) {
	let mut runtime = runtime();
	let mut result = Ok(());

	for line in syntax::source::logical_lines(script) {
		if let Err(error) = runtime.run_line(&line.text) {
			result = Err(error);
			break;
		}
	}

	(runtime, result)
}


/// Run the lines, which must succeed, and get the output.
fn output(script: &str) -> String {
	let (runtime, result) = run(script);

	if let Err(error) = result {
		panic!("{}", error.fmt_string(runtime.interner()));
	}

	runtime.controller().output.clone()
}


/// Run the lines, which must fail with a panic.
fn panic(script: &str) -> Panic {
	match run(script).1 {
		Err(Error::Panic { panic, .. }) => panic,
		Err(Error::Syntax { errors, .. }) => panic!("syntax error: {}", errors[0]),
		Ok(()) => panic!("expected panic for {:?}", script),
	}
}


fn calls(script: &str) -> Vec<String> {
	let (runtime, result) = run(script);

	if let Err(error) = result {
		panic!("{}", error.fmt_string(runtime.interner()));
	}

	runtime.controller().calls.clone()
}


fn test_dir<P, F>(path: P, mut check: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Result<(), Panic>) -> bool,
{
	tests::util::test_dir(
		path,
		move |path, file| {
			let source = syntax::Source::from_reader(path, file)?;
			let mut runtime = runtime();

			let result = runtime.run_source(&source);

			if !check(&result) {
				match result {
					Ok(()) => panic!("File {}: expected failure", path.display()),
					Err(panic) => panic!("{}", panic.fmt_string(runtime.interner())),
				}
			}

			Ok(())
		}
	)
}


// The garbage collector is not thread safe, so the following tests must not run in
// parallel.


#[test]
#[serial]
fn test_positive() -> io::Result<()> {
	test_dir("src/runtime/tests/data/positive", Result::is_ok)
}


#[test]
#[serial]
fn test_negative() -> io::Result<()> {
	test_dir("src/runtime/tests/data/negative", Result::is_err)
}


#[test]
#[serial]
fn test_integer_arithmetic() {
	let pairs: &[(i64, i64)] = &[(7, 2), (-7, 2), (7, -2), (-7, -2), (0, 5), (i64::MAX, 1), (i64::MAX, -1)];

	for &(a, b) in pairs {
		let script = format!(
			".var:a={}; .var:b={}; printf \"%d %d %d %d %d\", ${{a}} + ${{b}}, ${{a}} - ${{b}}, ${{a}} * ${{b}}, ${{a}} / ${{b}}, ${{a}} % ${{b}}",
			a,
			b
		);

		let expected = format!(
			"{} {} {} {} {}\n",
			a.wrapping_add(b),
			a.wrapping_sub(b),
			a.wrapping_mul(b),
			a.wrapping_div(b),
			a.wrapping_rem(b)
		);

		assert_eq!(output(&script), expected, "for {} and {}", a, b);
	}
}


#[test]
#[serial]
fn test_float_arithmetic() {
	assert_eq!(output("print 1 + 0.5"), "1.5\n");
	assert_eq!(output("print 0.5 * 4"), "2\n");
	assert_eq!(output("print 1.0 / 0"), "inf\n");
	assert_eq!(output("print -1 / 0.0"), "-inf\n");
	assert_eq!(output("print 0.0 / 0"), "NaN\n");
	assert_eq!(output("print 7.5 % 2"), "1.5\n");
}


#[test]
#[serial]
fn test_division_by_zero() {
	assert_matches!(panic("print 1 / 0"), Panic::DivisionByZero { .. });
	assert_matches!(panic("print 1 % 0"), Panic::DivisionByZero { .. });
}


#[test]
#[serial]
fn test_concatenation() {
	assert_eq!(output("print \"a\" + 3"), "a3\n");
	assert_eq!(output("print 3 + \"a\""), "3a\n");
	assert_eq!(output("print 1.5 + \"x\" + 2"), "1.5x2\n");

	assert_matches!(panic("print \"a\" - 1"), Panic::InvalidStringOperator { .. });
	assert_matches!(panic("print \"a\" + true"), Panic::InvalidArithmetic { .. });
	assert_matches!(panic("print true + 1"), Panic::InvalidArithmetic { .. });
}


#[test]
#[serial]
fn test_comparison_strictness() {
	assert_matches!(panic("print 1 == 1.0"), Panic::NotComparable { .. });
	assert_matches!(panic("print 1 < 1.5"), Panic::NotComparable { .. });
	assert_matches!(panic("print \"a\" < \"b\""), Panic::NotComparable { .. });

	assert_eq!(output("print 2 > 1"), "true\n");
	assert_eq!(output("print 1.5 <= 1.5"), "true\n");
	assert_eq!(output("print \"a\" == \"a\""), "true\n");
	assert_eq!(output("print [1, 2] != [1, 2]"), "false\n");
}


#[test]
#[serial]
fn test_logical() {
	assert_eq!(output("print !true"), "false\n");
	assert_eq!(output("print !1"), "nil\n");
	assert_eq!(output("print false && ${undefined}"), "false\n");
	assert_eq!(output("print true || ${undefined}"), "true\n");
	assert_eq!(output("print true && 1 < 2"), "true\n");

	assert_matches!(panic("print 1 && true"), Panic::InvalidLogicalOperand { .. });
	assert_matches!(panic("print true || 2"), Panic::InvalidLogicalOperand { .. });
	assert_matches!(panic("print -true"), Panic::InvalidOperand { .. });
}


#[test]
#[serial]
fn test_slots() {
	let mut runtime = runtime();

	let slot = |runtime: &Runtime<Recorder>, name: &str| {
		runtime
			.interner()
			.get(name)
			.and_then(|symbol| runtime.environment().slot(symbol))
	};

	assert!(runtime.run_line(".var:x=1").is_ok());
	let first = slot(&runtime, "x");

	assert!(runtime.run_line(".var:x=2").is_ok());
	assert_eq!(slot(&runtime, "x"), first);

	assert!(runtime.run_line("unset -v x").is_ok());
	assert!(runtime.run_line(".var:x=3").is_ok());
	assert_eq!(slot(&runtime, "x"), first);

	assert!(runtime.run_line(".var:y").is_ok());
	assert_eq!(runtime.environment().slot_count(), 2);
	assert_matches!(first, Some(id) if id.0 == 1);
}


#[test]
#[serial]
fn test_variables() {
	assert_eq!(output(".var:x=1; unset -v x; print ${x}"), "nil\n");
	assert_eq!(output(".var:x; print ${x}"), "nil\n");
	assert_eq!(output(".var:name=R1; print rack &{name} ok"), "rack R1 ok\n");
	assert_eq!(output(".var:a=[1, \"b\"]; print ${a}"), "[1, \"b\"]\n");

	assert_matches!(panic("print ${never}"), Panic::UndefinedVariable { .. });
}


#[test]
#[serial]
fn test_conditionals() {
	let script = "\
		.var:a=3
		if ${a} == 1 { print one } elif ${a} == 3 { print three } elif ${a} > 2 { print big } else { print other }
		if ${a} < 0 { print negative } else { print positive }
		if false { print never }
	";

	assert_eq!(output(script), "three\npositive\n");

	assert_matches!(panic("if 1 { print x }"), Panic::InvalidCondition { .. });
}


#[test]
#[serial]
fn test_loops() {
	assert_eq!(output("for i in 1..3 { print ${i} }"), "1\n2\n3\n");
	assert_eq!(output("for i in 3..1 { print ${i} }"), "");
	assert_eq!(output("for x in [\"a\", 2] { print ${x} }"), "a\n2\n");
	assert_eq!(
		output(".var:i=0; while ${i} < 3 { .var:i=${i} + 1 }; print ${i}"),
		"3\n"
	);
	assert_eq!(
		output("for (.var:i=0; ${i} < 2; .var:i=${i} + 1) { print ${i} }"),
		"0\n1\n"
	);

	assert_matches!(panic("for x in 3 { print ${x} }"), Panic::TypeError { expected: "array", .. });
	assert_matches!(panic(".var:i=0; while ${i} { print x }"), Panic::InvalidCondition { .. });
}


#[test]
#[serial]
fn test_functions() {
	let script = "\
		greet() { print hello; .var:count=${count} + 1 }
		.var:count=0
		greet(); greet()
		print ${count}
	";

	assert_eq!(output(script), "hello\nhello\n2\n");

	assert_matches!(panic("greet()"), Panic::UndefinedFunction { .. });
	assert_matches!(
		panic("greet() { print hi }; unset -f greet; greet()"),
		Panic::UndefinedFunction { .. }
	);
}


#[test]
#[serial]
fn test_stack_overflow() {
	// Deep recursion needs more stack than the default for test threads.
	let result = std::thread::Builder::new()
		.stack_size(256 << 20)
		.spawn(|| matches!(panic("loop() { loop() }; loop()"), Panic::StackOverflow { .. }))
		.and_then(|handle| handle.join().map_err(|_| io::Error::new(io::ErrorKind::Other, "thread panicked")));

	assert_matches!(result, Ok(true));
}


#[test]
#[serial]
fn test_printf() {
	assert_eq!(output("printf \"%s has %d units, %.1f%%\", \"R1\", 42, 12.26"), "R1 has 42 units, 12.3%\n");

	assert_matches!(panic("printf \"%d %d\", 1"), Panic::Format { .. });
	assert_matches!(panic("printf 42"), Panic::TypeError { .. });
}


#[test]
#[serial]
fn test_commands() {
	assert_eq!(
		calls("+rk:R1@[1,2]@t@front; -R1; =; ={R1, /P/R2}; R1:height=42"),
		[
			"post rack /Physical/R1 {\"posXYUnit\":\"t\",\"posXYZ\":[1,2],\"rotation\":\"front\"}",
			"delete /Physical/R1",
			"select []",
			"select [\"/Physical/R1\", \"/P/R2\"]",
			"update /Physical/R1 {\"height\":42}",
		]
	);

	assert_eq!(
		calls("+tn:demo@red; +sd:D1"),
		[
			"post tenant /Physical/demo {\"color\":\"red\"}",
			"post stray_device /Physical/Stray/D1 {}",
		]
	);
}


#[test]
#[serial]
fn test_path_resolution() {
	assert_eq!(
		calls("cd /Physical/SI/B1; get ../B2/./R1; ls; tree R1 2; lsrack -s height"),
		[
			"cd /Physical/SI/B1",
			"get /Physical/SI/B2/R1",
			"ls /Physical/SI/B1 {}",
			"tree /Physical/SI/B1/R1 2",
			"search rack /Physical/SI/B1 {\"s\": \"height\"}",
		]
	);

	assert_eq!(calls("cd; tree"), ["cd /", "tree / 1"]);
	assert_eq!(calls(".var:r=R7; get ${r}/slot"), ["get /Physical/R7/slot"]);
}


#[test]
#[serial]
fn test_shell_commands() {
	let (runtime, result) = run("pwd; .var:x=1; f() {}; env; man cd; clear");

	assert!(result.is_ok());
	assert_eq!(runtime.controller().calls, ["clear"]);

	let output = &runtime.controller().output;
	assert!(output.starts_with("/Physical\nx = 1\nf()\nusage: cd"));

	assert_matches!(panic("man nothing"), Panic::NoManual { .. });
}


#[test]
#[serial]
fn test_exit() {
	let (runtime, result) = run("print a; exit; print b\nprint c");

	assert!(result.is_ok());
	assert!(runtime.exit_requested());
	assert_eq!(runtime.controller().output, "a\n");
	assert_eq!(runtime.controller().calls, ["exit"]);
}


#[test]
#[serial]
fn test_syntax_errors_reject_line() {
	let (runtime, result) = run("print 1; +xx:bad; print 2");

	assert_matches!(result, Err(Error::Syntax { errors, .. }) => assert_eq!(errors.len(), 1));
	assert_eq!(runtime.controller().output, "");
}


#[test]
#[serial]
fn test_unrecognized_characters_reject_line() {
	for script in &["+si:Café@0", "-R1é", "R2ü:color=red", ".var:x=5é"] {
		let (runtime, result) = run(script);

		assert_matches!(result, Err(Error::Syntax { .. }));
		assert!(runtime.controller().calls.is_empty());
	}

	assert_eq!(output("print Café"), "Café\n");
	assert_eq!(output("+tn:demo@\"Café\"; print ok"), "ok\n");
}


#[test]
#[serial]
fn test_dict_literal() {
	assert_eq!(
		output(r#".var:d={name: "R1", "size": 2 * 21}; print ${d}"#),
		"{\"name\": \"R1\", \"size\": 42}\n"
	);

	assert_matches!(panic(".var:d={}; print ${d} + 1"), Panic::InvalidArithmetic { .. });
}


#[test]
#[serial]
fn test_partial_effects_are_kept() {
	let (runtime, result) = run("print 1; +tn:a; print 1 / 0; print 2");

	assert_matches!(result, Err(Error::Panic { panic: Panic::DivisionByZero { .. }, .. }));
	assert_eq!(runtime.controller().output, "1\n");
	assert_eq!(runtime.controller().calls.len(), 1);
}


#[test]
#[serial]
fn test_error_rendering() {
	let (runtime, result) = run("print 1 + ${nope}");

	let rendered = match result {
		Err(error) => error.fmt_string(runtime.interner()),
		Ok(()) => panic!("expected error"),
	};

	assert_eq!(rendered, "print 1 + ${nope}\n          ^^^^^^^\nundefined variable nope");
}


#[test]
#[serial]
fn test_run_script() -> io::Result<()> {
	let mut script = tempfile::NamedTempFile::new()?;
	writeln!(script, ".var:n=2 // count")?;
	writeln!(script, "for i in 1..2 {{ print ${{i}} }}")?;
	writeln!(script, "print \\")?;
	writeln!(script, "  done")?;

	let path = script.path().display().to_string();

	let (runtime, result) = run(&format!(".cmds:{}; print ${{n}}", path));
	assert!(result.is_ok());
	assert_eq!(runtime.controller().output, "1\n2\ndone\n2\n");

	let mut broken = tempfile::NamedTempFile::new()?;
	writeln!(broken, "print first")?;
	writeln!(broken, "print 1 / 0")?;
	writeln!(broken, "print never")?;

	let path = broken.path().display().to_string();
	let (runtime, result) = run(&format!(".cmds:{}", path));

	assert_matches!(
		result,
		Err(Error::Panic { panic: Panic::Script { line: 2, error, .. }, .. }) => {
			assert_matches!(*error, Error::Panic { panic: Panic::DivisionByZero { .. }, .. })
		}
	);
	assert_eq!(runtime.controller().output, "first\n");

	assert_matches!(panic(".cmds:/nonexistent/script.ocli"), Panic::Io { .. });

	Ok(())
}


#[test]
#[serial]
fn test_dry_run() {
	use crate::controller::DryRun;

	let mut runtime = Runtime::new(DryRun::new("http://api", "/Physical", Vec::new()));

	assert!(runtime.run_line("+si:SI@NW; =SI; _:color=blue").is_ok());

	let methods: Vec<_> = runtime
		.controller()
		.requests()
		.iter()
		.map(|request| (request.method, request.url.as_str()))
		.collect();

	assert_eq!(
		methods,
		[("POST", "http://api/api/sites"), ("PATCH", "http://api/api/hierarchy/Physical/SI")]
	);
}


#[test]
#[serial]
fn test_value_json() {
	let value: Value = vec![Value::from(1), Value::from("a"), Value::Nil].into();
	assert_eq!(value.to_json(), serde_json::json!([1, "a", null]));
}
