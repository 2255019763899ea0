//! Commands without arguments.

use super::{ast, CommandSpec, Syntax};


inventory::submit! {
	CommandSpec {
		name: "pwd",
		syntax: Syntax::NoArgs(|| ast::Command::Pwd),
		manual: "usage: pwd\nPrint the current path.",
	}
}


inventory::submit! {
	CommandSpec {
		name: "clear",
		syntax: Syntax::NoArgs(|| ast::Command::Clear),
		manual: "usage: clear\nClear the screen.",
	}
}


inventory::submit! {
	CommandSpec {
		name: "env",
		syntax: Syntax::NoArgs(|| ast::Command::Env),
		manual: "usage: env\nShow the shell settings and the variables.",
	}
}


inventory::submit! {
	CommandSpec {
		name: "exit",
		syntax: Syntax::NoArgs(|| ast::Command::Exit),
		manual: "usage: exit\nLeave the shell.",
	}
}
