use std::fmt::{self, Display};

use termion::color as term;
pub use termion::color::{Blue, Green, Red, Yellow};


/// Paint the foreground with a given color when formatting the value.
/// Painting is skipped when colors are disabled, so that redirected output stays plain.
pub struct Fg<C, T>(pub C, pub T);


impl<C, T> Display for Fg<C, T>
where
	C: term::Color + Copy,
	T: Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if enabled() {
			write!(f, "{}{}{}", term::Fg(self.0), self.1, term::Fg(term::Reset))
		} else {
			self.1.fmt(f)
		}
	}
}


thread_local! {
	static ENABLED: std::cell::Cell<bool> = std::cell::Cell::new(false);
}


/// Enable or disable colored output for the current thread.
pub fn set_enabled(enabled: bool) {
	ENABLED.with(|cell| cell.set(enabled));
}


fn enabled() -> bool {
	ENABLED.with(|cell| cell.get())
}
