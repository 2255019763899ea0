//! Formatting with a context. Variable and function names are interned symbols, so
//! printing ASTs, panics and environments needs the interner at hand.


/// Like `std::fmt::Display`, with an extra argument carrying the context.
pub trait Display<'a> {
	type Context: 'a;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result;
}


impl<'a, T> Display<'a> for &T
where
	T: Display<'a> + ?Sized,
{
	type Context = T::Context;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		T::fmt(self, f, context)
	}
}


/// Pairs a value with its context, to be used wherever `std::fmt::Display` is expected:
/// `format!("{}", Show(&panic, &interner))`.
#[derive(Debug)]
pub struct Show<T, C>(pub T, pub C);


impl<'a, T, C> std::fmt::Display for Show<T, C>
where
	T: Display<'a, Context = C>,
	C: Copy,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		self.0.fmt(f, self.1)
	}
}


/// Render to a string, like `ToString`.
pub trait FmtString<'a>: Display<'a> {
	fn fmt_string(&self, context: Self::Context) -> String;
}


impl<'a, T> FmtString<'a> for T
where
	T: Display<'a>,
	T::Context: Copy,
{
	fn fmt_string(&self, context: Self::Context) -> String {
		Show(self, context).to_string()
	}
}


/// Nesting depth of blocks in printed ASTs, two spaces per level.
#[derive(Debug, Default, Copy, Clone)]
pub struct Indent(u8);


impl Indent {
	pub fn deeper(self) -> Self {
		Self(self.0.saturating_add(1))
	}
}


impl std::fmt::Display for Indent {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:width$}", "", width = 2 * self.0 as usize)
	}
}


/// Write the items, separated by `separator`.
pub fn join<I, F>(
	f: &mut std::fmt::Formatter,
	items: I,
	separator: &str,
	mut item: F,
) -> std::fmt::Result
where
	I: IntoIterator,
	F: FnMut(I::Item, &mut std::fmt::Formatter) -> std::fmt::Result,
{
	for (ix, value) in items.into_iter().enumerate() {
		if ix > 0 {
			f.write_str(separator)?;
		}

		item(value, f)?;
	}

	Ok(())
}
