use super::{ast, TokenKind};


/// A strategy for synchronizing the token stream after an error.
#[derive(Debug)]
pub enum Strategy {
	/// Don't skip any token.
	Keep,
	/// Skip until after a token is found.
	Token {
		token: TokenKind,
		found: bool,
	},
}


impl Strategy {
	/// A dummy strategy to use when the end of input was already reached.
	pub fn eof() -> Self {
		Self::Keep
	}


	/// Skip until after a token is found.
	pub fn token(token: TokenKind) -> Self {
		Self::Token { token, found: false }
	}


	/// Skip the rest of the current statement, including its terminator.
	pub fn statement() -> Self {
		Self::token(TokenKind::Semicolon)
	}


	/// Indicates whether the stream has been synchronized.
	/// When this method returns false, the token should be skipped.
	pub fn synchronized(&mut self, token: &TokenKind) -> bool {
		match self {
			Self::Keep => true,

			Self::Token { found: true, .. } => true,
			Self::Token { token: expected, found } => {
				*found = token == expected;
				false
			}
		}
	}
}


/// A parser that can be synchronized.
pub trait Synchronizable<E> {
	/// Report the error and synchronize using the given strategy.
	fn synchronize(&mut self, error: E, sync: Strategy);
}


/// A result including a synchronization strategy.
pub type Result<T, E> = std::result::Result<T, (E, Strategy)>;


/// Extension trait for adding a sync strategy to a Result.
pub trait WithSync<T, E> {
	fn with_sync(self, strategy: Strategy) -> Result<T, E>;
}


impl<T, E> WithSync<T, E> for std::result::Result<T, E> {
	fn with_sync(self, strategy: Strategy) -> Result<T, E> {
		self.map_err(|error| (error, strategy))
	}
}


/// Extension trait for synchronizing from Result.
pub trait ResultExt<T, E> {
	/// Synchronize the parser using the current strategy, producing an ill-formed node on
	/// error.
	fn synchronize<P: Synchronizable<E>>(self, parser: &mut P) -> T;
}


impl<T, E> ResultExt<T, E> for Result<T, E>
where
	T: ast::IllFormed,
{
	fn synchronize<P: Synchronizable<E>>(self, parser: &mut P) -> T {
		match self {
			Ok(value) => value,

			Err((error, sync)) => {
				parser.synchronize(error, sync);
				T::ill_formed()
			}
		}
	}
}
