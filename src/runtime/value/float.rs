use std::ops::{Add, Sub, Mul, Div, Rem, Neg};

use gc::{Finalize, Trace};


/// Implement std::ops for a newtype over f64.
macro_rules! op_impl {
	($type: ident, unary, $trait: ident, $method: ident) => {
		impl $trait for $type {
			type Output = Self;

			fn $method(self) -> Self::Output {
				Self(self.0.$method())
			}
		}
	};

	($type: ident, binary, $trait: ident, $method: ident) => {
		impl $trait for $type {
			type Output = Self;

			fn $method(self, rhs: Self) -> Self::Output {
				Self(self.0.$method(rhs.0))
			}
		}
	}
}


/// The float type. Arithmetic and comparison follow IEEE-754: division by zero yields
/// infinity or NaN, and NaN is different than every value, including itself.
#[derive(Debug, Default, Clone, PartialEq, PartialOrd)]
#[derive(Trace, Finalize)]
pub struct Float(pub f64);


impl Float {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0)
	}


	/// Check if the float is not a number.
	pub fn is_nan(&self) -> bool {
		self.0.is_nan()
	}
}


impl From<f64> for Float {
	fn from(f: f64) -> Self {
		Self(f)
	}
}


impl From<i64> for Float {
	fn from(int: i64) -> Self {
		Self(int as f64)
	}
}


op_impl!(Float, unary, Neg, neg);
op_impl!(Float, binary, Add, add);
op_impl!(Float, binary, Sub, sub);
op_impl!(Float, binary, Mul, mul);
op_impl!(Float, binary, Div, div);
op_impl!(Float, binary, Rem, rem);
