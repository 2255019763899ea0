use crate::syntax::{
	ast::{ArithmeticOp, ComparisonOp},
	SourcePos,
};
use super::{Float, Panic, Value};


/// Evaluate an arithmetic operator over evaluated operands.
/// Integers use wrapping fixed width semantics, with truncating division. A float operand
/// promotes the other numeric one. A string operand turns `+` into concatenation.
pub fn arithmetic(
	op: ArithmeticOp,
	left: Value,
	right: Value,
	pos: SourcePos,
) -> Result<Value, Panic> {
	match (&left, &right) {
		(Value::Int(left), Value::Int(right)) => integer(op, *left, *right, pos),

		(Value::Float(left), Value::Float(right)) => Ok(float(op, left.copy(), right.copy())),
		(Value::Int(left), Value::Float(right)) => Ok(float(op, (*left).into(), right.copy())),
		(Value::Float(left), Value::Int(right)) => Ok(float(op, left.copy(), (*right).into())),

		(Value::String(_), _) | (_, Value::String(_)) => concat(op, &left, &right, pos),

		_ => {
			tracing::warn!(
				?op,
				left = left.type_name(),
				right = right.type_name(),
				"invalid arithmetic operation attempted"
			);

			Err(Panic::invalid_arithmetic(left, right, pos))
		}
	}
}


fn integer(op: ArithmeticOp, left: i64, right: i64, pos: SourcePos) -> Result<Value, Panic> {
	let value = match op {
		ArithmeticOp::Plus => left.wrapping_add(right),
		ArithmeticOp::Minus => left.wrapping_sub(right),
		ArithmeticOp::Times => left.wrapping_mul(right),

		ArithmeticOp::Div | ArithmeticOp::Mod if right == 0 => {
			return Err(Panic::division_by_zero(pos))
		}

		ArithmeticOp::Div => left.wrapping_div(right),
		ArithmeticOp::Mod => left.wrapping_rem(right),
	};

	Ok(value.into())
}


fn float(op: ArithmeticOp, left: Float, right: Float) -> Value {
	let value = match op {
		ArithmeticOp::Plus => left + right,
		ArithmeticOp::Minus => left - right,
		ArithmeticOp::Times => left * right,
		ArithmeticOp::Div => left / right,
		ArithmeticOp::Mod => left % right,
	};

	value.into()
}


/// Concatenation, where at least one operand is a string. Numbers are converted to their
/// decimal text, on either side.
fn concat(op: ArithmeticOp, left: &Value, right: &Value, pos: SourcePos) -> Result<Value, Panic> {
	if op != ArithmeticOp::Plus {
		return Err(Panic::invalid_string_operator(pos));
	}

	let text = |value: &Value| match value {
		Value::String(_) | Value::Int(_) | Value::Float(_) => Some(value.text().into_owned()),
		_ => None,
	};

	match (text(left), text(right)) {
		(Some(left), Some(right)) => Ok((left + &right).into()),

		_ => {
			tracing::warn!(
				left = left.type_name(),
				right = right.type_name(),
				"invalid arithmetic operation attempted"
			);

			Err(Panic::invalid_arithmetic(left.copy(), right.copy(), pos))
		}
	}
}


/// Evaluate a comparison operator over evaluated operands.
/// Ordering is only defined among ints and among floats, without promotion. Equality
/// requires both operands to have the same type.
pub fn comparison(
	op: ComparisonOp,
	left: Value,
	right: Value,
	pos: SourcePos,
) -> Result<Value, Panic> {
	use std::cmp::Ordering;

	let ordering = |ordering: Option<Ordering>, accept: &[Ordering]| {
		ordering.map_or(false, |ordering| accept.contains(&ordering))
	};

	match op {
		ComparisonOp::Equals | ComparisonOp::NotEquals => {
			if !left.same_type(&right) {
				return Err(Panic::not_comparable(left, right, pos));
			}

			let equals = left == right;
			Ok((equals == (op == ComparisonOp::Equals)).into())
		}

		_ => {
			let order = match (&left, &right) {
				(Value::Int(left), Value::Int(right)) => Some(left.cmp(right)),
				(Value::Float(left), Value::Float(right)) => left.0.partial_cmp(&right.0),
				_ => return Err(Panic::not_comparable(left, right, pos)),
			};

			let result = match op {
				ComparisonOp::Greater => ordering(order, &[Ordering::Greater]),
				ComparisonOp::GreaterEquals => ordering(order, &[Ordering::Greater, Ordering::Equal]),
				ComparisonOp::Lower => ordering(order, &[Ordering::Less]),
				ComparisonOp::LowerEquals => ordering(order, &[Ordering::Less, Ordering::Equal]),
				ComparisonOp::Equals | ComparisonOp::NotEquals => unreachable!(),
			};

			Ok(result.into())
		}
	}
}


/// Boolean not. Non boolean operands yield nil.
pub fn not(value: Value) -> Value {
	match &value {
		Value::Bool(b) => (!*b).into(),
		_ => Value::Nil,
	}
}


pub fn negate(value: Value, pos: SourcePos) -> Result<Value, Panic> {
	match &value {
		Value::Int(int) => Ok(int.wrapping_neg().into()),
		Value::Float(float) => Ok((-float.copy()).into()),
		_ => Err(Panic::invalid_operand(value, pos)),
	}
}
