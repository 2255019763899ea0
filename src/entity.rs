use std::fmt::{self, Display};


/// The kinds of objects in the datacenter hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
	Tenant,
	Site,
	Building,
	Room,
	Rack,
	Device,
	Group,
	Corridor,
	Sensor,
	StrayDevice,
}


/// How the leading implicit segments of a relative path are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathMode {
	/// Relative to the current path.
	Std,
	/// Rooted at the physical hierarchy.
	Physical,
	/// Rooted at the stray device subtree.
	StrayDevice,
}


impl PathMode {
	/// The root used to complete relative paths, if the mode doesn't use the current path.
	pub fn root(&self) -> Option<&'static str> {
		match self {
			Self::Std => None,
			Self::Physical => Some("/Physical"),
			Self::StrayDevice => Some("/Physical/Stray"),
		}
	}
}


impl EntityKind {
	pub const ALL: [EntityKind; 10] = [
		Self::Tenant,
		Self::Site,
		Self::Building,
		Self::Room,
		Self::Rack,
		Self::Device,
		Self::Group,
		Self::Corridor,
		Self::Sensor,
		Self::StrayDevice,
	];


	/// The full keyword, as used by the API.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Tenant => "tenant",
			Self::Site => "site",
			Self::Building => "building",
			Self::Room => "room",
			Self::Rack => "rack",
			Self::Device => "device",
			Self::Group => "group",
			Self::Corridor => "corridor",
			Self::Sensor => "sensor",
			Self::StrayDevice => "stray_device",
		}
	}


	/// The two letter code used in shorthand creation (`+rk:`).
	pub fn code(&self) -> &'static str {
		match self {
			Self::Tenant => "tn",
			Self::Site => "si",
			Self::Building => "bd",
			Self::Room => "ro",
			Self::Rack => "rk",
			Self::Device => "dv",
			Self::Group => "gr",
			Self::Corridor => "co",
			Self::Sensor => "sr",
			Self::StrayDevice => "sd",
		}
	}


	/// The listing alias (`lsrack`).
	pub fn list_alias(&self) -> &'static str {
		match self {
			Self::Tenant => "lsten",
			Self::Site => "lssite",
			Self::Building => "lsbldg",
			Self::Room => "lsroom",
			Self::Rack => "lsrack",
			Self::Device => "lsdev",
			Self::Group => "lsgroup",
			Self::Corridor => "lscorridor",
			Self::Sensor => "lssensor",
			Self::StrayDevice => "lsstray",
		}
	}


	/// Attribute names for the positional `@` parameters of shorthand creation.
	pub fn positional_attributes(&self) -> &'static [&'static str] {
		match self {
			Self::Tenant => &["color"],
			Self::Site => &["orientation"],
			Self::Building => &["posXY", "rotation", "size"],
			Self::Room => &["posXY", "rotation", "size", "axisOrientation", "floorUnit"],
			Self::Rack => &["posXYZ", "posXYUnit", "rotation", "size"],
			Self::Device => &["slot", "sizeU", "side"],
			Self::Group => &["content"],
			Self::Corridor => &["content", "temperature"],
			Self::Sensor => &["type"],
			Self::StrayDevice => &["template"],
		}
	}


	/// The path mode used when creating an entity of this kind.
	pub fn path_mode(&self) -> PathMode {
		match self {
			Self::Tenant | Self::Site => PathMode::Physical,
			Self::StrayDevice => PathMode::StrayDevice,
			_ => PathMode::Std,
		}
	}


	/// Lookup a kind by its name or code.
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.name() == keyword || kind.code() == keyword)
	}


	/// Lookup a kind by its listing alias.
	pub fn from_list_alias(alias: &str) -> Option<Self> {
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.list_alias() == alias)
	}
}


impl Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}


impl Display for PathMode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Std => f.write_str("std"),
			Self::Physical => f.write_str("physical"),
			Self::StrayDevice => f.write_str("stray"),
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_keyword_lookup() {
		assert_eq!(EntityKind::from_keyword("rk"), Some(EntityKind::Rack));
		assert_eq!(EntityKind::from_keyword("building"), Some(EntityKind::Building));
		assert_eq!(EntityKind::from_keyword("lsrack"), None);
		assert_eq!(EntityKind::from_list_alias("lsrack"), Some(EntityKind::Rack));
	}


	#[test]
	fn test_codes_are_unique() {
		for kind in EntityKind::ALL.iter() {
			let same_code = EntityKind::ALL
				.iter()
				.filter(|other| other.code() == kind.code())
				.count();

			assert_eq!(same_code, 1, "duplicate code for {}", kind);
		}
	}
}
