use std::io::{Read, Result};
use arrayvec::ArrayVec;
use byteorder::{ReadBytesExt, LE};
use glam::{Mat3, Vec2, Vec3};
use nonmax::NonMaxU32;
use shared::geom::MinMax;
use crate::{scene::Color, Readable};

//primitive impls

macro_rules! impl_readable_prim {
	($type:ty, $func:ident $(, $($endian:tt)*)?) => {
		impl Readable for $type {
			fn read<R: Read>(reader: &mut R) -> Result<Self> {
				reader.$func$($($endian)*)?()
			}
		}
	};
}

macro_rules! impl_readable_prim_le {
	($type:ty, $func:ident) => {
		impl_readable_prim!($type, $func, ::<LE>);
	};
}

impl_readable_prim!(u8, read_u8);
impl_readable_prim!(i8, read_i8);
impl_readable_prim_le!(u16, read_u16);
impl_readable_prim_le!(i16, read_i16);
impl_readable_prim_le!(u32, read_u32);
impl_readable_prim_le!(i32, read_i32);
impl_readable_prim_le!(f32, read_f32);

/// Single byte, any nonzero value is true.
impl Readable for bool {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(reader.read_u8()? != 0)
	}
}

impl<T: Readable, const N: usize> Readable for [T; N] {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut array = ArrayVec::<T, N>::new();
		for _ in 0..N {
			array.push(T::read(reader)?);
		}
		Ok(array.into_inner().ok().unwrap())//reads exactly N items
	}
}

/// All-ones marks "none".
impl Readable for Option<NonMaxU32> {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(NonMaxU32::new(reader.read_u32::<LE>()?))
	}
}

impl<T: Readable> Readable for MinMax<T> {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(MinMax { min: T::read(reader)?, max: T::read(reader)? })
	}
}

//glam impls

impl Readable for Vec2 {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(<[f32; 2]>::read(reader)?.into())
	}
}

impl Readable for Vec3 {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(<[f32; 3]>::read(reader)?.into())
	}
}

/// Right, up, forward basis vectors stored as columns.
impl Readable for Mat3 {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let [right, up, forward] = <[Vec3; 3]>::read(reader)?;
		Ok(Mat3::from_cols(right, up, forward))
	}
}

/// RGBA bytes normalized to 0..=1.
impl Readable for Color {
	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		Ok(Color::from_bytes(<[u8; 4]>::read(reader)?))
	}
}
