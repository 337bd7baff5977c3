use std::fmt::{Display, Write};

use crate::{
    dialect::Dialect,
    error::{Error, Result},
    writer::{FormatContext, FormatWriter, Wrap},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Null,
    String(String),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    DateTime(chrono::NaiveDateTime),
    #[cfg(feature = "chrono")]
    DateTimeUtc(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

pub type Binds = Array<Bind>;

impl FormatWriter for Bind {
    fn format_writer<W: Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        _wrap: Wrap,
    ) -> Result<()> {
        match self {
            Bind::Null => context.write_token("NULL"),
            Bind::String(value) => context.write_string_literal(value),
            Bind::Bool(true) => context.write_token("TRUE"),
            Bind::Bool(false) => context.write_token("FALSE"),
            Bind::F32(value) => write_float(context, f64::from(*value), value),
            Bind::F64(value) => write_float(context, *value, value),
            Bind::I8(value) => context.write_display(value),
            Bind::I16(value) => context.write_display(value),
            Bind::I32(value) => context.write_display(value),
            Bind::I64(value) => context.write_display(value),
            Bind::U8(value) => context.write_display(value),
            Bind::U16(value) => context.write_display(value),
            Bind::U32(value) => context.write_display(value),
            Bind::U64(value) => context.write_display(value),
            #[cfg(feature = "uuid")]
            Bind::Uuid(value) => context.write_string_literal(&value.to_string()),
            #[cfg(feature = "chrono")]
            Bind::Date(value) => context.write_string_literal(&value.to_string()),
            #[cfg(feature = "chrono")]
            Bind::DateTime(value) => context.write_string_literal(&value.to_string()),
            #[cfg(feature = "chrono")]
            Bind::DateTimeUtc(value) => context.write_string_literal(&value.to_rfc3339()),
            #[cfg(feature = "json")]
            Bind::Json(value) => context.write_string_literal(&value.to_string()),
        }
    }
}

/// Only postgres spells NaN and the infinities, as quoted literals.
fn write_float<W, T>(context: &mut FormatContext<'_, W>, value: f64, display: T) -> Result<()>
where
    W: Write,
    T: Display,
{
    if value.is_finite() {
        return context.write_display(display);
    }
    match context.dialect {
        Dialect::Postgres if value.is_nan() => context.write_string_literal("NaN"),
        Dialect::Postgres if value > 0.0 => context.write_string_literal("Infinity"),
        Dialect::Postgres => context.write_string_literal("-Infinity"),
        dialect => Err(Error::NonFiniteFloat { dialect }),
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Array<T> {
    #[default]
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Array<T> {
    pub fn push(&mut self, value: T) {
        self.append(Self::One(value));
    }

    pub fn append(&mut self, other: Self) {
        let combined = match (std::mem::replace(self, Self::None), other) {
            (Self::None, values) | (values, Self::None) => values,
            (Self::One(a), Self::One(b)) => Self::Many(vec![a, b]),
            (Self::One(a), Self::Many(mut b)) => {
                b.insert(0, a);
                Self::Many(b)
            }
            (Self::Many(mut a), Self::One(b)) => {
                a.push(b);
                Self::Many(a)
            }
            (Self::Many(mut a), Self::Many(mut b)) => {
                a.append(&mut b);
                Self::Many(a)
            }
        };
        *self = combined;
    }

    pub fn len(&self) -> usize {
        match self {
            Array::None => 0,
            Array::One(_) => 1,
            Array::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Array::None => Default::default(),
            Array::One(one) => std::slice::from_ref(one).iter(),
            Array::Many(many) => many.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => Vec::new(),
            Self::One(one) => Vec::from([one]),
            Self::Many(many) => many,
        }
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

impl IntoBind for Bind {
    fn into_bind(self) -> Bind {
        self
    }
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        if let Some(value) = self {
            value.into_bind()
        } else {
            Bind::Null
        }
    }
}

macro_rules! impl_into_bind {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl IntoBind for $ty {
                fn into_bind(self) -> Bind {
                    Bind::$variant(self)
                }
            }
        )+
    };
}

impl_into_bind! {
    String => String,
    bool => Bool,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl IntoBind for &str {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_owned())
    }
}

impl IntoBind for &String {
    fn into_bind(self) -> Bind {
        Bind::String(self.clone())
    }
}

#[cfg(feature = "uuid")]
impl_into_bind! { uuid::Uuid => Uuid }

#[cfg(feature = "chrono")]
impl_into_bind! {
    chrono::NaiveDate => Date,
    chrono::NaiveDateTime => DateTime,
    chrono::DateTime<chrono::Utc> => DateTimeUtc,
}

#[cfg(feature = "json")]
impl_into_bind! { serde_json::Value => Json }
