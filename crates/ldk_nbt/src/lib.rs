#![doc = include_str!("../README.md")]
// Run locally with `RUSTDOCFLAGS="--cfg docsrs" cargo +nightly doc --all-features --open`
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "binary")]
#[cfg_attr(docsrs, doc(cfg(feature = "binary")))]
pub use binary::{from_binary, to_binary, Compression};
pub use compound::Compound;
pub use error::{Result, TagError};
pub use list::List;
#[cfg(feature = "mojangson")]
#[cfg_attr(docsrs, doc(cfg(feature = "mojangson")))]
pub use mojangson::{from_mojangson, to_mojangson, to_mojangson_colored};
pub use tag::{NamedTag, Tag};
pub use tag_type::TagType;

#[cfg(feature = "binary")]
#[cfg_attr(docsrs, doc(cfg(feature = "binary")))]
pub mod binary;
pub mod compound;
mod error;
#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub mod json;
pub mod list;
#[cfg(feature = "mojangson")]
#[cfg_attr(docsrs, doc(cfg(feature = "mojangson")))]
pub mod mojangson;
mod tag;
mod tag_type;

/// Maximum nesting of containers accepted by the binary reader and the
/// Mojangson parser, to avoid overflowing the call stack.
pub const MAX_DEPTH: usize = 512;

/// A convenience macro for constructing [`Compound`]s.
///
/// Key expressions must implement `Into<String>` while value expressions must
/// implement `Into<Tag>`.
///
/// # Examples
///
/// ```
/// use ldk_nbt::{compound, List};
///
/// let c = compound! {
///     "byte" => 123_i8,
///     "list_of_int" => List::from_tags([3, -7, 5]).unwrap(),
///     "string" => "aé日",
///     "compound" => compound! {
///         "foo" => 1,
///         "bar" => 2,
///     },
///     "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
///     "byte_array" => vec![0_i8, 2, 3],
///     "long_array" => vec![123_i64, 456, 789],
/// };
///
/// assert_eq!(c.get_int_array("int_array").unwrap()[1], -9);
/// ```
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Compound as ::std::iter::FromIterator<(::std::string::String, $crate::Tag)>>::from_iter([
            $(
                (
                    ::std::convert::Into::<::std::string::String>::into($key),
                    ::std::convert::Into::<$crate::Tag>::into($value)
                ),
            )*
        ])
    };
}
