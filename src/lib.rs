#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

pub use ldk_nbt as nbt;

/// Contains the most frequently used items.
///
/// # Examples
///
/// ```
/// use ldk::prelude::*; // Glob import.
///
/// let mut player = Compound::new();
/// player.set_string("Name", "Steve");
/// player.set_int("XpLevel", 30);
///
/// assert_eq!(player.get_int("XpLevel").unwrap(), 30);
/// ```
pub mod prelude {
    #[cfg(feature = "binary")]
    pub use ldk_nbt::binary::Compression;
    #[cfg(feature = "mojangson")]
    pub use ldk_nbt::mojangson::{MojangsonReader, MojangsonWriter};
    pub use ldk_nbt::{compound, Compound, List, NamedTag, Tag, TagError, TagType};
    #[cfg(feature = "binary")]
    pub use ldk_nbt::{from_binary, to_binary};
    #[cfg(feature = "mojangson")]
    pub use ldk_nbt::{from_mojangson, to_mojangson, to_mojangson_colored};
}
