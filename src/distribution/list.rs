//! Count-plus-items list encoding shared by every repeated field of the distribution schema.
//!
//! CloudFront never relies on implicit list length. Each repeated element travels as
//!
//! ```xml
//! <Parent><Quantity>N</Quantity><Items><Tag>v1</Tag>...<Tag>vN</Tag></Items></Parent>
//! ```
//!
//! where `Tag` depends on the field. [`TaggedList`] keeps a plain `Vec<T>` for callers and
//! only projects into that shape at the serialization boundary through [`encode`]. The
//! quantity is always derived from the item count; it is never stored.

// std
use std::ops::{Deref, DerefMut};
// crates.io
use serde::{
	Deserializer, Serializer,
	de::{self, IgnoredAny, MapAccess, Visitor},
	ser::SerializeStruct,
};
// self
use crate::_prelude::*;

/// Element tag wrapping each item of an encoded list.
pub trait ListTag
where
	Self: 'static + Send + Sync,
{
	/// XML element name used for every item.
	const TAG: &'static str;
}

macro_rules! def_tag {
	($name:ident, $tag:literal) => {
		#[doc = concat!("Wraps list items in `<", $tag, ">` elements.")]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub struct $name;
		impl ListTag for $name {
			const TAG: &'static str = $tag;
		}
	};
}

def_tag! { CnameTag, "CNAME" }
def_tag! { OriginTag, "Origin" }
def_tag! { CacheBehaviorTag, "CacheBehavior" }
def_tag! { CustomErrorResponseTag, "CustomErrorResponse" }
def_tag! { NameTag, "Name" }
def_tag! { AwsAccountNumberTag, "AWSAccountNumber" }
def_tag! { LocationTag, "Location" }
def_tag! { MethodTag, "Method" }

/// Wire projection of an ordered collection: derived quantity plus tagged items.
///
/// Borrowed view produced by [`encode`]; it never owns or mutates the collection.
#[derive(Clone, Copy, Debug)]
pub struct Encoded<'a, T> {
	tag: &'static str,
	items: &'a [T],
}
impl<'a, T> Encoded<'a, T> {
	/// Cardinality emitted as `<Quantity>`.
	pub fn quantity(&self) -> usize {
		self.items.len()
	}

	/// Items in their original order.
	pub fn items(&self) -> &'a [T] {
		self.items
	}

	/// Element tag wrapping each item.
	pub fn tag(&self) -> &'static str {
		self.tag
	}
}
impl<T> Serialize for Encoded<'_, T>
where
	T: Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("Encoded", 2)?;

		encode_fields(&mut state, self.tag, self.items)?;

		state.end()
	}
}

/// Projects `items` into the count-plus-items wire shape under `tag`.
pub fn encode<'a, T>(items: &'a [T], tag: &'static str) -> Encoded<'a, T> {
	Encoded { tag, items }
}

/// Writes `Quantity` and `Items` into an open struct so composite elements (trusted signers,
/// geo restrictions, allowed methods) can prefix their own fields.
///
/// An empty list still writes `<Quantity>0</Quantity>`; only `<Items>` is left out.
pub(crate) fn encode_fields<S, T>(
	state: &mut S,
	tag: &'static str,
	items: &[T],
) -> Result<(), S::Error>
where
	S: SerializeStruct,
	T: Serialize,
{
	state.serialize_field("Quantity", &items.len())?;

	if items.is_empty() {
		state.skip_field("Items")
	} else {
		state.serialize_field("Items", &ItemsRef { tag, items })
	}
}

struct ItemsRef<'a, T> {
	tag: &'static str,
	items: &'a [T],
}
impl<T> Serialize for ItemsRef<'_, T>
where
	T: Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("Items", 1)?;

		state.serialize_field(self.tag, self.items)?;
		state.end()
	}
}

/// Decoded `<Items>` element: every child named `K::TAG`, in document order.
pub(crate) struct TaggedItems<T, K>(pub(crate) Vec<T>, PhantomData<K>);
impl<'de, T, K> Deserialize<'de> for TaggedItems<T, K>
where
	T: Deserialize<'de>,
	K: ListTag,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct ItemsVisitor<T, K>(PhantomData<(T, K)>);
		impl<'de, T, K> Visitor<'de> for ItemsVisitor<T, K>
		where
			T: Deserialize<'de>,
			K: ListTag,
		{
			type Value = TaggedItems<T, K>;

			fn expecting(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "an <Items> element holding <{}> children", K::TAG)
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut items = Vec::new();

				while let Some(key) = map.next_key::<String>()? {
					if key == K::TAG {
						items.extend(map.next_value::<Vec<T>>()?);
					} else {
						map.next_value::<IgnoredAny>()?;
					}
				}

				Ok(TaggedItems(items, PhantomData))
			}

			fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				if v.trim().is_empty() {
					Ok(TaggedItems(Vec::new(), PhantomData))
				} else {
					Err(E::invalid_value(de::Unexpected::Str(v), &self))
				}
			}
		}

		deserializer.deserialize_map(ItemsVisitor(PhantomData))
	}
}

/// Verifies the declared quantity against the decoded items.
pub(crate) fn checked_items<T, E>(
	tag: &'static str,
	quantity: usize,
	items: Option<Vec<T>>,
) -> Result<Vec<T>, E>
where
	E: de::Error,
{
	let items = items.unwrap_or_default();

	if quantity == items.len() {
		Ok(items)
	} else {
		Err(E::custom(format_args!(
			"<{tag}> list declares Quantity {quantity} but holds {} items",
			items.len()
		)))
	}
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, K: ListTag"))]
struct EncodedWire<T, K> {
	#[serde(rename = "Quantity")]
	quantity: usize,
	#[serde(rename = "Items")]
	items: Option<TaggedItems<T, K>>,
}

/// Ordered collection that serializes as CloudFront's count-plus-items shape.
///
/// Insertion order and duplicates are preserved. The collection dereferences to `Vec<T>`,
/// so it reads and mutates like one.
pub struct TaggedList<T, K> {
	items: Vec<T>,
	_tag: PhantomData<K>,
}
impl<T, K> TaggedList<T, K>
where
	K: ListTag,
{
	/// Creates an empty list.
	pub fn new() -> Self {
		Self { items: Vec::new(), _tag: PhantomData }
	}

	/// Wire projection of the current items.
	pub fn encoded(&self) -> Encoded<'_, T> {
		encode(&self.items, K::TAG)
	}

	/// Consumes the list, returning the plain items.
	pub fn into_inner(self) -> Vec<T> {
		self.items
	}
}
impl<T, K> Default for TaggedList<T, K>
where
	K: ListTag,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<T, K> Clone for TaggedList<T, K>
where
	T: Clone,
{
	fn clone(&self) -> Self {
		Self { items: self.items.clone(), _tag: PhantomData }
	}
}
impl<T, K> Debug for TaggedList<T, K>
where
	T: Debug,
	K: ListTag,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TaggedList").field("tag", &K::TAG).field("items", &self.items).finish()
	}
}
impl<T, K> PartialEq for TaggedList<T, K>
where
	T: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.items == other.items
	}
}
impl<T, K> Eq for TaggedList<T, K> where T: Eq {}
impl<T, K> Deref for TaggedList<T, K> {
	type Target = Vec<T>;

	fn deref(&self) -> &Self::Target {
		&self.items
	}
}
impl<T, K> DerefMut for TaggedList<T, K> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.items
	}
}
impl<T, K> From<Vec<T>> for TaggedList<T, K> {
	fn from(items: Vec<T>) -> Self {
		Self { items, _tag: PhantomData }
	}
}
impl<T, K> FromIterator<T> for TaggedList<T, K> {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = T>,
	{
		Self::from(iter.into_iter().collect::<Vec<_>>())
	}
}
impl<T, K> IntoIterator for TaggedList<T, K> {
	type IntoIter = std::vec::IntoIter<T>;
	type Item = T;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}
impl<'a, T, K> IntoIterator for &'a TaggedList<T, K> {
	type IntoIter = std::slice::Iter<'a, T>;
	type Item = &'a T;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
impl<T, K> Serialize for TaggedList<T, K>
where
	T: Serialize,
	K: ListTag,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.encoded().serialize(serializer)
	}
}
impl<'de, T, K> Deserialize<'de> for TaggedList<T, K>
where
	T: Deserialize<'de>,
	K: ListTag,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let wire = EncodedWire::<T, K>::deserialize(deserializer)?;
		let items = checked_items::<T, D::Error>(K::TAG, wire.quantity, wire.items.map(|items| items.0))?;

		Ok(Self::from(items))
	}
}
