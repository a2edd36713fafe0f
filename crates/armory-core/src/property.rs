//! Property descriptors for behavior configuration fields.
//!
//! Behavior types declare their configurable fields explicitly as a list of
//! [`PropertyDescriptor`]s. Each descriptor carries the field name, a value
//! type tag, an order key, a required flag and a codec that decodes a raw
//! string into the field and encodes it back.
//!
//! # Required Prefix
//!
//! [`extract`] sorts descriptors by order and applies the legacy
//! required-prefix rule: every property ordered before the last explicitly
//! required property is itself required, so required properties always form a
//! contiguous leading block.
//!
//! ```
//! use armory_core::property::{extract, PropertyDescriptor, ValueType};
//!
//! let table = extract(vec![
//!     PropertyDescriptor::detached("d", ValueType::Integer, 3),
//!     PropertyDescriptor::detached("c", ValueType::Integer, 2).required(),
//!     PropertyDescriptor::detached("a", ValueType::Integer, 0),
//!     PropertyDescriptor::detached("b", ValueType::Integer, 1),
//! ])
//! .unwrap();
//!
//! let required: Vec<_> = table.iter().filter(|p| p.is_required()).map(|p| p.name()).collect();
//! assert_eq!(required, vec!["a", "b", "c"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::behavior::{Behavior, BehaviorType};
use crate::error::{RegistryError, RegistryResult};

// =============================================================================
// Instigator
// =============================================================================

/// Whoever asked for a property change: a player, a command block, the
/// console.
pub trait Instigator: Send + Sync {
    /// Display name used in messages.
    fn name(&self) -> &str;
}

/// The server console.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Instigator for Console {
    fn name(&self) -> &'static str {
        "console"
    }
}

// =============================================================================
// Value Types
// =============================================================================

/// Type tag of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Signed or unsigned integer.
    Integer,
    /// Floating point number.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Free text.
    Text,
    /// One of a closed set of names.
    Enumeration,
    /// Anything else; decoded by a custom codec.
    Custom,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A value with a standard string encoding.
pub trait PropertyValue: Sized + Send + Sync + 'static {
    /// Type tag reported in descriptors.
    const VALUE_TYPE: ValueType;

    /// Parses a raw string.
    ///
    /// # Errors
    ///
    /// Returns the reason the string is not a valid value.
    fn decode(raw: &str) -> Result<Self, String>;

    /// Formats the value.
    fn encode(&self) -> String;
}

macro_rules! parsed_value {
    ($tag:ident => $($ty:ty),*) => {
        $(
            impl PropertyValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::$tag;

                fn decode(raw: &str) -> Result<Self, String> {
                    raw.trim().parse::<$ty>().map_err(|e| e.to_string())
                }

                fn encode(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

parsed_value!(Integer => i8, i16, i32, i64, u8, u16, u32, u64, usize);
parsed_value!(Float => f32, f64);

impl PropertyValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Boolean;

    fn decode(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("expected true or false, got `{other}`")),
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl PropertyValue for String {
    const VALUE_TYPE: ValueType = ValueType::Text;

    fn decode(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

// =============================================================================
// Codecs
// =============================================================================

/// Decodes raw strings into a field value and encodes them back.
pub trait PropertyCodec<V>: Send + Sync + 'static {
    /// Type tag reported in descriptors.
    fn value_type(&self) -> ValueType;

    /// Parses a raw string on behalf of `instigator`.
    ///
    /// # Errors
    ///
    /// Returns the reason the string was rejected.
    fn decode(&self, instigator: &dyn Instigator, raw: &str) -> Result<V, String>;

    /// Formats a value.
    fn encode(&self, value: &V) -> String;
}

/// Codec backed by [`PropertyValue`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl<V: PropertyValue> PropertyCodec<V> for StandardCodec {
    fn value_type(&self) -> ValueType {
        V::VALUE_TYPE
    }

    fn decode(&self, _instigator: &dyn Instigator, raw: &str) -> Result<V, String> {
        V::decode(raw)
    }

    fn encode(&self, value: &V) -> String {
        value.encode()
    }
}

type AssignFn =
    dyn Fn(&dyn Instigator, &mut dyn Behavior, &str) -> Result<(), String> + Send + Sync;
type ReadFn = dyn Fn(&dyn Behavior) -> Option<String> + Send + Sync;

// =============================================================================
// Accepted Values
// =============================================================================

/// Computes values for a behavior type.
pub type PresetFn = dyn Fn(&BehaviorType) -> Vec<String> + Send + Sync;

/// Source of values computed per behavior type.
#[derive(Clone, Default)]
pub enum Preset {
    /// No computed values.
    #[default]
    None,
    /// Trigger names of the shapes the type implements.
    Triggers,
    /// A custom provider.
    Provider(Arc<PresetFn>),
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Triggers => write!(f, "Triggers"),
            Self::Provider(_) => write!(f, "Provider(..)"),
        }
    }
}

/// Values a property accepts, for completion and validation.
#[derive(Debug, Clone, Default)]
pub struct AcceptedValues {
    /// Explicit literal values, as declared.
    pub values: Vec<String>,
    /// Computed values.
    pub preset: Preset,
}

impl AcceptedValues {
    /// Explicit values only.
    #[must_use]
    pub fn literal(values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| (*v).to_string()).collect(),
            preset: Preset::None,
        }
    }

    /// Adds a preset.
    #[must_use]
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }
}

// =============================================================================
// Property Descriptor
// =============================================================================

/// Metadata and codec of one configurable field.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    value_type: ValueType,
    order: i32,
    declared_required: bool,
    required: bool,
    custom_codec: bool,
    accepted: Option<AcceptedValues>,
    assign: Option<Arc<AssignFn>>,
    read: Option<Arc<ReadFn>>,
}

impl PropertyDescriptor {
    /// Describes field `name` of `T` using the [`StandardCodec`].
    pub fn field<T, V, G, S>(name: &str, order: i32, getter: G, setter: S) -> Self
    where
        T: Behavior,
        V: PropertyValue,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        S: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        Self::coded(name, order, getter, setter, StandardCodec)
    }

    /// Describes field `name` of `T` using a custom codec.
    pub fn coded<T, V, G, S, C>(name: &str, order: i32, getter: G, setter: S, codec: C) -> Self
    where
        T: Behavior,
        V: 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        S: Fn(&mut T) -> &mut V + Send + Sync + 'static,
        C: PropertyCodec<V>,
    {
        let value_type = <C as PropertyCodec<V>>::value_type(&codec);
        let codec = Arc::new(codec);
        let decoder = Arc::clone(&codec);
        let type_name = std::any::type_name::<T>();

        let assign = move |instigator: &dyn Instigator, behavior: &mut dyn Behavior, raw: &str| {
            let Some(target) = behavior.as_any_mut().downcast_mut::<T>() else {
                return Err(format!("not an instance of {type_name}"));
            };
            *setter(target) = <C as PropertyCodec<V>>::decode(&decoder, instigator, raw)?;
            Ok(())
        };
        let read = move |behavior: &dyn Behavior| {
            behavior
                .as_any()
                .downcast_ref::<T>()
                .map(|target| <C as PropertyCodec<V>>::encode(&codec, getter(target)))
        };

        Self {
            name: name.to_string(),
            value_type,
            order,
            declared_required: false,
            required: false,
            custom_codec: value_type == ValueType::Custom,
            accepted: None,
            assign: Some(Arc::new(assign)),
            read: Some(Arc::new(read)),
        }
    }

    /// Describes a property with no backing field. Assignment always fails;
    /// used for metadata-only tables.
    #[must_use]
    pub fn detached(name: &str, value_type: ValueType, order: i32) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            order,
            declared_required: false,
            required: false,
            custom_codec: false,
            accepted: None,
            assign: None,
            read: None,
        }
    }

    /// Marks the property as explicitly required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.declared_required = true;
        self.required = true;
        self
    }

    /// Attaches accepted values.
    #[must_use]
    pub fn accepting(mut self, accepted: AcceptedValues) -> Self {
        self.accepted = Some(accepted);
        self
    }

    /// Flags the codec as custom regardless of its value type.
    #[must_use]
    pub fn custom_codec(mut self) -> Self {
        self.custom_codec = true;
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value type tag.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the order key.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Returns true if the property was marked required by its declaration.
    #[must_use]
    pub fn is_declared_required(&self) -> bool {
        self.declared_required
    }

    /// Returns true if the property is required after the prefix rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the property uses a custom codec.
    #[must_use]
    pub fn has_custom_codec(&self) -> bool {
        self.custom_codec
    }

    /// Returns the accepted values, if declared.
    #[must_use]
    pub fn accepted(&self) -> Option<&AcceptedValues> {
        self.accepted.as_ref()
    }

    /// Decodes `raw` and assigns it to the field of `behavior`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PropertyValue`] naming this field when the
    /// codec rejects the value.
    pub fn assign(
        &self,
        instigator: &dyn Instigator,
        behavior: &mut dyn Behavior,
        raw: &str,
    ) -> RegistryResult<()> {
        let assign = self
            .assign
            .as_ref()
            .ok_or_else(|| self.value_error(raw, "property has no backing field".into()))?;
        assign(instigator, behavior, raw).map_err(|reason| self.value_error(raw, reason))
    }

    /// Encodes the current field value of `behavior`.
    #[must_use]
    pub fn read(&self, behavior: &dyn Behavior) -> Option<String> {
        self.read.as_ref().and_then(|read| read(behavior))
    }

    fn value_error(&self, raw: &str, reason: String) -> RegistryError {
        RegistryError::PropertyValue {
            property: self.name.clone(),
            value: raw.to_string(),
            reason,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("order", &self.order)
            .field("required", &self.required)
            .field("custom_codec", &self.custom_codec)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Property Table
// =============================================================================

/// The extracted, ordered properties of one behavior type.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    ordered: Vec<PropertyDescriptor>,
    by_name: HashMap<String, usize>,
}

impl PropertyTable {
    /// Looks up a property by field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|index| &self.ordered[*index])
    }

    /// Returns true if the table has a property named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates properties in order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.ordered.iter()
    }

    /// Iterates required properties in order.
    pub fn required(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.ordered.iter().filter(|p| p.required)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if the type declares no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Sorts declared properties by order and applies the required-prefix rule.
///
/// Sorting is stable, so properties sharing an order keep declaration order.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateProperty`] if two descriptors share a
/// name.
pub fn extract(mut declared: Vec<PropertyDescriptor>) -> RegistryResult<PropertyTable> {
    declared.sort_by_key(|p| p.order);

    let required_order = declared
        .iter()
        .rev()
        .find(|p| p.declared_required)
        .map(|p| p.order);

    let mut by_name = HashMap::with_capacity(declared.len());
    for (index, property) in declared.iter_mut().enumerate() {
        property.required =
            property.declared_required || required_order.is_some_and(|last| property.order < last);
        if by_name.insert(property.name.clone(), index).is_some() {
            return Err(RegistryError::DuplicateProperty {
                property: property.name.clone(),
            });
        }
    }

    Ok(PropertyTable {
        ordered: declared,
        by_name,
    })
}
