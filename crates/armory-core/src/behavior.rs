//! The behavior contract and its registered type handle.
//!
//! A behavior is a pluggable unit of effect logic. Instances implement
//! [`Behavior`]; the static side of a behavior type implements
//! [`BehaviorClass`], which supplies the zero-argument constructor, the
//! [`BehaviorMeta`] and the property descriptors. [`BehaviorType`] erases a
//! `BehaviorClass` into a cloneable handle the registry can store.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use armory_core::behavior::{Behavior, BehaviorClass, BehaviorMeta, BehaviorType};
//! use armory_core::property::PropertyDescriptor;
//! use armory_core::result::PowerResult;
//! use armory_core::shape::{Plain, ShapeKind, ShapeViews, TriggerContext};
//!
//! #[derive(Default)]
//! struct Flare {
//!     cooldown: u64,
//! }
//!
//! impl Plain for Flare {
//!     fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
//!         PowerResult::ok()
//!     }
//! }
//!
//! impl Behavior for Flare {
//!     fn name(&self) -> &'static str {
//!         "flare"
//!     }
//!     fn display_text(&self) -> String {
//!         format!("flare every {} ticks", self.cooldown)
//!     }
//!     fn views(self: Arc<Self>) -> ShapeViews {
//!         ShapeViews::new().with::<dyn Plain>(self)
//!     }
//! }
//!
//! impl BehaviorClass for Flare {
//!     fn construct() -> Result<Self, String> {
//!         Ok(Self::default())
//!     }
//!     fn meta() -> BehaviorMeta {
//!         BehaviorMeta::new().general(&[ShapeKind::Plain])
//!     }
//!     fn properties() -> Vec<PropertyDescriptor> {
//!         vec![PropertyDescriptor::field(
//!             "cooldown",
//!             0,
//!             |f: &Flare| &f.cooldown,
//!             |f: &mut Flare| &mut f.cooldown,
//!         )]
//!     }
//! }
//!
//! let ty = BehaviorType::of::<Flare>();
//! assert!(ty.instantiate().is_ok());
//! assert_eq!(ty.meta().general_shapes, vec![ShapeKind::Plain]);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{RegistryError, RegistryResult};
use crate::property::PropertyDescriptor;
use crate::shape::{ShapeKind, ShapeViews};

/// Bound on parent-chain walks; deeper chains are treated as cycles.
const MAX_PARENT_DEPTH: usize = 64;

// =============================================================================
// Behavior Trait
// =============================================================================

/// Downcasting support for behavior instances.
///
/// Blanket-implemented for every `'static + Send + Sync` type. Call it on a
/// `&dyn Behavior`, never on a smart pointer, or the pointer's own type is
/// reported.
pub trait AsAny: Any + Send + Sync {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behavior instance.
///
/// # Thread Safety
///
/// Behaviors are `Send + Sync`; the registry hands out shared `Arc`s and
/// triggers may fire from several threads.
pub trait Behavior: AsAny {
    /// Name of the behavior within its extension's namespace.
    fn name(&self) -> &str;

    /// Human readable description of the configured behavior.
    fn display_text(&self) -> String;

    /// Exposes the shapes this instance implements.
    ///
    /// The default exposes none.
    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
    }
}

/// Returns the concrete type id behind a behavior trait object.
#[must_use]
pub fn type_id_of(behavior: &dyn Behavior) -> TypeId {
    behavior.as_any().type_id()
}

// =============================================================================
// Behavior Meta
// =============================================================================

/// Static metadata declared by a behavior type.
#[derive(Debug, Clone, Default)]
pub struct BehaviorMeta {
    /// Trigger used when an item does not name one.
    pub default_trigger: Option<ShapeKind>,
    /// General shapes this type is adaptable from, most preferred first.
    pub general_shapes: Vec<ShapeKind>,
    /// Whether item configuration may change the trigger.
    pub immutable_trigger: bool,
    /// Declared parent type, for override subtype checks.
    pub parent: Option<BehaviorType>,
}

impl BehaviorMeta {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default trigger.
    #[must_use]
    pub fn default_trigger(mut self, trigger: ShapeKind) -> Self {
        self.default_trigger = Some(trigger);
        self
    }

    /// Sets the general shapes, most preferred first.
    #[must_use]
    pub fn general(mut self, shapes: &[ShapeKind]) -> Self {
        self.general_shapes = shapes.to_vec();
        self
    }

    /// Marks the trigger as immutable.
    #[must_use]
    pub fn immutable_trigger(mut self) -> Self {
        self.immutable_trigger = true;
        self
    }

    /// Declares `P` as the parent type.
    #[must_use]
    pub fn extends<P: BehaviorClass>(mut self) -> Self {
        self.parent = Some(BehaviorType::of::<P>());
        self
    }
}

// =============================================================================
// Behavior Class
// =============================================================================

/// The static side of a behavior type.
pub trait BehaviorClass: Behavior + Sized {
    /// Abstract types exist only as parents and are never registered.
    const ABSTRACT: bool = false;

    /// Zero-argument constructor.
    ///
    /// # Errors
    ///
    /// Returns a reason when the type cannot be instantiated.
    fn construct() -> Result<Self, String>;

    /// Declared metadata.
    fn meta() -> BehaviorMeta {
        BehaviorMeta::default()
    }

    /// Declared configurable properties, in any order.
    fn properties() -> Vec<PropertyDescriptor> {
        Vec::new()
    }
}

fn construct_erased<T: BehaviorClass>() -> Result<Box<dyn Behavior>, String> {
    T::construct().map(|behavior| Box::new(behavior) as Box<dyn Behavior>)
}

// =============================================================================
// Behavior Type
// =============================================================================

/// Type-erased handle of a behavior type.
///
/// Equality and hashing follow the underlying `TypeId`.
#[derive(Clone, Copy)]
pub struct BehaviorType {
    type_id: TypeId,
    type_name: &'static str,
    is_abstract: bool,
    construct: fn() -> Result<Box<dyn Behavior>, String>,
    meta: fn() -> BehaviorMeta,
    properties: fn() -> Vec<PropertyDescriptor>,
}

impl BehaviorType {
    /// Returns the handle for `T`.
    #[must_use]
    pub fn of<T: BehaviorClass>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            is_abstract: T::ABSTRACT,
            construct: construct_erased::<T>,
            meta: T::meta,
            properties: T::properties,
        }
    }

    /// Returns the `TypeId` of the behavior type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true for abstract parent types.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Returns true if `behavior` is an instance of this type.
    #[must_use]
    pub fn is_type_of(&self, behavior: &dyn Behavior) -> bool {
        type_id_of(behavior) == self.type_id
    }

    /// Constructs a fresh instance.
    ///
    /// Constructor errors and panics are both reported as
    /// [`RegistryError::NotInstantiable`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotInstantiable`] if construction fails.
    pub fn instantiate(&self) -> RegistryResult<Box<dyn Behavior>> {
        let construct = self.construct;
        match panic::catch_unwind(AssertUnwindSafe(construct)) {
            Ok(Ok(behavior)) => Ok(behavior),
            Ok(Err(reason)) => Err(self.not_instantiable(reason)),
            Err(payload) => Err(self.not_instantiable(panic_message(payload.as_ref()))),
        }
    }

    /// Returns the declared metadata.
    #[must_use]
    pub fn meta(&self) -> BehaviorMeta {
        (self.meta)()
    }

    /// Returns the declared property descriptors, unsorted.
    #[must_use]
    pub fn declared_properties(&self) -> Vec<PropertyDescriptor> {
        (self.properties)()
    }

    /// Returns the declared parent type.
    #[must_use]
    pub fn parent(&self) -> Option<BehaviorType> {
        self.meta().parent
    }

    /// Returns true if `self` is `ancestor` or declares it somewhere in its
    /// parent chain.
    #[must_use]
    pub fn descends_from(&self, ancestor: &BehaviorType) -> bool {
        let mut current = Some(*self);
        for _ in 0..MAX_PARENT_DEPTH {
            match current {
                Some(ty) if ty == *ancestor => return true,
                Some(ty) => current = ty.parent(),
                None => return false,
            }
        }
        false
    }

    /// Runs one of the type's declaration hooks, reporting a panic as
    /// [`RegistryError::HookPanicked`].
    pub(crate) fn guard<R>(
        &self,
        hook: &'static str,
        run: impl FnOnce() -> R,
    ) -> RegistryResult<R> {
        match panic::catch_unwind(AssertUnwindSafe(run)) {
            Ok(value) => Ok(value),
            Err(payload) => Err(RegistryError::HookPanicked {
                type_name: self.type_name,
                hook,
                reason: panic_message(payload.as_ref()),
            }),
        }
    }

    fn not_instantiable(&self, reason: String) -> RegistryError {
        RegistryError::NotInstantiable {
            type_name: self.type_name.to_string(),
            reason,
        }
    }
}

impl PartialEq for BehaviorType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for BehaviorType {}

impl Hash for BehaviorType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for BehaviorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BehaviorType")
            .field(&self.type_name)
            .finish()
    }
}

impl fmt::Display for BehaviorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}
